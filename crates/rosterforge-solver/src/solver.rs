//! One-shot solving on top of the round protocol.

use std::fmt::{self, Debug};
use std::sync::Arc;

use rosterforge_config::SolverConfig;
use rosterforge_core::{Optimizer, OptimizerError, ProblemInput};

use crate::cancel::CancelFlag;
use crate::driver::{FinishReason, Report, RoundDriver, RoundReport};
use crate::stats::RunStats;

/// Runs an optimizer round after round until it finishes.
///
/// This is the degenerate use of the round protocol: one caller, no ticks,
/// the whole run on the calling thread.
///
/// # Example
///
/// ```
/// use rosterforge_solver::Solver;
/// use rosterforge_test::{week_input, StubOptimizer};
///
/// let mut solver = Solver::new(StubOptimizer::new().finishing_after(4));
/// let outcome = solver.solve(&week_input()).unwrap();
///
/// assert!(outcome.report.finished);
/// assert_eq!(outcome.stats.round_count, 4);
/// ```
pub struct Solver<O: Optimizer> {
    optimizer: Arc<O>,
    max_rounds: Option<u64>,
    assert_scores: bool,
    terminate_early_flag: CancelFlag,
}

/// Final state of a one-shot solve.
#[derive(Debug, Clone)]
pub struct SolveOutcome<S, I> {
    pub report: RoundReport<S, I>,
    pub stats: RunStats,
    pub reason: FinishReason,
}

impl<S, I> SolveOutcome<S, I> {
    pub fn into_solution(self) -> S {
        self.report.best_solution
    }
}

impl<O: Optimizer> Solver<O> {
    pub fn new(optimizer: O) -> Self {
        Self {
            optimizer: Arc::new(optimizer),
            max_rounds: None,
            assert_scores: false,
            terminate_early_flag: CancelFlag::new(),
        }
    }

    /// Stops after `rounds` rounds even if the optimizer is not finished.
    pub fn with_max_rounds(mut self, rounds: u64) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    /// Applies the score assertions of `config`'s environment mode.
    pub fn with_config(mut self, config: &SolverConfig) -> Self {
        self.assert_scores = config.environment_mode.is_asserted();
        self
    }

    /// Requests early termination. Thread-safe; the current round completes.
    pub fn terminate_early(&self) {
        self.terminate_early_flag.request();
    }

    /// Flag that another thread can use to stop this solver.
    pub fn terminate_early_flag(&self) -> CancelFlag {
        self.terminate_early_flag.clone()
    }

    /// Solves `input`, always releasing the handle before returning.
    pub fn solve(
        &mut self,
        input: &ProblemInput,
    ) -> Result<SolveOutcome<O::Solution, O::Info>, OptimizerError> {
        self.terminate_early_flag.clear();
        let mut driver = RoundDriver::start(Arc::clone(&self.optimizer), input, 1)?
            .with_score_assertions(self.assert_scores);

        let (report, reason) = loop {
            let report: Report<O> = match driver.run_round() {
                Ok(report) => report,
                Err(err) => {
                    driver.finish(FinishReason::Failed);
                    return Err(err);
                }
            };
            if report.finished {
                break (report, FinishReason::Completed);
            }
            if self.terminate_early_flag.is_requested() {
                break (report.into_final(), FinishReason::Cancelled);
            }
            if self
                .max_rounds
                .is_some_and(|max| driver.stats().round_count >= max)
            {
                break (report.into_final(), FinishReason::RoundLimit);
            }
        };

        let stats = driver.finish(reason);
        Ok(SolveOutcome {
            report,
            stats,
            reason,
        })
    }
}

impl<O: Optimizer> Debug for Solver<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solver")
            .field("optimizer", &self.optimizer.name())
            .field("max_rounds", &self.max_rounds)
            .finish()
    }
}

/// Solves `input` with `optimizer` and returns the best solution.
pub fn solve<O: Optimizer>(
    optimizer: O,
    input: &ProblemInput,
) -> Result<O::Solution, OptimizerError> {
    Ok(Solver::new(optimizer).solve(input)?.into_solution())
}
