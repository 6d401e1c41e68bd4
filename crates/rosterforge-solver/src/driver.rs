//! Round driver: one bounded increment of work per call.

use std::fmt::{self, Debug};
use std::sync::Arc;

use rosterforge_core::{Optimizer, OptimizerError, PlanningSolution, ProblemInput};
use tracing::{debug, info, warn};

use crate::handle::SolverHandle;
use crate::stats::RunStats;

/// Outcome of one round, or the final state of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundReport<S, I> {
    pub finished: bool,
    pub best_solution: S,
    pub iteration_info: I,
}

impl<S, I> RoundReport<S, I> {
    /// Marks this report as the last one of its run.
    pub fn into_final(mut self) -> Self {
        self.finished = true;
        self
    }
}

/// Report type produced for optimizer `O`.
pub type Report<O> = RoundReport<<O as Optimizer>::Solution, <O as Optimizer>::Info>;

type ScoreOf<O> = <<O as Optimizer>::Solution as PlanningSolution>::Score;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// The optimizer reported it is finished.
    Completed,
    /// A cancel was observed at a round boundary.
    Cancelled,
    /// A new `start` abandoned the run.
    Replaced,
    /// The optimizer returned an error.
    Failed,
    /// The hosting context was torn down.
    Shutdown,
    /// The round guard of a one-shot solve was hit.
    RoundLimit,
}

impl FinishReason {
    pub fn as_str(self) -> &'static str {
        match self {
            FinishReason::Completed => "completed",
            FinishReason::Cancelled => "cancelled",
            FinishReason::Replaced => "replaced",
            FinishReason::Failed => "failed",
            FinishReason::Shutdown => "shutdown",
            FinishReason::RoundLimit => "round_limit",
        }
    }
}

/// Drives a [`SolverHandle`] one round at a time.
///
/// After every round the driver compares the new best score with the
/// previous one. A worsening score breaks the optimizer contract; it is
/// logged, or turned into an error when score assertions are enabled.
pub struct RoundDriver<O: Optimizer> {
    handle: SolverHandle<O>,
    stats: RunStats,
    best_score: ScoreOf<O>,
    assert_scores: bool,
}

impl<O: Optimizer> RoundDriver<O> {
    /// Creates a handle for `input` and starts the run clock.
    pub fn start(
        optimizer: Arc<O>,
        input: &ProblemInput,
        run_id: u64,
    ) -> Result<Self, OptimizerError> {
        let handle = SolverHandle::create(optimizer, input, run_id)?;
        let best_score = handle.best_solution().score();
        let mut stats = RunStats::default();
        stats.start();

        info!(
            event = "run_start",
            run = run_id,
            optimizer = handle.optimizer().name(),
            days = input.day_count(),
            resources = input.resources.len(),
            seed_score = %best_score,
        );

        Ok(Self {
            handle,
            stats,
            best_score,
            assert_scores: false,
        })
    }

    /// Fails a round whose best score is worse than the previous one.
    pub fn with_score_assertions(mut self, enabled: bool) -> Self {
        self.assert_scores = enabled;
        self
    }

    pub fn run_id(&self) -> u64 {
        self.handle.run_id()
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn best_score(&self) -> ScoreOf<O> {
        self.best_score
    }

    /// Executes one round and snapshots the result.
    pub fn run_round(&mut self) -> Result<Report<O>, OptimizerError> {
        self.handle.execute_round()?;

        let best_solution = self.handle.best_solution();
        let score = best_solution.score();
        if score < self.best_score {
            if self.assert_scores {
                return Err(OptimizerError::Internal(format!(
                    "best score worsened from {} to {}",
                    self.best_score, score
                )));
            }
            warn!(
                event = "best_score_worsened",
                run = self.run_id(),
                previous = %self.best_score,
                score = %score,
            );
        }
        let improved = score > self.best_score;
        self.best_score = score;
        self.stats.record_round(improved);

        let finished = self.handle.is_finished();
        debug!(
            event = "round_end",
            run = self.run_id(),
            round = self.stats.round_count,
            score = %score,
            improved = improved,
            finished = finished,
        );

        Ok(RoundReport {
            finished,
            best_solution,
            iteration_info: self.handle.iteration_info(),
        })
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Snapshot of the current state without running a round.
    pub fn report(&self) -> Report<O> {
        RoundReport {
            finished: self.handle.is_finished(),
            best_solution: self.handle.best_solution(),
            iteration_info: self.handle.iteration_info(),
        }
    }

    /// Releases the handle and returns the run statistics.
    pub fn finish(self, reason: FinishReason) -> RunStats {
        let Self {
            handle,
            stats,
            best_score,
            ..
        } = self;
        let run_id = handle.run_id();
        handle.release();

        info!(
            event = "run_end",
            run = run_id,
            reason = reason.as_str(),
            rounds = stats.round_count,
            duration_ms = stats.elapsed_ms(),
            speed = stats.rounds_per_second(),
            score = %best_score,
        );
        stats
    }
}

impl<O: Optimizer> Debug for RoundDriver<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundDriver")
            .field("handle", &self.handle)
            .field("stats", &self.stats)
            .field("best_score", &self.best_score)
            .finish()
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
