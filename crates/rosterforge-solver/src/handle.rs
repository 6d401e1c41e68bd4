//! Owned wrapper around one optimizer run.

use std::fmt::{self, Debug};
use std::sync::Arc;

use rosterforge_core::{Optimizer, OptimizerError, ProblemInput};
use tracing::{debug, warn};

/// Exclusive owner of an optimizer's opaque run state.
///
/// The wrapped state is given back to the optimizer exactly once: either by
/// [`release`](Self::release), which consumes the handle, or by `Drop` if the
/// handle goes out of scope unreleased. A handle is neither `Clone` nor
/// reachable after release, so double release and use after release cannot
/// be expressed.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use rosterforge_solver::SolverHandle;
/// use rosterforge_test::{week_input, StubOptimizer};
///
/// let optimizer = StubOptimizer::new();
/// let counts = optimizer.counts();
///
/// let mut handle = SolverHandle::create(Arc::new(optimizer), &week_input(), 1).unwrap();
/// handle.execute_round().unwrap();
/// assert_eq!(handle.rounds(), 1);
///
/// handle.release();
/// assert_eq!(counts.live(), 0);
/// ```
pub struct SolverHandle<O: Optimizer> {
    optimizer: Arc<O>,
    // Only `None` while `release` or `drop` is running.
    state: Option<O::Handle>,
    run_id: u64,
    rounds: u64,
}

impl<O: Optimizer> SolverHandle<O> {
    /// Validates `input` and allocates a new run.
    pub fn create(
        optimizer: Arc<O>,
        input: &ProblemInput,
        run_id: u64,
    ) -> Result<Self, OptimizerError> {
        input.validate()?;
        let state = optimizer.create(input)?;
        debug!(event = "handle_created", run = run_id, optimizer = optimizer.name());
        Ok(Self {
            optimizer,
            state: Some(state),
            run_id,
            rounds: 0,
        })
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// Rounds executed through this handle.
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    pub fn optimizer(&self) -> &O {
        &self.optimizer
    }

    /// Advances the run by one round.
    pub fn execute_round(&mut self) -> Result<(), OptimizerError> {
        let optimizer = Arc::clone(&self.optimizer);
        optimizer.execute_round(self.state_mut())?;
        self.rounds += 1;
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.optimizer.is_finished(self.state())
    }

    pub fn best_solution(&self) -> O::Solution {
        self.optimizer.best_solution(self.state())
    }

    pub fn iteration_info(&self) -> O::Info {
        self.optimizer.iteration_info(self.state())
    }

    /// Gives the run state back to the optimizer.
    pub fn release(mut self) {
        self.release_state();
        debug!(event = "handle_released", run = self.run_id, rounds = self.rounds);
    }

    fn release_state(&mut self) -> bool {
        match self.state.take() {
            Some(state) => {
                self.optimizer.release(state);
                true
            }
            None => false,
        }
    }

    fn state(&self) -> &O::Handle {
        match &self.state {
            Some(state) => state,
            None => unreachable!("solver handle state is only taken on release"),
        }
    }

    fn state_mut(&mut self) -> &mut O::Handle {
        match &mut self.state {
            Some(state) => state,
            None => unreachable!("solver handle state is only taken on release"),
        }
    }
}

impl<O: Optimizer> Drop for SolverHandle<O> {
    fn drop(&mut self) {
        if self.release_state() {
            warn!(
                event = "handle_released_on_drop",
                run = self.run_id,
                rounds = self.rounds,
            );
        }
    }
}

impl<O: Optimizer> Debug for SolverHandle<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolverHandle")
            .field("optimizer", &self.optimizer.name())
            .field("run_id", &self.run_id)
            .field("rounds", &self.rounds)
            .finish()
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
