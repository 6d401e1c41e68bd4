//! Execution context: the run state machine behind the message protocol.
//!
//! ```text
//!          start              round done, not finished
//!  Idle ─────────────▶ Running ◀──────────────┐
//!                          │  tick ────────────┘
//!                          │ cancel / flag seen at a boundary
//!                          ▼
//!                      Cancelling ──▶ Finished ──start──▶ Running
//!                                        ▲
//!       round done and finished, or error┘
//! ```
//!
//! Invalid input leaves the state as it was. Any other optimizer error,
//! including a failed `create`, ends in `Finished`.
//!
//! A context processes one request at a time and runs at most one round per
//! request. It owns at most one live [`RoundDriver`], and only while the run
//! state is `Running` or `Cancelling`.

use std::fmt::{self, Debug};
use std::sync::Arc;

use rosterforge_core::{Optimizer, OptimizerError, ProblemInput};
use tracing::{debug, error, info, warn};

use crate::cancel::CancelFlag;
use crate::driver::{FinishReason, Report, RoundDriver};
use crate::message::{Request, Response};

/// Lifecycle state of the run hosted by an [`ExecutionContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    /// No run has been started.
    Idle,
    /// A run is active and waiting for the next tick.
    Running,
    /// A cancel was observed; the run ends at this boundary.
    Cancelling,
    /// The last run ended.
    Finished,
}

impl RunState {
    pub fn as_str(self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Cancelling => "cancelling",
            RunState::Finished => "finished",
        }
    }

    /// True while a solver handle is live.
    pub fn is_active(self) -> bool {
        matches!(self, RunState::Running | RunState::Cancelling)
    }
}

/// Response type produced for optimizer `O`.
pub type ContextResponse<O> = Response<<O as Optimizer>::Solution, <O as Optimizer>::Info>;

/// Hosts one run at a time and answers protocol requests.
pub struct ExecutionContext<O: Optimizer> {
    optimizer: Arc<O>,
    state: RunState,
    driver: Option<RoundDriver<O>>,
    cancel: CancelFlag,
    runs_started: u64,
    assert_scores: bool,
}

impl<O: Optimizer> ExecutionContext<O> {
    pub fn new(optimizer: O) -> Self {
        Self {
            optimizer: Arc::new(optimizer),
            state: RunState::Idle,
            driver: None,
            cancel: CancelFlag::new(),
            runs_started: 0,
            assert_scores: false,
        }
    }

    /// Shares `flag` with a caller so cancellation can be requested while a
    /// round is in flight.
    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = flag;
        self
    }

    /// Treats a worsening best score as an optimizer failure.
    pub fn with_score_assertions(mut self, enabled: bool) -> Self {
        self.assert_scores = enabled;
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn has_live_handle(&self) -> bool {
        self.driver.is_some()
    }

    pub fn cancel_flag(&self) -> &CancelFlag {
        &self.cancel
    }

    /// Number of runs that got a handle.
    pub fn runs_started(&self) -> u64 {
        self.runs_started
    }

    /// Processes one request. Returns the response to emit, if any.
    pub fn handle(&mut self, request: Request) -> Option<ContextResponse<O>> {
        match request {
            Request::Start(input) => Some(self.start(input)),
            Request::Tick => self.tick(),
            Request::Cancel => self.cancel(),
        }
    }

    /// Starts a new run and executes its first round.
    ///
    /// Invalid input is rejected before anything else happens, so an
    /// active run survives a bad `start`. A valid `start` releases the
    /// active run's handle before the new one is created, and drops any
    /// cancel request left over from before it.
    pub fn start(&mut self, input: ProblemInput) -> ContextResponse<O> {
        if let Err(err) = input.validate() {
            warn!(event = "start_rejected", state = self.state.as_str(), error = %err);
            return Response::failure(&OptimizerError::from(err));
        }
        self.cancel.clear();

        let replaced = self.release(FinishReason::Replaced);
        if replaced {
            self.state = RunState::Finished;
        }

        let run_id = self.runs_started + 1;
        let mut driver = match RoundDriver::start(Arc::clone(&self.optimizer), &input, run_id) {
            Ok(driver) => driver.with_score_assertions(self.assert_scores),
            Err(err) => {
                error!(event = "create_failed", run = run_id, error = %err);
                if let OptimizerError::Internal(_) = err {
                    self.state = RunState::Finished;
                }
                return Response::failure(&err);
            }
        };
        self.runs_started = run_id;
        self.state = RunState::Running;

        let outcome = driver.run_round();
        self.driver = Some(driver);
        self.conclude_round(outcome)
    }

    /// Executes one more round of the active run.
    pub fn tick(&mut self) -> Option<ContextResponse<O>> {
        if self.state != RunState::Running {
            debug!(event = "tick_ignored", state = self.state.as_str());
            return None;
        }
        if self.cancel.is_requested() {
            return self.cancel();
        }
        let outcome = self.driver.as_mut()?.run_round();
        Some(self.conclude_round(outcome))
    }

    /// Ends the active run without another round.
    pub fn cancel(&mut self) -> Option<ContextResponse<O>> {
        if !self.state.is_active() {
            debug!(event = "cancel_ignored", state = self.state.as_str());
            return None;
        }
        self.state = RunState::Cancelling;
        let report = self.driver.as_ref()?.report();
        Some(self.finish(FinishReason::Cancelled, report))
    }

    /// Releases a live handle. The context ends up `Finished` if a run was
    /// active.
    pub fn shutdown(&mut self) {
        if self.release(FinishReason::Shutdown) {
            self.state = RunState::Finished;
        }
    }

    fn conclude_round(
        &mut self,
        outcome: Result<Report<O>, OptimizerError>,
    ) -> ContextResponse<O> {
        match outcome {
            Ok(report) if report.finished => self.finish(FinishReason::Completed, report),
            Ok(report) if self.cancel.is_requested() => {
                self.state = RunState::Cancelling;
                self.finish(FinishReason::Cancelled, report)
            }
            Ok(report) => Response::from(report),
            Err(err) => {
                error!(
                    event = "round_failed",
                    run = self.runs_started,
                    error = %err,
                );
                self.release(FinishReason::Failed);
                self.state = RunState::Finished;
                Response::failure(&err)
            }
        }
    }

    fn finish(&mut self, reason: FinishReason, report: Report<O>) -> ContextResponse<O> {
        self.release(reason);
        self.state = RunState::Finished;
        Response::from(report.into_final())
    }

    fn release(&mut self, reason: FinishReason) -> bool {
        match self.driver.take() {
            Some(driver) => {
                if reason == FinishReason::Replaced {
                    info!(event = "run_abandoned", run = driver.run_id());
                }
                driver.finish(reason);
                true
            }
            None => false,
        }
    }
}

impl<O: Optimizer> Drop for ExecutionContext<O> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<O: Optimizer> Debug for ExecutionContext<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("optimizer", &self.optimizer.name())
            .field("state", &self.state)
            .field("driver", &self.driver)
            .field("cancel", &self.cancel)
            .finish()
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
