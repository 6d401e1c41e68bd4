//! A deterministic optimizer that records its handle lifecycle.
//!
//! The seed assigns resources round-robin and scores
//! `0hard/-<seed_penalty>soft`. Round 1 commits the seed unchanged. Every
//! later round improves the soft score by one until it reaches zero or the
//! configured finish round is hit.

use std::fmt::{self, Debug};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rosterforge_core::{
    Assignment, HardSoftScore, IterationInfo, Optimizer, OptimizerError, ProblemInput,
    ResourceId, RoundPhase, Schedule,
};

/// Shared counters observed by tests.
#[derive(Debug, Default)]
pub struct LifecycleCounts {
    created: AtomicUsize,
    released: AtomicUsize,
    rounds: AtomicUsize,
}

impl LifecycleCounts {
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    /// Handles created but not yet released.
    pub fn live(&self) -> usize {
        self.created() - self.released()
    }

    /// Rounds executed across all handles.
    pub fn rounds(&self) -> usize {
        self.rounds.load(Ordering::SeqCst)
    }
}

/// Solver state of the stub.
#[derive(Debug)]
pub struct StubHandle {
    serial: usize,
    assignments: Vec<Assignment>,
    round: u64,
    best: HardSoftScore,
    improved: bool,
    rounds_since_improvement: u64,
}

impl StubHandle {
    /// Creation order of this handle, starting at 1.
    pub fn serial(&self) -> usize {
        self.serial
    }
}

/// Called with the round number while that round is in flight.
pub type RoundHook = Arc<dyn Fn(u64) + Send + Sync>;

#[derive(Clone)]
pub struct StubOptimizer {
    counts: Arc<LifecycleCounts>,
    seed_penalty: i64,
    finish_after: u64,
    fail_on_create: Option<usize>,
    fail_on_round: Option<u64>,
    round_delay: Duration,
    round_hook: Option<RoundHook>,
}

impl Default for StubOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

impl StubOptimizer {
    pub fn new() -> Self {
        Self {
            counts: Arc::new(LifecycleCounts::default()),
            seed_penalty: 10,
            finish_after: 5,
            fail_on_create: None,
            fail_on_round: None,
            round_delay: Duration::ZERO,
            round_hook: None,
        }
    }

    /// Finishes once `rounds` rounds have executed.
    pub fn finishing_after(mut self, rounds: u64) -> Self {
        self.finish_after = rounds;
        self
    }

    /// Soft penalty of the seed.
    pub fn with_seed_penalty(mut self, penalty: i64) -> Self {
        self.seed_penalty = penalty;
        self
    }

    /// Makes `create` fail with an internal error instead of creating
    /// handle number `serial`. Failed attempts do not count as created.
    pub fn failing_on_create(mut self, serial: usize) -> Self {
        self.fail_on_create = Some(serial);
        self
    }

    /// Makes `execute_round` fail when it would run round `round`.
    pub fn failing_on_round(mut self, round: u64) -> Self {
        self.fail_on_round = Some(round);
        self
    }

    /// Sleeps inside every round, so a cancel can arrive mid-round.
    pub fn with_round_delay(mut self, delay: Duration) -> Self {
        self.round_delay = delay;
        self
    }

    /// Runs `hook` inside every round, before the round completes.
    pub fn on_round(mut self, hook: impl Fn(u64) + Send + Sync + 'static) -> Self {
        self.round_hook = Some(Arc::new(hook));
        self
    }

    pub fn counts(&self) -> Arc<LifecycleCounts> {
        Arc::clone(&self.counts)
    }

    /// Score the seed solution is created with.
    pub fn seed_score(&self) -> HardSoftScore {
        HardSoftScore::of_soft(-self.seed_penalty)
    }
}

impl Debug for StubOptimizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StubOptimizer")
            .field("counts", &self.counts)
            .field("seed_penalty", &self.seed_penalty)
            .field("finish_after", &self.finish_after)
            .field("fail_on_create", &self.fail_on_create)
            .field("fail_on_round", &self.fail_on_round)
            .field("round_delay", &self.round_delay)
            .field("round_hook", &self.round_hook.is_some())
            .finish()
    }
}

impl Optimizer for StubOptimizer {
    type Handle = StubHandle;
    type Solution = Schedule;
    type Info = IterationInfo;

    fn name(&self) -> &'static str {
        "stub"
    }

    fn create(&self, input: &ProblemInput) -> Result<StubHandle, OptimizerError> {
        input.validate()?;
        if self.fail_on_create == Some(self.counts.created() + 1) {
            return Err(OptimizerError::Internal("injected failure in create".to_string()));
        }
        let ids: Vec<ResourceId> = input.resources.iter().map(|r| r.id).collect();
        let assignments = input
            .dates()
            .enumerate()
            .map(|(i, date)| Assignment {
                date,
                resource_id: ids[i % ids.len()],
            })
            .collect();
        let serial = self.counts.created.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(StubHandle {
            serial,
            assignments,
            round: 0,
            best: self.seed_score(),
            improved: false,
            rounds_since_improvement: 0,
        })
    }

    fn execute_round(&self, handle: &mut StubHandle) -> Result<(), OptimizerError> {
        let round = handle.round + 1;
        if self.fail_on_round == Some(round) {
            return Err(OptimizerError::Internal(format!(
                "injected failure in round {round}"
            )));
        }
        if !self.round_delay.is_zero() {
            thread::sleep(self.round_delay);
        }
        if let Some(hook) = &self.round_hook {
            hook(round);
        }
        handle.round = round;
        self.counts.rounds.fetch_add(1, Ordering::SeqCst);

        handle.improved = round > 1 && handle.best.soft() < 0;
        if handle.improved {
            handle.best = handle.best + HardSoftScore::of_soft(1);
            handle.rounds_since_improvement = 0;
        } else {
            handle.rounds_since_improvement += 1;
        }
        Ok(())
    }

    fn is_finished(&self, handle: &StubHandle) -> bool {
        handle.round >= self.finish_after || (handle.round > 0 && handle.best.soft() == 0)
    }

    fn best_solution(&self, handle: &StubHandle) -> Schedule {
        Schedule::new(handle.best, handle.assignments.clone())
    }

    fn iteration_info(&self, handle: &StubHandle) -> IterationInfo {
        if handle.round == 0 {
            return IterationInfo::seed(handle.best);
        }
        IterationInfo {
            round: handle.round,
            phase: if handle.round == 1 {
                RoundPhase::Construction
            } else {
                RoundPhase::LocalSearch
            },
            score: handle.best,
            best_score_improved: handle.improved,
            moves_evaluated: 0,
            moves_accepted: 0,
            total_moves_evaluated: 0,
            rounds_since_improvement: handle.rounds_since_improvement,
            elapsed_ms: 0,
        }
    }

    fn release(&self, _handle: StubHandle) {
        self.counts.released.fetch_add(1, Ordering::SeqCst);
    }
}
