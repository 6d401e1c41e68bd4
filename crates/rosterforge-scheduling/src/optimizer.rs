//! The rotation scheduling optimizer.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rosterforge_config::{ConfigError, SolverConfig};
use rosterforge_core::{
    HardSoftScore, IterationInfo, Optimizer, OptimizerError, ProblemInput, RoundPhase, Schedule,
};
use tracing::{debug, trace};

use crate::acceptor::LateAcceptanceAcceptor;
use crate::constraints::RosterScoreCalculator;
use crate::construction::construct_seed;
use crate::moves::MoveSelector;
use crate::problem::RosterProblem;
use crate::termination::{RosterTermination, RoundProgress, Termination};

/// Assigns one resource per day, improving the assignment one round at a time.
///
/// Round 1 commits the greedy seed. Every later round evaluates
/// `moves_per_round` random moves under late acceptance and keeps the best
/// assignment seen.
///
/// # Examples
///
/// ```
/// use rosterforge_config::SolverConfig;
/// use rosterforge_core::Optimizer;
/// use rosterforge_scheduling::SchedulingOptimizer;
/// use rosterforge_test::week_input;
///
/// let config = SolverConfig::new().with_round_count_limit(5);
/// let optimizer = SchedulingOptimizer::new(&config).unwrap();
///
/// let mut handle = optimizer.create(&week_input()).unwrap();
/// while !optimizer.is_finished(&handle) {
///     optimizer.execute_round(&mut handle).unwrap();
/// }
///
/// assert!(optimizer.best_solution(&handle).is_feasible());
/// optimizer.release(handle);
/// ```
#[derive(Debug)]
pub struct SchedulingOptimizer {
    termination: RosterTermination,
    selector: MoveSelector,
    calculator: RosterScoreCalculator,
    moves_per_round: usize,
    late_acceptance_size: usize,
    /// `None` seeds every run from OS entropy.
    random_seed: Option<u64>,
    assert_scores: bool,
}

impl Default for SchedulingOptimizer {
    fn default() -> Self {
        let config = SolverConfig::default();
        Self {
            termination: RosterTermination::default(),
            selector: MoveSelector::default(),
            calculator: RosterScoreCalculator::new(),
            moves_per_round: config.round.moves_per_round,
            late_acceptance_size: config.round.late_acceptance_size,
            random_seed: Some(config.seed()),
            assert_scores: false,
        }
    }
}

impl SchedulingOptimizer {
    pub fn new(config: &SolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            termination: RosterTermination::from_config(config.termination.as_ref())?,
            selector: MoveSelector::default(),
            calculator: RosterScoreCalculator::new(),
            moves_per_round: config.round.moves_per_round,
            late_acceptance_size: config.round.late_acceptance_size,
            random_seed: config
                .environment_mode
                .is_reproducible()
                .then(|| config.seed()),
            assert_scores: config.environment_mode.is_asserted(),
        })
    }

    pub fn with_move_selector(mut self, selector: MoveSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn termination(&self) -> &RosterTermination {
        &self.termination
    }

    fn rng(&self) -> ChaCha20Rng {
        match self.random_seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_rng(&mut rand::rng()),
        }
    }

    fn construction_round(&self, state: &mut RosterState) {
        state.phase = RoundPhase::Construction;
        state.acceptor.phase_started(&state.working_score);
        state.last_round = RoundCounters::default();
    }

    fn local_search_round(&self, state: &mut RosterState) {
        state.phase = RoundPhase::LocalSearch;
        let mut counters = RoundCounters::default();
        let days = state.problem.day_count();
        let resources = state.problem.resource_count();

        for _ in 0..self.moves_per_round {
            let candidate = self.selector.select(&mut state.rng, days, resources);
            if !candidate.is_doable(&state.working) {
                continue;
            }
            counters.moves_evaluated += 1;

            let undo = candidate.apply(&mut state.working);
            let score = self.calculator.calculate(&state.problem, &state.working);
            if !state.acceptor.is_accepted(&state.working_score, &score) {
                undo.apply(&mut state.working);
                continue;
            }

            counters.moves_accepted += 1;
            state.working_score = score;
            state.acceptor.step_ended(&score);
            if score > state.best_score {
                state.best.copy_from_slice(&state.working);
                state.best_score = score;
                counters.improved = true;
            }
        }

        trace!(
            event = "search_round",
            round = state.round,
            evaluated = counters.moves_evaluated,
            accepted = counters.moves_accepted,
            working = %state.working_score,
            best = %state.best_score,
        );
        state.last_round = counters;
    }

    fn check_best_score(&self, state: &RosterState) -> Result<(), OptimizerError> {
        let actual = self.calculator.calculate(&state.problem, &state.best);
        if actual != state.best_score {
            return Err(OptimizerError::Internal(format!(
                "best score corrupted in round {}: recorded {}, actual {}",
                state.round, state.best_score, actual
            )));
        }
        Ok(())
    }
}

impl Optimizer for SchedulingOptimizer {
    type Handle = RosterState;
    type Solution = Schedule;
    type Info = IterationInfo;

    fn name(&self) -> &'static str {
        "scheduling"
    }

    fn create(&self, input: &ProblemInput) -> Result<RosterState, OptimizerError> {
        let problem = RosterProblem::new(input)?;
        let working = construct_seed(&problem);
        let working_score = self.calculator.calculate(&problem, &working);

        debug!(
            event = "seed_constructed",
            days = problem.day_count(),
            resources = problem.resource_count(),
            score = %working_score,
        );

        Ok(RosterState {
            rng: self.rng(),
            acceptor: LateAcceptanceAcceptor::new(self.late_acceptance_size),
            best: working.clone(),
            best_score: working_score,
            working,
            working_score,
            problem,
            round: 0,
            phase: RoundPhase::Seed,
            started: Instant::now(),
            elapsed: Duration::ZERO,
            last_round: RoundCounters::default(),
            total_moves_evaluated: 0,
            rounds_since_improvement: 0,
        })
    }

    fn execute_round(&self, state: &mut RosterState) -> Result<(), OptimizerError> {
        state.round += 1;
        if state.round == 1 {
            self.construction_round(state);
        } else {
            self.local_search_round(state);
        }

        if state.last_round.improved || state.round == 1 {
            state.rounds_since_improvement = 0;
        } else {
            state.rounds_since_improvement += 1;
        }
        state.total_moves_evaluated += state.last_round.moves_evaluated;
        state.elapsed = state.started.elapsed();

        if self.assert_scores {
            self.check_best_score(state)?;
        }
        Ok(())
    }

    fn is_finished(&self, state: &RosterState) -> bool {
        state.round > 0
            && (state.best_score == HardSoftScore::ZERO
                || self.termination.is_terminated(&state.progress()))
    }

    fn best_solution(&self, state: &RosterState) -> Schedule {
        state.problem.to_schedule(&state.best, state.best_score)
    }

    fn iteration_info(&self, state: &RosterState) -> IterationInfo {
        if state.round == 0 {
            return IterationInfo::seed(state.best_score);
        }
        IterationInfo {
            round: state.round,
            phase: state.phase,
            score: state.best_score,
            best_score_improved: state.last_round.improved,
            moves_evaluated: state.last_round.moves_evaluated,
            moves_accepted: state.last_round.moves_accepted,
            total_moves_evaluated: state.total_moves_evaluated,
            rounds_since_improvement: state.rounds_since_improvement,
            elapsed_ms: state.elapsed.as_millis() as u64,
        }
    }

    fn release(&self, state: RosterState) {
        debug!(
            event = "state_released",
            rounds = state.round,
            moves = state.total_moves_evaluated,
        );
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct RoundCounters {
    moves_evaluated: u64,
    moves_accepted: u64,
    improved: bool,
}

/// Solver state of one scheduling run.
#[derive(Debug)]
pub struct RosterState {
    problem: RosterProblem,
    rng: ChaCha20Rng,
    acceptor: LateAcceptanceAcceptor<HardSoftScore>,
    working: Vec<usize>,
    working_score: HardSoftScore,
    best: Vec<usize>,
    best_score: HardSoftScore,
    round: u64,
    phase: RoundPhase,
    started: Instant,
    /// Time spent up to the end of the latest round.
    elapsed: Duration,
    last_round: RoundCounters,
    total_moves_evaluated: u64,
    rounds_since_improvement: u64,
}

impl RosterState {
    pub fn problem(&self) -> &RosterProblem {
        &self.problem
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn best_score(&self) -> HardSoftScore {
        self.best_score
    }

    pub fn working_score(&self) -> HardSoftScore {
        self.working_score
    }

    pub fn progress(&self) -> RoundProgress<HardSoftScore> {
        RoundProgress {
            round: self.round,
            elapsed: self.elapsed,
            best_score: self.best_score,
            rounds_since_improvement: self.rounds_since_improvement,
        }
    }
}

#[cfg(test)]
#[path = "optimizer_tests.rs"]
mod tests;
