//! Solver entry points that hide the wiring between crates.

use rosterforge_config::SolverConfig;
use rosterforge_core::{IterationInfo, ProblemInput, RosterForgeError, Schedule};
use rosterforge_scheduling::SchedulingOptimizer;
use rosterforge_solver::{Solver, SolverClient, SolverWorker};
use tracing::debug;

/// Client of a worker running the scheduling optimizer.
pub type ScheduleClient = SolverClient<Schedule, IterationInfo>;

/// Solves `input` with the configuration in `solver.toml`, or the defaults
/// when there is no such file.
pub fn run_solver(input: &ProblemInput) -> Result<Schedule, RosterForgeError> {
    let config = SolverConfig::load("solver.toml").unwrap_or_else(|err| {
        debug!(event = "config_defaulted", error = %err);
        SolverConfig::default()
    });
    run_solver_with_config(input, &config)
}

/// Solves `input` on the calling thread and returns the best schedule.
///
/// # Example
///
/// ```
/// use rosterforge::prelude::*;
/// use rosterforge_test::week_input;
///
/// let config = SolverConfig::new()
///     .with_round_count_limit(10)
///     .with_moves_per_round(100);
/// let schedule = run_solver_with_config(&week_input(), &config).unwrap();
///
/// assert!(schedule.is_feasible());
/// ```
pub fn run_solver_with_config(
    input: &ProblemInput,
    config: &SolverConfig,
) -> Result<Schedule, RosterForgeError> {
    let optimizer = SchedulingOptimizer::new(config)?;
    let mut solver = Solver::new(optimizer).with_config(config);
    Ok(solver.solve(input)?.into_solution())
}

/// Starts a worker thread hosting the scheduling optimizer.
///
/// # Example
///
/// ```
/// use rosterforge::prelude::*;
/// use rosterforge_test::week_input;
///
/// let config = SolverConfig::new().with_round_count_limit(3);
/// let mut client = spawn_solver(&config).unwrap();
///
/// client.start(week_input()).unwrap();
/// let mut response = client.blocking_recv().unwrap();
/// while !response.is_finished() {
///     client.tick().unwrap();
///     response = client.blocking_recv().unwrap();
/// }
/// assert_eq!(response.progress().unwrap().iteration_info.round, 3);
/// client.shutdown().unwrap();
/// ```
pub fn spawn_solver(config: &SolverConfig) -> Result<ScheduleClient, RosterForgeError> {
    let optimizer = SchedulingOptimizer::new(config)?;
    SolverWorker::from_config(config)
        .start_thread(optimizer)
        .map_err(|err| RosterForgeError::Disconnected(err.to_string()))
}
