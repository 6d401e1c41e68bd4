//! RosterForge - incremental rotation scheduling in Rust
//!
//! Solve a schedule in one call, or drive a solver round by round from
//! another thread and watch the best solution improve.
//!
//! # Example
//!
//! ```rust
//! use rosterforge::prelude::*;
//!
//! // Score types are re-exported
//! let score = HardSoftScore::of(0, -100);
//! assert_eq!(score.hard(), 0);
//! assert_eq!(score.soft(), -100);
//! ```

// Data model and errors
pub use rosterforge_core::{
    Assignment, HardSoftScore, InvalidInputError, IterationInfo, Optimizer, OptimizerError,
    PlanningSolution, ProblemInput, Resource, ResourceId, RosterForgeError, RoundPhase, Schedule,
    Score,
};

pub use rosterforge_config::{EnvironmentMode, SolverConfig};

// Round protocol
pub use rosterforge_solver::{
    decode_request, encode_response, ExecutionContext, Request, Response, RunState, SolverClient,
    SolverWorker,
};

pub use rosterforge_scheduling::SchedulingOptimizer;

#[cfg(feature = "console")]
pub mod console;

mod solver;
pub use solver::{run_solver, run_solver_with_config, spawn_solver, ScheduleClient};

pub mod prelude {
    pub use super::{
        run_solver, run_solver_with_config, spawn_solver, HardSoftScore, IterationInfo,
        ProblemInput, Request, Resource, Response, Schedule, ScheduleClient, Score,
        SolverConfig,
    };
}
