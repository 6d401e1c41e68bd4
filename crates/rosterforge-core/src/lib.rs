//! RosterForge Core - shared types for incremental solving
//!
//! This crate provides the abstractions every other RosterForge crate builds on:
//! - Score types for representing solution quality
//! - Domain types carried by the solver protocol
//! - The [`Optimizer`] capability an execution context drives round by round

pub mod domain;
pub mod error;
pub mod optimizer;
pub mod score;

pub use domain::{
    Assignment, IterationInfo, PlanningSolution, ProblemInput, Resource, ResourceId, RoundPhase,
    Schedule,
};
pub use error::{InvalidInputError, OptimizerError, RosterForgeError};
pub use optimizer::Optimizer;
pub use score::{HardSoftScore, ParseableScore, Score, ScoreLevel, ScoreParseError};
