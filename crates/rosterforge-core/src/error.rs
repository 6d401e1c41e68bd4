//! Error types for RosterForge

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::ResourceId;

/// Problem input rejected before any solver state was created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    #[error("time window is inverted: start {start} is after end {end}")]
    InvertedWindow { start: NaiveDate, end: NaiveDate },

    #[error("resource set is empty")]
    NoResources,

    #[error("duplicate resource id {0}")]
    DuplicateResource(ResourceId),
}

/// Failure reported by an optimizer capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizerError {
    /// `create` rejected the problem input.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// A round failed. The handle is still owned by the caller and must be
    /// released.
    #[error("optimizer internal error: {0}")]
    Internal(String),
}

impl OptimizerError {
    /// Short machine-readable label used in error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            OptimizerError::InvalidInput(_) => "invalid_input",
            OptimizerError::Internal(_) => "optimizer_internal",
        }
    }
}

/// Main error type for RosterForge operations
#[derive(Debug, Error)]
pub enum RosterForgeError {
    #[error(transparent)]
    Optimizer(#[from] OptimizerError),

    /// Error in solver configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A request or response could not be encoded or decoded
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Solver was cancelled before completion
    #[error("Solver was cancelled")]
    Cancelled,

    /// The worker went away before the run finished
    #[error("Worker disconnected: {0}")]
    Disconnected(String),
}

/// Result type alias for RosterForge operations
pub type Result<T> = std::result::Result<T, RosterForgeError>;
