//! Score types for representing solution quality
//!
//! Scores are used to compare solutions and to report progress across rounds.
//! All score types are immutable and implement arithmetic operations.

#[macro_use]
mod macros;
mod hard_soft;
mod traits;


pub use hard_soft::HardSoftScore;
pub use traits::{ParseableScore, Score, ScoreParseError};

/// Score level representing different constraint priorities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreLevel {
    /// Hard constraints - must be satisfied for feasibility
    Hard,
    /// Soft constraints - optimization objectives
    Soft,
}
