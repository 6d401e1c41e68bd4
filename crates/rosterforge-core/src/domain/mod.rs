//! Domain types carried by the solver protocol.
//!
//! - [`ProblemInput`]: the scheduling instance supplied at `start`
//! - [`Schedule`]: best-solution snapshot returned after each round
//! - [`IterationInfo`]: per-round diagnostics
//!
//! All of these are plain immutable values; callers never see solver state.

mod input;
mod iteration;
mod solution;

pub use input::{ProblemInput, Resource, ResourceId};
pub use iteration::{IterationInfo, RoundPhase};
pub use solution::{Assignment, PlanningSolution, Schedule};
