//! RosterForge rotation scheduling
//!
//! A concrete [`Optimizer`](rosterforge_core::Optimizer) that assigns one
//! resource to every day of a date window:
//! - [`RosterProblem`]: indexed view of the problem input
//! - [`RosterScoreCalculator`]: hard and soft rotation constraints
//! - [`construct_seed`]: greedy seed assignment
//! - [`RosterMove`] and [`MoveSelector`]: change-day and swap-days moves
//! - [`LateAcceptanceAcceptor`]: acceptance rule for local search
//! - [`termination`]: when a run is finished
//! - [`SchedulingOptimizer`]: ties the above into bounded rounds

pub mod acceptor;
pub mod constraints;
pub mod construction;
pub mod moves;
pub mod optimizer;
pub mod problem;
pub mod termination;

pub use acceptor::LateAcceptanceAcceptor;
pub use constraints::{ConstraintKind, RosterScoreCalculator};
pub use construction::construct_seed;
pub use moves::{MoveSelector, RosterMove};
pub use optimizer::{RosterState, SchedulingOptimizer};
pub use problem::RosterProblem;
pub use termination::{RoundProgress, RosterTermination, Termination};
