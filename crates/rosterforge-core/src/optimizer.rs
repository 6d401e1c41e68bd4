//! The optimizer capability consumed by the solver runtime.

use std::fmt::Debug;

use serde::Serialize;

use crate::domain::{PlanningSolution, ProblemInput};
use crate::error::OptimizerError;

/// An incremental optimizer that can be driven one bounded round at a time.
///
/// The runtime never inspects `Handle`; it only passes it back to the
/// optimizer that created it. Handles are created with [`create`](Self::create)
/// and must be given back exactly once through [`release`](Self::release).
/// The runtime wraps them so that this holds on every exit path.
///
/// Every method runs on the thread that owns the execution context. An
/// optimizer therefore only needs to be `Send` so it can be moved there.
///
/// # Contract
///
/// - `create` validates its input and fails with
///   [`OptimizerError::InvalidInput`] before allocating anything.
/// - `execute_round` does a bounded amount of work. After it returns, the
///   score of `best_solution` is no worse than before the call.
/// - `is_finished`, `best_solution` and `iteration_info` do not mutate.
/// - Snapshots are independent values; mutating the handle afterwards does
///   not change them.
pub trait Optimizer: Send + 'static {
    /// Opaque solver state owned by the caller between rounds.
    type Handle;

    /// Best-solution snapshot.
    type Solution: PlanningSolution + Serialize;

    /// Per-round diagnostics snapshot.
    type Info: Clone + Debug + Send + Serialize + 'static;

    /// Name used in log output.
    fn name(&self) -> &'static str {
        "optimizer"
    }

    /// Builds solver state for `input`.
    fn create(&self, input: &ProblemInput) -> Result<Self::Handle, OptimizerError>;

    /// Advances the search by one bounded round.
    fn execute_round(&self, handle: &mut Self::Handle) -> Result<(), OptimizerError>;

    /// Returns true once the optimizer's own termination criteria are met.
    fn is_finished(&self, handle: &Self::Handle) -> bool;

    /// Returns a snapshot of the best solution found so far.
    fn best_solution(&self, handle: &Self::Handle) -> Self::Solution;

    /// Returns a snapshot of diagnostics for the latest round.
    fn iteration_info(&self, handle: &Self::Handle) -> Self::Info;

    /// Disposes of solver state.
    fn release(&self, handle: Self::Handle);
}
