//! RosterForge Solver Runtime
//!
//! This crate drives an [`Optimizer`](rosterforge_core::Optimizer) one round
//! at a time:
//! - [`SolverHandle`]: owned optimizer state, released exactly once
//! - [`RoundDriver`]: executes a round and snapshots best solution and diagnostics
//! - [`ExecutionContext`]: the start / tick / cancel state machine
//! - [`message`]: JSON wire format of requests and responses
//! - [`SolverWorker`] and [`SolverClient`]: a context on its own thread
//! - [`Solver`]: one-shot solving for callers that do not need rounds

pub mod cancel;
pub mod context;
pub mod driver;
pub mod handle;
pub mod message;
pub mod solver;
pub mod stats;
pub mod worker;

pub use cancel::CancelFlag;
pub use context::{ContextResponse, ExecutionContext, RunState};
pub use driver::{FinishReason, Report, RoundDriver, RoundReport};
pub use handle::SolverHandle;
pub use message::{
    decode_request, decode_response, encode_request, encode_response, ErrorKind, ErrorPayload,
    Failure, Progress, ProtocolError, Request, Response,
};
pub use solver::{solve, SolveOutcome, Solver};
pub use stats::RunStats;
pub use worker::{ClientError, SolverClient, SolverWorker};
