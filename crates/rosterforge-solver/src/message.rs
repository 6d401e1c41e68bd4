//! Wire messages exchanged between a caller and an execution context.
//!
//! Requests are tagged by `eventType`:
//!
//! ```json
//! {"eventType": "start", "startDate": "2024-01-01", "endDate": "2024-01-07",
//!  "resources": [{"id": 1, "unavailability": []}]}
//! {"eventType": "tick"}
//! {"eventType": "cancel"}
//! ```
//!
//! Responses carry either progress or a terminal failure:
//!
//! ```json
//! {"isFinished": false, "iterationInfo": {...}, "result": {...}}
//! {"isFinished": true, "error": {"kind": "invalid_input", "message": "..."}}
//! ```

use rosterforge_core::{OptimizerError, ProblemInput, RosterForgeError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::driver::RoundReport;

/// Message encoding or decoding failure.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ProtocolError> for RosterForgeError {
    fn from(err: ProtocolError) -> Self {
        RosterForgeError::Protocol(err.to_string())
    }
}

/// Caller to context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "eventType", rename_all = "camelCase")]
pub enum Request {
    /// Starts a new run, abandoning any active one.
    Start(ProblemInput),
    /// Runs one more round of the active run.
    Tick,
    /// Ends the active run at the next round boundary.
    Cancel,
}

impl Request {
    pub fn name(&self) -> &'static str {
        match self {
            Request::Start(_) => "start",
            Request::Tick => "tick",
            Request::Cancel => "cancel",
        }
    }
}

/// Progress or result of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress<S, I> {
    pub is_finished: bool,
    pub iteration_info: I,
    pub result: S,
}

/// Machine-readable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    OptimizerInternal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub kind: ErrorKind,
    pub message: String,
}

/// Terminal failure of a `start` or a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Failure {
    pub is_finished: bool,
    pub error: ErrorPayload,
}

/// Context to caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response<S, I> {
    Progress(Progress<S, I>),
    Failure(Failure),
}

impl<S, I> Response<S, I> {
    pub fn failure(err: &OptimizerError) -> Self {
        let kind = match err {
            OptimizerError::InvalidInput(_) => ErrorKind::InvalidInput,
            OptimizerError::Internal(_) => ErrorKind::OptimizerInternal,
        };
        Response::Failure(Failure {
            is_finished: true,
            error: ErrorPayload {
                kind,
                message: err.to_string(),
            },
        })
    }

    pub fn is_finished(&self) -> bool {
        match self {
            Response::Progress(progress) => progress.is_finished,
            Response::Failure(failure) => failure.is_finished,
        }
    }

    pub fn progress(&self) -> Option<&Progress<S, I>> {
        match self {
            Response::Progress(progress) => Some(progress),
            Response::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorPayload> {
        match self {
            Response::Progress(_) => None,
            Response::Failure(failure) => Some(&failure.error),
        }
    }

    /// Best solution carried by a progress response.
    pub fn result(&self) -> Option<&S> {
        self.progress().map(|p| &p.result)
    }
}

impl<S, I> From<RoundReport<S, I>> for Response<S, I> {
    fn from(report: RoundReport<S, I>) -> Self {
        Response::Progress(Progress {
            is_finished: report.finished,
            iteration_info: report.iteration_info,
            result: report.best_solution,
        })
    }
}

pub fn decode_request(json: &str) -> Result<Request, ProtocolError> {
    Ok(serde_json::from_str(json)?)
}

pub fn encode_request(request: &Request) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(request)?)
}

pub fn encode_response<S: Serialize, I: Serialize>(
    response: &Response<S, I>,
) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(response)?)
}

pub fn decode_response<S, I>(json: &str) -> Result<Response<S, I>, ProtocolError>
where
    S: for<'de> Deserialize<'de>,
    I: for<'de> Deserialize<'de>,
{
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
