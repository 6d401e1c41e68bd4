//! Isolated worker thread hosting an [`ExecutionContext`], and its client.

use std::fmt::{self, Debug};
use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rosterforge_config::SolverConfig;
use rosterforge_core::{Optimizer, ProblemInput, RosterForgeError};
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use crate::cancel::CancelFlag;
use crate::context::ExecutionContext;
use crate::message::{Request, Response};

/// Caller-side transport failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The worker thread is gone.
    #[error("solver worker disconnected")]
    Disconnected,

    /// No response arrived within the caller's deadline.
    #[error("no response from solver worker within {0:?}")]
    Timeout(Duration),

    /// The worker thread panicked.
    #[error("solver worker panicked")]
    WorkerPanicked,
}

impl From<ClientError> for RosterForgeError {
    fn from(err: ClientError) -> Self {
        RosterForgeError::Disconnected(err.to_string())
    }
}

/// Spawns execution contexts on dedicated threads.
///
/// # Example
///
/// ```
/// use rosterforge_solver::SolverWorker;
/// use rosterforge_test::{week_input, StubOptimizer};
///
/// let mut client = SolverWorker::spawn(StubOptimizer::new().finishing_after(3)).unwrap();
/// client.start(week_input()).unwrap();
///
/// let mut response = client.blocking_recv().unwrap();
/// while !response.is_finished() {
///     client.tick().unwrap();
///     response = client.blocking_recv().unwrap();
/// }
/// assert_eq!(response.progress().unwrap().iteration_info.round, 3);
/// client.shutdown().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct SolverWorker {
    thread_name: String,
    response_timeout: Option<Duration>,
    assert_scores: bool,
}

impl Default for SolverWorker {
    fn default() -> Self {
        Self::from_config(&SolverConfig::default())
    }
}

impl SolverWorker {
    /// Worker settings taken from `config`.
    pub fn from_config(config: &SolverConfig) -> Self {
        Self {
            thread_name: config.worker.thread_name.clone(),
            response_timeout: config.worker.response_timeout(),
            assert_scores: config.environment_mode.is_asserted(),
        }
    }

    /// Spawns a worker with default settings.
    pub fn spawn<O: Optimizer>(
        optimizer: O,
    ) -> io::Result<SolverClient<O::Solution, O::Info>> {
        Self::default().start_thread(optimizer)
    }

    /// Starts the worker thread and returns the caller's end.
    pub fn start_thread<O: Optimizer>(
        &self,
        optimizer: O,
    ) -> io::Result<SolverClient<O::Solution, O::Info>> {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let cancel = CancelFlag::new();

        let worker_cancel = cancel.clone();
        let assert_scores = self.assert_scores;
        // The context is built on the worker thread so run state never
        // crosses threads.
        let thread = thread::Builder::new()
            .name(self.thread_name.clone())
            .spawn(move || {
                let context = ExecutionContext::new(optimizer)
                    .with_cancel_flag(worker_cancel)
                    .with_score_assertions(assert_scores);
                run_worker(context, request_rx, event_tx)
            })?;

        Ok(SolverClient {
            requests: request_tx,
            events: event_rx,
            cancel,
            thread: Some(thread),
            response_timeout: self.response_timeout,
        })
    }
}

fn run_worker<O: Optimizer>(
    mut context: ExecutionContext<O>,
    mut requests: UnboundedReceiver<Request>,
    events: UnboundedSender<Response<O::Solution, O::Info>>,
) {
    info!(event = "worker_start");
    while let Some(request) = requests.blocking_recv() {
        debug!(event = "request", kind = request.name(), state = context.state().as_str());
        if let Some(response) = context.handle(request) {
            if events.send(response).is_err() {
                debug!(event = "caller_gone");
                break;
            }
        }
    }
    context.shutdown();
    info!(event = "worker_stop", runs = context.runs_started());
}

/// Caller's end of a worker: sends requests and receives responses in order.
///
/// Dropping the client closes the request channel, which stops the worker
/// and releases any live solver handle.
pub struct SolverClient<S, I> {
    requests: UnboundedSender<Request>,
    events: UnboundedReceiver<Response<S, I>>,
    cancel: CancelFlag,
    thread: Option<JoinHandle<()>>,
    response_timeout: Option<Duration>,
}

impl<S, I> SolverClient<S, I> {
    /// Starts a new run, abandoning any active one.
    pub fn start(&self, input: ProblemInput) -> Result<(), ClientError> {
        self.send(Request::Start(input))
    }

    /// Asks for one more round.
    pub fn tick(&self) -> Result<(), ClientError> {
        self.send(Request::Tick)
    }

    /// Requests cancellation. An in-flight round completes first.
    pub fn cancel(&self) -> Result<(), ClientError> {
        self.cancel.request();
        self.send(Request::Cancel)
    }

    pub fn send(&self, request: Request) -> Result<(), ClientError> {
        self.requests
            .send(request)
            .map_err(|_| ClientError::Disconnected)
    }

    /// Waits for the next response.
    pub async fn recv(&mut self) -> Result<Response<S, I>, ClientError> {
        self.events.recv().await.ok_or(ClientError::Disconnected)
    }

    /// Waits at most `timeout` for the next response.
    pub async fn recv_timeout(&mut self, timeout: Duration) -> Result<Response<S, I>, ClientError> {
        match tokio::time::timeout(timeout, self.events.recv()).await {
            Ok(Some(response)) => Ok(response),
            Ok(None) => Err(ClientError::Disconnected),
            Err(_) => Err(ClientError::Timeout(timeout)),
        }
    }

    /// Waits for the next response, bounded by the configured timeout if any.
    pub async fn next_response(&mut self) -> Result<Response<S, I>, ClientError> {
        match self.response_timeout {
            Some(timeout) => self.recv_timeout(timeout).await,
            None => self.recv().await,
        }
    }

    /// Blocking variant of [`recv`](Self::recv) for synchronous callers.
    ///
    /// Panics if called from within an async runtime.
    pub fn blocking_recv(&mut self) -> Result<Response<S, I>, ClientError> {
        self.events.blocking_recv().ok_or(ClientError::Disconnected)
    }

    /// Returns a response if one is already queued.
    pub fn try_recv(&mut self) -> Option<Response<S, I>> {
        self.events.try_recv().ok()
    }

    pub fn response_timeout(&self) -> Option<Duration> {
        self.response_timeout
    }

    /// Stops the worker and waits for its thread to exit.
    pub fn shutdown(mut self) -> Result<(), ClientError> {
        let thread = self.thread.take();
        drop(self);
        match thread {
            Some(thread) => thread.join().map_err(|_| ClientError::WorkerPanicked),
            None => Ok(()),
        }
    }
}

impl<S, I> Debug for SolverClient<S, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolverClient")
            .field("cancel", &self.cancel)
            .field("closed", &self.requests.is_closed())
            .field("response_timeout", &self.response_timeout)
            .finish()
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
