use std::time::Duration;

use rosterforge_config::SolverConfig;
use rosterforge_core::{IterationInfo, PlanningSolution, Schedule};
use rosterforge_test::{empty_resources_input, week_input, StubOptimizer};

use super::*;
use crate::message::ErrorKind;

type Client = SolverClient<Schedule, IterationInfo>;

/// Ticks until the run finishes and returns every response seen.
async fn drain(client: &mut Client) -> Vec<Response<Schedule, IterationInfo>> {
    let mut responses = Vec::new();
    loop {
        let response = client
            .recv_timeout(Duration::from_secs(5))
            .await
            .unwrap();
        let finished = response.is_finished();
        responses.push(response);
        if finished {
            return responses;
        }
        client.tick().unwrap();
    }
}

#[tokio::test]
async fn runs_to_completion() {
    let optimizer = StubOptimizer::new().finishing_after(4);
    let counts = optimizer.counts();
    let mut client = SolverWorker::spawn(optimizer).unwrap();

    client.start(week_input()).unwrap();
    let responses = drain(&mut client).await;

    assert_eq!(responses.len(), 4);
    let rounds: Vec<u64> = responses
        .iter()
        .map(|r| r.progress().unwrap().iteration_info.round)
        .collect();
    assert_eq!(rounds, vec![1, 2, 3, 4]);
    for pair in responses.windows(2) {
        assert!(pair[1].result().unwrap().score() >= pair[0].result().unwrap().score());
    }

    client.shutdown().unwrap();
    assert_eq!(counts.live(), 0);
}

#[tokio::test]
async fn start_then_cancel_ends_after_one_round() {
    let optimizer = StubOptimizer::new().finishing_after(100);
    let seed = optimizer.seed_score();
    let counts = optimizer.counts();
    let mut client = SolverWorker::spawn(optimizer).unwrap();

    client.start(week_input()).unwrap();
    client.cancel().unwrap();

    // Either the flag is seen after round 1, or round 1 reports progress and
    // the cancel message ends the run.
    let mut last = client.recv().await.unwrap();
    if !last.is_finished() {
        last = client.recv().await.unwrap();
    }

    assert!(last.is_finished());
    assert_eq!(last.result().unwrap().score(), seed);
    client.shutdown().unwrap();
    assert_eq!(counts.rounds(), 1);
    assert_eq!(counts.live(), 0);
}

#[tokio::test]
async fn cancel_mid_round_allows_at_most_one_more_round() {
    let optimizer = StubOptimizer::new()
        .finishing_after(100)
        .with_round_delay(Duration::from_millis(30));
    let counts = optimizer.counts();
    let mut client = SolverWorker::spawn(optimizer).unwrap();

    client.start(week_input()).unwrap();
    assert!(!client.recv().await.unwrap().is_finished());

    client.tick().unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    let rounds_at_cancel = counts.rounds();
    client.cancel().unwrap();

    let mut last = client.recv().await.unwrap();
    while !last.is_finished() {
        last = client.recv().await.unwrap();
    }
    client.shutdown().unwrap();

    assert!(counts.rounds() <= rounds_at_cancel + 1);
    assert_eq!(counts.live(), 0);
}

#[tokio::test]
async fn cancel_while_idle_does_not_reach_next_run() {
    let optimizer = StubOptimizer::new().finishing_after(10);
    let counts = optimizer.counts();
    let mut client = SolverWorker::spawn(optimizer).unwrap();

    client.cancel().unwrap();
    client.send(Request::Start(week_input())).unwrap();
    let first = client.recv_timeout(Duration::from_secs(5)).await.unwrap();

    assert!(!first.is_finished());
    assert_eq!(first.progress().unwrap().iteration_info.round, 1);
    client.tick().unwrap();
    let second = client.recv_timeout(Duration::from_secs(5)).await.unwrap();
    assert_eq!(second.progress().unwrap().iteration_info.round, 2);

    client.shutdown().unwrap();
    assert_eq!(counts.live(), 0);
}

#[tokio::test]
async fn create_failure_reports_internal_error() {
    let optimizer = StubOptimizer::new().failing_on_create(1);
    let counts = optimizer.counts();
    let mut client = SolverWorker::spawn(optimizer).unwrap();

    client.start(week_input()).unwrap();
    let response = client.recv().await.unwrap();

    assert!(response.is_finished());
    assert_eq!(
        response.error().map(|e| e.kind),
        Some(ErrorKind::OptimizerInternal)
    );
    client.shutdown().unwrap();
    assert_eq!(counts.live(), 0);
}

#[tokio::test]
async fn invalid_start_reports_error() {
    let optimizer = StubOptimizer::new();
    let counts = optimizer.counts();
    let mut client = SolverWorker::spawn(optimizer).unwrap();

    client.start(empty_resources_input()).unwrap();
    let response = client.recv().await.unwrap();

    assert!(response.is_finished());
    assert_eq!(
        response.error().map(|e| e.kind),
        Some(ErrorKind::InvalidInput)
    );
    client.shutdown().unwrap();
    assert_eq!(counts.created(), 0);
}

#[tokio::test]
async fn double_start_releases_first_run() {
    let optimizer = StubOptimizer::new().finishing_after(100);
    let counts = optimizer.counts();
    let mut client = SolverWorker::spawn(optimizer).unwrap();

    client.start(week_input()).unwrap();
    client.recv().await.unwrap();
    client.start(week_input()).unwrap();
    let response = client.recv().await.unwrap();

    assert_eq!(response.progress().unwrap().iteration_info.round, 1);
    assert_eq!(counts.created(), 2);
    assert_eq!(counts.released(), 1);

    client.shutdown().unwrap();
    assert_eq!(counts.released(), 2);
}

#[tokio::test]
async fn timeout_when_nothing_is_pending() {
    let mut client = SolverWorker::spawn(StubOptimizer::new()).unwrap();

    // A tick while idle is ignored, so no response ever comes.
    client.tick().unwrap();
    let err = client
        .recv_timeout(Duration::from_millis(50))
        .await
        .unwrap_err();
    assert_eq!(err, ClientError::Timeout(Duration::from_millis(50)));

    client.shutdown().unwrap();
}

#[tokio::test]
async fn configured_timeout_applies_to_next_response() {
    let config = SolverConfig::from_toml_str(
        r#"
        [worker]
        thread_name = "roster-test"
        response_timeout_ms = 20
    "#,
    )
    .unwrap();
    let worker = SolverWorker::from_config(&config);
    let mut client = worker.start_thread(StubOptimizer::new()).unwrap();

    assert_eq!(client.response_timeout(), Some(Duration::from_millis(20)));
    assert!(matches!(
        client.next_response().await,
        Err(ClientError::Timeout(_))
    ));
    client.shutdown().unwrap();
}

#[test]
fn shutdown_releases_live_handle() {
    let optimizer = StubOptimizer::new().finishing_after(100);
    let counts = optimizer.counts();
    let mut client = SolverWorker::spawn(optimizer).unwrap();

    client.start(week_input()).unwrap();
    client.blocking_recv().unwrap();
    assert_eq!(counts.live(), 1);

    client.shutdown().unwrap();
    assert_eq!(counts.live(), 0);
}

#[test]
fn worker_thread_is_named() {
    let worker = SolverWorker::default();
    assert_eq!(worker.thread_name, "rosterforge-worker");
}
