use std::sync::Arc;

use rosterforge_core::{InvalidInputError, OptimizerError, PlanningSolution, RoundPhase};
use rosterforge_test::{empty_resources_input, week_input, StubOptimizer};

use super::*;

#[test]
fn create_then_best_solution_without_round() {
    let optimizer = StubOptimizer::new();
    let seed = optimizer.seed_score();
    let handle = SolverHandle::create(Arc::new(optimizer), &week_input(), 1).unwrap();

    let best = handle.best_solution();
    assert_eq!(best.score(), seed);
    assert_eq!(best.assignments.len(), 7);
    assert_eq!(handle.iteration_info().phase, RoundPhase::Seed);
    assert_eq!(handle.rounds(), 0);
}

#[test]
fn invalid_input_creates_nothing() {
    let optimizer = StubOptimizer::new();
    let counts = optimizer.counts();

    let err = SolverHandle::create(Arc::new(optimizer), &empty_resources_input(), 1).unwrap_err();
    assert_eq!(
        err,
        OptimizerError::InvalidInput(InvalidInputError::NoResources)
    );
    assert_eq!(counts.created(), 0);
}

#[test]
fn release_gives_state_back_once() {
    let optimizer = StubOptimizer::new();
    let counts = optimizer.counts();
    let handle = SolverHandle::create(Arc::new(optimizer), &week_input(), 1).unwrap();
    assert_eq!(counts.live(), 1);

    handle.release();
    assert_eq!(counts.released(), 1);
    assert_eq!(counts.live(), 0);
}

#[test]
fn drop_releases_unreleased_handle() {
    let optimizer = StubOptimizer::new();
    let counts = optimizer.counts();
    {
        let _handle = SolverHandle::create(Arc::new(optimizer), &week_input(), 1).unwrap();
        assert_eq!(counts.live(), 1);
    }
    assert_eq!(counts.released(), 1);
}

#[test]
fn queries_are_idempotent() {
    let optimizer = StubOptimizer::new();
    let mut handle = SolverHandle::create(Arc::new(optimizer), &week_input(), 1).unwrap();
    handle.execute_round().unwrap();
    handle.execute_round().unwrap();

    assert_eq!(handle.best_solution(), handle.best_solution());
    assert_eq!(handle.iteration_info(), handle.iteration_info());
    assert_eq!(handle.is_finished(), handle.is_finished());
    assert_eq!(handle.rounds(), 2);
}

#[test]
fn failed_round_is_not_counted() {
    let optimizer = StubOptimizer::new().failing_on_round(1);
    let counts = optimizer.counts();
    let mut handle = SolverHandle::create(Arc::new(optimizer), &week_input(), 1).unwrap();

    assert!(matches!(
        handle.execute_round(),
        Err(OptimizerError::Internal(_))
    ));
    assert_eq!(handle.rounds(), 0);

    handle.release();
    assert_eq!(counts.live(), 0);
}
