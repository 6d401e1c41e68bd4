use rosterforge_config::EnvironmentMode;
use rosterforge_core::{InvalidInputError, PlanningSolution};
use rosterforge_solver::{ExecutionContext, Request, Solver};
use rosterforge_test::{date, empty_resources_input, input, month_input, week_input};

use super::*;

fn optimizer() -> SchedulingOptimizer {
    SchedulingOptimizer::new(&SolverConfig::new().with_moves_per_round(200)).unwrap()
}

fn run_rounds(optimizer: &SchedulingOptimizer, state: &mut RosterState, rounds: u64) {
    for _ in 0..rounds {
        optimizer.execute_round(state).unwrap();
    }
}

#[test]
fn seed_is_available_before_first_round() {
    let optimizer = optimizer();
    let state = optimizer.create(&week_input()).unwrap();

    let seed = optimizer.best_solution(&state);
    let ids: Vec<i64> = seed.assignments.iter().map(|a| a.resource_id).collect();

    assert_eq!(ids, vec![1, 2, 3, 1, 2, 3, 1]);
    assert_eq!(seed.score, HardSoftScore::of(0, -3));
    assert_eq!(optimizer.iteration_info(&state), IterationInfo::seed(seed.score));
    assert!(!optimizer.is_finished(&state));
}

#[test]
fn first_round_commits_the_seed() {
    let optimizer = optimizer();
    let mut state = optimizer.create(&week_input()).unwrap();
    let seed = optimizer.best_solution(&state);

    optimizer.execute_round(&mut state).unwrap();
    let info = optimizer.iteration_info(&state);

    assert_eq!(optimizer.best_solution(&state), seed);
    assert_eq!(info.round, 1);
    assert_eq!(info.phase, RoundPhase::Construction);
    assert_eq!(info.moves_evaluated, 0);
    assert!(!info.best_score_improved);
}

#[test]
fn local_search_rounds_never_worsen_the_best() {
    let optimizer = optimizer();
    let mut state = optimizer.create(&month_input()).unwrap();
    let mut previous = optimizer.best_solution(&state).score();

    for round in 1..=30 {
        optimizer.execute_round(&mut state).unwrap();
        let info = optimizer.iteration_info(&state);
        let best = optimizer.best_solution(&state);

        assert_eq!(info.round, round);
        assert_eq!(info.score, best.score);
        assert!(best.score >= previous);
        assert_eq!(info.best_score_improved, best.score > previous);
        assert!(info.moves_evaluated <= 200);
        assert!(info.moves_accepted <= info.moves_evaluated);
        previous = best.score;
    }

    let info = optimizer.iteration_info(&state);
    assert_eq!(info.phase, RoundPhase::LocalSearch);
    assert!(info.total_moves_evaluated > 0);
}

#[test]
fn snapshots_are_independent_of_later_rounds() {
    let optimizer = optimizer();
    let mut state = optimizer.create(&month_input()).unwrap();
    run_rounds(&optimizer, &mut state, 1);

    let snapshot = optimizer.best_solution(&state);
    let copy = snapshot.clone();
    run_rounds(&optimizer, &mut state, 10);

    assert_eq!(snapshot, copy);
}

#[test]
fn week_is_solved_feasibly_using_every_resource() {
    let config = SolverConfig::new()
        .with_round_count_limit(20)
        .with_moves_per_round(200);
    let mut solver = Solver::new(SchedulingOptimizer::new(&config).unwrap());

    let outcome = solver.solve(&week_input()).unwrap();
    let schedule = outcome.into_solution();

    assert!(schedule.is_feasible());
    assert_eq!(schedule.assignments.len(), 7);
    assert_eq!(schedule.days_by_resource().len(), 3);
}

#[test]
fn month_stays_feasible() {
    let config = SolverConfig::new()
        .with_round_count_limit(40)
        .with_moves_per_round(300);
    let optimizer = SchedulingOptimizer::new(&config).unwrap();

    let schedule = rosterforge_solver::solve(optimizer, &month_input()).unwrap();

    assert!(schedule.is_feasible(), "score {}", schedule.score);
    assert_ne!(schedule.resource_on(date(2024, 1, 2)), Some(1));
    assert_ne!(schedule.resource_on(date(2024, 1, 13)), Some(3));
}

#[test]
fn same_seed_same_result() {
    let optimizer_a = optimizer();
    let optimizer_b = optimizer();
    let mut a = optimizer_a.create(&month_input()).unwrap();
    let mut b = optimizer_b.create(&month_input()).unwrap();

    run_rounds(&optimizer_a, &mut a, 8);
    run_rounds(&optimizer_b, &mut b, 8);

    assert_eq!(optimizer_a.best_solution(&a), optimizer_b.best_solution(&b));
}

#[test]
fn round_limit_finishes_run() {
    let config = SolverConfig::new().with_round_count_limit(3);
    let optimizer = SchedulingOptimizer::new(&config).unwrap();
    let mut state = optimizer.create(&week_input()).unwrap();

    run_rounds(&optimizer, &mut state, 2);
    assert!(!optimizer.is_finished(&state));

    run_rounds(&optimizer, &mut state, 1);
    assert!(optimizer.is_finished(&state));
}

#[test]
fn perfect_score_finishes_after_construction() {
    // Monday and Tuesday with two resources has a penalty-free seed.
    let optimizer = SchedulingOptimizer::default();
    let mut state = optimizer.create(&input(2, 2)).unwrap();

    assert_eq!(state.best_score(), HardSoftScore::ZERO);
    assert!(!optimizer.is_finished(&state));

    run_rounds(&optimizer, &mut state, 1);
    assert!(optimizer.is_finished(&state));
}

#[test]
fn invalid_input_is_rejected() {
    let err = optimizer().create(&empty_resources_input()).unwrap_err();
    assert_eq!(
        err,
        OptimizerError::InvalidInput(InvalidInputError::NoResources)
    );
}

#[test]
fn invalid_config_is_rejected() {
    assert!(SchedulingOptimizer::new(&SolverConfig::new().with_moves_per_round(0)).is_err());
}

#[test]
fn asserted_mode_checks_every_round() {
    let config = SolverConfig {
        environment_mode: EnvironmentMode::FullAssert,
        ..SolverConfig::new().with_moves_per_round(100)
    };
    let optimizer = SchedulingOptimizer::new(&config).unwrap();
    let mut state = optimizer.create(&month_input()).unwrap();

    run_rounds(&optimizer, &mut state, 5);
    assert_eq!(state.round(), 5);
}

#[test]
fn non_reproducible_mode_runs() {
    let config = SolverConfig {
        environment_mode: EnvironmentMode::NonReproducible,
        ..SolverConfig::new().with_moves_per_round(50)
    };
    let optimizer = SchedulingOptimizer::new(&config).unwrap();
    let mut state = optimizer.create(&week_input()).unwrap();

    run_rounds(&optimizer, &mut state, 3);
    assert!(state.best_score() >= HardSoftScore::of(0, -3));
}

#[test]
fn start_then_cancel_returns_the_seed() {
    let optimizer = optimizer();
    let seed = {
        let state = optimizer.create(&week_input()).unwrap();
        let seed = optimizer.best_solution(&state);
        optimizer.release(state);
        seed
    };
    let mut context = ExecutionContext::new(optimizer);

    let first = context.handle(Request::Start(week_input())).unwrap();
    let last = context.handle(Request::Cancel).unwrap();

    assert!(!first.is_finished());
    assert!(last.is_finished());
    assert_eq!(last.result(), Some(&seed));
}
