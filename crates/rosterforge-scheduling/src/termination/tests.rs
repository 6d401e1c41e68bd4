//! Tests for termination conditions.

use std::time::Duration;

use rosterforge_config::SolverConfig;

use super::*;

fn progress(round: u64, best_score: HardSoftScore) -> RoundProgress<HardSoftScore> {
    RoundProgress {
        round,
        elapsed: Duration::ZERO,
        best_score,
        rounds_since_improvement: 0,
    }
}

#[test]
fn test_round_count_termination() {
    let term = RoundCountTermination::new(3);

    assert!(!term.is_terminated(&progress(2, HardSoftScore::ZERO)));
    assert!(term.is_terminated(&progress(3, HardSoftScore::ZERO)));
}

#[test]
fn test_time_termination() {
    let term = TimeTermination::millis(100);
    let mut state = progress(1, HardSoftScore::ZERO);

    assert!(!term.is_terminated(&state));
    state.elapsed = Duration::from_millis(100);
    assert!(term.is_terminated(&state));
}

#[test]
fn test_unimproved_round_count_termination() {
    let term = UnimprovedRoundCountTermination::new(5);
    let mut state = progress(10, HardSoftScore::of_soft(-3));

    state.rounds_since_improvement = 4;
    assert!(!term.is_terminated(&state));
    state.rounds_since_improvement = 5;
    assert!(term.is_terminated(&state));
}

#[test]
fn test_best_score_termination() {
    let term = BestScoreTermination::new(HardSoftScore::of(0, -5));

    assert!(!term.is_terminated(&progress(1, HardSoftScore::of(-1, 0))));
    assert!(!term.is_terminated(&progress(1, HardSoftScore::of(0, -6))));
    assert!(term.is_terminated(&progress(1, HardSoftScore::of(0, -5))));
    assert!(term.is_terminated(&progress(1, HardSoftScore::of(0, -2))));
}

#[test]
fn test_or_termination() {
    let term = OrTermination((
        RoundCountTermination::new(10),
        BestScoreTermination::new(HardSoftScore::ZERO),
    ));

    assert!(!term.is_terminated(&progress(3, HardSoftScore::of_hard(-1))));
    assert!(term.is_terminated(&progress(3, HardSoftScore::ZERO)));
    assert!(term.is_terminated(&progress(10, HardSoftScore::of_hard(-1))));
}

#[test]
fn test_absent_condition_never_terminates() {
    let term: Option<RoundCountTermination> = None;
    assert!(!term.is_terminated(&progress(u64::MAX, HardSoftScore::ZERO)));
}

#[test]
fn test_defaults_without_config() {
    let term = RosterTermination::from_config(None).unwrap();
    let mut state = progress(DEFAULT_ROUND_COUNT_LIMIT - 1, HardSoftScore::of_soft(-1));

    assert_eq!(term.round_count_limit(), Some(DEFAULT_ROUND_COUNT_LIMIT));
    assert_eq!(term.time_limit(), None);
    assert!(!term.is_terminated(&state));

    state.rounds_since_improvement = DEFAULT_UNIMPROVED_ROUND_COUNT_LIMIT;
    assert!(term.is_terminated(&state));
}

#[test]
fn test_configured_limits_replace_defaults() {
    let config = SolverConfig::from_toml_str(
        r#"
        [termination]
        seconds_spent_limit = 2
        best_score_limit = "0hard/-4soft"
    "#,
    )
    .unwrap();
    let term = RosterTermination::from_config(config.termination.as_ref()).unwrap();
    let mut state = progress(10_000, HardSoftScore::of_soft(-5));
    state.rounds_since_improvement = 10_000;

    assert_eq!(term.round_count_limit(), None);
    assert_eq!(term.time_limit(), Some(Duration::from_secs(2)));
    assert!(!term.is_terminated(&state));

    state.best_score = HardSoftScore::of_soft(-4);
    assert!(term.is_terminated(&state));

    state.best_score = HardSoftScore::of_soft(-5);
    state.elapsed = Duration::from_secs(2);
    assert!(term.is_terminated(&state));
}

#[test]
fn test_invalid_best_score_limit() {
    let config = TerminationConfig {
        best_score_limit: Some("nonsense".to_string()),
        ..TerminationConfig::default()
    };

    assert!(matches!(
        RosterTermination::from_config(Some(&config)),
        Err(ConfigError::Invalid(_))
    ));
}
