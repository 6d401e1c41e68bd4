use rosterforge_core::{ProblemInput, Resource};
use rosterforge_test::{date, input, week_input};

use super::*;

fn problem(input: &ProblemInput) -> RosterProblem {
    RosterProblem::new(input).unwrap()
}

fn violations(kind: ConstraintKind, input: &ProblemInput, assignment: &[usize]) -> i64 {
    RosterScoreCalculator::new().violations(kind, &problem(input), assignment)
}

#[test]
fn rotation_over_one_week() {
    let problem = problem(&week_input());
    let score = RosterScoreCalculator::new().calculate(&problem, &[0, 1, 2, 0, 1, 2, 0]);

    // Resource 0 works three days of the week, and one more day than the
    // others. The weekend is split between resources 2 and 0.
    assert_eq!(score, HardSoftScore::of(0, -3));
}

#[test]
fn consecutive_days() {
    let week = week_input();
    assert_eq!(
        violations(ConstraintKind::ConsecutiveDays, &week, &[0, 0, 1, 1, 1, 2, 0]),
        3
    );
    assert_eq!(
        violations(ConstraintKind::ConsecutiveDays, &week, &[0, 1, 0, 1, 0, 1, 0]),
        0
    );
}

#[test]
fn unavailable_days() {
    let input = ProblemInput::new(
        date(2024, 1, 1),
        date(2024, 1, 3),
        vec![
            Resource::new(1).with_unavailability([date(2024, 1, 1), date(2024, 1, 3)]),
            Resource::new(2),
        ],
    );

    assert_eq!(violations(ConstraintKind::Unavailable, &input, &[0, 1, 0]), 2);
    assert_eq!(violations(ConstraintKind::Unavailable, &input, &[1, 0, 1]), 0);
}

#[test]
fn consecutive_weekends() {
    // Days 5 and 6 are the first weekend, days 12 and 13 the second.
    let two_weeks = input(14, 4);
    let assignment = [0, 3, 0, 3, 0, 1, 2, 3, 0, 3, 0, 3, 1, 2];

    assert_eq!(
        violations(ConstraintKind::ConsecutiveWeekends, &two_weeks, &assignment),
        2
    );

    let mut swapped = assignment;
    swapped[12] = 3;
    swapped[13] = 0;
    assert_eq!(
        violations(ConstraintKind::ConsecutiveWeekends, &two_weeks, &swapped),
        0
    );
}

#[test]
fn consecutive_weekends_needs_two_weekends() {
    assert_eq!(
        violations(ConstraintKind::ConsecutiveWeekends, &week_input(), &[0, 1, 0, 1, 0, 1, 0]),
        0
    );
}

#[test]
fn window_loads() {
    let two_weeks = input(14, 2);
    let alternating: Vec<usize> = (0..14).map(|day| day % 2).collect();

    // One 14-day window, both resources over 3 days.
    assert_eq!(
        violations(ConstraintKind::FortnightLoad, &two_weeks, &alternating),
        2
    );
    // Eight 7-day windows, both resources over 2 days in each.
    assert_eq!(violations(ConstraintKind::WeekLoad, &two_weeks, &alternating), 16);
}

#[test]
fn weekday_consistency_costs_smallest_share() {
    let two_weeks = input(14, 2);
    // Mondays are split between both resources, every other weekday is not.
    let assignment = [0, 1, 0, 1, 0, 1, 0, 1, 1, 0, 1, 0, 1, 0];

    assert_eq!(
        violations(ConstraintKind::WeekdayConsistency, &two_weeks, &assignment),
        1
    );
}

#[test]
fn weekend_days_do_not_count_for_weekday_consistency() {
    let two_weeks = input(14, 2);
    let mut assignment = [0, 1, 0, 1, 0, 1, 0, 0, 1, 0, 1, 0, 1, 0];
    assignment[12] = 0;
    assignment[13] = 1;

    assert_eq!(
        violations(ConstraintKind::WeekdayConsistency, &two_weeks, &assignment),
        0
    );
}

#[test]
fn spread_counts_idle_resources() {
    let input = input(3, 4);

    assert_eq!(violations(ConstraintKind::DaySpread, &input, &[0, 1, 2]), 1);
    assert_eq!(violations(ConstraintKind::DaySpread, &input, &[0, 0, 0]), 3);
}

#[test]
fn weekend_spread() {
    let week = week_input();

    assert_eq!(
        violations(ConstraintKind::WeekendSpread, &week, &[0, 1, 2, 0, 1, 2, 2]),
        2
    );
}

#[test]
fn explain_lists_broken_constraints() {
    let problem = problem(&week_input());
    let calculator = RosterScoreCalculator::new();
    let assignment = [0, 0, 1, 2, 0, 1, 2];

    let explained = calculator.explain(&problem, &assignment);
    let total = explained
        .iter()
        .fold(HardSoftScore::ZERO, |sum, &(kind, n)| sum + kind.penalty(n));

    assert!(explained.contains(&(ConstraintKind::ConsecutiveDays, 1)));
    assert!(explained.iter().all(|&(_, n)| n > 0));
    assert_eq!(total, calculator.calculate(&problem, &assignment));
}

#[test]
fn hard_and_soft_levels() {
    assert_eq!(
        ConstraintKind::Unavailable.penalty(2),
        HardSoftScore::of_hard(-2)
    );
    assert_eq!(
        ConstraintKind::DaySpread.penalty(3),
        HardSoftScore::of_soft(-3)
    );
    assert_eq!(
        ConstraintKind::ALL.iter().filter(|kind| kind.is_hard()).count(),
        4
    );
    assert_eq!(ConstraintKind::WeekLoad.to_string(), "week_load");
}
