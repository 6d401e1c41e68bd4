//! Rotation constraints and the score calculator.
//!
//! Every constraint counts violations; a violation of a hard constraint costs
//! `-1hard`, a violation of a soft constraint `-1soft`.

use std::fmt;

use chrono::Datelike;
use rosterforge_core::HardSoftScore;

use crate::problem::RosterProblem;

/// Saturday through the Sunday of the following week.
const WEEKEND_WINDOW: usize = 9;

/// At most `FORTNIGHT_LIMIT` days per resource in any 14-day window.
const FORTNIGHT_WINDOW: usize = 14;
const FORTNIGHT_LIMIT: usize = 3;

/// At most `WEEK_LIMIT` days per resource in any 7-day window.
const WEEK_WINDOW: usize = 7;
const WEEK_LIMIT: usize = 2;

/// Monday to Friday.
const WORKING_WEEKDAYS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Resource scheduled on a day it is unavailable.
    Unavailable,
    /// Same resource on two consecutive days.
    ConsecutiveDays,
    /// Same resource on two consecutive weekends.
    ConsecutiveWeekends,
    /// More than 3 days in a 14-day window.
    FortnightLoad,
    /// More than 2 days in a 7-day window.
    WeekLoad,
    /// A weekday shared between resources. Costs the smallest share.
    WeekdayConsistency,
    /// Difference between the most and least assigned days.
    DaySpread,
    /// Difference between the most and least assigned weekend days.
    WeekendSpread,
}

impl ConstraintKind {
    pub const ALL: [ConstraintKind; 8] = [
        ConstraintKind::Unavailable,
        ConstraintKind::ConsecutiveDays,
        ConstraintKind::ConsecutiveWeekends,
        ConstraintKind::FortnightLoad,
        ConstraintKind::WeekLoad,
        ConstraintKind::WeekdayConsistency,
        ConstraintKind::DaySpread,
        ConstraintKind::WeekendSpread,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ConstraintKind::Unavailable => "unavailable",
            ConstraintKind::ConsecutiveDays => "consecutive_days",
            ConstraintKind::ConsecutiveWeekends => "consecutive_weekends",
            ConstraintKind::FortnightLoad => "fortnight_load",
            ConstraintKind::WeekLoad => "week_load",
            ConstraintKind::WeekdayConsistency => "weekday_consistency",
            ConstraintKind::DaySpread => "day_spread",
            ConstraintKind::WeekendSpread => "weekend_spread",
        }
    }

    pub fn is_hard(self) -> bool {
        matches!(
            self,
            ConstraintKind::Unavailable
                | ConstraintKind::ConsecutiveDays
                | ConstraintKind::ConsecutiveWeekends
                | ConstraintKind::FortnightLoad
        )
    }

    /// Score of `violations` violations of this constraint.
    pub fn penalty(self, violations: i64) -> HardSoftScore {
        if self.is_hard() {
            HardSoftScore::of_hard(-violations)
        } else {
            HardSoftScore::of_soft(-violations)
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scores complete assignments from scratch.
///
/// # Examples
///
/// ```
/// use rosterforge_core::HardSoftScore;
/// use rosterforge_scheduling::{RosterProblem, RosterScoreCalculator};
/// use rosterforge_test::week_input;
///
/// let problem = RosterProblem::new(&week_input()).unwrap();
/// let calculator = RosterScoreCalculator::new();
///
/// // Resource 0 works Monday and Tuesday back to back.
/// let score = calculator.calculate(&problem, &[0, 0, 1, 2, 0, 1, 2]);
/// assert_eq!(score.hard(), -1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RosterScoreCalculator;

impl RosterScoreCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn calculate(&self, problem: &RosterProblem, assignment: &[usize]) -> HardSoftScore {
        ConstraintKind::ALL
            .iter()
            .map(|&kind| kind.penalty(self.violations(kind, problem, assignment)))
            .fold(HardSoftScore::ZERO, |total, score| total + score)
    }

    /// Violation count of every constraint that is broken.
    pub fn explain(
        &self,
        problem: &RosterProblem,
        assignment: &[usize],
    ) -> Vec<(ConstraintKind, i64)> {
        ConstraintKind::ALL
            .iter()
            .map(|&kind| (kind, self.violations(kind, problem, assignment)))
            .filter(|(_, violations)| *violations > 0)
            .collect()
    }

    pub fn violations(
        &self,
        kind: ConstraintKind,
        problem: &RosterProblem,
        assignment: &[usize],
    ) -> i64 {
        let count = match kind {
            ConstraintKind::Unavailable => unavailable(problem, assignment),
            ConstraintKind::ConsecutiveDays => consecutive_days(assignment),
            ConstraintKind::ConsecutiveWeekends => consecutive_weekends(problem, assignment),
            ConstraintKind::FortnightLoad => window_overload(
                assignment,
                problem.resource_count(),
                FORTNIGHT_WINDOW,
                FORTNIGHT_LIMIT,
            ),
            ConstraintKind::WeekLoad => {
                window_overload(assignment, problem.resource_count(), WEEK_WINDOW, WEEK_LIMIT)
            }
            ConstraintKind::WeekdayConsistency => weekday_consistency(problem, assignment),
            ConstraintKind::DaySpread => {
                spread(problem.resource_count(), assignment.iter().copied())
            }
            ConstraintKind::WeekendSpread => spread(
                problem.resource_count(),
                assignment
                    .iter()
                    .enumerate()
                    .filter(|(day, _)| problem.is_weekend(*day))
                    .map(|(_, &resource)| resource),
            ),
        };
        count as i64
    }
}

fn unavailable(problem: &RosterProblem, assignment: &[usize]) -> usize {
    assignment
        .iter()
        .enumerate()
        .filter(|&(day, &resource)| problem.is_unavailable(day, resource))
        .count()
}

fn consecutive_days(assignment: &[usize]) -> usize {
    assignment.windows(2).filter(|w| w[0] == w[1]).count()
}

/// For every Saturday-Sunday pair, compares both days against both days one
/// week later.
fn consecutive_weekends(problem: &RosterProblem, assignment: &[usize]) -> usize {
    if assignment.len() < WEEKEND_WINDOW {
        return 0;
    }
    let mut violations = 0;
    for start in 0..=assignment.len() - WEEKEND_WINDOW {
        if !(problem.is_weekend(start) && problem.is_weekend(start + 1)) {
            continue;
        }
        for first in [start, start + 1] {
            for second in [start + 7, start + 8] {
                if assignment[first] == assignment[second] {
                    violations += 1;
                }
            }
        }
    }
    violations
}

/// Sum over all windows of the number of resources assigned more than `limit`
/// days in that window.
fn window_overload(
    assignment: &[usize],
    resource_count: usize,
    window: usize,
    limit: usize,
) -> usize {
    if assignment.len() < window {
        return 0;
    }
    let mut counts = vec![0usize; resource_count];
    for &resource in &assignment[..window] {
        counts[resource] += 1;
    }
    let mut violations = counts.iter().filter(|&&c| c > limit).count();
    for end in window..assignment.len() {
        counts[assignment[end - window]] -= 1;
        counts[assignment[end]] += 1;
        violations += counts.iter().filter(|&&c| c > limit).count();
    }
    violations
}

fn weekday_consistency(problem: &RosterProblem, assignment: &[usize]) -> usize {
    let mut counts = vec![vec![0usize; problem.resource_count()]; WORKING_WEEKDAYS];
    for (day, &resource) in assignment.iter().enumerate() {
        let weekday = problem.weekday(day).num_days_from_monday() as usize;
        if weekday < WORKING_WEEKDAYS {
            counts[weekday][resource] += 1;
        }
    }

    counts
        .iter()
        .map(|per_resource| {
            let shared: Vec<usize> = per_resource.iter().copied().filter(|&c| c > 0).collect();
            if shared.len() > 1 {
                shared.iter().copied().min().unwrap_or(0)
            } else {
                0
            }
        })
        .sum()
}

/// Max minus min of per-resource counts, resources without days included.
fn spread(resource_count: usize, resources: impl Iterator<Item = usize>) -> usize {
    let mut counts = vec![0usize; resource_count];
    for resource in resources {
        counts[resource] += 1;
    }
    let max = counts.iter().copied().max().unwrap_or(0);
    let min = counts.iter().copied().min().unwrap_or(0);
    max - min
}

#[cfg(test)]
#[path = "constraints_tests.rs"]
mod tests;
