//! Index-based view of a problem input.

use chrono::{Datelike, NaiveDate, Weekday};
use rosterforge_core::{
    Assignment, HardSoftScore, InvalidInputError, ProblemInput, ResourceId, Schedule,
};

/// The problem with dates and resources replaced by dense indices.
///
/// Working assignments are `Vec<usize>`: slot `day` holds the index of the
/// resource assigned to `dates[day]`.
#[derive(Debug, Clone)]
pub struct RosterProblem {
    dates: Vec<NaiveDate>,
    resource_ids: Vec<ResourceId>,
    /// `unavailable[day][resource]`
    unavailable: Vec<Vec<bool>>,
}

impl RosterProblem {
    /// Validates `input` and indexes it.
    pub fn new(input: &ProblemInput) -> Result<Self, InvalidInputError> {
        input.validate()?;

        let dates: Vec<NaiveDate> = input.dates().collect();
        let unavailable = dates
            .iter()
            .map(|&date| {
                input
                    .resources
                    .iter()
                    .map(|r| !r.is_available_on(date))
                    .collect()
            })
            .collect();

        Ok(Self {
            dates,
            resource_ids: input.resources.iter().map(|r| r.id).collect(),
            unavailable,
        })
    }

    pub fn day_count(&self) -> usize {
        self.dates.len()
    }

    pub fn resource_count(&self) -> usize {
        self.resource_ids.len()
    }

    pub fn date(&self, day: usize) -> NaiveDate {
        self.dates[day]
    }

    pub fn resource_id(&self, resource: usize) -> ResourceId {
        self.resource_ids[resource]
    }

    pub fn is_unavailable(&self, day: usize, resource: usize) -> bool {
        self.unavailable[day][resource]
    }

    pub fn weekday(&self, day: usize) -> Weekday {
        self.dates[day].weekday()
    }

    pub fn is_weekend(&self, day: usize) -> bool {
        matches!(self.weekday(day), Weekday::Sat | Weekday::Sun)
    }

    /// Builds the public snapshot of `assignment`.
    pub fn to_schedule(&self, assignment: &[usize], score: HardSoftScore) -> Schedule {
        let assignments = assignment
            .iter()
            .enumerate()
            .map(|(day, &resource)| Assignment {
                date: self.dates[day],
                resource_id: self.resource_ids[resource],
            })
            .collect();
        Schedule::new(score, assignments)
    }
}

#[cfg(test)]
mod tests {
    use rosterforge_core::Resource;
    use rosterforge_test::{date, empty_resources_input, week_input};

    use super::*;

    #[test]
    fn indexes_dates_and_resources() {
        let problem = RosterProblem::new(&week_input()).unwrap();

        assert_eq!(problem.day_count(), 7);
        assert_eq!(problem.resource_count(), 3);
        assert_eq!(problem.date(0), date(2024, 1, 1));
        assert_eq!(problem.weekday(0), Weekday::Mon);
        assert!(!problem.is_weekend(4));
        assert!(problem.is_weekend(5));
        assert!(problem.is_weekend(6));
    }

    #[test]
    fn records_unavailability() {
        let input = ProblemInput::new(
            date(2024, 1, 1),
            date(2024, 1, 3),
            vec![
                Resource::new(7),
                Resource::new(9).with_unavailability([date(2024, 1, 2)]),
            ],
        );
        let problem = RosterProblem::new(&input).unwrap();

        assert!(!problem.is_unavailable(1, 0));
        assert!(problem.is_unavailable(1, 1));
        assert!(!problem.is_unavailable(0, 1));
        assert_eq!(problem.resource_id(1), 9);
    }

    #[test]
    fn rejects_invalid_input() {
        assert_eq!(
            RosterProblem::new(&empty_resources_input()).unwrap_err(),
            InvalidInputError::NoResources
        );
    }

    #[test]
    fn schedule_snapshot_maps_indices_back() {
        let problem = RosterProblem::new(&week_input()).unwrap();
        let schedule = problem.to_schedule(&[0, 1, 2, 0, 1, 2, 0], HardSoftScore::of_soft(-2));

        assert_eq!(schedule.assignments.len(), 7);
        assert_eq!(schedule.score, HardSoftScore::of_soft(-2));
        assert_eq!(
            schedule.resource_on(date(2024, 1, 3)),
            Some(problem.resource_id(2))
        );
    }
}
