//! Greedy construction of the seed assignment.

use crate::problem::RosterProblem;

/// Builds the seed assignment day by day.
///
/// Each day goes to the resource with the fewest days so far among those that
/// are available that day and did not work the day before; ties go to the
/// resource listed first. When no resource qualifies, every resource is a
/// candidate.
///
/// # Examples
///
/// ```
/// use rosterforge_scheduling::{construct_seed, RosterProblem};
/// use rosterforge_test::week_input;
///
/// let problem = RosterProblem::new(&week_input()).unwrap();
/// assert_eq!(construct_seed(&problem), vec![0, 1, 2, 0, 1, 2, 0]);
/// ```
pub fn construct_seed(problem: &RosterProblem) -> Vec<usize> {
    let mut assignment: Vec<usize> = Vec::with_capacity(problem.day_count());
    let mut days_assigned = vec![0usize; problem.resource_count()];

    for day in 0..problem.day_count() {
        let previous = assignment.last().copied();
        let qualifying = (0..problem.resource_count()).filter(|&resource| {
            !problem.is_unavailable(day, resource) && previous != Some(resource)
        });
        let chosen = fewest_days(&days_assigned, qualifying)
            .or_else(|| fewest_days(&days_assigned, 0..problem.resource_count()))
            .unwrap_or(0);

        days_assigned[chosen] += 1;
        assignment.push(chosen);
    }
    assignment
}

/// First candidate with the fewest assigned days.
fn fewest_days(days_assigned: &[usize], candidates: impl Iterator<Item = usize>) -> Option<usize> {
    candidates.min_by_key(|&resource| days_assigned[resource])
}

#[cfg(test)]
mod tests {
    use rosterforge_core::{ProblemInput, Resource};
    use rosterforge_test::{date, input, month_input};

    use super::*;

    #[test]
    fn rotates_through_resources() {
        let problem = RosterProblem::new(&input(5, 2)).unwrap();
        assert_eq!(construct_seed(&problem), vec![0, 1, 0, 1, 0]);
    }

    #[test]
    fn skips_unavailable_resources() {
        let input = ProblemInput::new(
            date(2024, 1, 1),
            date(2024, 1, 4),
            vec![
                Resource::new(1).with_unavailability([date(2024, 1, 1)]),
                Resource::new(2),
                Resource::new(3),
            ],
        );
        let problem = RosterProblem::new(&input).unwrap();

        // Day 0 cannot use resource 0; day 1 picks it as the least used.
        assert_eq!(construct_seed(&problem), vec![1, 0, 2, 0]);
    }

    #[test]
    fn relaxes_when_nobody_qualifies() {
        let problem = RosterProblem::new(&input(3, 1)).unwrap();
        assert_eq!(construct_seed(&problem), vec![0, 0, 0]);
    }

    #[test]
    fn respects_unavailability_and_rest_days() {
        let problem = RosterProblem::new(&month_input()).unwrap();
        let seed = construct_seed(&problem);

        assert_eq!(seed.len(), 28);
        for (day, &resource) in seed.iter().enumerate() {
            assert!(!problem.is_unavailable(day, resource));
        }
        assert!(seed.windows(2).all(|w| w[0] != w[1]));
    }
}
