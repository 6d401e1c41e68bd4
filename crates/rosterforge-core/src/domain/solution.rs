//! Best-solution snapshots.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::input::ResourceId;
use crate::score::{HardSoftScore, Score};

/// A solution that carries its own score.
///
/// Implemented by every snapshot type an optimizer hands back as its best
/// solution, so the driver can compare rounds without knowing the domain.
pub trait PlanningSolution: Clone + std::fmt::Debug + Send + 'static {
    /// The score type used to evaluate this solution.
    type Score: Score;

    /// Returns the score this snapshot was taken with.
    fn score(&self) -> Self::Score;
}

/// One day of the window and the resource assigned to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub date: NaiveDate,
    pub resource_id: ResourceId,
}

/// Immutable snapshot of a complete day-to-resource assignment.
///
/// Assignments are ordered by date and cover every day of the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub score: HardSoftScore,
    pub assignments: Vec<Assignment>,
}

impl Schedule {
    pub fn new(score: HardSoftScore, assignments: Vec<Assignment>) -> Self {
        Self { score, assignments }
    }

    pub fn resource_on(&self, date: NaiveDate) -> Option<ResourceId> {
        self.assignments
            .iter()
            .find(|a| a.date == date)
            .map(|a| a.resource_id)
    }

    /// Groups the assigned dates per resource.
    pub fn days_by_resource(&self) -> BTreeMap<ResourceId, Vec<NaiveDate>> {
        let mut result: BTreeMap<ResourceId, Vec<NaiveDate>> = BTreeMap::new();
        for assignment in &self.assignments {
            result
                .entry(assignment.resource_id)
                .or_default()
                .push(assignment.date);
        }
        result
    }

    pub fn is_feasible(&self) -> bool {
        self.score.is_feasible()
    }
}

impl PlanningSolution for Schedule {
    type Score = HardSoftScore;

    fn score(&self) -> HardSoftScore {
        self.score
    }
}
