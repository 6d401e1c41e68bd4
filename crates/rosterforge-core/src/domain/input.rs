//! Problem input supplied with a `start` request.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;

/// Identifier of a schedulable resource.
pub type ResourceId = i64;

/// A resource that can be assigned to days of the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: ResourceId,

    /// Dates on which this resource must not be assigned.
    #[serde(default)]
    pub unavailability: Vec<NaiveDate>,
}

impl Resource {
    pub fn new(id: ResourceId) -> Self {
        Self {
            id,
            unavailability: Vec::new(),
        }
    }

    pub fn with_unavailability(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.unavailability.extend(dates);
        self
    }

    pub fn is_available_on(&self, date: NaiveDate) -> bool {
        !self.unavailability.contains(&date)
    }
}

/// Immutable description of one scheduling instance.
///
/// The window is inclusive on both ends: a window whose start equals its end
/// covers exactly one day.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rosterforge_core::domain::{ProblemInput, Resource};
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
/// let input = ProblemInput::new(start, end, (1..=3).map(Resource::new).collect());
///
/// assert!(input.validate().is_ok());
/// assert_eq!(input.day_count(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemInput {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub resources: Vec<Resource>,
}

impl ProblemInput {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, resources: Vec<Resource>) -> Self {
        Self {
            start_date,
            end_date,
            resources,
        }
    }

    /// Checks the input before any solver state is allocated.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if self.start_date > self.end_date {
            return Err(InvalidInputError::InvertedWindow {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if self.resources.is_empty() {
            return Err(InvalidInputError::NoResources);
        }
        let mut seen = HashSet::with_capacity(self.resources.len());
        for resource in &self.resources {
            if !seen.insert(resource.id) {
                return Err(InvalidInputError::DuplicateResource(resource.id));
            }
        }
        Ok(())
    }

    /// Number of days in the window, 0 if the window is inverted.
    pub fn day_count(&self) -> usize {
        let days = self
            .end_date
            .signed_duration_since(self.start_date)
            .num_days();
        if days < 0 {
            0
        } else {
            days as usize + 1
        }
    }

    /// Iterates the dates of the window in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date.iter_days().take(self.day_count())
    }
}
