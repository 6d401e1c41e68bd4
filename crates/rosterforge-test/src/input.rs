//! Problem input fixtures.

use chrono::NaiveDate;
use rosterforge_core::{ProblemInput, Resource};
use serde_json::{json, Value};

/// Shorthand for a calendar date. Panics on an invalid date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

/// First day of every fixture window (a Monday).
pub fn window_start() -> NaiveDate {
    date(2024, 1, 1)
}

/// `days` consecutive days starting at [`window_start`], served by
/// resources `1..=resources`.
pub fn input(days: u32, resources: i64) -> ProblemInput {
    let start = window_start();
    let end = start + chrono::Duration::days(i64::from(days.saturating_sub(1)));
    ProblemInput::new(start, end, (1..=resources).map(Resource::new).collect())
}

/// 7-day window with 3 resources and no unavailability.
pub fn week_input() -> ProblemInput {
    input(7, 3)
}

/// Four weeks with 5 resources, some of them unavailable on a few days.
pub fn month_input() -> ProblemInput {
    let mut problem = input(28, 5);
    problem.resources[0].unavailability = vec![date(2024, 1, 2), date(2024, 1, 3)];
    problem.resources[2].unavailability = vec![date(2024, 1, 13), date(2024, 1, 14)];
    problem.resources[4].unavailability = vec![date(2024, 1, 20)];
    problem
}

pub fn empty_resources_input() -> ProblemInput {
    ProblemInput::new(date(2024, 1, 1), date(2024, 1, 7), Vec::new())
}

pub fn inverted_window_input() -> ProblemInput {
    ProblemInput::new(date(2024, 1, 7), date(2024, 1, 1), vec![Resource::new(1)])
}

/// A `start` message carrying `problem`, in wire form.
pub fn start_message(problem: &ProblemInput) -> Value {
    let mut message = serde_json::to_value(problem).expect("problem input serializes");
    if let Value::Object(fields) = &mut message {
        fields.insert("eventType".to_string(), json!("start"));
    }
    message
}
