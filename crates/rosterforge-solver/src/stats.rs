//! Run statistics.
//!
//! Stack-allocated counters for tracking one optimizer run.

use std::time::{Duration, Instant};

/// Statistics for a single run, from `create` to release.
///
/// # Example
///
/// ```
/// use rosterforge_solver::stats::RunStats;
///
/// let mut stats = RunStats::default();
/// stats.start();
/// stats.record_round(true);
/// stats.record_round(false);
///
/// assert_eq!(stats.round_count, 2);
/// assert_eq!(stats.improvements, 1);
/// assert_eq!(stats.rounds_since_improvement, 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct RunStats {
    start_time: Option<Instant>,
    /// Rounds executed.
    pub round_count: u64,
    /// Rounds after which the best score was strictly better.
    pub improvements: u64,
    /// Rounds since the last improvement.
    pub rounds_since_improvement: u64,
}

impl RunStats {
    /// Marks the start of the run.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Returns the elapsed time since the run started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    /// Records a completed round.
    pub fn record_round(&mut self, improved: bool) {
        self.round_count += 1;
        if improved {
            self.improvements += 1;
            self.rounds_since_improvement = 0;
        } else {
            self.rounds_since_improvement += 1;
        }
    }

    /// Returns the rounds per second rate.
    pub fn rounds_per_second(&self) -> u64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            (self.round_count as f64 / secs) as u64
        } else {
            0
        }
    }

    /// Returns the fraction of rounds that improved the best score.
    pub fn improvement_rate(&self) -> f64 {
        if self.round_count == 0 {
            0.0
        } else {
            self.improvements as f64 / self.round_count as f64
        }
    }
}
