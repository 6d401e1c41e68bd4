//! Time-based termination.

use std::time::Duration;

use rosterforge_core::Score;

use super::{RoundProgress, Termination};

/// Terminates after a time limit.
///
/// The limit is checked at round boundaries, so a run may overshoot it by
/// up to one round.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use rosterforge_scheduling::termination::TimeTermination;
///
/// // Terminate after 30 seconds
/// let term = TimeTermination::new(Duration::from_secs(30));
///
/// // Or use convenience constructors
/// let term = TimeTermination::seconds(30);
/// let term = TimeTermination::millis(500);
/// ```
#[derive(Debug, Clone)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl<Sc: Score> Termination<Sc> for TimeTermination {
    fn is_terminated(&self, progress: &RoundProgress<Sc>) -> bool {
        progress.elapsed >= self.limit
    }
}
