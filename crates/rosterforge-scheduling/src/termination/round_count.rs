//! Round count termination.

use rosterforge_core::Score;

use super::{RoundProgress, Termination};

/// Terminates after a number of rounds.
///
/// # Example
///
/// ```
/// use rosterforge_scheduling::termination::RoundCountTermination;
///
/// // Terminate after 100 rounds
/// let term = RoundCountTermination::new(100);
/// ```
#[derive(Debug, Clone)]
pub struct RoundCountTermination {
    limit: u64,
}

impl RoundCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl<Sc: Score> Termination<Sc> for RoundCountTermination {
    fn is_terminated(&self, progress: &RoundProgress<Sc>) -> bool {
        progress.round >= self.limit
    }
}
