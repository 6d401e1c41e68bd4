//! Termination based on lack of improvement.

use rosterforge_core::Score;

use super::{RoundProgress, Termination};

/// Terminates if the best score has not improved for a number of rounds.
///
/// Useful to stop a run that has plateaued and is unlikely to find better
/// solutions.
///
/// # Example
///
/// ```
/// use rosterforge_scheduling::termination::UnimprovedRoundCountTermination;
///
/// // Terminate after 20 rounds without improvement
/// let term = UnimprovedRoundCountTermination::new(20);
/// ```
#[derive(Debug, Clone)]
pub struct UnimprovedRoundCountTermination {
    limit: u64,
}

impl UnimprovedRoundCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl<Sc: Score> Termination<Sc> for UnimprovedRoundCountTermination {
    fn is_terminated(&self, progress: &RoundProgress<Sc>) -> bool {
        progress.rounds_since_improvement >= self.limit
    }
}
