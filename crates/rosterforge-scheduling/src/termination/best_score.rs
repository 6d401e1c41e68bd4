//! Score-based termination conditions.

use rosterforge_core::Score;

use super::{RoundProgress, Termination};

/// Terminates when the best score reaches or exceeds a target.
///
/// # Example
///
/// ```
/// use rosterforge_core::HardSoftScore;
/// use rosterforge_scheduling::termination::BestScoreTermination;
///
/// let term = BestScoreTermination::new(HardSoftScore::of(0, -10));
/// ```
#[derive(Debug, Clone)]
pub struct BestScoreTermination<Sc: Score> {
    target_score: Sc,
}

impl<Sc: Score> BestScoreTermination<Sc> {
    pub fn new(target_score: Sc) -> Self {
        Self { target_score }
    }
}

impl<Sc: Score> Termination<Sc> for BestScoreTermination<Sc> {
    fn is_terminated(&self, progress: &RoundProgress<Sc>) -> bool {
        progress.best_score >= self.target_score
    }
}
