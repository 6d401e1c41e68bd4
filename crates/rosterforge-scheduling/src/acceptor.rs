//! Late acceptance acceptor.

use std::fmt::Debug;

use rosterforge_core::Score;

/// Accepts a move that improves on the last step, or that is at least as
/// good as the step score from `late_acceptance_size` steps ago.
///
/// # Example
///
/// ```
/// use rosterforge_core::HardSoftScore;
/// use rosterforge_scheduling::LateAcceptanceAcceptor;
///
/// let mut acceptor = LateAcceptanceAcceptor::new(2);
/// acceptor.phase_started(&HardSoftScore::of_soft(-10));
///
/// // Worse than the last step but as good as the late score.
/// assert!(acceptor.is_accepted(&HardSoftScore::of_soft(-5), &HardSoftScore::of_soft(-10)));
/// assert!(!acceptor.is_accepted(&HardSoftScore::of_soft(-5), &HardSoftScore::of_soft(-11)));
/// ```
#[derive(Clone)]
pub struct LateAcceptanceAcceptor<Sc: Score> {
    late_acceptance_size: usize,
    /// Circular buffer of step scores.
    score_history: Vec<Sc>,
    current_index: usize,
}

impl<Sc: Score> Debug for LateAcceptanceAcceptor<Sc> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LateAcceptanceAcceptor")
            .field("late_acceptance_size", &self.late_acceptance_size)
            .field("current_index", &self.current_index)
            .finish()
    }
}

impl<Sc: Score> LateAcceptanceAcceptor<Sc> {
    /// Creates an acceptor remembering `late_acceptance_size` step scores.
    /// A size of 0 is treated as 1.
    pub fn new(late_acceptance_size: usize) -> Self {
        let late_acceptance_size = late_acceptance_size.max(1);
        Self {
            late_acceptance_size,
            score_history: vec![Sc::zero(); late_acceptance_size],
            current_index: 0,
        }
    }

    pub fn is_accepted(&self, last_step_score: &Sc, move_score: &Sc) -> bool {
        if move_score > last_step_score {
            return true;
        }
        move_score >= &self.score_history[self.current_index]
    }

    /// Fills the history with the starting score.
    pub fn phase_started(&mut self, initial_score: &Sc) {
        for slot in &mut self.score_history {
            *slot = *initial_score;
        }
        self.current_index = 0;
    }

    pub fn step_ended(&mut self, step_score: &Sc) {
        self.score_history[self.current_index] = *step_score;
        self.current_index = (self.current_index + 1) % self.late_acceptance_size;
    }
}

impl<Sc: Score> Default for LateAcceptanceAcceptor<Sc> {
    fn default() -> Self {
        Self::new(400)
    }
}

#[cfg(test)]
mod tests {
    use rosterforge_core::HardSoftScore;

    use super::*;

    fn soft(value: i64) -> HardSoftScore {
        HardSoftScore::of_soft(value)
    }

    #[test]
    fn accepts_improvement_over_last_step() {
        let mut acceptor = LateAcceptanceAcceptor::new(3);
        acceptor.phase_started(&soft(-5));

        assert!(acceptor.is_accepted(&soft(-20), &soft(-19)));
    }

    #[test]
    fn late_score_moves_with_history() {
        let mut acceptor = LateAcceptanceAcceptor::new(2);
        acceptor.phase_started(&soft(-10));

        acceptor.step_ended(&soft(-8));
        acceptor.step_ended(&soft(-6));

        // The history now holds -8 and -6; the late score is -8.
        assert!(acceptor.is_accepted(&soft(-6), &soft(-8)));
        assert!(!acceptor.is_accepted(&soft(-6), &soft(-9)));

        acceptor.step_ended(&soft(-6));
        // Late score is now -6.
        assert!(!acceptor.is_accepted(&soft(-6), &soft(-7)));
    }

    #[test]
    fn hard_level_dominates() {
        let mut acceptor = LateAcceptanceAcceptor::new(1);
        acceptor.phase_started(&HardSoftScore::of(-1, 0));

        assert!(!acceptor.is_accepted(&HardSoftScore::of(-1, 0), &HardSoftScore::of(-2, 100)));
    }

    #[test]
    fn zero_size_is_usable() {
        let mut acceptor = LateAcceptanceAcceptor::<HardSoftScore>::new(0);
        acceptor.phase_started(&soft(-1));
        acceptor.step_ended(&soft(-1));

        assert!(acceptor.is_accepted(&soft(-1), &soft(-1)));
    }
}
