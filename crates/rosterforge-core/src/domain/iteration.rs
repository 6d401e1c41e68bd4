//! Per-round diagnostics.

use serde::{Deserialize, Serialize};

use crate::score::HardSoftScore;

/// Which kind of work produced an [`IterationInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    /// No round has run yet; the snapshot describes the seed.
    Seed,
    /// The round committed the constructed seed solution.
    Construction,
    /// The round ran bounded local search.
    LocalSearch,
}

/// Immutable snapshot describing solver progress at the end of a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationInfo {
    /// Rounds executed so far.
    pub round: u64,
    pub phase: RoundPhase,
    /// Score of the best solution after this round.
    pub score: HardSoftScore,
    pub best_score_improved: bool,
    /// Moves evaluated during this round only.
    pub moves_evaluated: u64,
    /// Moves accepted during this round only.
    pub moves_accepted: u64,
    pub total_moves_evaluated: u64,
    pub rounds_since_improvement: u64,
    pub elapsed_ms: u64,
}

impl IterationInfo {
    /// Diagnostics for a handle on which no round has executed.
    pub fn seed(score: HardSoftScore) -> Self {
        Self {
            round: 0,
            phase: RoundPhase::Seed,
            score,
            best_score_improved: false,
            moves_evaluated: 0,
            moves_accepted: 0,
            total_moves_evaluated: 0,
            rounds_since_improvement: 0,
            elapsed_ms: 0,
        }
    }
}
