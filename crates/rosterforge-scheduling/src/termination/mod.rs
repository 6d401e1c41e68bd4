//! Termination conditions for a scheduling run.
//!
//! Conditions are checked after every round against a [`RoundProgress`]
//! snapshot of the run.

mod best_score;
mod composite;
mod round_count;
mod time;
mod unimproved;

use std::fmt::Debug;
use std::time::Duration;

use rosterforge_config::{ConfigError, TerminationConfig};
use rosterforge_core::{HardSoftScore, Score};

pub use best_score::BestScoreTermination;
pub use composite::OrTermination;
pub use round_count::RoundCountTermination;
pub use time::TimeTermination;
pub use unimproved::UnimprovedRoundCountTermination;

/// Round limit used when no termination is configured.
pub const DEFAULT_ROUND_COUNT_LIMIT: u64 = 250;

/// Unimproved round limit used when no termination is configured.
pub const DEFAULT_UNIMPROVED_ROUND_COUNT_LIMIT: u64 = 20;

/// State of a run as seen by termination conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundProgress<Sc: Score> {
    /// Rounds executed so far.
    pub round: u64,
    pub elapsed: Duration,
    pub best_score: Sc,
    pub rounds_since_improvement: u64,
}

/// Trait for determining when a run is finished.
pub trait Termination<Sc: Score>: Send + Debug {
    /// Returns true if the run should stop.
    fn is_terminated(&self, progress: &RoundProgress<Sc>) -> bool;
}

/// An absent condition never terminates.
impl<Sc: Score, T: Termination<Sc>> Termination<Sc> for Option<T> {
    fn is_terminated(&self, progress: &RoundProgress<Sc>) -> bool {
        self.as_ref().is_some_and(|t| t.is_terminated(progress))
    }
}

type ConfiguredConditions = OrTermination<(
    Option<RoundCountTermination>,
    Option<TimeTermination>,
    Option<UnimprovedRoundCountTermination>,
    Option<BestScoreTermination<HardSoftScore>>,
)>;

/// The termination of a scheduling run, built from configuration.
///
/// Finishes when any configured limit is reached. Without a `[termination]`
/// section the run stops after [`DEFAULT_ROUND_COUNT_LIMIT`] rounds or
/// [`DEFAULT_UNIMPROVED_ROUND_COUNT_LIMIT`] rounds without improvement.
///
/// # Example
///
/// ```
/// use rosterforge_config::SolverConfig;
/// use rosterforge_scheduling::RosterTermination;
///
/// let config = SolverConfig::from_toml_str(r#"
///     [termination]
///     round_count_limit = 10
///     best_score_limit = "0hard/-5soft"
/// "#).unwrap();
///
/// let termination = RosterTermination::from_config(config.termination.as_ref()).unwrap();
/// assert_eq!(termination.round_count_limit(), Some(10));
/// ```
#[derive(Debug)]
pub struct RosterTermination {
    conditions: ConfiguredConditions,
}

impl Default for RosterTermination {
    fn default() -> Self {
        Self {
            conditions: OrTermination((
                Some(RoundCountTermination::new(DEFAULT_ROUND_COUNT_LIMIT)),
                None,
                Some(UnimprovedRoundCountTermination::new(
                    DEFAULT_UNIMPROVED_ROUND_COUNT_LIMIT,
                )),
                None,
            )),
        }
    }
}

impl RosterTermination {
    /// Builds the termination for `config`, or the defaults when absent.
    pub fn from_config(config: Option<&TerminationConfig>) -> Result<Self, ConfigError> {
        let Some(config) = config else {
            return Ok(Self::default());
        };
        Ok(Self {
            conditions: OrTermination((
                config.round_count_limit.map(RoundCountTermination::new),
                config.time_limit().map(TimeTermination::new),
                config
                    .unimproved_round_count_limit
                    .map(UnimprovedRoundCountTermination::new),
                config
                    .best_score::<HardSoftScore>()?
                    .map(BestScoreTermination::new),
            )),
        })
    }

    pub fn round_count_limit(&self) -> Option<u64> {
        (self.conditions.0).0.as_ref().map(|t| t.limit())
    }

    pub fn time_limit(&self) -> Option<Duration> {
        (self.conditions.0).1.as_ref().map(|t| t.limit())
    }
}

impl Termination<HardSoftScore> for RosterTermination {
    fn is_terminated(&self, progress: &RoundProgress<HardSoftScore>) -> bool {
        self.conditions.is_terminated(progress)
    }
}

#[cfg(test)]
mod tests;
