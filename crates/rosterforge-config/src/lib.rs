//! Configuration system for RosterForge.
//!
//! Load solver configuration from TOML or YAML files to control termination,
//! round sizing and the worker thread without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use rosterforge_config::SolverConfig;
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!     unimproved_round_count_limit = 50
//!
//!     [round]
//!     moves_per_round = 2000
//!     late_acceptance_size = 400
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert_eq!(config.round.moves_per_round, 2000);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use rosterforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("solver.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use rosterforge_core::{ParseableScore, RosterForgeError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Seed used when the configuration does not name one.
pub const DEFAULT_RANDOM_SEED: u64 = 42;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for RosterForgeError {
    fn from(err: ConfigError) -> Self {
        RosterForgeError::Config(err.to_string())
    }
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Environment mode affecting reproducibility and assertions.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// How much work a single round does.
    #[serde(default)]
    pub round: RoundConfig,

    /// Worker thread settings.
    #[serde(default)]
    pub worker: WorkerConfig,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.round.moves_per_round == 0 {
            return Err(ConfigError::Invalid(
                "round.moves_per_round must be positive".to_string(),
            ));
        }
        if self.round.late_acceptance_size == 0 {
            return Err(ConfigError::Invalid(
                "round.late_acceptance_size must be positive".to_string(),
            ));
        }
        if let Some(termination) = &self.termination {
            if let Some(limit) = &termination.best_score_limit {
                if limit.trim().is_empty() {
                    return Err(ConfigError::Invalid(
                        "termination.best_score_limit is empty".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the maximum number of rounds.
    pub fn with_round_count_limit(mut self, rounds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            round_count_limit: Some(rounds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the number of moves evaluated per round.
    pub fn with_moves_per_round(mut self, moves: usize) -> Self {
        self.round.moves_per_round = moves;
        self
    }

    /// Returns the configured seed, or [`DEFAULT_RANDOM_SEED`].
    pub fn seed(&self) -> u64 {
        self.random_seed.unwrap_or(DEFAULT_RANDOM_SEED)
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rosterforge_config::SolverConfig;
    /// use std::time::Duration;
    ///
    /// let config = SolverConfig::from_toml_str(r#"
    ///     [termination]
    ///     seconds_spent_limit = 30
    /// "#).unwrap();
    ///
    /// assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
    /// ```
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }
}

/// Environment mode affecting solver behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Seeded from the configured or default seed. Runs are repeatable.
    #[default]
    Reproducible,

    /// Seeded from OS entropy on every `create`.
    NonReproducible,

    /// Reproducible, and the driver checks that the best score never worsens.
    FullAssert,
}

impl EnvironmentMode {
    pub fn is_reproducible(self) -> bool {
        !matches!(self, EnvironmentMode::NonReproducible)
    }

    pub fn is_asserted(self) -> bool {
        matches!(self, EnvironmentMode::FullAssert)
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend solving.
    pub minutes_spent_limit: Option<u64>,

    /// Target best score to achieve (as string, e.g., "0hard/0soft").
    pub best_score_limit: Option<String>,

    /// Maximum number of rounds.
    pub round_count_limit: Option<u64>,

    /// Maximum rounds without a best-score improvement.
    pub unimproved_round_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let seconds = self
            .minutes_spent_limit
            .unwrap_or(0)
            .saturating_mul(60)
            .saturating_add(self.seconds_spent_limit.unwrap_or(0));
        if seconds > 0 {
            Some(Duration::from_secs(seconds))
        } else {
            None
        }
    }

    /// Parses `best_score_limit` into a concrete score type.
    pub fn best_score<S: ParseableScore>(&self) -> Result<Option<S>, ConfigError> {
        self.best_score_limit
            .as_deref()
            .map(|s| S::parse(s).map_err(|e| ConfigError::Invalid(e.to_string())))
            .transpose()
    }
}

/// Work done by one round of local search.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RoundConfig {
    /// Moves evaluated per round.
    pub moves_per_round: usize,

    /// Size of the late acceptance history.
    pub late_acceptance_size: usize,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            moves_per_round: 1000,
            late_acceptance_size: 400,
        }
    }
}

/// Worker thread configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct WorkerConfig {
    /// Name given to the worker OS thread.
    pub thread_name: String,

    /// How long a caller waits for a response before giving up.
    pub response_timeout_ms: Option<u64>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            thread_name: "rosterforge-worker".to_string(),
            response_timeout_ms: None,
        }
    }
}

impl WorkerConfig {
    pub fn response_timeout(&self) -> Option<Duration> {
        self.response_timeout_ms.map(Duration::from_millis)
    }
}
