//! Engine configuration.
//!
//! The engine is configured with:
//! - The dice seed (`None` seeds from entropy)
//! - The delays before deferred transitions fire
//!
//! Delays exist so an observer can show the result of an action before the
//! turn silently moves on. A headless driver can set them all to zero with
//! [`EngineConfig::instant`].
//!
//! Configuration can be loaded from TOML; missing keys keep their defaults:
//!
//! ```
//! use rust_aeroplane::core::EngineConfig;
//!
//! let config = EngineConfig::from_toml("seed = 7\nturn_advance_delay_ms = 500").unwrap();
//! assert_eq!(config.seed, Some(7));
//! assert_eq!(config.turn_advance_delay_ms, 500);
//! assert_eq!(config.penalty_delay_ms, 1500);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest delay a deferred transition may be configured with.
pub const MAX_DELAY_MS: u64 = 60_000;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("{field} = {value} ms exceeds the one minute limit")]
    DelayTooLong { field: &'static str, value: u64 },
}

/// Engine configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Dice seed. Same seed produces the same rolls.
    pub seed: Option<u64>,

    /// Pause after a triple-six penalty before the next player rolls.
    pub penalty_delay_ms: u64,

    /// Pause after a roll with no legal move before the turn is skipped.
    pub no_move_delay_ms: u64,

    /// Pause after a turn ends before the next player rolls.
    pub turn_advance_delay_ms: u64,

    /// Pause after a move on a 6 before the bonus roll opens.
    pub bonus_settle_delay_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            penalty_delay_ms: 1500,
            no_move_delay_ms: 1000,
            turn_advance_delay_ms: 800,
            bonus_settle_delay_ms: 300,
        }
    }
}

impl EngineConfig {
    /// A config whose deferred transitions are all due immediately.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            seed: None,
            penalty_delay_ms: 0,
            no_move_delay_ms: 0,
            turn_advance_delay_ms: 0,
            bonus_settle_delay_ms: 0,
        }
    }

    /// Set the dice seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the triple-six penalty delay.
    #[must_use]
    pub fn with_penalty_delay(mut self, ms: u64) -> Self {
        self.penalty_delay_ms = ms;
        self
    }

    /// Set the no-legal-move auto-skip delay.
    #[must_use]
    pub fn with_no_move_delay(mut self, ms: u64) -> Self {
        self.no_move_delay_ms = ms;
        self
    }

    /// Set the end-of-turn delay.
    #[must_use]
    pub fn with_turn_advance_delay(mut self, ms: u64) -> Self {
        self.turn_advance_delay_ms = ms;
        self
    }

    /// Set the bonus-roll settle delay.
    #[must_use]
    pub fn with_bonus_settle_delay(mut self, ms: u64) -> Self {
        self.bonus_settle_delay_ms = ms;
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Check every delay is within [`MAX_DELAY_MS`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let delays = [
            ("penalty_delay_ms", self.penalty_delay_ms),
            ("no_move_delay_ms", self.no_move_delay_ms),
            ("turn_advance_delay_ms", self.turn_advance_delay_ms),
            ("bonus_settle_delay_ms", self.bonus_settle_delay_ms),
        ];

        for (field, value) in delays {
            if value > MAX_DELAY_MS {
                return Err(ConfigError::DelayTooLong { field, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.penalty_delay_ms, 1500);
        assert_eq!(config.no_move_delay_ms, 1000);
        assert_eq!(config.turn_advance_delay_ms, 800);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::instant()
            .with_seed(123)
            .with_turn_advance_delay(50)
            .with_bonus_settle_delay(10);

        assert_eq!(config.seed, Some(123));
        assert_eq!(config.turn_advance_delay_ms, 50);
        assert_eq!(config.bonus_settle_delay_ms, 10);
        assert_eq!(config.penalty_delay_ms, 0);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = EngineConfig::from_toml("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_toml_overrides() {
        let config = EngineConfig::from_toml(
            "seed = 99\npenalty_delay_ms = 0\nno_move_delay_ms = 250\n",
        )
        .unwrap();

        assert_eq!(config.seed, Some(99));
        assert_eq!(config.penalty_delay_ms, 0);
        assert_eq!(config.no_move_delay_ms, 250);
        assert_eq!(config.turn_advance_delay_ms, 800);
    }

    #[test]
    fn test_invalid_toml_fails() {
        let err = EngineConfig::from_toml("seed = \"not a number\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_delay_limit() {
        let err = EngineConfig::from_toml("turn_advance_delay_ms = 600000").unwrap_err();
        match err {
            ConfigError::DelayTooLong { field, value } => {
                assert_eq!(field, "turn_advance_delay_ms");
                assert_eq!(value, 600_000);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::load("/nonexistent/aeroplane.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_serialization() {
        let config = EngineConfig::default().with_seed(5);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
