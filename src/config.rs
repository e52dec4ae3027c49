//! Game configuration loaded from TOML.

use crate::games::rgb::{ChannelPolicy, Color, SessionPolicy};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Configuration for a game shell.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for target generation. Unset means OS entropy.
    #[serde(default)]
    seed: Option<u64>,

    /// Guess each new round starts from.
    #[serde(default = "default_initial_guess")]
    initial_guess: Color,

    /// Handling of out-of-range channel values.
    #[serde(default)]
    channel_policy: ChannelPolicy,

    /// Refuse guess edits once the score is revealed.
    #[serde(default = "default_lock_after_reveal")]
    lock_after_reveal: bool,

    /// Counter tick period in milliseconds.
    #[serde(default = "default_tick_period_ms")]
    tick_period_ms: u64,
}

fn default_initial_guess() -> Color {
    Color::grey()
}

fn default_lock_after_reveal() -> bool {
    true
}

fn default_tick_period_ms() -> u64 {
    1000
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            initial_guess: default_initial_guess(),
            channel_policy: ChannelPolicy::default(),
            lock_after_reveal: default_lock_after_reveal(),
            tick_period_ms: default_tick_period_ms(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(?config, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Overrides the seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Session policy described by this configuration.
    pub fn session_policy(&self) -> SessionPolicy {
        SessionPolicy {
            channel_policy: self.channel_policy,
            lock_after_reveal: self.lock_after_reveal,
        }
    }

    /// Counter tick period.
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period_ms == 0 {
            return Err(ConfigError::new(
                "tick_period_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
