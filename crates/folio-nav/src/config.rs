//! Navigation Configuration
//!
//! One owned config per page session. Every field has a default, so a TOML
//! file only needs the keys it overrides:
//!
//! ```toml
//! behavior = "smooth"
//! offset_px = 60.0
//! timeout_ms = 1200
//! poll_interval_ms = 100
//! sync = { fixed_delay = 250 }   # or "mounted" / "exit_complete"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::scroll::ScrollBehavior;

/// How a cross-page scroll waits for the new page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStrategy {
    /// Wait a fixed number of milliseconds after navigating
    FixedDelay(u64),
    /// Wait for the exit animation's completion callback
    ExitComplete,
    /// Wait for the page layer's explicit "mounted" signal
    Mounted,
}

impl Default for SyncStrategy {
    fn default() -> Self {
        Self::Mounted
    }
}

/// Navigation configuration options
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Behavior for anchor scrolls
    pub behavior: ScrollBehavior,

    /// Height of the fixed header the landed section must clear
    pub offset_px: f64,

    /// Give up locating an anchor after this long
    pub timeout_ms: u64,

    /// Delay between locate attempts
    pub poll_interval_ms: u64,

    /// Cross-page sequencing strategy
    pub sync: SyncStrategy,

    /// Page exit animation
    pub exit_ms: u64,

    /// Page enter animation
    pub enter_ms: u64,

    /// Duration of a smooth viewport scroll
    pub smooth_duration_ms: u64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            behavior: ScrollBehavior::Smooth,
            offset_px: 60.0,
            timeout_ms: 1200,
            poll_interval_ms: 100,
            sync: SyncStrategy::Mounted,
            exit_ms: 250,
            enter_ms: 250,
            smooth_duration_ms: 300,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl NavConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: NavConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded navigation config from {}", path.display());
        Ok(config)
    }

    /// Reject values the poll loop cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("poll_interval_ms must be > 0".into()));
        }
        if self.timeout_ms < self.poll_interval_ms {
            return Err(ConfigError::Invalid(format!(
                "timeout_ms ({}) must be >= poll_interval_ms ({})",
                self.timeout_ms, self.poll_interval_ms
            )));
        }
        if !self.offset_px.is_finite() || self.offset_px < 0.0 {
            return Err(ConfigError::Invalid("offset_px must be a non-negative number".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn exit_duration(&self) -> Duration {
        Duration::from_millis(self.exit_ms)
    }

    pub fn enter_duration(&self) -> Duration {
        Duration::from_millis(self.enter_ms)
    }

    /// Number of locate attempts a never-mounting anchor gets
    pub fn max_polls(&self) -> u64 {
        self.timeout_ms / self.poll_interval_ms.max(1)
    }
}
