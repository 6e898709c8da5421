//! Site configuration
//!
//! ```toml
//! viewport_height = 800.0
//! services = ["site-web", "application"]
//!
//! [nav]
//! offset_px = 72.0
//! sync = "exit_complete"
//! ```

use std::path::Path;
use std::time::Duration;

use folio_nav::{ConfigError, NavConfig};
use serde::Deserialize;

use crate::tabs::DEFAULT_SERVICES;
use crate::SiteError;

/// Page session configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Coordinator settings
    pub nav: NavConfig,
    /// Service ids, in tab order
    pub services: Vec<String>,
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Whether the platform animates smooth scrolls
    pub smooth_scroll: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            nav: NavConfig::default(),
            services: DEFAULT_SERVICES.iter().map(|s| s.to_string()).collect(),
            viewport_width: 1280.0,
            viewport_height: 720.0,
            smooth_scroll: true,
        }
    }
}

impl SiteConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, SiteError> {
        let config: SiteConfig = toml::from_str(input).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SiteError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("Loaded site config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SiteError> {
        self.nav.validate()?;
        if !(self.viewport_height > 0.0 && self.viewport_width > 0.0) {
            return Err(ConfigError::Invalid("viewport dimensions must be positive".into()).into());
        }
        Ok(())
    }

    /// Longest a single click can keep the session busy
    pub fn settle_budget(&self) -> Duration {
        let nav = &self.nav;
        let delay = match nav.sync {
            folio_nav::SyncStrategy::FixedDelay(ms) => Duration::from_millis(ms),
            _ => Duration::ZERO,
        };
        nav.exit_duration()
            + nav.enter_duration()
            + delay
            + nav.timeout()
            + Duration::from_millis(nav.smooth_duration_ms)
            + nav.poll_interval()
    }
}
