use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_WIDTH: usize = 10;
pub const DEFAULT_HEIGHT: usize = 5;
/// Milliseconds between automatic ticks.
pub const DEFAULT_UPDATE_SPEED_MS: u64 = 150;

/// Engine construction parameters, loadable from TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    /// Tick interval for the driver; 0 never auto-advances.
    pub update_speed_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            update_speed_ms: DEFAULT_UPDATE_SPEED_MS,
        }
    }
}

impl EngineConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Parse and validate configuration from a TOML document. Missing keys
    /// fall back to defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// The starting layout needs four distinct centre squares.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 2 {
            return Err(ConfigError::Validation("width must be >= 2".into()));
        }
        if self.height < 2 {
            return Err(ConfigError::Validation("height must be >= 2".into()));
        }
        if self.width.checked_mul(self.height).is_none_or(|n| n > u32::MAX as usize) {
            return Err(ConfigError::Validation("board is too large".into()));
        }
        Ok(())
    }
}
