//! Configuration system
//!
//! Engine settings live in plain serde structs. Any of them can be loaded
//! from or saved to TOML or RON through the [`Config`] trait, and each one
//! validates itself after loading.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Check invariants that serde cannot express
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Toml => {
                toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
            ConfigFormat::Ron => {
                ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
        };

        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Supported on-disk formats, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Ron,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value is outside its allowed range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Fixed-timestep loop settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Simulation rate in updates per second; the fixed step is its inverse
    pub target_fps: u32,

    /// Most fixed updates a single frame may run before backlog is discarded
    pub max_steps_per_frame: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            max_steps_per_frame: 5,
        }
    }
}

impl LoopConfig {
    /// Duration of one simulation step
    pub fn fixed_step(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.target_fps.max(1)))
    }

    /// Largest backlog one frame may convert into updates
    pub fn max_backlog(&self) -> Duration {
        self.fixed_step() * self.max_steps_per_frame
    }
}

impl Config for LoopConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.target_fps == 0 {
            return Err(ConfigError::Invalid("target_fps must be greater than zero".into()));
        }
        if self.max_steps_per_frame == 0 {
            return Err(ConfigError::Invalid(
                "max_steps_per_frame must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `env_logger` filter, overridden by `RUST_LOG`
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Game loop timing
    pub game_loop: LoopConfig,

    /// Logger setup
    pub logging: LoggingConfig,

    /// Stop after this many displayed frames (headless runs)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_frames: Option<u64>,
}

impl Config for EngineConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.game_loop.validate()
    }
}
