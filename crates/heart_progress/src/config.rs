use std::{path::Path, time::Duration};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{geometry::DEFAULT_MAX_VALUE, metrics::HeartMetrics};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings of the value driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DriverConfig {
    /// Milliseconds between two values, default: 1000
    pub interval_ms: u64,
    /// Smallest generated value, default: 0
    pub min: i32,
    /// Largest generated value, default: 300
    pub max: i32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            min: 0,
            max: 300,
        }
    }
}

impl DriverConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Configuration of a heart progress bar and its driver, read from JSON.
///
/// ```json
/// {
///     "max_value": 300,
///     "metrics": { "line_width": 4 },
///     "driver": { "interval_ms": 500 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HeartProgressConfig {
    /// The value at the right end of the bar, default: 300
    pub max_value: f32,
    /// Stop the notch at the right end cap for values above `max_value`.
    pub clamp_notch: bool,
    pub metrics: HeartMetrics,
    pub driver: DriverConfig,
}

impl Default for HeartProgressConfig {
    fn default() -> Self {
        Self {
            max_value: DEFAULT_MAX_VALUE,
            clamp_notch: false,
            metrics: HeartMetrics::default(),
            driver: DriverConfig::default(),
        }
    }
}

impl HeartProgressConfig {
    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        tracing::info!("loaded heart progress config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_value.is_finite() || self.max_value <= 0. {
            return Err(ConfigError::Invalid(format!(
                "max_value must be a positive number, got {}",
                self.max_value
            )));
        }

        self.metrics.validate()?;

        if self.driver.interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "driver.interval_ms must be greater than 0".into(),
            ));
        }
        if self.driver.min > self.driver.max {
            return Err(ConfigError::Invalid(format!(
                "driver.min ({}) must not be greater than driver.max ({})",
                self.driver.min, self.driver.max
            )));
        }

        Ok(())
    }
}
