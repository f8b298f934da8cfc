use std::env;

use serde::{Deserialize, Serialize};

use crate::geometry::PAN_MAP_RATIO;

pub const ENV_PAN_MAP_RATIO: &str = "REGION_PAN_MAP_RATIO";

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Ratio outside `(0, 1]` or not finite.
    InvalidRatio(f64),
    Env { name: &'static str, value: String },
    Json(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidRatio(r) => {
                write!(f, "pan_map_ratio must be in (0, 1], got {r}")
            }
            ConfigError::Env { name, value } => write!(f, "invalid {name}: {value:?}"),
            ConfigError::Json(msg) => write!(f, "invalid region config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Tunables for the region controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// Region/viewport pixel-area fraction above which the region stops
    /// being editable.
    pub pan_map_ratio: f64,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            pan_map_ratio: PAN_MAP_RATIO,
        }
    }
}

impl RegionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = self.pan_map_ratio;
        if r.is_finite() && r > 0.0 && r <= 1.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidRatio(r))
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: RegionConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `REGION_PAN_MAP_RATIO` when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = RegionConfig {
            pan_map_ratio: env_var_f64(ENV_PAN_MAP_RATIO, PAN_MAP_RATIO)?,
        };
        config.validate()?;
        Ok(config)
    }
}

fn env_var_f64(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::Env { name, value }),
        Err(_) => Ok(default),
    }
}
