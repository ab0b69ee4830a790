use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::precision::{
    Policy, Precision, PrecisionError, DEFAULT_ANGLE_TOLERANCE_RAD, DEFAULT_LENGTH_TOLERANCE_M,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid precision: {0}")]
    Precision(#[from] PrecisionError),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub precision: PrecisionConfig,
    #[serde(default)]
    pub enforce_frame_codes: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrecisionConfig {
    #[serde(default = "default_length_tolerance")]
    pub length_tolerance_m: f64,
    #[serde(default = "default_angle_tolerance")]
    pub angle_tolerance_rad: f64,
}

impl Default for PrecisionConfig {
    fn default() -> Self {
        Self {
            length_tolerance_m: default_length_tolerance(),
            angle_tolerance_rad: default_angle_tolerance(),
        }
    }
}

fn default_length_tolerance() -> f64 {
    DEFAULT_LENGTH_TOLERANCE_M
}

fn default_angle_tolerance() -> f64 {
    DEFAULT_ANGLE_TOLERANCE_RAD
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.policy()?;
        Ok(config)
    }

    pub fn policy(&self) -> Result<Policy, ConfigError> {
        let precision = Precision::new(
            self.precision.length_tolerance_m,
            self.precision.angle_tolerance_rad,
        )?;
        Ok(Policy::new(precision).with_frame_codes_enforced(self.enforce_frame_codes))
    }
}
