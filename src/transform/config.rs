//! Configuration for the geometric transforms.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Configuration for unravelling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnravelConfig {
    /// Number of original points taken on each side of a segment when
    /// estimating its local direction.
    /// Default: 5
    pub window_half_length: usize,
}

impl Default for UnravelConfig {
    fn default() -> Self {
        Self {
            window_half_length: 5,
        }
    }
}

impl UnravelConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for window half length.
    pub fn with_window_half_length(mut self, value: usize) -> Self {
        self.window_half_length = value;
        self
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_half_length == 0 {
            return Err(ConfigError::InvalidValue {
                field: "unravel.window_half_length",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Configuration for Ramer-Douglas-Peucker simplification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifyConfig {
    /// Maximum perpendicular deviation (same unit as the coordinates) a
    /// dropped point may have from the kept polyline.
    /// Default: 1.0
    pub epsilon: f64,
}

impl Default for SimplifyConfig {
    fn default() -> Self {
        Self { epsilon: 1.0 }
    }
}

impl SimplifyConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for epsilon.
    pub fn with_epsilon(mut self, value: f64) -> Self {
        self.epsilon = value;
        self
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "simplify.epsilon",
                reason: format!("must be a finite value >= 0, got {}", self.epsilon),
            });
        }
        Ok(())
    }
}
