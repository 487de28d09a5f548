//! Main ShakhaConfig.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::defaults;
use super::error::{ConfigError, ConfigLoadError};
use super::output::OutputSection;
use crate::transform::{SimplifyConfig, UnravelConfig};

/// Full Shakha configuration loaded from YAML
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct ShakhaConfig {
    /// Unravel settings
    #[serde(default)]
    pub unravel: UnravelConfig,

    /// Simplification settings
    #[serde(default)]
    pub simplify: SimplifyConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputSection,
}

impl ShakhaConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        let config = Self::from_yaml(&contents)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from default config path (configs/shakha.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new(defaults::config_path());
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Parse from YAML string and validate
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.unravel.validate()?;
        self.simplify.validate()?;
        self.output.validate()
    }
}
