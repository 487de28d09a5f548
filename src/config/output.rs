//! Output configuration section.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::defaults;
use super::error::ConfigError;
use crate::io::OutputFormat;

/// Output settings section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputSection {
    /// Output format: "swc" or "asc"
    #[serde(default)]
    pub format: OutputFormat,

    /// Output directory path
    #[serde(default = "defaults::output_dir")]
    pub output_dir: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            output_dir: defaults::output_dir(),
        }
    }
}

impl OutputSection {
    /// Destination of a morphology named `stem`, with the format's extension.
    pub fn path_for(&self, stem: &str) -> PathBuf {
        Path::new(&self.output_dir).join(format!("{}.{}", stem, self.format.extension()))
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "output.output_dir",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
