//! Configuration loading for Shakha.
//!
//! Loads all configuration from a single YAML file with sensible defaults.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shakha::config::ShakhaConfig;
//!
//! // Load from default path (configs/shakha.yaml)
//! let config = ShakhaConfig::load_default()?;
//!
//! // Or use built-in defaults (no file needed)
//! let config = ShakhaConfig::default();
//!
//! let straightened = shakha::transform::unravel(&morph, &config.unravel)?;
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`UnravelConfig`] | Window size of the local direction estimate |
//! | [`SimplifyConfig`] | Simplification tolerance |
//! | [`OutputSection`] | Output format and directory |
//!
//! ## Example YAML
//!
//! ```yaml
//! unravel:
//!   window_half_length: 5
//! simplify:
//!   epsilon: 0.5      # same unit as the coordinates
//! output:
//!   format: asc       # swc or asc
//!   output_dir: ./output
//! ```
//!
//! [`UnravelConfig`]: crate::transform::UnravelConfig
//! [`SimplifyConfig`]: crate::transform::SimplifyConfig

mod defaults;
mod error;
mod output;
mod shakha;

pub use error::{ConfigError, ConfigLoadError};
pub use output::OutputSection;
pub use shakha::ShakhaConfig;
