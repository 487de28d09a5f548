//! # Shakha
//!
//! Neuron morphology trees: assembly from flat point tables, geometric
//! transforms, and export to the common reconstruction formats.
//!
//! ## Overview
//!
//! A morphology is a soma plus a forest of branching sections. Each section
//! is an ordered run of points `(x, y, z, radius)` with a type:
//!
//! - **Soma** - Cell body point cluster
//! - **Axon** - Output neurite
//! - **BasalDendrite** - Dendrites leaving the soma directly
//! - **ApicalDendrite** - The main dendritic trunk
//!
//! ## Features
//!
//! - **Flat blocks**: Parent-indexed point tables with id and children lookup
//! - **Tree building**: Point-granular or section-merged trees, no recursion
//! - **Unravelling**: Straightening of shrinkage wiggle with segment lengths kept
//! - **Simplification**: Ramer-Douglas-Peucker per section
//! - **Export**: ASC nested text, SWC row tables, legacy H5 tables
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shakha::{FlatBlock, ShakhaConfig, build_sections};
//! use shakha::io::save_morphology;
//! use shakha::transform::{simplify_morphology, unravel};
//!
//! let config = ShakhaConfig::load_default()?;
//! let block = FlatBlock::new(rows)?;
//! let morph = build_sections(&block)?;
//!
//! let straightened = unravel(&morph, &config.unravel)?;
//! let reduced = simplify_morphology(&straightened, &config.simplify)?;
//! save_morphology(&reduced, &config.output.path_for("cell"), config.output.format)?;
//! ```
//!
//! ## Ordering
//!
//! Every walk over a morphology is pre-order: parent before children,
//! children and roots in insertion order. Transforms and writers rely on
//! this, since a child needs its parent's result.

#![warn(missing_docs)]

// Core types and geometry helpers
pub mod core;

// Error type
pub mod error;

// Flat parent-indexed point tables
pub mod flat;

// Section tree arena
pub mod morphology;

// Flat block to tree
pub mod builder;

// Unravel and simplify
pub mod transform;

// Output formats
pub mod io;

// Unified configuration
pub mod config;

// Re-export commonly used types
pub use crate::core::{Point3D, PointType};

pub use error::{MorphError, Result};

pub use flat::{FlatBlock, FlatRow};

pub use morphology::{Morphology, MorphologyBuilder, Section, SectionId, Soma};

pub use builder::{build_morphology, build_sections, build_tree};

pub use transform::{SimplifyConfig, UnravelConfig, simplify, simplify_morphology, unravel};

pub use io::{H5Tables, OutputFormat, SectionIndexAssigner, SwcRow, save_morphology};

pub use config::{ConfigError, ConfigLoadError, ShakhaConfig};
