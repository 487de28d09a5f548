//! Error types for Shakha

use crate::config::ConfigError;
use crate::core::PointType;
use crate::morphology::SectionId;

/// Result type alias
pub type Result<T> = std::result::Result<T, MorphError>;

/// Errors raised while building, transforming or writing a morphology.
///
/// All of these are deterministic logic errors for the record being
/// processed. Writers abort on the first one and leave no partial output.
#[derive(Debug, thiserror::Error)]
pub enum MorphError {
    /// Row id not present in the flat block
    #[error("Row id {0} not found in flat block")]
    OutOfRange(i64),

    /// Offset or row index too large for an i32 output table
    #[error("Value {0} does not fit an i32 table column")]
    TableOverflow(i64),

    /// Invalid transform parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Row id appears more than once in the flat block
    #[error("Duplicate row id {0} in flat block")]
    DuplicateRow(i64),

    /// Section referenced as a parent before it was emitted
    #[error("Parent section {0} referenced before it was visited")]
    UnresolvedParent(SectionId),

    /// Too few points to compute what was asked
    #[error("Insufficient points: need at least {needed}, found {found}")]
    InsufficientPoints {
        /// Minimum number of points required
        needed: usize,
        /// Number of points available
        found: usize,
    },

    /// Local direction could not be estimated
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Section type has no code in the target format
    #[error("Section type {section_type:?} has no mapping in {format} output")]
    UnknownSectionType {
        /// Offending section type
        section_type: PointType,
        /// Output format name
        format: &'static str,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
