//! Morphology output formats.
//!
//! Every writer re-flattens the section tree through a
//! [`SectionIndexAssigner`], each with its own numbering scheme and its own
//! type-code table:
//!
//! - **ASC** ([`asc`]): nested parenthesized text, no numeric ids
//! - **SWC** ([`swc`]): one row per point, soma row 1, sections from 2
//! - **H5 v1 tables** ([`h5`]): points and structure tables, soma row 0
//!
//! ## Saving
//!
//! File output is atomic: the document is written to a temporary file next
//! to the destination and renamed into place only after it has been fully
//! written and flushed. A failing write leaves no file behind.
//!
//! ```rust,ignore
//! use shakha::io::{OutputFormat, save_morphology};
//! use std::path::Path;
//!
//! save_morphology(&morph, Path::new("neuron.swc"), OutputFormat::Swc)?;
//! ```

pub mod asc;
pub mod assign;
pub mod h5;
pub mod swc;

use std::fmt;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::morphology::Morphology;

pub use asc::{to_asc_string, write_asc};
pub use assign::{AssignedRecord, SectionIndexAssigner};
pub use h5::{H5Tables, to_h5_tables};
pub use swc::{SwcRow, format_row, to_swc_rows, write_swc};

/// Text formats that can be saved to a file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Row table
    #[default]
    Swc,
    /// Nested text
    Asc,
}

impl OutputFormat {
    /// File extension without the dot
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Swc => "swc",
            OutputFormat::Asc => "asc",
        }
    }

    /// Format of a path's extension, case-insensitive.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "swc" => Some(OutputFormat::Swc),
            "asc" => Some(OutputFormat::Asc),
            _ => None,
        }
    }

    /// Write `morphology` to `writer` in this format.
    pub fn write<W: Write>(self, morphology: &Morphology, writer: &mut W) -> Result<()> {
        match self {
            OutputFormat::Swc => write_swc(morphology, writer),
            OutputFormat::Asc => write_asc(morphology, writer),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Swc => "SWC",
            OutputFormat::Asc => "ASC",
        })
    }
}

/// Save a morphology to `path` atomically.
///
/// # Errors
/// Any writer error, or an I/O error creating, writing or renaming the
/// temporary file. The destination is untouched on error.
pub fn save_morphology(morphology: &Morphology, path: &Path, format: OutputFormat) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let temp = tempfile::NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        format.write(morphology, &mut writer)?;
        writer.flush()?;
    }
    temp.persist(path).map_err(|e| e.error)?;

    log::info!(
        "Saved {} sections as {} to {}",
        morphology.section_count(),
        format,
        path.display()
    );
    Ok(())
}

/// Save as SWC.
pub fn save_swc(morphology: &Morphology, path: &Path) -> Result<()> {
    save_morphology(morphology, path, OutputFormat::Swc)
}

/// Save as ASC.
pub fn save_asc(morphology: &Morphology, path: &Path) -> Result<()> {
    save_morphology(morphology, path, OutputFormat::Asc)
}
