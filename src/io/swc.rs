//! SWC row-table writer.
//!
//! One text row per point: `id type x y z radius parent_id`.
//!
//! - Row 1 is the soma, written as a single sphere at the soma center with
//!   the soma radius and parent `-1`.
//! - Section points follow from id 2 in pre-order. A section's first row
//!   attaches to its parent section's last row (or the soma), later rows to
//!   the row before them.
//! - Floats are fixed two-decimal.
//!
//! ```text
//! # Generated by shakha
//! 1 1 0.00 0.00 0.00 5.00 -1
//! 2 2 0.00 0.00 0.00 1.00 1
//! 3 2 1.00 0.00 0.00 1.00 2
//! ```

use std::io::Write;

use serde::{Deserialize, Serialize};

use super::assign::SectionIndexAssigner;
use crate::core::{Point3D, PointType};
use crate::error::{MorphError, Result};
use crate::flat::{FlatBlock, FlatRow};
use crate::morphology::Morphology;

const FORMAT: &str = "SWC";

/// Row id of the soma sphere
pub const SOMA_ROW_ID: i64 = 1;

/// Parent id written for the soma row
pub const NO_PARENT: i64 = -1;

const HEADER: &str = "# Generated by shakha";

/// SWC type code of a section type.
fn type_code(point_type: PointType) -> Result<i32> {
    match point_type {
        PointType::Soma => Ok(1),
        PointType::Axon => Ok(2),
        PointType::BasalDendrite => Ok(3),
        PointType::ApicalDendrite => Ok(4),
        PointType::Undefined => Err(MorphError::UnknownSectionType {
            section_type: point_type,
            format: FORMAT,
        }),
    }
}

/// Section type of an SWC type code; unknown codes map to `Undefined`.
fn point_type(code: i32) -> PointType {
    match code {
        1 => PointType::Soma,
        2 => PointType::Axon,
        3 => PointType::BasalDendrite,
        4 => PointType::ApicalDendrite,
        _ => PointType::Undefined,
    }
}

/// One SWC record.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SwcRow {
    /// Row id
    pub id: i64,
    /// SWC type code
    pub type_code: i32,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
    /// Radius
    pub radius: f64,
    /// Parent row id, `-1` for none
    pub parent_id: i64,
}

impl SwcRow {
    fn new(id: i64, type_code: i32, point: &Point3D, parent_id: i64) -> Self {
        Self {
            id,
            type_code,
            x: point.x,
            y: point.y,
            z: point.z,
            radius: point.radius,
            parent_id,
        }
    }

    /// Position and radius of the row
    pub fn point(&self) -> Point3D {
        Point3D::new(self.x, self.y, self.z, self.radius)
    }
}

/// Flatten a morphology into SWC rows.
///
/// # Errors
/// `UnknownSectionType` for sections of type `Undefined` or `Soma`.
pub fn to_swc_rows(morphology: &Morphology) -> Result<Vec<SwcRow>> {
    let soma = morphology.soma();
    let mut rows = Vec::with_capacity(morphology.point_count() + 1);
    rows.push(SwcRow::new(
        SOMA_ROW_ID,
        type_code(PointType::Soma)?,
        &soma.center(),
        NO_PARENT,
    ));

    let mut assigner = SectionIndexAssigner::new(SOMA_ROW_ID, SOMA_ROW_ID + 1);
    for section in morphology.iter_sections() {
        if section.section_type.is_soma() {
            return Err(MorphError::UnknownSectionType {
                section_type: section.section_type,
                format: FORMAT,
            });
        }
        let code = type_code(section.section_type)?;
        let records = assigner.emit(section.id, section.parent, section.points.len())?;
        rows.extend(
            records
                .iter()
                .zip(&section.points)
                .map(|(r, p)| SwcRow::new(r.id, code, p, r.parent_id)),
        );
    }

    log::debug!("Flattened {} sections into {} SWC rows", morphology.section_count(), rows.len());
    Ok(rows)
}

/// Format one row as `id type x y z radius parent_id`.
pub fn format_row(row: &SwcRow) -> String {
    format!(
        "{} {} {:.2} {:.2} {:.2} {:.2} {}",
        row.id, row.type_code, row.x, row.y, row.z, row.radius, row.parent_id
    )
}

/// Write a morphology as SWC text.
///
/// All rows are computed before the first byte is written, so a failing
/// morphology leaves `writer` untouched.
pub fn write_swc<W: Write>(morphology: &Morphology, writer: &mut W) -> Result<()> {
    let rows = to_swc_rows(morphology)?;

    writeln!(writer, "{HEADER}")?;
    for row in &rows {
        writeln!(writer, "{}", format_row(row))?;
    }
    Ok(())
}

impl FlatBlock {
    /// Build a flat block from SWC rows; parent `-1` (or any negative id)
    /// marks a root row.
    pub fn from_swc_rows(rows: &[SwcRow]) -> Result<FlatBlock> {
        FlatBlock::new(
            rows.iter()
                .map(|r| {
                    FlatRow::new(
                        r.id,
                        point_type(r.type_code),
                        r.point(),
                        (r.parent_id >= 0).then_some(r.parent_id),
                    )
                })
                .collect(),
        )
    }
}
