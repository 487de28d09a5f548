//! Legacy H5 (v1) point and structure tables.
//!
//! Only the two table shapes are produced here; storing them in an HDF5
//! container is left to the caller. `H5Tables` derives serde so the tables
//! can be handed to any serializer.
//!
//! - `points`: N×4 rows of `[x, y, z, diameter]`, soma points first
//! - `structure`: M×3 rows of `[start_offset, type_code, parent_row]`, row 0
//!   being the soma `[0, 1, -1]`

use serde::{Deserialize, Serialize};

use super::assign::SectionIndexAssigner;
use crate::core::PointType;
use crate::error::{MorphError, Result};
use crate::morphology::Morphology;

const FORMAT: &str = "H5";

/// Structure row of the soma
pub const SOMA_STRUCTURE_ROW: i32 = 0;

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

/// Points and structure tables of one morphology.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct H5Tables {
    /// `[x, y, z, diameter]` per point
    pub points: Vec<[f64; 4]>,
    /// `[start_offset, type_code, parent_row]` per section, soma first
    pub structure: Vec<[i32; 3]>,
}

impl H5Tables {
    /// Number of structure rows excluding the soma
    pub fn section_count(&self) -> usize {
        self.structure.len().saturating_sub(1)
    }

    /// Points belonging to structure row `row`.
    ///
    /// Empty for a missing row, or when the offsets do not describe a valid
    /// range of `points` (tables deserialized from elsewhere).
    pub fn section_points(&self, row: usize) -> &[[f64; 4]] {
        let Some(&[start, _, _]) = self.structure.get(row) else {
            return &[];
        };
        let end = match self.structure.get(row + 1) {
            Some(&[next, _, _]) => usize::try_from(next).ok(),
            None => Some(self.points.len()),
        };
        let (Ok(start), Some(end)) = (usize::try_from(start), end) else {
            return &[];
        };
        self.points.get(start..end).unwrap_or(&[])
    }
}

fn offset(value: usize) -> Result<i32> {
    i32::try_from(value).map_err(|_| MorphError::TableOverflow(value as i64))
}

/// Flatten a morphology into legacy H5 tables.
///
/// # Errors
/// - `UnknownSectionType` for sections of type `Undefined` or `Soma`
/// - `TableOverflow` if an offset or row does not fit the i32 structure table
pub fn to_h5_tables(morphology: &Morphology) -> Result<H5Tables> {
    let soma_points = morphology.soma().points();
    let mut points = Vec::with_capacity(soma_points.len() + morphology.point_count());
    let mut structure = Vec::with_capacity(morphology.section_count() + 1);

    points.extend(soma_points.iter().map(|p| [p.x, p.y, p.z, p.diameter()]));
    structure.push([0, type_code(PointType::Soma)?, -1]);

    let mut assigner = SectionIndexAssigner::new(SOMA_STRUCTURE_ROW as i64, 1);
    for section in morphology.iter_sections() {
        if section.section_type.is_soma() {
            return Err(MorphError::UnknownSectionType {
                section_type: section.section_type,
                format: FORMAT,
            });
        }
        let code = type_code(section.section_type)?;
        let record = assigner.emit_one(section.id, section.parent)?;

        let parent_row = i32::try_from(record.parent_id)
            .map_err(|_| MorphError::TableOverflow(record.parent_id))?;
        structure.push([offset(points.len())?, code, parent_row]);
        points.extend(section.points.iter().map(|p| [p.x, p.y, p.z, p.diameter()]));
    }

    log::debug!(
        "Built H5 tables: {} points, {} structure rows",
        points.len(),
        structure.len()
    );
    Ok(H5Tables { points, structure })
}
