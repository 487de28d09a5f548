//! Flat, point-indexed morphology table.
//!
//! A [`FlatBlock`] is the raw representation consumed by the tree builders:
//! one row per sample point, each tagged with a type and the id of its parent
//! row. It is built once and never mutated.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::{Point3D, PointType};
use crate::error::{MorphError, Result};

/// One sample point of a flat block.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlatRow {
    /// Row id, unique within the block
    pub id: i64,
    /// Point classification
    pub point_type: PointType,
    /// Position and radius
    pub point: Point3D,
    /// Parent row id (`None` for a root row)
    pub parent_id: Option<i64>,
}

impl FlatRow {
    /// Create a new row
    pub fn new(id: i64, point_type: PointType, point: Point3D, parent_id: Option<i64>) -> Self {
        Self {
            id,
            point_type,
            point,
            parent_id,
        }
    }
}

/// Read-only table of rows with id and parent-id lookups.
#[derive(Clone, Debug, Default)]
pub struct FlatBlock {
    rows: Vec<FlatRow>,
    /// Row id -> index into `rows`
    index: HashMap<i64, usize>,
    /// Parent id -> child ids, in input order
    children: HashMap<i64, Vec<i64>>,
}

impl FlatBlock {
    /// Index a set of rows.
    ///
    /// # Errors
    /// `DuplicateRow` if two rows share an id.
    pub fn new(rows: Vec<FlatRow>) -> Result<Self> {
        let mut index = HashMap::with_capacity(rows.len());
        let mut children: HashMap<i64, Vec<i64>> = HashMap::new();

        for (i, row) in rows.iter().enumerate() {
            if index.insert(row.id, i).is_some() {
                return Err(MorphError::DuplicateRow(row.id));
            }
            if let Some(parent) = row.parent_id {
                children.entry(parent).or_default().push(row.id);
            }
        }

        log::trace!("Indexed flat block with {} rows", rows.len());

        Ok(Self {
            rows,
            index,
            children,
        })
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the block has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in input order
    pub fn rows(&self) -> &[FlatRow] {
        &self.rows
    }

    /// Look up a row by id.
    ///
    /// # Errors
    /// `OutOfRange` if no row has this id.
    pub fn get_row(&self, id: i64) -> Result<&FlatRow> {
        self.index
            .get(&id)
            .map(|&i| &self.rows[i])
            .ok_or(MorphError::OutOfRange(id))
    }

    /// Ids of rows whose parent is `id`, in input order.
    pub fn get_children(&self, id: i64) -> &[i64] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ids of all soma rows, in input order.
    pub fn get_soma_ids(&self) -> Vec<i64> {
        self.rows
            .iter()
            .filter(|r| r.point_type.is_soma())
            .map(|r| r.id)
            .collect()
    }

    /// Ids of the root rows of every neurite: non-soma children of soma rows.
    pub fn get_initial_segment_ids(&self) -> Vec<i64> {
        self.get_soma_ids()
            .into_iter()
            .flat_map(|s| self.get_children(s).iter().copied())
            .filter(|&c| {
                self.get_row(c)
                    .map(|r| !r.point_type.is_soma())
                    .unwrap_or(false)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, t: PointType, parent: Option<i64>) -> FlatRow {
        FlatRow::new(id, t, Point3D::new(id as f64, 0.0, 0.0, 1.0), parent)
    }

    fn sample_block() -> FlatBlock {
        FlatBlock::new(vec![
            row(1, PointType::Soma, None),
            row(2, PointType::Soma, Some(1)),
            row(3, PointType::Axon, Some(1)),
            row(4, PointType::Axon, Some(3)),
            row(5, PointType::BasalDendrite, Some(2)),
            row(6, PointType::BasalDendrite, Some(5)),
            row(7, PointType::BasalDendrite, Some(5)),
        ])
        .unwrap()
    }

    #[test]
    fn test_get_row() {
        let block = sample_block();
        assert_eq!(block.len(), 7);
        assert_eq!(block.get_row(4).unwrap().parent_id, Some(3));
        assert!(matches!(block.get_row(42), Err(MorphError::OutOfRange(42))));
    }

    #[test]
    fn test_get_children_in_input_order() {
        let block = sample_block();
        assert_eq!(block.get_children(1), &[2, 3]);
        assert_eq!(block.get_children(5), &[6, 7]);
        assert!(block.get_children(7).is_empty());
        assert!(block.get_children(99).is_empty());
    }

    #[test]
    fn test_soma_and_initial_segments() {
        let block = sample_block();
        assert_eq!(block.get_soma_ids(), vec![1, 2]);
        // Row 2 is a child of soma row 1 but is itself soma, so it is skipped
        assert_eq!(block.get_initial_segment_ids(), vec![3, 5]);
    }

    #[test]
    fn test_duplicate_row_rejected() {
        let result = FlatBlock::new(vec![
            row(1, PointType::Soma, None),
            row(1, PointType::Axon, Some(1)),
        ]);
        assert!(matches!(result, Err(MorphError::DuplicateRow(1))));
    }

    #[test]
    fn test_empty_block() {
        let block = FlatBlock::new(Vec::new()).unwrap();
        assert!(block.is_empty());
        assert!(block.get_soma_ids().is_empty());
        assert!(block.get_initial_segment_ids().is_empty());
    }
}
