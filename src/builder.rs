//! Tree assembly from a [`FlatBlock`].
//!
//! Two granularities are offered:
//!
//! - [`build_morphology`]: one section per row, the maximal point-chain tree.
//! - [`build_sections`]: unbranched runs of same-typed rows merged into one
//!   section each; children start with a copy of their parent's last point.
//!
//! Both walk the block with an explicit work stack, so arbitrarily long
//! unbranched chains cannot exhaust the call stack.

use std::collections::HashSet;

use crate::core::Point3D;
use crate::error::{MorphError, Result};
use crate::flat::FlatBlock;
use crate::morphology::{Morphology, MorphologyBuilder, SectionId};

/// Materialize the point-granular subtree rooted at row `root_id`.
///
/// Every row reachable from `root_id` becomes a one-point section. Sections
/// are appended to `builder` in pre-order, under `parent`.
///
/// Returns the id of the section created for `root_id`.
///
/// # Errors
/// `OutOfRange` if `root_id` (or any child id) is missing from the block.
pub fn build_tree(
    block: &FlatBlock,
    root_id: i64,
    builder: &mut MorphologyBuilder,
    parent: Option<SectionId>,
) -> Result<SectionId> {
    let mut stack: Vec<(i64, Option<SectionId>)> = vec![(root_id, parent)];
    let mut visited: HashSet<i64> = HashSet::new();
    let mut root = None;

    while let Some((row_id, parent)) = stack.pop() {
        if !visited.insert(row_id) {
            log::warn!("Row {} reached twice, skipping cycle", row_id);
            continue;
        }

        let row = block.get_row(row_id)?;
        let id = builder.add_section(parent, row.point_type, vec![row.point])?;
        root.get_or_insert(id);

        stack.extend(
            block
                .get_children(row_id)
                .iter()
                .rev()
                .map(|&child| (child, Some(id))),
        );
    }

    root.ok_or(MorphError::OutOfRange(root_id))
}

/// Build the point-granular morphology: soma from all soma rows, one tree per
/// initial segment.
///
/// # Errors
/// - `OutOfRange` on dangling child ids
/// - `InsufficientPoints` if the block has no soma rows
pub fn build_morphology(block: &FlatBlock) -> Result<Morphology> {
    let soma_ids = block.get_soma_ids();
    let mut builder = MorphologyBuilder::new();

    let soma_points = soma_ids
        .iter()
        .map(|&id| block.get_row(id).map(|r| r.point))
        .collect::<Result<Vec<_>>>()?;
    builder.add_soma_points(soma_points);

    let initial = block.get_initial_segment_ids();
    for &root_id in &initial {
        build_tree(block, root_id, &mut builder, None)?;
    }

    log::debug!(
        "Built point tree: {} soma rows, {} neurites, {} sections",
        soma_ids.len(),
        initial.len(),
        builder.section_count()
    );

    builder.build()
}

/// Build a morphology of maximal sections.
///
/// A section runs from its start row through single, same-typed children
/// until a branch point, a leaf or a type change. Non-root sections get their
/// parent's last point prepended so that connectivity is carried by adjacency.
/// A start row already sitting at that point (as written back by the SWC
/// writer) is taken as the copy itself, so rebuilding written output does not
/// grow the sections.
///
/// # Errors
/// Same as [`build_morphology`].
pub fn build_sections(block: &FlatBlock) -> Result<Morphology> {
    let soma_ids = block.get_soma_ids();
    let mut builder = MorphologyBuilder::new();

    let soma_points = soma_ids
        .iter()
        .map(|&id| block.get_row(id).map(|r| r.point))
        .collect::<Result<Vec<_>>>()?;
    builder.add_soma_points(soma_points);

    let mut stack: Vec<(i64, Option<SectionId>, Option<Point3D>)> = block
        .get_initial_segment_ids()
        .into_iter()
        .rev()
        .map(|id| (id, None, None))
        .collect();
    let mut visited: HashSet<i64> = HashSet::new();

    while let Some((start, parent, anchor)) = stack.pop() {
        if visited.contains(&start) {
            continue;
        }
        let first = block.get_row(start)?;
        let section_type = first.point_type;

        let mut points: Vec<Point3D> = anchor
            .filter(|a| a.xyz() != first.point.xyz())
            .into_iter()
            .collect();
        let mut current = start;

        loop {
            if !visited.insert(current) {
                log::warn!("Row {} reached twice, skipping cycle", current);
                break;
            }
            points.push(block.get_row(current)?.point);

            let [only] = block.get_children(current) else {
                break;
            };
            if block.get_row(*only)?.point_type != section_type {
                break;
            }
            current = *only;
        }

        let Some(&last) = points.last() else {
            continue;
        };
        let id = builder.add_section(parent, section_type, points)?;

        stack.extend(
            block
                .get_children(current)
                .iter()
                .rev()
                .filter(|c| !visited.contains(*c))
                .map(|&child| (child, Some(id), Some(last))),
        );
    }

    log::debug!(
        "Built section tree: {} soma rows, {} sections",
        soma_ids.len(),
        builder.section_count()
    );

    builder.build()
}
