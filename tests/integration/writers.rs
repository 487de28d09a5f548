//! Writer output on generated morphologies.

use std::collections::HashMap;

use shakha::io::{OutputFormat, save_morphology, to_asc_string, to_h5_tables, to_swc_rows};
use shakha::{FlatBlock, FlatRow, Point3D, PointType, build_morphology, build_sections};
use tempfile::TempDir;

use super::common::{init_logging, random_block};

#[test]
fn test_h5_roots_reference_soma_row() {
    let morph = build_sections(&random_block(5, 300)).unwrap();
    let tables = to_h5_tables(&morph).unwrap();

    assert_eq!(tables.structure[0], [0, 1, -1]);
    assert_eq!(tables.section_count(), morph.section_count());
    assert_eq!(
        tables.points.len(),
        morph.soma().points().len() + morph.point_count()
    );

    for (row, section) in morph.iter_sections().enumerate() {
        let [start, _, parent_row] = tables.structure[row + 1];
        if section.is_root() {
            assert_eq!(parent_row, 0);
        } else {
            assert!(parent_row >= 1 && (parent_row as usize) < row + 1);
        }
        assert_eq!(
            tables.section_points(row + 1).len(),
            section.points.len(),
            "row {row} starting at {start}"
        );
    }
}

#[test]
fn test_h5_and_swc_agree_on_parents() {
    let morph = build_sections(&random_block(9, 250)).unwrap();
    let tables = to_h5_tables(&morph).unwrap();
    let rows = to_swc_rows(&morph).unwrap();

    // Last SWC row id of each structure row
    let mut last_row: HashMap<usize, i64> = HashMap::from([(0, 1)]);
    let mut next = 2;
    for (row, section) in morph.iter_sections().enumerate() {
        let first = &rows[(next - 1) as usize];
        let parent_row = tables.structure[row + 1][2] as usize;
        assert_eq!(first.parent_id, last_row[&parent_row]);

        next += section.points.len() as i64;
        last_row.insert(row + 1, next - 1);
    }
}

#[test]
fn test_asc_balanced_parentheses() {
    let morph = build_sections(&random_block(13, 400)).unwrap();
    let text = to_asc_string(&morph).unwrap();

    let mut depth: i64 = 0;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        assert!(depth >= 0);
    }
    assert_eq!(depth, 0);
    assert_eq!(
        text.lines().filter(|l| l.starts_with("((")).count(),
        morph.roots().len()
    );
}

#[test]
fn test_save_both_formats() {
    init_logging();

    let morph = build_sections(&random_block(21, 3_000)).unwrap();
    let tmp = TempDir::new().unwrap();

    for format in [OutputFormat::Swc, OutputFormat::Asc] {
        let path = tmp.path().join(format!("cell.{}", format.extension()));
        save_morphology(&morph, &path, format).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}

#[test]
fn test_save_long_point_chain_as_swc() {
    let rows = (2..100_002)
        .map(|id| {
            FlatRow::new(
                id,
                PointType::Axon,
                Point3D::new(id as f64 * 0.1, 0.0, 0.0, 0.5),
                Some(id - 1),
            )
        })
        .chain([FlatRow::new(1, PointType::Soma, Point3D::new(0.0, 0.0, 0.0, 2.0), None)])
        .collect();
    let morph = build_morphology(&FlatBlock::new(rows).unwrap()).unwrap();
    assert_eq!(morph.section_count(), 100_000);

    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("chain.swc");
    save_morphology(&morph, &path, OutputFormat::Swc).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 100_002);
    assert_eq!(text.lines().last().unwrap(), "100001 2 10000.10 0.00 0.00 0.50 100000");
}
