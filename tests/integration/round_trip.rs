//! Re-flattening a tree and rebuilding it keeps its topology.

use shakha::io::to_swc_rows;
use shakha::{FlatBlock, build_morphology, build_sections};

use super::common::{init_logging, point_counts, random_block, topology};

#[test]
fn test_point_tree_round_trip() {
    init_logging();

    for seed in 0..8 {
        let block = random_block(seed, 300);
        let morph = build_morphology(&block).unwrap();
        assert_eq!(morph.section_count(), 300);

        let rows = to_swc_rows(&morph).unwrap();
        let rebuilt = build_morphology(&FlatBlock::from_swc_rows(&rows).unwrap()).unwrap();

        assert_eq!(topology(&rebuilt), topology(&morph), "seed {seed}");
    }
}

#[test]
fn test_section_tree_round_trip() {
    init_logging();

    for seed in 0..8 {
        let block = random_block(seed, 300);
        let morph = build_sections(&block).unwrap();

        let rows = to_swc_rows(&morph).unwrap();
        let rebuilt = build_sections(&FlatBlock::from_swc_rows(&rows).unwrap()).unwrap();

        assert_eq!(topology(&rebuilt), topology(&morph), "seed {seed}");
        assert_eq!(point_counts(&rebuilt), point_counts(&morph), "seed {seed}");
        assert_eq!(rebuilt.point_count(), morph.point_count(), "seed {seed}");
    }
}

#[test]
fn test_section_tree_rewrite_is_stable() {
    init_logging();

    let mut morph = build_sections(&random_block(0, 300)).unwrap();
    let first_rows = to_swc_rows(&morph).unwrap();

    for _ in 0..3 {
        let rows = to_swc_rows(&morph).unwrap();
        morph = build_sections(&FlatBlock::from_swc_rows(&rows).unwrap()).unwrap();
    }

    assert_eq!(to_swc_rows(&morph).unwrap(), first_rows);
}

#[test]
fn test_swc_rows_are_monotonic() {
    let morph = build_sections(&random_block(42, 500)).unwrap();
    let rows = to_swc_rows(&morph).unwrap();

    for (k, row) in rows.iter().enumerate() {
        assert_eq!(row.id, k as i64 + 1);
        assert!(row.parent_id < row.id);
    }
    assert_eq!(rows[0].parent_id, -1);
    assert_eq!(rows.len(), morph.point_count() + 1);
}

#[test]
fn test_deep_chain_round_trip() {
    let block = {
        use shakha::{FlatRow, Point3D, PointType};
        let mut rows = vec![FlatRow::new(1, PointType::Soma, Point3D::new(0.0, 0.0, 0.0, 2.0), None)];
        rows.extend((2..50_002).map(|id| {
            FlatRow::new(
                id,
                PointType::Axon,
                Point3D::new(id as f64, 0.0, 0.0, 1.0),
                Some(id - 1),
            )
        }));
        FlatBlock::new(rows).unwrap()
    };

    let morph = build_morphology(&block).unwrap();
    let rows = to_swc_rows(&morph).unwrap();
    let rebuilt = build_sections(&FlatBlock::from_swc_rows(&rows).unwrap()).unwrap();

    assert_eq!(rebuilt.section_count(), 1);
    assert_eq!(rebuilt.point_count(), 50_000);
}
