//! Transform invariants on generated morphologies.

use approx::assert_relative_eq;

use shakha::transform::{simplify, simplify_morphology, unravel};
use shakha::{
    FlatBlock, FlatRow, MorphologyBuilder, Point3D, PointType, SimplifyConfig, UnravelConfig,
    build_morphology, build_sections,
};

use super::common::{init_logging, random_block, topology, zigzag};

#[test]
fn test_unravel_keeps_topology_and_lengths() {
    init_logging();

    for seed in 0..5 {
        let morph = build_sections(&random_block(seed, 400)).unwrap();
        let out = unravel(&morph, &UnravelConfig::default()).unwrap();

        assert_eq!(topology(&out), topology(&morph));

        for (before, after) in morph.sections().iter().zip(out.sections()) {
            assert_eq!(before.id, after.id);
            assert_eq!(before.points.len(), after.points.len());

            // Segment lengths and radii survive
            for k in 1..before.points.len() {
                let original = before.points[k - 1].distance(&before.points[k]);
                let corrected = after.points[k - 1].distance(&after.points[k]);
                assert_relative_eq!(original, corrected, epsilon = 1e-9);
                assert_eq!(before.points[k].radius, after.points[k].radius);
            }

            match after.parent {
                None => assert_eq!(after.points[0], before.points[0]),
                Some(p) => assert_eq!(after.points[0], *out.section(p).last_point()),
            }
        }
    }
}

#[test]
fn test_unravel_window_sizes() {
    let morph = build_sections(&random_block(7, 200)).unwrap();
    for w in [1, 2, 10, 50] {
        let out = unravel(&morph, &UnravelConfig::new().with_window_half_length(w)).unwrap();
        assert_eq!(out.point_count(), morph.point_count());
    }
}

#[test]
fn test_unravel_straightens_long_zigzag() {
    let mut b = MorphologyBuilder::new();
    b.add_soma_points([Point3D::new(0.0, 0.0, 0.0, 3.0)]);
    b.add_section(None, PointType::BasalDendrite, zigzag(101, 0.8))
        .unwrap();
    let morph = b.build().unwrap();

    let out = unravel(&morph, &UnravelConfig::default()).unwrap();
    let reach = |m: &shakha::Morphology| {
        let s = &m.sections()[0];
        s.first_point().distance(s.last_point())
    };
    assert!(reach(&out) > reach(&morph));
}

#[test]
fn test_simplify_monotone_in_epsilon() {
    let morph = build_sections(&random_block(3, 600)).unwrap();

    for section in morph.sections() {
        let mut previous = usize::MAX;
        for eps in [0.0, 0.1, 0.5, 1.0, 2.0, 10.0] {
            let out = simplify(&section.points, eps);
            assert!(out.len() <= previous);
            assert!(out.len() >= section.points.len().min(2));
            assert_eq!(out[0], section.points[0]);
            assert_eq!(out[out.len() - 1], section.points[section.points.len() - 1]);
            previous = out.len();
        }
    }
}

#[test]
fn test_simplify_morphology_after_unravel() {
    init_logging();

    let morph = build_sections(&random_block(11, 500)).unwrap();
    let straight = unravel(&morph, &UnravelConfig::default()).unwrap();
    let reduced = simplify_morphology(&straight, &SimplifyConfig::new().with_epsilon(0.5)).unwrap();

    assert_eq!(topology(&reduced), topology(&morph));
    assert!(reduced.point_count() <= straight.point_count());

    // Sections still meet at their branch points
    for section in reduced.sections() {
        if let Some(p) = section.parent {
            assert_eq!(section.first_point(), reduced.section(p).last_point());
        }
    }
}

#[test]
fn test_long_point_chain_unravels() {
    let mut rows = vec![FlatRow::new(1, PointType::Soma, Point3D::new(0.0, 0.0, 0.0, 2.0), None)];
    rows.extend((2..100_002).map(|id| {
        let y = if id % 2 == 0 { 0.3 } else { -0.3 };
        FlatRow::new(id, PointType::Axon, Point3D::new(id as f64, y, 0.0, 1.0), Some(id - 1))
    }));
    let morph = build_morphology(&FlatBlock::new(rows).unwrap()).unwrap();

    // One-point sections: every section just moves onto its anchor
    let out = unravel(&morph, &UnravelConfig::default()).unwrap();
    assert_eq!(out.section_count(), 100_000);
    assert_eq!(out.iter_sections().count(), 100_000);
    assert!(out.sections().iter().all(|s| s.points == morph.sections()[0].points));
}
