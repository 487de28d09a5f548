//! Shared fixtures: seeded random morphologies and topology helpers.

#![allow(dead_code)]

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use shakha::{FlatBlock, FlatRow, Morphology, Point3D, PointType, SectionId};

const NEURITE_TYPES: [PointType; 3] = [
    PointType::Axon,
    PointType::BasalDendrite,
    PointType::ApicalDendrite,
];

/// Enable log output for a test run (idempotent).
pub fn init_logging() {
    env_logger::try_init().ok();
}

/// Random flat block: one soma row (id 1) and `rows` neurite rows.
///
/// Each row picks a random earlier row as parent and walks a jittered step
/// away from it. Neurites keep their root's type.
pub fn random_block(seed: u64, rows: usize) -> FlatBlock {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = vec![FlatRow::new(
        1,
        PointType::Soma,
        Point3D::new(0.0, 0.0, 0.0, 4.0),
        None,
    )];

    for id in 2..(rows as i64 + 2) {
        // Favor extending the most recent row so chains form
        let parent_idx = if rng.gen_bool(0.7) {
            out.len() - 1
        } else {
            rng.gen_range(0..out.len())
        };
        let parent = out[parent_idx];

        let point_type = if parent.point_type.is_soma() {
            NEURITE_TYPES[rng.gen_range(0..NEURITE_TYPES.len())]
        } else {
            parent.point_type
        };

        let point = Point3D::new(
            parent.point.x + rng.gen_range(0.5..2.0),
            parent.point.y + rng.gen_range(-1.0..1.0),
            parent.point.z + rng.gen_range(-1.0..1.0),
            rng.gen_range(0.1..1.5),
        );
        out.push(FlatRow::new(id, point_type, point, Some(parent.id)));
    }

    FlatBlock::new(out).unwrap()
}

/// Topology as `(parent position, type)` per section, positions being
/// pre-order indices. Independent of the numeric section ids.
pub fn topology(morph: &Morphology) -> Vec<(Option<usize>, PointType)> {
    let order: HashMap<SectionId, usize> = morph
        .iter_sections()
        .enumerate()
        .map(|(pos, s)| (s.id, pos))
        .collect();

    morph
        .iter_sections()
        .map(|s| (s.parent.map(|p| order[&p]), s.section_type))
        .collect()
}

/// Point count per section, in pre-order.
pub fn point_counts(morph: &Morphology) -> Vec<usize> {
    morph.iter_sections().map(|s| s.points.len()).collect()
}

/// Wiggly path along +x: `n` points, unit spacing, alternating y offset.
pub fn zigzag(n: usize, amplitude: f64) -> Vec<Point3D> {
    (0..n)
        .map(|i| {
            let y = if i % 2 == 0 { 0.0 } else { amplitude };
            Point3D::new(i as f64, y, 0.0, 1.0)
        })
        .collect()
}
