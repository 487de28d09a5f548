//! Unravel and simplify a synthetic neuron, then save it.
//!
//! This example demonstrates:
//! - Building a flat block of a wiggly, branching neuron
//! - Assembling a section tree from it
//! - Unravelling and simplifying with settings from `configs/shakha.yaml`
//! - Saving the result as SWC and ASC
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --example unravel_demo
//! RUST_LOG=debug cargo run --example unravel_demo -- configs/shakha.yaml
//! ```
//!
//! Output files are written to the configured output directory.

use std::path::Path;

use shakha::io::{OutputFormat, save_morphology, to_h5_tables};
use shakha::transform::{simplify_morphology, unravel};
use shakha::{FlatBlock, FlatRow, Morphology, Point3D, PointType, ShakhaConfig, build_sections};

/// One wiggly neurite of `len` rows leaving the soma at `angle` (radians),
/// forking halfway.
fn neurite_rows(
    rows: &mut Vec<FlatRow>,
    point_type: PointType,
    angle: f64,
    len: usize,
) {
    let (dx, dy) = (angle.cos(), angle.sin());
    let mut parent = 1;
    let mut fork = 0;

    for i in 0..len {
        let id = rows.len() as i64 + 1;
        let t = i as f64;
        // Shrinkage wiggle perpendicular to the growth direction
        let wiggle = 0.6 * (t * 1.7).sin();
        let point = Point3D::new(
            (t + 5.0) * dx - wiggle * dy,
            (t + 5.0) * dy + wiggle * dx,
            0.3 * (t * 0.9).cos(),
            (1.5 - t / len as f64).max(0.2),
        );
        rows.push(FlatRow::new(id, point_type, point, Some(parent)));

        if i == len / 2 {
            fork = id;
        }
        parent = id;
    }

    // Side branch off the fork point
    let base = rows[(fork - 1) as usize].point;
    let mut parent = fork;
    for i in 1..=len / 3 {
        let id = rows.len() as i64 + 1;
        let t = i as f64;
        let point = Point3D::new(
            base.x - t * dy + 0.4 * (t * 2.1).sin() * dx,
            base.y + t * dx + 0.4 * (t * 2.1).sin() * dy,
            base.z,
            0.4,
        );
        rows.push(FlatRow::new(id, point_type, point, Some(parent)));
        parent = id;
    }
}

fn synthetic_neuron() -> Result<Morphology, Box<dyn std::error::Error>> {
    let mut rows = vec![FlatRow::new(
        1,
        PointType::Soma,
        Point3D::new(0.0, 0.0, 0.0, 5.0),
        None,
    )];
    neurite_rows(&mut rows, PointType::ApicalDendrite, 1.57, 120);
    neurite_rows(&mut rows, PointType::BasalDendrite, 3.6, 60);
    neurite_rows(&mut rows, PointType::BasalDendrite, 5.8, 60);
    neurite_rows(&mut rows, PointType::Axon, 4.7, 200);

    let block = FlatBlock::new(rows)?;
    Ok(build_sections(&block)?)
}

/// Straight-line distance from first to last point, summed over sections.
fn total_reach(morph: &Morphology) -> f64 {
    morph
        .sections()
        .iter()
        .map(|s| s.first_point().distance(s.last_point()))
        .sum()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => ShakhaConfig::load(Path::new(&path))?,
        None => ShakhaConfig::load_default()?,
    };

    let morph = synthetic_neuron()?;
    println!(
        "Neuron: {} neurites, {} sections, {} points",
        morph.roots().len(),
        morph.section_count(),
        morph.point_count()
    );

    let straight = unravel(&morph, &config.unravel)?;
    println!(
        "Unravelled (window {}): reach {:.1} -> {:.1}",
        config.unravel.window_half_length,
        total_reach(&morph),
        total_reach(&straight)
    );

    let reduced = simplify_morphology(&straight, &config.simplify)?;
    println!(
        "Simplified (epsilon {}): {} -> {} points",
        config.simplify.epsilon,
        straight.point_count(),
        reduced.point_count()
    );

    let tables = to_h5_tables(&reduced)?;
    println!(
        "H5 tables: {} points, {} structure rows",
        tables.points.len(),
        tables.structure.len()
    );

    std::fs::create_dir_all(&config.output.output_dir)?;
    let primary = config.output.path_for("unravelled");
    save_morphology(&reduced, &primary, config.output.format)?;
    println!("Saved {}", primary.display());

    // Also write the other text format next to it
    let other = match config.output.format {
        OutputFormat::Swc => OutputFormat::Asc,
        OutputFormat::Asc => OutputFormat::Swc,
    };
    let secondary = primary.with_extension(other.extension());
    save_morphology(&reduced, &secondary, other)?;
    println!("Saved {}", secondary.display());

    Ok(())
}
