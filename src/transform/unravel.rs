//! Unravelling: removal of shrinkage-induced wiggle along neurites.
//!
//! Each segment `(i-1, i)` of a section is replaced by a vector of the same
//! length pointing along the principal axis of the surrounding original
//! points. Corrected points are accumulated from the section's anchor, so the
//! path keeps its segment lengths while losing small-scale curvature.
//!
//! Reference: Cuntz et al., "Repair of Neuronal Dendrites", in *Computational
//! Modeling Methods for Neuroscientists*, section 9.2.

use nalgebra::Vector3;

use super::config::UnravelConfig;
use crate::core::Point3D;
use crate::core::math::{DEGENERATE_EPSILON, window_direction};
use crate::error::{MorphError, Result};
use crate::morphology::Morphology;

/// Unravel every section of a morphology.
///
/// Returns a new morphology with identical ids, topology and per-section
/// point counts. Root sections keep their first point; every other section
/// starts at its parent's corrected last point.
///
/// # Errors
/// `InvalidConfig` if `config` fails validation.
///
/// # Example
/// ```
/// use shakha::core::{Point3D, PointType};
/// use shakha::morphology::MorphologyBuilder;
/// use shakha::transform::{UnravelConfig, unravel};
///
/// let mut b = MorphologyBuilder::new();
/// b.add_soma_points([Point3D::new(0.0, 0.0, 0.0, 5.0)]);
/// b.add_section(None, PointType::Axon, vec![
///     Point3D::new(0.0, 0.0, 0.0, 1.0),
///     Point3D::new(1.0, 0.2, 0.0, 1.0),
///     Point3D::new(2.0, -0.2, 0.0, 1.0),
///     Point3D::new(3.0, 0.0, 0.0, 1.0),
/// ]).unwrap();
/// let morph = b.build().unwrap();
///
/// let unravelled = unravel(&morph, &UnravelConfig::default()).unwrap();
/// assert_eq!(unravelled.point_count(), morph.point_count());
/// ```
pub fn unravel(morphology: &Morphology, config: &UnravelConfig) -> Result<Morphology> {
    config.validate()?;

    let result = morphology.try_map_points(|section, parent_points| {
        let anchor = parent_points.and_then(|pts| pts.last().copied());
        Ok(unravel_points(
            &section.points,
            anchor,
            config.window_half_length,
        ))
    })?;

    log::debug!(
        "Unravelled {} sections (window half length {})",
        result.section_count(),
        config.window_half_length
    );

    Ok(result)
}

/// Unravel one point sequence.
///
/// `anchor` replaces the first point when given (the parent's corrected last
/// point). Radii are copied from the original points. Sequences of fewer than
/// two points come back unchanged apart from the anchor.
pub fn unravel_points(
    points: &[Point3D],
    anchor: Option<Point3D>,
    window_half_length: usize,
) -> Vec<Point3D> {
    let mut corrected = points.to_vec();
    let Some(first) = corrected.first_mut() else {
        return corrected;
    };
    if let Some(anchor) = anchor {
        *first = anchor;
    }

    let n = points.len();
    for i in 1..n {
        let start = i.saturating_sub(window_half_length + 1);
        let end = (i + window_half_length + 1).min(n);
        let window = &points[start..end];

        let segment = points[i].xyz() - points[i - 1].xyz();
        let length = segment.norm();

        let step = match oriented_direction(window) {
            Ok(direction) => direction * length,
            Err(e) => {
                log::debug!("Segment {}: {}, keeping original segment vector", i, e);
                segment
            }
        };

        let previous = corrected[i - 1].xyz();
        corrected[i] = points[i].with_xyz(previous + step);
    }

    corrected
}

/// Unit principal direction of `window`, oriented along its chord.
///
/// The eigenvector is scaled by its dot product with the chord (last minus
/// first window point), then renormalized.
fn oriented_direction(window: &[Point3D]) -> Result<Vector3<f64>> {
    let direction = window_direction(window)?;

    let chord = window[window.len() - 1].xyz() - window[0].xyz();
    let oriented = direction * direction.dot(&chord);
    let magnitude = oriented.norm();

    if magnitude <= DEGENERATE_EPSILON {
        return Err(MorphError::DegenerateGeometry(format!(
            "principal axis orthogonal to chord (|v| = {magnitude:e})"
        )));
    }

    Ok(oriented / magnitude)
}
