//! Ramer-Douglas-Peucker polyline simplification.
//!
//! A span `[start, end]` is kept as a straight line if no interior point lies
//! further than `epsilon` from the line through its endpoints; otherwise it is
//! split at the farthest point and both halves are examined. Spans are kept on
//! an explicit stack, so long sections cannot exhaust the call stack.
//!
//! Distances use XYZ only. Retained points are copied verbatim, radius
//! included; nothing is interpolated.

use super::config::SimplifyConfig;
use crate::core::Point3D;
use crate::core::math::point_line_distance;
use crate::error::Result;
use crate::morphology::Morphology;

/// Simplify a point sequence.
///
/// The first and last points are always kept. Inputs with fewer than three
/// points are returned unchanged. `epsilon` is not checked here; a negative
/// value keeps every point.
///
/// # Example
/// ```
/// use shakha::core::Point3D;
/// use shakha::transform::simplify;
///
/// let points = [
///     Point3D::new(0.0, 0.0, 0.0, 1.0),
///     Point3D::new(1.0, 0.0, 0.0, 1.0),
///     Point3D::new(2.0, 0.0, 0.0, 1.0),
/// ];
/// let simplified = simplify(&points, 0.01);
/// assert_eq!(simplified, vec![points[0], points[2]]);
/// ```
pub fn simplify(points: &[Point3D], epsilon: f64) -> Vec<Point3D> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut spans = vec![(0, n - 1)];
    while let Some((start, end)) = spans.pop() {
        if end <= start + 1 {
            continue;
        }

        let Some((split, max_dist)) = farthest_point(points, start, end) else {
            continue;
        };

        if max_dist > epsilon {
            keep[split] = true;
            spans.push((split, end));
            spans.push((start, split));
        }
    }

    points
        .iter()
        .zip(&keep)
        .filter(|&(_, &k)| k)
        .map(|(p, _)| *p)
        .collect()
}

/// Interior point of `[start, end]` farthest from the chord, with its distance.
///
/// Returns `None` when every interior point lies on the chord.
fn farthest_point(points: &[Point3D], start: usize, end: usize) -> Option<(usize, f64)> {
    let a = points[start].xyz();
    let b = points[end].xyz();

    let mut best = None;
    let mut max_dist = 0.0;
    for (i, p) in points.iter().enumerate().take(end).skip(start + 1) {
        let d = point_line_distance(&p.xyz(), &a, &b);
        if d > max_dist {
            max_dist = d;
            best = Some(i);
        }
    }

    best.map(|i| (i, max_dist))
}

/// Simplify every section of a morphology independently.
///
/// Section ids and topology are preserved. Because endpoints are always kept,
/// each child still starts at its parent's last point.
///
/// # Errors
/// `InvalidConfig` if `config` fails validation.
pub fn simplify_morphology(morphology: &Morphology, config: &SimplifyConfig) -> Result<Morphology> {
    config.validate()?;

    let result =
        morphology.try_map_points(|section, _| Ok(simplify(&section.points, config.epsilon)))?;

    log::debug!(
        "Simplified {} sections: {} -> {} points (epsilon {})",
        result.section_count(),
        morphology.point_count(),
        result.point_count(),
        config.epsilon
    );

    Ok(result)
}
