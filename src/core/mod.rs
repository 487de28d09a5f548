//! Core types for the shakha morphology library.
//!
//! - [`Point3D`]: sample point (x, y, z, radius)
//! - [`PointType`]: soma / neurite classification
//! - [`math`]: centroid, scatter matrix, principal direction, point-line distance

pub mod math;
mod point;

pub use point::{Point3D, PointType};
