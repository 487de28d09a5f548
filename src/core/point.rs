//! Point and point-type definitions for morphology reconstructions.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Neurite / soma classification of a point or section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PointType {
    /// Cell body
    Soma,
    /// Axon
    Axon,
    /// Basal dendrite
    BasalDendrite,
    /// Apical dendrite
    ApicalDendrite,
    /// Unclassified
    #[default]
    Undefined,
}

impl PointType {
    /// Whether this is the soma type
    #[inline]
    pub fn is_soma(self) -> bool {
        self == PointType::Soma
    }
}

/// A reconstructed sample point: position in micrometers plus radius.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
    /// Radius (always >= 0)
    pub radius: f64,
}

impl Point3D {
    /// Create a new point
    #[inline]
    pub fn new(x: f64, y: f64, z: f64, radius: f64) -> Self {
        Self { x, y, z, radius }
    }

    /// Create a point from a position vector and radius
    #[inline]
    pub fn from_xyz(xyz: Vector3<f64>, radius: f64) -> Self {
        Self::new(xyz.x, xyz.y, xyz.z, radius)
    }

    /// Position as a vector, radius dropped
    #[inline]
    pub fn xyz(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Same point with the position replaced, radius kept
    #[inline]
    pub fn with_xyz(&self, xyz: Vector3<f64>) -> Self {
        Self::from_xyz(xyz, self.radius)
    }

    /// Euclidean distance between positions
    #[inline]
    pub fn distance(&self, other: &Point3D) -> f64 {
        (self.xyz() - other.xyz()).norm()
    }

    /// Diameter (twice the radius)
    #[inline]
    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }
}
