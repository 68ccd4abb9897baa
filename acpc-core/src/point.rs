//! Point types and related functionality

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with double precision coordinates, in patient RAS space
pub type Point3d = Point3<f64>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// A named control point, as stored in a markups list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledPoint {
    pub label: String,
    pub position: Point3d,
}

impl LabeledPoint {
    pub fn new(label: impl Into<String>, position: Point3d) -> Self {
        Self {
            label: label.into(),
            position,
        }
    }

    /// Whether all three coordinates are finite
    pub fn is_finite(&self) -> bool {
        is_finite_point(&self.position)
    }
}

impl From<Point3d> for LabeledPoint {
    fn from(position: Point3d) -> Self {
        Self {
            label: String::new(),
            position,
        }
    }
}

impl From<LabeledPoint> for Point3d {
    fn from(point: LabeledPoint) -> Self {
        point.position
    }
}

/// Whether all three coordinates of `p` are finite
pub fn is_finite_point(p: &Point3d) -> bool {
    p.iter().all(|c| c.is_finite())
}

/// Convert a point between the LPS and RAS conventions (the map is its own inverse)
pub fn lps_to_ras(p: &Point3d) -> Point3d {
    Point3d::new(-p.x, -p.y, p.z)
}
