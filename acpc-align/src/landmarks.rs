//! Landmark extraction for the frame builder

use acpc_core::{is_finite_point, InvalidInput, LabeledPoint, LandmarkList, Point3d, Result};
use serde::{Deserialize, Serialize};

/// Labels given to the landmarks when they are written back as a list
pub const LANDMARK_LABELS: [&str; 3] = ["AC", "PC", "IH"];

/// The three landmarks defining ACPC space, in patient coordinates.
///
/// Only finite coordinates are accepted; geometric degeneracy is checked
/// later by the frame builder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcpcLandmarks {
    /// Anterior commissure
    pub ac: Point3d,
    /// Posterior commissure
    pub pc: Point3d,
    /// Point on the midline, above the AC-PC line
    pub ih: Point3d,
}

impl AcpcLandmarks {
    pub fn new(ac: Point3d, pc: Point3d, ih: Point3d) -> Result<Self> {
        for (point, landmark) in [(&ac, "AC"), (&pc, "PC"), (&ih, "midline point")] {
            if !is_finite_point(point) {
                return Err(InvalidInput::NonFinite { landmark }.into());
            }
        }
        Ok(Self { ac, pc, ih })
    }

    /// Take exactly three points in the order AC, PC, midline point
    pub fn from_points(points: &[Point3d]) -> Result<Self> {
        match points {
            [ac, pc, ih] => Self::new(*ac, *pc, *ih),
            _ => Err(InvalidInput::LandmarkCount {
                found: points.len(),
            }
            .into()),
        }
    }

    /// Take a markups list by position; labels are not interpreted
    pub fn from_labeled(points: &[LabeledPoint]) -> Result<Self> {
        let positions: Vec<Point3d> = points.iter().map(|p| p.position).collect();
        Self::from_points(&positions)
    }

    /// Landmarks in the order AC, PC, midline point
    pub fn as_array(&self) -> [Point3d; 3] {
        [self.ac, self.pc, self.ih]
    }

    /// The landmarks as a labeled list
    pub fn to_point_cloud(&self) -> LandmarkList {
        LANDMARK_LABELS
            .iter()
            .zip(self.as_array())
            .map(|(label, position)| LabeledPoint::new(*label, position))
            .collect()
    }

    pub fn ac_pc_distance(&self) -> f64 {
        (self.ac - self.pc).norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acpc_core::Error;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_points_keeps_order() {
        let points = [
            Point3d::new(0.0, 12.0, 0.0),
            Point3d::new(0.0, -12.0, 0.0),
            Point3d::new(0.0, 0.0, 40.0),
        ];
        let landmarks = AcpcLandmarks::from_points(&points).unwrap();

        assert_eq!(landmarks.as_array(), points);
        assert_relative_eq!(landmarks.ac_pc_distance(), 24.0);
    }

    #[test]
    fn test_wrong_count_rejected() {
        let p = Point3d::new(1.0, 2.0, 3.0);
        for points in [vec![], vec![p, p], vec![p, p, p, p]] {
            let found = points.len();
            match AcpcLandmarks::from_points(&points) {
                Err(Error::InvalidInput(InvalidInput::LandmarkCount { found: f })) => {
                    assert_eq!(f, found)
                }
                other => panic!("expected a landmark count error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        let points = [
            Point3d::new(0.0, 1.0, 0.0),
            Point3d::new(0.0, f64::NEG_INFINITY, 0.0),
            Point3d::new(0.0, 0.0, 1.0),
        ];
        assert!(matches!(
            AcpcLandmarks::from_points(&points),
            Err(Error::InvalidInput(InvalidInput::NonFinite { landmark: "PC" }))
        ));
    }

    #[test]
    fn test_labels_are_ignored() {
        let list = [
            LabeledPoint::new("F-1", Point3d::new(0.0, 12.0, 0.0)),
            LabeledPoint::new("F-2", Point3d::new(0.0, -12.0, 0.0)),
            LabeledPoint::new("F-3", Point3d::new(0.0, 0.0, 40.0)),
        ];
        let landmarks = AcpcLandmarks::from_labeled(&list).unwrap();
        assert_eq!(landmarks.ac, Point3d::new(0.0, 12.0, 0.0));

        let relabeled = landmarks.to_point_cloud();
        let labels: Vec<&str> = relabeled.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, LANDMARK_LABELS);
    }
}
