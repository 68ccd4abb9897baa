//! Core traits for ACPC alignment

use crate::{point::*, point_cloud::*, transform::RigidTransform};
use nalgebra::Matrix4;

/// Geometry whose coordinates can be rewritten in place by a rigid transform.
///
/// This is the "harden" operation: the transform is baked into the stored
/// coordinates and nothing refers to it afterwards.
pub trait Transformable {
    /// Apply a transformation to the object
    fn transform(&mut self, transform: &RigidTransform);
}

impl Transformable for Point3d {
    fn transform(&mut self, transform: &RigidTransform) {
        *self = transform.transform_point(self);
    }
}

impl Transformable for LabeledPoint {
    fn transform(&mut self, transform: &RigidTransform) {
        self.position = transform.transform_point(&self.position);
    }
}

impl<T: Transformable> Transformable for PointCloud<T> {
    fn transform(&mut self, transform: &RigidTransform) {
        for point in &mut self.points {
            point.transform(transform);
        }
    }
}

/// A transform node placed under the ACPC transform
impl Transformable for RigidTransform {
    fn transform(&mut self, transform: &RigidTransform) {
        *self = transform.compose(*self);
    }
}

/// A volume's IJK to RAS matrix, which need not be rigid
impl Transformable for Matrix4<f64> {
    fn transform(&mut self, transform: &RigidTransform) {
        *self = transform.matrix * *self;
    }
}

impl<T: Transformable> Transformable for [T] {
    fn transform(&mut self, transform: &RigidTransform) {
        for point in self.iter_mut() {
            point.transform(transform);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_harden_translation_into_cloud() {
        let mut cloud = PointCloud3d::from_points(vec![
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 2.0, 3.0),
        ]);
        let shift = RigidTransform::translation(Vector3d::new(10.0, 0.0, -1.0));

        cloud.transform(&shift);

        assert_relative_eq!(cloud[0], Point3d::new(10.0, 0.0, -1.0));
        assert_relative_eq!(cloud[1], Point3d::new(11.0, 2.0, 2.0));
    }

    #[test]
    fn test_harden_keeps_labels() {
        let mut list = LandmarkList::from_points(vec![LabeledPoint::new(
            "AC",
            Point3d::new(1.0, 1.0, 1.0),
        )]);
        list.transform(&RigidTransform::translation(Vector3d::new(-1.0, -1.0, -1.0)));

        assert_eq!(list[0].label, "AC");
        assert_relative_eq!(list[0].position, Point3d::origin());
    }

    #[test]
    fn test_harden_transform_applies_after_existing() {
        let shift = RigidTransform::translation(Vector3d::new(0.0, 0.0, 5.0));
        let turn = RigidTransform::from_parts(
            nalgebra::Rotation3::from_axis_angle(&Vector3d::z_axis(), std::f64::consts::FRAC_PI_2)
                .into_inner(),
            Vector3d::zeros(),
        );
        let p = Point3d::new(1.0, 0.0, 0.0);

        let mut node = shift;
        node.transform(&turn);

        assert_relative_eq!(
            node.transform_point(&p),
            turn.transform_point(&shift.transform_point(&p)),
            epsilon = 1e-12
        );
        assert_relative_eq!(node.transform_point(&p), Point3d::new(0.0, 1.0, 5.0), epsilon = 1e-12);
    }

    #[test]
    fn test_harden_scaled_volume_matrix() {
        let mut ijk_to_ras = Matrix4::new(
            0.5, 0.0, 0.0, -60.0,
            0.0, 0.5, 0.0, -70.0,
            0.0, 0.0, 1.2, -30.0,
            0.0, 0.0, 0.0, 1.0,
        );
        let original = ijk_to_ras;
        let shift = RigidTransform::translation(Vector3d::new(1.0, 2.0, 3.0));

        ijk_to_ras.transform(&shift);

        // spacing survives, only the origin moves
        assert_relative_eq!(
            ijk_to_ras.fixed_view::<3, 3>(0, 0).into_owned(),
            original.fixed_view::<3, 3>(0, 0).into_owned()
        );
        assert_relative_eq!(ijk_to_ras[(0, 3)], -59.0);
        assert_relative_eq!(ijk_to_ras[(1, 3)], -68.0);
        assert_relative_eq!(ijk_to_ras[(2, 3)], -27.0);
    }
}
