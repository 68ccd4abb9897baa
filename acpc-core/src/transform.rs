//! Rigid 3D transformation utilities

use nalgebra::{Isometry3, Matrix3, Matrix4, Rotation3, Translation3, UnitQuaternion};
use serde::{Deserialize, Serialize};

use crate::point::{Point3d, Vector3d};

/// A homogeneous rigid transform: rotation block plus translation, bottom row `[0, 0, 0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidTransform {
    pub matrix: Matrix4<f64>,
}

impl RigidTransform {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a pure translation
    pub fn translation(translation: Vector3d) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// Create a transformation from a rotation block and a translation.
    ///
    /// The rotation is taken as given; callers are responsible for passing
    /// an orthonormal matrix.
    pub fn from_parts(rotation: Matrix3<f64>, translation: Vector3d) -> Self {
        let mut matrix = Matrix4::identity();
        matrix.fixed_view_mut::<3, 3>(0, 0).copy_from(&rotation);
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(&translation);
        Self { matrix }
    }

    /// The upper-left 3x3 rotation block
    pub fn rotation(&self) -> Matrix3<f64> {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// The translation column
    pub fn translation_vector(&self) -> Vector3d {
        self.matrix.fixed_view::<3, 1>(0, 3).into_owned()
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3d) -> Point3d {
        Point3d::from(self.rotation() * point.coords + self.translation_vector())
    }

    /// Apply the transformation to a vector (rotation only)
    pub fn transform_vector(&self, vector: &Vector3d) -> Vector3d {
        self.rotation() * vector
    }

    /// Compose this transformation with another; `other` is applied first
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// The inverse transformation `[R^T | -R^T t]`
    pub fn inverse(self) -> Self {
        let rt = self.rotation().transpose();
        let t = self.translation_vector();
        Self::from_parts(rt, -(rt * t))
    }

    /// Determinant of the rotation block, +1 for a proper rotation
    pub fn determinant(&self) -> f64 {
        self.rotation().determinant()
    }

    /// Whether the rotation block is orthonormal with determinant +1 and the
    /// bottom row is `[0, 0, 0, 1]`, all within `epsilon`
    pub fn is_rigid(&self, epsilon: f64) -> bool {
        let r = self.rotation();
        let orthonormal = (r * r.transpose() - Matrix3::identity()).amax() <= epsilon;
        let proper = (self.determinant() - 1.0).abs() <= epsilon;
        let bottom = self.matrix.row(3);
        let affine = bottom[0].abs() <= epsilon
            && bottom[1].abs() <= epsilon
            && bottom[2].abs() <= epsilon
            && (bottom[3] - 1.0).abs() <= epsilon;
        orthonormal && proper && affine
    }

    /// Check if this is approximately the identity transformation
    pub fn is_identity(&self, epsilon: f64) -> bool {
        (self.matrix - Matrix4::identity()).norm() < epsilon
    }

    /// Row-major element copy, for host APIs that set a matrix element by `(row, col)`
    pub fn to_rows(&self) -> [[f64; 4]; 4] {
        let mut rows = [[0.0; 4]; 4];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, value) in row.iter_mut().enumerate() {
                *value = self.matrix[(r, c)];
            }
        }
        rows
    }

    /// Convert to an isometry, re-orthonormalizing the rotation block
    pub fn to_isometry(&self) -> Isometry3<f64> {
        let rotation = Rotation3::from_matrix(&self.rotation());
        Isometry3::from_parts(
            Translation3::from(self.translation_vector()),
            UnitQuaternion::from_rotation_matrix(&rotation),
        )
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for RigidTransform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}

impl From<Isometry3<f64>> for RigidTransform {
    fn from(isometry: Isometry3<f64>) -> Self {
        Self {
            matrix: isometry.to_homogeneous(),
        }
    }
}

impl std::fmt::Display for RigidTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.to_rows() {
            writeln!(
                f,
                "{:>12.6} {:>12.6} {:>12.6} {:>12.6}",
                row[0], row[1], row[2], row[3]
            )?;
        }
        Ok(())
    }
}
