//! ACPC coordinate frame construction

use acpc_core::{is_finite_point, Degeneracy, InvalidInput, Point3d, Result, RigidTransform, Vector3d};
use log::debug;
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::landmarks::AcpcLandmarks;

/// Thresholds below which the landmark geometry is treated as degenerate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameConfig {
    /// Shortest accepted distance between AC and PC, and between AC and the
    /// midline point, in input units
    pub min_segment_length: f64,
    /// Smallest accepted sine of the angle between the AC-PC line and the
    /// AC-midline direction
    pub min_lateral_sine: f64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            min_segment_length: 1e-6,
            min_lateral_sine: 1e-6,
        }
    }
}

/// Orthonormal right-handed basis of ACPC space, expressed in the input frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Basis {
    /// Lateral axis
    pub x_axis: Vector3d,
    /// Anteroposterior axis, pointing from PC towards AC
    pub y_axis: Vector3d,
    /// Rostrocaudal axis
    pub z_axis: Vector3d,
}

impl Basis {
    /// Rotation taking input coordinates into this basis (rows are the axes)
    pub fn rotation(&self) -> Matrix3<f64> {
        Matrix3::from_rows(&[
            self.x_axis.transpose(),
            self.y_axis.transpose(),
            self.z_axis.transpose(),
        ])
    }

    /// Unit axes and zero pairwise dot products, within `epsilon`
    pub fn is_orthonormal(&self, epsilon: f64) -> bool {
        let unit = [self.x_axis, self.y_axis, self.z_axis]
            .iter()
            .all(|a| (a.norm() - 1.0).abs() <= epsilon);
        unit && self.x_axis.dot(&self.y_axis).abs() <= epsilon
            && self.y_axis.dot(&self.z_axis).abs() <= epsilon
            && self.z_axis.dot(&self.x_axis).abs() <= epsilon
    }

    pub fn is_right_handed(&self) -> bool {
        self.x_axis.cross(&self.y_axis).dot(&self.z_axis) > 0.0
    }
}

/// Mid-commissural point, the origin of ACPC space
pub fn mid_commissural_point(ac: &Point3d, pc: &Point3d) -> Point3d {
    // halves first, so the sum cannot overflow
    Point3d::from(ac.coords * 0.5 + pc.coords * 0.5)
}

/// Power of two at or below the largest coordinate magnitude.
///
/// Dividing by it is exact and keeps every landmark difference and norm
/// finite.
fn coordinate_scale(points: [&Point3d; 3]) -> f64 {
    let max_abs = points
        .iter()
        .flat_map(|p| p.iter())
        .fold(0.0_f64, |m, c| m.max(c.abs()));
    if max_abs > 0.0 {
        max_abs.log2().floor().exp2()
    } else {
        1.0
    }
}

/// Builds the rigid transform from patient space into ACPC space.
///
/// The builder is stateless apart from its thresholds; every call computes a
/// fresh transform from the three landmarks.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateFrameBuilder {
    config: FrameConfig,
}

impl CoordinateFrameBuilder {
    pub fn new(config: FrameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Compute the ACPC axes for landmarks given in the order AC, PC, midline.
    ///
    /// Fails with [`Degeneracy::CoincidentCommissures`] when AC and PC are
    /// closer than `min_segment_length`, and with
    /// [`Degeneracy::CollinearMidline`] when the midline point does not
    /// determine a lateral direction. Lengths are measured on coordinates
    /// rescaled by a power of two, so very large inputs cannot overflow.
    pub fn basis(&self, ac: &Point3d, pc: &Point3d, ih: &Point3d) -> Result<Basis> {
        check_finite(ac, "AC")?;
        check_finite(pc, "PC")?;
        check_finite(ih, "midline point")?;

        let scale = coordinate_scale([ac, pc, ih]);
        let (ac, pc, ih) = (ac.coords / scale, pc.coords / scale, ih.coords / scale);
        let min_length = self.config.min_segment_length / scale;

        // Anteroposterior axis
        let pc_ac = ac - pc;
        let ac_pc_length = pc_ac.norm();
        if !(ac_pc_length > min_length) {
            return Err(Degeneracy::CoincidentCommissures.into());
        }
        let y_axis = pc_ac / ac_pc_length;

        // Lateral axis
        let ac_ih = ih - ac;
        let lateral = y_axis.cross(&ac_ih);
        let lateral_norm = lateral.norm();
        // |y x v| = |v| sin(angle), so this bounds the sine from below
        let min_norm = self.config.min_lateral_sine * ac_ih.norm().max(min_length);
        if !(lateral_norm > min_norm) {
            return Err(Degeneracy::CollinearMidline.into());
        }
        let x_axis = lateral / lateral_norm;

        // Rostrocaudal axis, unit length since x and y are orthonormal
        let z_axis = x_axis.cross(&y_axis);

        debug!(
            "ACPC basis: x={:?} y={:?} z={:?} (AC-PC distance {:.4})",
            x_axis.as_slice(),
            y_axis.as_slice(),
            z_axis.as_slice(),
            ac_pc_length * scale
        );

        Ok(Basis {
            x_axis,
            y_axis,
            z_axis,
        })
    }

    /// Compute the transform from patient space into ACPC space.
    ///
    /// Fails with [`InvalidInput::OutOfRange`] when the MCP is so far from
    /// the origin that the translation is not representable.
    pub fn build(&self, ac: &Point3d, pc: &Point3d, ih: &Point3d) -> Result<RigidTransform> {
        let rotation = self.basis(ac, pc, ih)?.rotation();
        let mcp = mid_commissural_point(ac, pc);
        let translation = -(rotation * mcp.coords);
        let transform = RigidTransform::from_parts(rotation, translation);
        if !transform.matrix.iter().all(|v| v.is_finite()) {
            return Err(InvalidInput::OutOfRange.into());
        }
        Ok(transform)
    }

    pub fn build_from_landmarks(&self, landmarks: &AcpcLandmarks) -> Result<RigidTransform> {
        self.build(&landmarks.ac, &landmarks.pc, &landmarks.ih)
    }
}

/// Compute the ACPC transform with the default thresholds
pub fn build_acpc_transform(ac: &Point3d, pc: &Point3d, ih: &Point3d) -> Result<RigidTransform> {
    CoordinateFrameBuilder::default().build(ac, pc, ih)
}

fn check_finite(p: &Point3d, landmark: &'static str) -> Result<()> {
    if is_finite_point(p) {
        Ok(())
    } else {
        Err(InvalidInput::NonFinite { landmark }.into())
    }
}
