//! Caller-side alignment sequence: extract landmarks, build the frame,
//! optionally harden the result into the landmark list.

use acpc_core::{LandmarkList, Point3d, Result, RigidTransform, Transformable};
use log::info;

use crate::frame::{mid_commissural_point, CoordinateFrameBuilder, FrameConfig};
use crate::landmarks::AcpcLandmarks;

/// Options for [`align_markups`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignOptions {
    pub frame: FrameConfig,
    /// Bake the transform into the landmark coordinates after a successful build
    pub auto_harden: bool,
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            frame: FrameConfig::default(),
            auto_harden: true,
        }
    }
}

/// A computed ACPC transform together with the landmarks it was built from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcpcAlignment {
    /// Patient space to ACPC space
    pub transform: RigidTransform,
    /// Landmarks in patient space
    pub landmarks: AcpcLandmarks,
}

impl AcpcAlignment {
    /// Landmarks expressed in ACPC space, in the order AC, PC, midline point
    pub fn landmarks_in_acpc(&self) -> [Point3d; 3] {
        self.landmarks
            .as_array()
            .map(|p| self.transform.transform_point(&p))
    }

    /// Mid-commissural point in patient space
    pub fn mid_commissural_point(&self) -> Point3d {
        mid_commissural_point(&self.landmarks.ac, &self.landmarks.pc)
    }

    /// Bake the transform into `target` in place
    pub fn harden<T: Transformable + ?Sized>(&self, target: &mut T) {
        target.transform(&self.transform);
    }
}

/// Build the ACPC transform for validated landmarks
pub fn align(landmarks: &AcpcLandmarks, config: &FrameConfig) -> Result<AcpcAlignment> {
    let transform = CoordinateFrameBuilder::new(*config).build_from_landmarks(landmarks)?;
    Ok(AcpcAlignment {
        transform,
        landmarks: *landmarks,
    })
}

/// Align a markups list holding AC, PC and a midline point, in that order.
///
/// With `auto_harden` the list is rewritten in ACPC coordinates. On error the
/// list is left untouched.
pub fn align_markups(markups: &mut LandmarkList, options: &AlignOptions) -> Result<AcpcAlignment> {
    let landmarks = AcpcLandmarks::from_labeled(&markups.points)?;
    let alignment = align(&landmarks, &options.frame)?;

    let mcp = alignment.mid_commissural_point();
    info!(
        "ACPC transform computed: MCP at ({:.3}, {:.3}, {:.3}), AC-PC distance {:.3}",
        mcp.x,
        mcp.y,
        mcp.z,
        landmarks.ac_pc_distance()
    );

    if options.auto_harden {
        alignment.harden(markups);
        info!("hardened ACPC transform into {} landmarks", markups.len());
    }

    Ok(alignment)
}
