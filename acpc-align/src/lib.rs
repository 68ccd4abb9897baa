//! # ACPC Align
//!
//! Construction of the ACPC coordinate frame from three anatomical landmarks.
//!
//! The frame puts the mid-commissural point (MCP) at the origin, aligns the
//! PC→AC direction with +y and uses a midline point only to fix the lateral
//! (x) direction. The result is a 4x4 rigid transform from patient RAS
//! coordinates into ACPC space.
//!
//! ```rust
//! use acpc_align::build_acpc_transform;
//! use acpc_core::Point3d;
//!
//! let ac = Point3d::new(0.0, 5.0, 0.0);
//! let pc = Point3d::new(0.0, -5.0, 0.0);
//! let ih = Point3d::new(0.0, 0.0, 10.0);
//!
//! let transform = build_acpc_transform(&ac, &pc, &ih).unwrap();
//! assert!(transform.is_identity(1e-12));
//! ```

pub mod frame;
pub mod landmarks;
pub mod alignment;

// Re-export commonly used items
pub use frame::*;
pub use landmarks::*;
pub use alignment::*;
