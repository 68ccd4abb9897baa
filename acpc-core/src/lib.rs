//! Core data structures and traits for ACPC alignment
//!
//! This crate provides the fundamental types shared by the frame builder and
//! the landmark readers: points, labeled landmarks, point clouds, rigid
//! transforms and the common error type.

pub mod point;
pub mod point_cloud;
pub mod traits;
pub mod transform;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use traits::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix3, Matrix4, Isometry3};
