//! Basic usage example for ACPC alignment
//!
//! This example demonstrates the caller-side sequence:
//! - Collecting the three landmarks (AC, PC, midline point)
//! - Building the ACPC transform
//! - Hardening the transform into other point geometry

use acpc_align::{align, AcpcLandmarks, FrameConfig};
use acpc_core::{Point3d, PointCloud3d};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("ACPC Alignment Example");
    println!("======================");

    // Landmarks in scanner RAS coordinates, in the order AC, PC, midline
    let landmarks = AcpcLandmarks::from_points(&[
        Point3d::new(1.2, 18.4, -6.0),
        Point3d::new(0.7, -7.9, -3.1),
        Point3d::new(2.0, 6.5, 38.0),
    ])?;
    println!("AC-PC distance: {:.2} mm", landmarks.ac_pc_distance());

    let alignment = align(&landmarks, &FrameConfig::default())?;
    println!("\nPatient to ACPC transform:\n{}", alignment.transform);

    for (name, p) in ["AC", "PC", "IH"].iter().zip(alignment.landmarks_in_acpc()) {
        println!("{:>3} in ACPC space: ({:8.3}, {:8.3}, {:8.3})", name, p.x, p.y, p.z);
    }

    // Bake the transform into a small cloud sampled around the MCP
    let mcp = alignment.mid_commissural_point();
    let mut cloud = PointCloud3d::from_points(vec![
        mcp,
        Point3d::new(mcp.x + 10.0, mcp.y, mcp.z),
        Point3d::new(mcp.x, mcp.y, mcp.z + 10.0),
    ]);
    alignment.harden(&mut cloud);

    println!("\nHardened cloud:");
    for p in &cloud {
        println!("  ({:8.3}, {:8.3}, {:8.3})", p.x, p.y, p.z);
    }

    println!("\nExample completed successfully!");
    Ok(())
}
