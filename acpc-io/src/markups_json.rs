//! Slicer markups JSON (`.mrk.json`) support
//!
//! Only the first markup in the file is read. Control points without a
//! defined position are skipped.

use acpc_core::{Error, LabeledPoint, LandmarkList, Point3d, Result};
use log::warn;
use serde::Deserialize;
use std::path::Path;

use crate::{CoordinateSystem, LandmarkReader};

#[derive(Debug, Deserialize)]
struct MarkupsDocument {
    #[serde(default)]
    markups: Vec<Markup>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Markup {
    #[serde(default)]
    coordinate_system: Option<String>,
    #[serde(default)]
    control_points: Vec<ControlPoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ControlPoint {
    #[serde(default)]
    label: String,
    #[serde(default)]
    position: Option<[f64; 3]>,
    #[serde(default)]
    position_status: Option<String>,
}

impl ControlPoint {
    fn is_defined(&self) -> bool {
        self.position.is_some() && self.position_status.as_deref() != Some("undefined")
    }
}

/// Parse markups JSON text into a landmark list in RAS coordinates
pub fn parse_markups_json(text: &str) -> Result<LandmarkList> {
    let document: MarkupsDocument = serde_json::from_str(text)?;
    let markup = document
        .markups
        .into_iter()
        .next()
        .ok_or_else(|| Error::InvalidData("markups file contains no markup".to_string()))?;

    let system = match markup.coordinate_system.as_deref() {
        None => CoordinateSystem::Ras,
        Some(name) => CoordinateSystem::parse(name).ok_or_else(|| {
            Error::InvalidData(format!("Unknown coordinate system: {}", name))
        })?,
    };

    let mut list = LandmarkList::with_capacity(markup.control_points.len());
    for point in markup.control_points {
        let position = match point.position {
            Some(p) if point.is_defined() => p,
            _ => {
                warn!("skipping control point {:?} without a position", point.label);
                continue;
            }
        };
        let [x, y, z] = position;
        list.push(LabeledPoint::new(point.label, system.to_ras(Point3d::new(x, y, z))));
    }

    Ok(list)
}

/// Slicer markups JSON reader
pub struct MarkupsJsonReader;

impl LandmarkReader for MarkupsJsonReader {
    fn read_landmarks<P: AsRef<Path>>(path: P) -> Result<LandmarkList> {
        let text = std::fs::read_to_string(path)?;
        parse_markups_json(&text)
    }
}
