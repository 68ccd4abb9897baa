//! Slicer fiducial CSV (`.fcsv`) support
//!
//! Lines starting with `#` are metadata. Two of them matter here:
//! - `# CoordinateSystem = RAS|LPS|0|1` (absent in old files, which are RAS)
//! - `# columns = id,x,y,z,...,label,...` naming the data columns
//!
//! Without a `columns` line the fixed Slicer layout is assumed.

use acpc_core::{Error, LabeledPoint, LandmarkList, Point3d, Result};
use log::warn;
use std::path::Path;

use crate::{CoordinateSystem, LandmarkReader};

/// `id,x,y,z,ow,ox,oy,oz,vis,sel,lock,label,desc,associatedNodeID`
const DEFAULT_COLUMNS: Columns = Columns {
    x: 1,
    y: 2,
    z: 3,
    label: Some(11),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    x: usize,
    y: usize,
    z: usize,
    label: Option<usize>,
}

impl Columns {
    fn from_header(names: &str) -> Result<Self> {
        let names: Vec<String> = names
            .split(',')
            .map(|s| s.trim().to_ascii_lowercase())
            .collect();
        let find = |name: &str| names.iter().position(|n| n == name);

        match (find("x"), find("y"), find("z")) {
            (Some(x), Some(y), Some(z)) => Ok(Self {
                x,
                y,
                z,
                label: find("label"),
            }),
            _ => Err(Error::InvalidData(
                "fcsv columns header must name x, y and z".to_string(),
            )),
        }
    }
}

/// Split a `# key = value` metadata line
fn metadata(line: &str) -> Option<(&str, &str)> {
    let body = line.trim_start_matches('#').trim();
    let (key, value) = body.split_once('=')?;
    Some((key.trim(), value.trim()))
}

/// Parse fcsv text into a landmark list in RAS coordinates
pub fn parse_fcsv(text: &str) -> Result<LandmarkList> {
    let mut columns = DEFAULT_COLUMNS;
    let mut system = CoordinateSystem::Ras;
    let mut list = LandmarkList::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('#') {
            match metadata(line) {
                Some((key, value)) if key.eq_ignore_ascii_case("columns") => {
                    columns = Columns::from_header(value)?;
                }
                Some((key, value)) if key.eq_ignore_ascii_case("CoordinateSystem") => {
                    system = CoordinateSystem::parse(value).ok_or_else(|| {
                        Error::InvalidData(format!("Unknown coordinate system: {}", value))
                    })?;
                }
                _ => {}
            }
            continue;
        }

        let parts: Vec<&str> = line.split(',').map(|s| s.trim()).collect();
        let coord = |idx: usize, axis: &str| -> Result<f64> {
            parts
                .get(idx)
                .ok_or_else(|| {
                    Error::InvalidData(format!("line {}: missing {} coordinate", line_no + 1, axis))
                })?
                .parse::<f64>()
                .map_err(|_| {
                    Error::InvalidData(format!("line {}: invalid {} coordinate", line_no + 1, axis))
                })
        };

        let position = Point3d::new(
            coord(columns.x, "x")?,
            coord(columns.y, "y")?,
            coord(columns.z, "z")?,
        );
        let label = columns
            .label
            .and_then(|idx| parts.get(idx))
            .map(|s| s.to_string())
            .unwrap_or_default();

        list.push(LabeledPoint::new(label, system.to_ras(position)));
    }

    if list.is_empty() {
        warn!("fcsv contains no control points");
    }

    Ok(list)
}

/// Slicer fiducial CSV reader
pub struct FcsvReader;

impl LandmarkReader for FcsvReader {
    fn read_landmarks<P: AsRef<Path>>(path: P) -> Result<LandmarkList> {
        let text = std::fs::read_to_string(path)?;
        parse_fcsv(&text)
    }
}
