//! Landmark readers
//!
//! Markups saved by 3D Slicer (`.fcsv` and `.mrk.json`) and plain XYZ/CSV
//! text are read into a [`LandmarkList`] in RAS coordinates, in file order.

pub mod fcsv;
pub mod markups_json;
pub mod xyz;

pub use fcsv::{parse_fcsv, FcsvReader};
pub use markups_json::{parse_markups_json, MarkupsJsonReader};
pub use xyz::{parse_xyz, Delimiter, XyzReader};

use acpc_core::{lps_to_ras, Error, LandmarkList, Point3d, Result};
use std::path::Path;

/// Trait for reading landmark lists from files
pub trait LandmarkReader {
    fn read_landmarks<P: AsRef<Path>>(path: P) -> Result<LandmarkList>;
}

/// Patient coordinate convention of a markups file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateSystem {
    #[default]
    Ras,
    Lps,
}

impl CoordinateSystem {
    /// Parse the names and legacy numeric codes Slicer writes (`0` = RAS, `1` = LPS)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "RAS" | "0" => Some(CoordinateSystem::Ras),
            "LPS" | "1" => Some(CoordinateSystem::Lps),
            _ => None,
        }
    }

    /// Express a point given in this convention in RAS
    pub fn to_ras(self, p: Point3d) -> Point3d {
        match self {
            CoordinateSystem::Ras => p,
            CoordinateSystem::Lps => lps_to_ras(&p),
        }
    }
}

/// Auto-detect format from the extension and read a landmark list
pub fn read_landmarks<P: AsRef<Path>>(path: P) -> Result<LandmarkList> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()).map(|s| s.to_ascii_lowercase()) {
        Some(ext) if ext == "fcsv" => FcsvReader::read_landmarks(path),
        Some(ext) if ext == "json" => MarkupsJsonReader::read_landmarks(path),
        Some(ext) if ext == "xyz" || ext == "csv" || ext == "txt" => XyzReader::read_landmarks(path),
        _ => Err(Error::UnsupportedFormat(format!(
            "Unsupported landmark format: {:?}",
            path.extension()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_coordinate_system_codes() {
        assert_eq!(CoordinateSystem::parse("LPS"), Some(CoordinateSystem::Lps));
        assert_eq!(CoordinateSystem::parse(" ras "), Some(CoordinateSystem::Ras));
        assert_eq!(CoordinateSystem::parse("0"), Some(CoordinateSystem::Ras));
        assert_eq!(CoordinateSystem::parse("1"), Some(CoordinateSystem::Lps));
        assert_eq!(CoordinateSystem::parse("IJK"), None);

        let p = CoordinateSystem::Lps.to_ras(Point3d::new(1.0, 2.0, 3.0));
        assert_eq!(p, Point3d::new(-1.0, -2.0, 3.0));
    }

    #[test]
    fn test_dispatch_by_extension() {
        let fcsv = write_temp(
            ".fcsv",
            "# columns = id,x,y,z,ow,ox,oy,oz,vis,sel,lock,label,desc,associatedNodeID\n\
             1,0,12,0,0,0,0,1,1,1,0,AC,,\n",
        );
        let list = read_landmarks(fcsv.path()).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].label, "AC");

        let json = write_temp(
            ".mrk.json",
            r#"{"markups": [{"coordinateSystem": "RAS", "controlPoints": [{"label": "PC", "position": [0.0, -12.0, 0.0]}]}]}"#,
        );
        let list = read_landmarks(json.path()).unwrap();
        assert_eq!(list[0].position, Point3d::new(0.0, -12.0, 0.0));

        let xyz = write_temp(".xyz", "0 0 40\n");
        assert_eq!(read_landmarks(xyz.path()).unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let other = write_temp(".nrrd", "");
        assert!(matches!(
            read_landmarks(other.path()),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            read_landmarks("/nonexistent/landmarks.fcsv"),
            Err(Error::Io(_))
        ));
    }
}
