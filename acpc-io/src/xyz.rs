//! Plain XYZ/CSV landmark lists
//!
//! One landmark per line. The delimiter (comma, space, tab or semicolon) is
//! detected from the first data line. An optional header names the `x`, `y`,
//! `z` and `label` columns. Without one, rows starting with a non-numeric
//! field are read as `label,x,y,z` and all other rows take the first three
//! columns as the coordinates. Coordinates are taken as RAS.

use acpc_core::{Error, LabeledPoint, LandmarkList, Point3d, Result};
use std::path::Path;

use crate::LandmarkReader;

/// Supported delimiters for XYZ/CSV files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Space,
    Tab,
    Semicolon,
}

impl Delimiter {
    /// Get the character representation of the delimiter
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Space => ' ',
            Delimiter::Tab => '\t',
            Delimiter::Semicolon => ';',
        }
    }

    /// Detect delimiter from a line of text
    pub fn detect_from_line(line: &str) -> Option<Self> {
        let counts = [
            (line.matches(',').count(), Delimiter::Comma),
            (line.matches(' ').count(), Delimiter::Space),
            (line.matches('\t').count(), Delimiter::Tab),
            (line.matches(';').count(), Delimiter::Semicolon),
        ];

        // Ties go to the earlier entry, so "1, 2, 3" is comma separated
        counts
            .iter()
            .filter(|(count, _)| *count > 0)
            .fold(None, |best: Option<(usize, Delimiter)>, &(count, d)| match best {
                Some((best_count, _)) if best_count >= count => best,
                _ => Some((count, d)),
            })
            .map(|(_, d)| d)
    }

    fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            // runs of spaces are a single separator
            Delimiter::Space => line.split_whitespace().collect(),
            d => line.split(d.as_char()).map(|s| s.trim()).collect(),
        }
    }
}

/// Column roles that can be named in a header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    X,
    Y,
    Z,
    Label,
    Unknown,
}

impl ColumnType {
    fn from_header(header: &str) -> Self {
        match header.trim().to_lowercase().as_str() {
            "x" | "r" | "pos_x" | "position_x" => ColumnType::X,
            "y" | "a" | "pos_y" | "position_y" => ColumnType::Y,
            "z" | "s" | "pos_z" | "position_z" => ColumnType::Z,
            "label" | "name" => ColumnType::Label,
            _ => ColumnType::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Layout {
    x: usize,
    y: usize,
    z: usize,
    label: Option<usize>,
}

impl Layout {
    fn positional() -> Self {
        Self {
            x: 0,
            y: 1,
            z: 2,
            label: None,
        }
    }

    fn label_first() -> Self {
        Self {
            x: 1,
            y: 2,
            z: 3,
            label: Some(0),
        }
    }

    /// Layout of a file without a header, judged from its first row
    fn from_first_row(parts: &[&str]) -> Self {
        match parts.first() {
            Some(first) if parts.len() >= 4 && first.parse::<f64>().is_err() => Self::label_first(),
            _ => Self::positional(),
        }
    }

    fn from_header(parts: &[&str]) -> Result<Self> {
        let columns: Vec<ColumnType> = parts.iter().map(|h| ColumnType::from_header(h)).collect();
        let find = |c: ColumnType| columns.iter().position(|&col| col == c);

        match (find(ColumnType::X), find(ColumnType::Y), find(ColumnType::Z)) {
            (Some(x), Some(y), Some(z)) => Ok(Self {
                x,
                y,
                z,
                label: find(ColumnType::Label),
            }),
            _ => Err(Error::InvalidData(
                "XYZ/CSV header must contain x, y, z columns".to_string(),
            )),
        }
    }
}

/// A header line names at least one known column
fn is_header_line(parts: &[&str]) -> bool {
    parts
        .iter()
        .any(|p| p.parse::<f64>().is_err() && ColumnType::from_header(p) != ColumnType::Unknown)
}

/// Parse XYZ/CSV text into a landmark list
pub fn parse_xyz(text: &str) -> Result<LandmarkList> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty() && !l.trim_start().starts_with('#'))
        .peekable();

    let delimiter = match lines.peek() {
        Some(&(_, first)) => Delimiter::detect_from_line(first.trim())
            .ok_or_else(|| Error::InvalidData("Could not detect delimiter".to_string()))?,
        None => return Ok(LandmarkList::new()),
    };

    let mut layout = Layout::positional();
    if let Some(&(_, first)) = lines.peek() {
        let parts = delimiter.split(first.trim());
        if is_header_line(&parts) {
            layout = Layout::from_header(&parts)?;
            lines.next();
        } else {
            layout = Layout::from_first_row(&parts);
        }
    }

    let mut list = LandmarkList::new();
    for (line_no, line) in lines {
        let parts = delimiter.split(line.trim());
        let coord = |idx: usize| -> Result<f64> {
            parts
                .get(idx)
                .and_then(|s| s.parse::<f64>().ok())
                .ok_or_else(|| {
                    Error::InvalidData(format!("line {}: invalid coordinates", line_no + 1))
                })
        };
        let position = Point3d::new(coord(layout.x)?, coord(layout.y)?, coord(layout.z)?);
        let label = layout
            .label
            .and_then(|idx| parts.get(idx))
            .map(|s| s.to_string())
            .unwrap_or_default();
        list.push(LabeledPoint::new(label, position));
    }

    Ok(list)
}

/// XYZ/CSV landmark reader
pub struct XyzReader;

impl LandmarkReader for XyzReader {
    fn read_landmarks<P: AsRef<Path>>(path: P) -> Result<LandmarkList> {
        let text = std::fs::read_to_string(path)?;
        parse_xyz(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_detection() {
        assert_eq!(Delimiter::detect_from_line("1,2,3"), Some(Delimiter::Comma));
        assert_eq!(Delimiter::detect_from_line("1, 2, 3"), Some(Delimiter::Comma));
        assert_eq!(Delimiter::detect_from_line("1 2 3"), Some(Delimiter::Space));
        assert_eq!(Delimiter::detect_from_line("1\t2\t3"), Some(Delimiter::Tab));
        assert_eq!(Delimiter::detect_from_line("1;2;3"), Some(Delimiter::Semicolon));
        assert_eq!(Delimiter::detect_from_line("123"), None);
    }

    #[test]
    fn test_space_separated_without_header() {
        let list = parse_xyz("0  12 0\n0 -12 0\n\n0 0 40\n").unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[1].position, Point3d::new(0.0, -12.0, 0.0));
        assert!(list[0].label.is_empty());
    }

    #[test]
    fn test_header_with_labels() {
        let text = "# exported landmarks\nlabel,x,y,z\nAC,0,12.5,1\nPC,0,-12.5,1\nIH,0,0,40\n";
        let list = parse_xyz(text).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].label, "AC");
        assert_eq!(list[0].position, Point3d::new(0.0, 12.5, 1.0));
    }

    #[test]
    fn test_label_first_rows_without_header() {
        let list = parse_xyz("AC,0,12,0\nPC,0,-12,0\nIH,0,0,40\n").unwrap();
        let labels: Vec<&str> = list.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["AC", "PC", "IH"]);
        assert_eq!(list[1].position, Point3d::new(0.0, -12.0, 0.0));

        let list = parse_xyz("AC 0 12 0\n").unwrap();
        assert_eq!(list[0].position, Point3d::new(0.0, 12.0, 0.0));

        // a label-first row after the first row is still a data error
        match parse_xyz("0,12,0\nPC,0,-12,0\n") {
            Err(Error::InvalidData(msg)) => assert!(msg.contains("line 2"), "{msg}"),
            other => panic!("expected invalid data, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_rows() {
        match parse_xyz("1,2,3\n4,five,6\n") {
            Err(Error::InvalidData(msg)) => assert!(msg.contains("line 2"), "{msg}"),
            other => panic!("expected invalid data, got {other:?}"),
        }
        assert!(parse_xyz("a,b,c\n1,2,3\n").is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_xyz("").unwrap().is_empty());
    }
}
