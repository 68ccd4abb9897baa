//! Error types for ACPC alignment

use thiserror::Error;

/// Main error type for ACPC alignment operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Degenerate input: {0}")]
    DegenerateInput(Degeneracy),

    #[error("Invalid input: {0}")]
    InvalidInput(InvalidInput),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Landmark geometry for which no coordinate frame exists
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    #[error("AC and PC coincide, the AC-PC axis is undefined")]
    CoincidentCommissures,

    #[error("midline point is collinear with the AC-PC line, the lateral axis is undefined")]
    CollinearMidline,
}

/// Landmark input rejected before any geometry is computed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("expected exactly 3 landmarks (AC, PC, midline), found {found}")]
    LandmarkCount { found: usize },

    #[error("{landmark} has a non-finite coordinate")]
    NonFinite { landmark: &'static str },

    #[error("landmark coordinates are too large for the transform to be represented")]
    OutOfRange,
}

impl From<Degeneracy> for Error {
    fn from(d: Degeneracy) -> Self {
        Error::DegenerateInput(d)
    }
}

impl From<InvalidInput> for Error {
    fn from(e: InvalidInput) -> Self {
        Error::InvalidInput(e)
    }
}

/// Result type alias for ACPC alignment operations
pub type Result<T> = std::result::Result<T, Error>;
