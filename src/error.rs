use crate::index::Domain;
use thiserror::Error;

/// Error type for digipin-rs operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DigipinError {
    /// The cleaned code is neither 10 (Regional) nor 12 (Global) symbols long.
    #[error("Invalid code format: expected 10 or 12 symbols, found {length}")]
    InvalidFormat { length: usize },
    /// A character outside the 16-symbol alphabet was found in a code.
    #[error("Invalid character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },
    /// Latitude or longitude is NaN or infinite.
    #[error("Non-finite coordinate: ({lat}, {lng})")]
    NonFiniteCoordinate { lat: f64, lng: f64 },
    /// Latitude is outside -90..=90.
    #[error("Invalid latitude: {0} (must be between -90 and 90)")]
    InvalidLatitude(f64),
    /// Longitude is outside -180..=180.
    #[error("Invalid longitude: {0} (must be between -180 and 180)")]
    InvalidLongitude(f64),
    /// The coordinate does not lie inside the bounding box of the requested domain.
    #[error("Coordinate ({lat}, {lng}) is outside the {domain} domain")]
    OutsideDomain { domain: Domain, lat: f64, lng: f64 },
    /// A prefix level beyond the length of the code was requested.
    #[error("Invalid level: {0}")]
    InvalidLevel(usize),
    /// Walking a line would take more samples than allowed.
    #[error("Line needs {required} samples, more than the limit of {limit}")]
    LineTooLong { required: usize, limit: usize },
    /// File I/O or serialization error.
    #[error("IO error: {0}")]
    IoError(String),
    /// CSV parsing or reading error.
    #[error("CSV error: {0}")]
    CsvError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    #[error("Geometry parse error: {0}")]
    GeometryParseError(String),
}
