use thiserror::Error;

/// Error type for digipin-rs operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DigipinError {
    /// The coordinate lies outside the DIGIPIN bounding box.
    #[error(
        "Coordinate out of bounds: latitude {latitude} must be within 2.5..=38.5 and longitude {longitude} within 63.5..=99.5"
    )]
    OutOfBounds { latitude: f64, longitude: f64 },
    /// The code does not have exactly 10 symbols once separators are removed.
    #[error("Invalid DIGIPIN length: expected 10 symbols, got {0}")]
    InvalidLength(usize),
    /// A character outside the 16-symbol alphabet (position is 1-based).
    #[error("Invalid DIGIPIN symbol '{symbol}' at position {position}")]
    InvalidSymbol { symbol: char, position: usize },
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

impl From<std::io::Error> for DigipinError {
    fn from(e: std::io::Error) -> Self {
        DigipinError::IoError(e.to_string())
    }
}

impl From<csv::Error> for DigipinError {
    fn from(e: csv::Error) -> Self {
        DigipinError::CsvError(e.to_string())
    }
}
