//! # digipin-rs
//!
//! DIGIPIN splits the box from 2.5°N to 38.5°N and 63.5°E to 99.5°E into a
//! 4x4 grid ten times over. Each level contributes one of 16 symbols, giving a
//! 10-symbol code for a cell roughly 4 m across.
//!
//! There are currently three main entry points.
//!
//! ### 1. `encode` / `decode` - The Codec
//!
//! ```
//! use digipin_rs::{decode, encode};
//!
//! # fn main() -> Result<(), digipin_rs::DigipinError> {
//! let code = encode(28.622788, 77.213033)?;
//! assert_eq!(code.as_str(), "39J49LL8T4");
//! assert_eq!(code.grouped(), "39J-49L-L8T4");
//!
//! let ll = decode("39J-49L-L8T4")?;
//! println!("{:.6}, {:.6}", ll.latitude, ll.longitude);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `DigiPinCell` - Single Cell Operations
//!
//! ```
//! use digipin_rs::DigiPinCell;
//!
//! # fn main() -> Result<(), digipin_rs::DigipinError> {
//! let cell = DigiPinCell::from_wgs84(&(77.5946, 12.9716))?;
//! println!("{}", cell.code);
//! let polygon = cell.to_polygon();
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `CsvToDigiPin` - CSV File Conversion
//!
//! Add a DIGIPIN column to a CSV with latitude/longitude columns:
//!
//! ```no_run
//! use digipin_rs::{CsvEncodeConfig, CsvToDigiPin, GeometryFormat};
//!
//! let config = CsvEncodeConfig::from_coords("Latitude", "Longitude")
//!     .with_cell_geometry(GeometryFormat::Wkt);
//!
//! // Using trait method
//! "input.csv".to_digipin_csv("output.csv", &config).unwrap();
//! ```
//!
//! Or decode a DIGIPIN column back to coordinates:
//!
//! ```no_run
//! use digipin_rs::{CsvDecodeConfig, digipin_csv_to_lat_lon_csv};
//!
//! let config = CsvDecodeConfig::new("DIGIPIN");
//! digipin_csv_to_lat_lon_csv("addresses.csv", "output.csv", &config).unwrap();
//! ```
//!

pub mod cell;
pub mod coord;
pub mod error;
pub mod geom;
pub mod index;
pub mod io;

pub use cell::DigiPinCell;
pub use coord::{Coordinate, LatLng};
pub use error::DigipinError;
pub use geom::{create_cell_polygon, parse_geojson, parse_geometry, parse_wkt};
pub use index::{
    BOUNDS, BoundingBox, CODE_LENGTH, DigiPin, GRID_SIZE, SYMBOL_GRID, decode, decode_bounds,
    encode, encode_coord, is_symbol, position_of, symbol_at,
};
pub use io::{
    CoordinateSource, CsvDecodeConfig, CsvEncodeConfig, CsvToDigiPin, DIGIPIN_COLUMN,
    DigiPinCellsToGeoJson, GeometryFormat, cells_to_feature_collection, csv_to_digipin_csv,
    digipin_csv_to_lat_lon_csv,
};

pub use geo_types;

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::point;

    #[test]
    fn test_end_to_end_workflow() -> Result<(), DigipinError> {
        let code = encode(28.622788, 77.213033)?;
        assert_eq!(code.as_str(), "39J49LL8T4");

        let ll = decode(&code.grouped())?;
        assert!((ll.latitude - 28.622788).abs() < 0.0001);
        assert!((ll.longitude - 77.213033).abs() < 0.0001);

        let cell = DigiPinCell::from_code(code.as_str())?;
        assert_eq!(cell.center, ll);
        assert!(cell.contains(&(77.213033, 28.622788)));
        assert_eq!(cell.to_polygon().exterior().coords().count(), 5);
        Ok(())
    }

    #[test]
    fn test_using_geo_types_macros() -> Result<(), DigipinError> {
        let pt = point! { x: 77.213033, y: 28.622788 };
        assert_eq!(encode_coord(&pt)?, "39J49LL8T4");

        let cell = DigiPinCell::from_wgs84(&pt)?;
        assert!(cell.bounds.to_rect().min().x <= pt.x());
        Ok(())
    }

    #[test]
    fn test_round_trip_is_idempotent() -> Result<(), DigipinError> {
        let points = [
            (8.0883, 77.5385),
            (34.0837, 74.7973),
            (22.5726, 88.3639),
            (26.1445, 91.7362),
            (15.2993, 74.124),
        ];

        for (lat, lon) in points {
            let first = encode(lat, lon)?;
            let ll = decode(first.as_str())?;
            let second = encode(ll.latitude, ll.longitude)?;
            assert_eq!(first, second);
        }
        Ok(())
    }

    #[test]
    fn test_boundary_inclusion() -> Result<(), DigipinError> {
        let min = encode(BOUNDS.min_lat, BOUNDS.min_lon)?;
        let max = encode(BOUNDS.max_lat, BOUNDS.max_lon)?;

        assert!(min.symbols().all(is_symbol));
        assert!(max.symbols().all(is_symbol));
        assert!(BOUNDS.contains_coord(&decode(min.as_str())?));
        assert!(BOUNDS.contains_coord(&decode(max.as_str())?));
        Ok(())
    }

    #[test]
    fn test_error_taxonomy() {
        assert!(matches!(
            encode(-1.0, 77.0),
            Err(DigipinError::OutOfBounds { .. })
        ));
        assert!(matches!(
            encode(28.0, 150.0),
            Err(DigipinError::OutOfBounds { .. })
        ));
        assert!(matches!(
            decode("39J49LL8T"),
            Err(DigipinError::InvalidLength(9))
        ));
        assert!(matches!(
            decode("39J49LL8T1"),
            Err(DigipinError::InvalidSymbol { symbol: '1', .. })
        ));
    }

    #[test]
    fn test_cells_to_geojson() -> Result<(), DigipinError> {
        let cells: Vec<DigiPinCell> = DigiPinCell::from_wgs84_many(&[
            (77.213033, 28.622788),
            (72.8777, 19.0760),
        ])
        .into_iter()
        .collect::<Result<_, _>>()?;

        let json = cells.to_geojson_string();
        assert!(json.contains("39J49LL8T4"));
        assert!(json.contains("4FK5958823"));
        Ok(())
    }
}
