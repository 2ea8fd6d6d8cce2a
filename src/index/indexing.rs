use crate::coord::{Coordinate, LatLng};
use crate::error::DigipinError;
use crate::index::bbox::BoundingBox;
use crate::index::constants::{BOUNDS, CODE_LENGTH};
use crate::index::digipin::DigiPin;
use crate::index::grid::{position_of, symbol_at};

/// Encodes a latitude/longitude into a 10-symbol DIGIPIN.
///
/// # Process
///
/// Starting from [`BOUNDS`], each of the 10 levels:
///
/// 1. Splits the current cell into a 4x4 grid
/// 2. Picks the row (counted from the north) and column (counted from the west)
///    holding the point, clamped into `0..=3`
/// 3. Emits the symbol assigned to that position
/// 4. Narrows the current cell to the selected sub-cell
///
/// The box edges are part of the valid domain.
///
/// # Example
/// ```
/// use digipin_rs::encode;
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// let code = encode(28.622788, 77.213033)?;
/// assert_eq!(code.as_str(), "39J49LL8T4");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// [`DigipinError::OutOfBounds`] if the point is outside latitude `2.5..=38.5`
/// or longitude `63.5..=99.5` (NaN included).
pub fn encode(latitude: f64, longitude: f64) -> Result<DigiPin, DigipinError> {
    if !BOUNDS.contains(latitude, longitude) {
        return Err(DigipinError::OutOfBounds {
            latitude,
            longitude,
        });
    }

    let mut cell = BOUNDS;
    let mut symbols = [0u8; CODE_LENGTH];

    for symbol in symbols.iter_mut() {
        let (row, col) = cell.locate(latitude, longitude);
        *symbol = symbol_at(row, col).ok_or(DigipinError::OutOfBounds {
            latitude,
            longitude,
        })? as u8;
        cell = cell.subdivide(row, col);
    }

    Ok(DigiPin::from_symbols(symbols))
}

/// Encodes any [`Coordinate`] (x = longitude, y = latitude).
pub fn encode_coord(coord: &impl Coordinate) -> Result<DigiPin, DigipinError> {
    encode(coord.y(), coord.x())
}

/// Returns the level-10 cell addressed by a code.
pub fn decode_bounds(code: &DigiPin) -> BoundingBox {
    code.symbols().fold(BOUNDS, |cell, symbol| {
        let position = position_of(symbol);
        debug_assert!(position.is_ok(), "DigiPin holds non-symbol {:?}", symbol);
        let (row, col) = position.unwrap_or_default();
        cell.subdivide(row, col)
    })
}

/// Decodes a DIGIPIN into the center of its level-10 cell.
///
/// Separators (any non-alphanumeric character) are ignored and lowercase
/// letters are accepted. The result is the cell center, within about two
/// meters of any point that encodes to the same code.
///
/// # Example
/// ```
/// use digipin_rs::decode;
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// let ll = decode("39J-49L-L8T4")?;
/// assert!((ll.latitude - 28.622788).abs() < 0.0001);
/// assert!((ll.longitude - 77.213033).abs() < 0.0001);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// - [`DigipinError::InvalidLength`] - not 10 symbols after removing separators
/// - [`DigipinError::InvalidSymbol`] - a character outside the 16-symbol alphabet
pub fn decode(code: &str) -> Result<LatLng, DigipinError> {
    let pin = DigiPin::parse(code)?;
    Ok(decode_bounds(&pin).center())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::grid::is_symbol;

    // Width and height of a level-10 cell: 36 / 4^10 degrees.
    const CELL_SIZE: f64 = 36.0 / 1_048_576.0;

    #[test]
    fn test_encode_reference_point() -> Result<(), DigipinError> {
        assert_eq!(encode(28.622788, 77.213033)?, "39J49LL8T4");
        Ok(())
    }

    #[test]
    fn test_encode_known_cities() -> Result<(), DigipinError> {
        assert_eq!(encode(12.9716, 77.5946)?, "4P3JK852C9");
        assert_eq!(encode(19.0760, 72.8777)?, "4FK5958823");
        Ok(())
    }

    #[test]
    fn test_decode_reference_code() -> Result<(), DigipinError> {
        let ll = decode("39J-49L-L8T4")?;
        assert!((ll.latitude - 28.622788).abs() < CELL_SIZE);
        assert!((ll.longitude - 77.213033).abs() < CELL_SIZE);
        assert_eq!(format!("{:.6}", ll.latitude), "28.622793");
        assert_eq!(format!("{:.6}", ll.longitude), "77.213049");
        Ok(())
    }

    #[test]
    fn test_decode_separator_tolerance() -> Result<(), DigipinError> {
        assert_eq!(decode("39J-49L-L8T4")?, decode("39J49LL8T4")?);
        assert_eq!(decode("39j49ll8t4")?, decode("39J49LL8T4")?);
        Ok(())
    }

    #[test]
    fn test_encode_box_corners() -> Result<(), DigipinError> {
        assert_eq!(encode(2.5, 63.5)?, "LLLLLLLLLL");
        assert_eq!(encode(38.5, 99.5)?, "8888888888");
        assert_eq!(encode(38.5, 63.5)?, "FFFFFFFFFF");
        assert_eq!(encode(2.5, 99.5)?, "TTTTTTTTTT");
        Ok(())
    }

    #[test]
    fn test_encode_outer_edges_clamp() -> Result<(), DigipinError> {
        let east = encode(20.0, 99.5)?;
        assert!(east.symbols().all(|c| "876T".contains(c)));

        let south = encode(2.5, 80.0)?;
        assert!(south.symbols().all(|c| "LMPT".contains(c)));
        Ok(())
    }

    #[test]
    fn test_encode_interior_boundary_goes_south_east() -> Result<(), DigipinError> {
        // The center of the box sits on the corner of four level-1 cells.
        let code = encode(20.5, 81.5)?;
        assert_eq!(code, "5FFFFFFFFF");
        Ok(())
    }

    #[test]
    fn test_encode_out_of_bounds() {
        for (lat, lon) in [
            (-1.0, 77.0),
            (28.0, 150.0),
            (2.4999999, 77.0),
            (38.5000001, 77.0),
            (28.0, 63.4999999),
            (28.0, 99.5000001),
            (f64::NAN, 77.0),
            (28.0, f64::INFINITY),
        ] {
            assert!(
                matches!(encode(lat, lon), Err(DigipinError::OutOfBounds { .. })),
                "({}, {})",
                lat,
                lon
            );
        }
    }

    #[test]
    fn test_out_of_bounds_carries_input() {
        assert_eq!(
            encode(-1.0, 77.0),
            Err(DigipinError::OutOfBounds {
                latitude: -1.0,
                longitude: 77.0
            })
        );
    }

    #[test]
    fn test_decode_invalid_length() {
        assert_eq!(decode("39J49LL8T"), Err(DigipinError::InvalidLength(9)));
        assert_eq!(decode(""), Err(DigipinError::InvalidLength(0)));
    }

    #[test]
    fn test_decode_invalid_symbol() {
        assert!(matches!(
            decode("39J49LL8TA"),
            Err(DigipinError::InvalidSymbol {
                symbol: 'A',
                position: 10
            })
        ));
    }

    #[test]
    fn test_round_trip_grid() -> Result<(), DigipinError> {
        let steps = 37;
        for i in 0..=steps {
            for j in 0..=steps {
                let lat = 2.5 + 36.0 * i as f64 / steps as f64;
                let lon = 63.5 + 36.0 * j as f64 / steps as f64;

                let code = encode(lat, lon)?;
                assert!(code.symbols().all(is_symbol));

                let ll = decode(code.as_str())?;
                assert!((ll.latitude - lat).abs() <= CELL_SIZE / 2.0 + 1e-12);
                assert!((ll.longitude - lon).abs() <= CELL_SIZE / 2.0 + 1e-12);

                assert_eq!(encode(ll.latitude, ll.longitude)?, code);
            }
        }
        Ok(())
    }

    #[test]
    fn test_decode_bounds_contains_input() -> Result<(), DigipinError> {
        let code = encode(28.622788, 77.213033)?;
        let cell = decode_bounds(&code);

        assert!(cell.contains(28.622788, 77.213033));
        assert!(((cell.max_lat - cell.min_lat) - CELL_SIZE).abs() < 1e-12);
        assert!(((cell.max_lon - cell.min_lon) - CELL_SIZE).abs() < 1e-12);
        assert_eq!(cell.center(), decode(code.as_str())?);
        Ok(())
    }

    #[test]
    fn test_encode_coord_axis_order() -> Result<(), DigipinError> {
        assert_eq!(encode_coord(&(77.213033, 28.622788))?, "39J49LL8T4");
        assert_eq!(
            encode_coord(&LatLng::new(28.622788, 77.213033))?,
            "39J49LL8T4"
        );
        Ok(())
    }

    #[test]
    fn test_concurrent_calls_agree() -> Result<(), DigipinError> {
        let expected = encode(12.9716, 77.5946)?;
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| encode(12.9716, 77.5946)))
            .collect();

        for handle in handles {
            let code = handle.join().expect("thread panicked")?;
            assert_eq!(code, expected);
        }
        Ok(())
    }
}
