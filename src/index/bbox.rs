use crate::coord::{Coordinate, LatLng};
use crate::index::constants::GRID_SIZE;
use geo_types::{Rect, coord};
use serde::{Deserialize, Serialize};

const LAST_INDEX: f64 = (GRID_SIZE - 1) as f64;

/// An axis-aligned latitude/longitude rectangle in degrees.
///
/// Used both for the fixed DIGIPIN region and for the cell selected at each
/// subdivision level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub const fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Height of one of the four rows at this level.
    pub fn row_height(&self) -> f64 {
        (self.max_lat - self.min_lat) / GRID_SIZE as f64
    }

    /// Width of one of the four columns at this level.
    pub fn col_width(&self) -> f64 {
        (self.max_lon - self.min_lon) / GRID_SIZE as f64
    }

    /// Inclusive containment test. NaN is never contained.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&latitude)
            && (self.min_lon..=self.max_lon).contains(&longitude)
    }

    pub fn contains_coord(&self, coord: &impl Coordinate) -> bool {
        self.contains(coord.y(), coord.x())
    }

    /// Returns the `(row, col)` of the sub-cell holding the point.
    ///
    /// Rows count down from the northern edge. Both indices are clamped into
    /// `0..=3` so points on the southern or eastern edge land in the last
    /// row/column.
    pub fn locate(&self, latitude: f64, longitude: f64) -> (usize, usize) {
        let row = ((self.max_lat - latitude) / self.row_height())
            .floor()
            .clamp(0.0, LAST_INDEX);
        let col = ((longitude - self.min_lon) / self.col_width())
            .floor()
            .clamp(0.0, LAST_INDEX);

        (row as usize, col as usize)
    }

    /// Narrows to the sub-cell at `(row, col)`.
    pub fn subdivide(&self, row: usize, col: usize) -> BoundingBox {
        let row_height = self.row_height();
        let col_width = self.col_width();

        BoundingBox {
            min_lat: self.max_lat - (row + 1) as f64 * row_height,
            max_lat: self.max_lat - row as f64 * row_height,
            min_lon: self.min_lon + col as f64 * col_width,
            max_lon: self.min_lon + (col + 1) as f64 * col_width,
        }
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Converts to a `geo_types::Rect` with x = longitude, y = latitude.
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min_lon, y: self.min_lat },
            coord! { x: self.max_lon, y: self.max_lat },
        )
    }
}
