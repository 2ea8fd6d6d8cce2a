use crate::coord::{Coordinate, LatLng};
use crate::error::DigipinError;
use crate::geom::create_cell_polygon;
use crate::index::{BoundingBox, DigiPin, decode_bounds, encode};
use geo::Centroid;
use geo_types::{Geometry, LineString, Point, Polygon};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single level-10 cell of the DIGIPIN grid.
///
/// Each `DigiPinCell` pairs a code with the rectangle it addresses and the
/// center of that rectangle, which is what decoding the code returns.
///
/// # Example
///
/// ```
/// use digipin_rs::DigiPinCell;
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// let cell = DigiPinCell::from_lat_lon(28.622788, 77.213033)?;
/// println!("DIGIPIN: {}", cell.code.grouped());
/// println!("Center: ({}, {})", cell.latitude(), cell.longitude());
///
/// // Convert the cell to a polygon for GIS operations
/// let polygon = cell.to_polygon();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DigiPinCell {
    /// Canonical 10-symbol code
    pub code: DigiPin,
    /// Center of the cell
    pub center: LatLng,
    /// Extent of the cell in degrees
    pub bounds: BoundingBox,
}

impl DigiPinCell {
    fn from_digipin(code: DigiPin) -> Self {
        let bounds = decode_bounds(&code);
        Self {
            code,
            center: bounds.center(),
            bounds,
        }
    }

    /// Create a cell from a code, with or without separators.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::DigiPinCell;
    ///
    /// # fn main() -> Result<(), digipin_rs::DigipinError> {
    /// let cell = DigiPinCell::from_lat_lon(28.622788, 77.213033)?;
    /// let restored = DigiPinCell::from_code(&cell.code.grouped())?;
    /// assert_eq!(cell, restored);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_code(code: &str) -> Result<Self, DigipinError> {
        Ok(Self::from_digipin(code.parse()?))
    }

    /// Create the cell containing a latitude/longitude.
    pub fn from_lat_lon(latitude: f64, longitude: f64) -> Result<Self, DigipinError> {
        Ok(Self::from_digipin(encode(latitude, longitude)?))
    }

    /// Create the cell containing a WGS84 coordinate (x = longitude, y = latitude).
    ///
    /// # Example
    /// ```
    /// use digipin_rs::DigiPinCell;
    /// use geo_types::Point;
    ///
    /// # fn main() -> Result<(), digipin_rs::DigipinError> {
    /// // From tuple
    /// let cell = DigiPinCell::from_wgs84(&(77.213033, 28.622788))?;
    /// // From Point
    /// let cell = DigiPinCell::from_wgs84(&Point::new(77.213033, 28.622788))?;
    /// assert_eq!(cell.code.as_str(), "39J49LL8T4");
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_wgs84(coord: &impl Coordinate) -> Result<Self, DigipinError> {
        Self::from_lat_lon(coord.y(), coord.x())
    }

    /// Encodes many coordinates in parallel, preserving input order.
    ///
    /// Each entry fails independently, so one point outside the bounding box
    /// does not discard the rest.
    pub fn from_wgs84_many<C>(coords: &[C]) -> Vec<Result<Self, DigipinError>>
    where
        C: Coordinate + Sync,
    {
        coords.par_iter().map(Self::from_wgs84).collect()
    }

    /// Create every distinct cell a line string passes through.
    ///
    /// Samples each segment at half a cell width so no crossed cell is skipped.
    pub fn from_line_string(line: &LineString<f64>) -> Result<Vec<Self>, DigipinError> {
        let first = match line.0.first() {
            Some(c) => Self::from_lat_lon(c.y, c.x)?,
            None => return Ok(vec![]),
        };
        let step_size = (first.bounds.max_lat - first.bounds.min_lat) * 0.5;

        let mut seen: HashSet<DigiPin> = HashSet::new();
        let mut cells: Vec<DigiPinCell> = Vec::new();
        seen.insert(first.code);
        cells.push(first);

        for window in line.0.windows(2) {
            let start = &window[0];
            let end = &window[1];

            let dx = end.x - start.x;
            let dy = end.y - start.y;
            let segment_length = (dx * dx + dy * dy).sqrt();
            let steps = (segment_length / step_size).ceil() as usize;

            for i in 1..=steps {
                let t = i as f64 / steps as f64;
                let code = encode(start.y + t * dy, start.x + t * dx)?;

                if seen.insert(code) {
                    cells.push(Self::from_digipin(code));
                }
            }
        }

        Ok(cells)
    }

    /// Create cells from an arbitrary `geo_types::Geometry` in WGS84.
    ///
    /// Points and polygon centroids produce a single cell, lines every cell
    /// they cross, and multi-geometries and collections one entry per part.
    pub fn from_geometry(geom: Geometry<f64>) -> Result<Vec<Self>, DigipinError> {
        match geom {
            Geometry::Point(pt) => Ok(vec![Self::from_wgs84(&pt)?]),
            Geometry::MultiPoint(mp) => mp.0.iter().map(Self::from_wgs84).collect(),
            Geometry::LineString(line) => Self::from_line_string(&line),
            Geometry::MultiLineString(mls) => {
                let mut all_cells = Vec::new();
                for line in &mls.0 {
                    all_cells.extend(Self::from_line_string(line)?);
                }
                Ok(all_cells)
            }
            Geometry::Polygon(poly) => Ok(poly
                .centroid()
                .map(|c| Self::from_wgs84(&c))
                .transpose()?
                .into_iter()
                .collect()),
            Geometry::MultiPolygon(mp) => mp
                .0
                .iter()
                .filter_map(|poly| poly.centroid())
                .map(|c| Self::from_wgs84(&c))
                .collect(),
            Geometry::GeometryCollection(gc) => {
                let mut all_cells = Vec::new();
                for g in gc.0 {
                    all_cells.extend(Self::from_geometry(g)?);
                }
                Ok(all_cells)
            }
            _ => Err(DigipinError::GeometryParseError(
                "Unsupported geometry type".to_string(),
            )),
        }
    }

    /// Latitude of the cell center.
    pub fn latitude(&self) -> f64 {
        self.center.latitude
    }

    /// Longitude of the cell center.
    pub fn longitude(&self) -> f64 {
        self.center.longitude
    }

    /// Whether the coordinate falls inside this cell (edges included).
    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        self.bounds.contains_coord(coord)
    }

    /// Converts this cell to a rectangular polygon.
    ///
    /// Returns a `geo_types::Polygon` in longitude/latitude order, suitable for
    /// spatial operations or GeoJSON export.
    pub fn to_polygon(&self) -> Polygon<f64> {
        create_cell_polygon(&self.bounds)
    }

    /// Cell center as a `geo_types::Point` (x = longitude).
    pub fn to_point(&self) -> Point<f64> {
        self.center.into()
    }
}
