mod parse;

pub use parse::{parse_geojson, parse_geometry, parse_wkt};

use crate::index::BoundingBox;
use geo_types::Polygon;

/// Builds the closed rectangular polygon of a cell (x = longitude, y = latitude).
pub fn create_cell_polygon(bounds: &BoundingBox) -> Polygon<f64> {
    bounds.to_rect().to_polygon()
}
