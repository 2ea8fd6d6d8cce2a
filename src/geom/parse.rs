use crate::error::DigipinError;
use geo_types::Geometry;
use geojson::GeoJson;
use std::str::FromStr;
use wkt::Wkt;

fn geometry_error(e: impl ToString) -> DigipinError {
    DigipinError::GeometryParseError(e.to_string())
}

/// Parses a geometry string, auto-detecting WKT or GeoJSON format.
///
/// GeoJSON is detected by a leading `{`, everything else is tried as WKT.
/// Coordinates are expected in WGS84 longitude/latitude order.
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, DigipinError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(geometry_error("Empty geometry"));
    }
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

/// Parses a GeoJSON geometry or feature into a `geo_types::Geometry`.
pub fn parse_geojson(s: &str) -> Result<Geometry<f64>, DigipinError> {
    let geojson: GeoJson = s.parse().map_err(|e: geojson::Error| geometry_error(e))?;

    let geometry = match geojson {
        GeoJson::Geometry(geom) => geom,
        GeoJson::Feature(feat) => feat
            .geometry
            .ok_or_else(|| geometry_error("Feature has no geometry"))?,
        GeoJson::FeatureCollection(_) => {
            return Err(geometry_error(
                "FeatureCollection not supported, use individual geometries",
            ));
        }
    };

    Geometry::try_from(geometry).map_err(geometry_error)
}

/// Parses a WKT string into a `geo_types::Geometry`.
pub fn parse_wkt(s: &str) -> Result<Geometry<f64>, DigipinError> {
    let wkt: Wkt<f64> = Wkt::from_str(s).map_err(geometry_error)?;

    wkt.try_into()
        .map_err(|_| geometry_error("Failed to convert WKT to geometry"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_geojson_point() -> Result<(), DigipinError> {
        let json = r#"{"type":"Point","coordinates":[77.2,28.6]}"#;
        match parse_geometry(json)? {
            Geometry::Point(pt) => {
                assert!((pt.x() - 77.2).abs() < 0.001);
                assert!((pt.y() - 28.6).abs() < 0.001);
            }
            other => panic!("Expected Point, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_parse_geojson_feature() -> Result<(), DigipinError> {
        let json = r#"{"type":"Feature","properties":{"name":"Dak Bhawan"},"geometry":{"type":"Point","coordinates":[77.213033,28.622788]}}"#;
        assert!(matches!(parse_geometry(json)?, Geometry::Point(_)));
        Ok(())
    }

    #[test]
    fn test_parse_geojson_feature_collection_rejected() {
        let json = r#"{"type":"FeatureCollection","features":[]}"#;
        assert!(matches!(
            parse_geometry(json),
            Err(DigipinError::GeometryParseError(_))
        ));
    }

    #[test]
    fn test_parse_geojson_multilinestring() -> Result<(), DigipinError> {
        let json = r#"{"type":"MultiLineString","coordinates":[[[77.2,28.6],[77.3,28.7]],[[72.8,19.0],[72.9,19.1]]]}"#;
        match parse_geometry(json)? {
            Geometry::MultiLineString(mls) => assert_eq!(mls.0.len(), 2),
            other => panic!("Expected MultiLineString, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_parse_wkt_point() -> Result<(), DigipinError> {
        match parse_geometry(" POINT(77.2 28.6) ")? {
            Geometry::Point(pt) => {
                assert!((pt.x() - 77.2).abs() < 0.001);
                assert!((pt.y() - 28.6).abs() < 0.001);
            }
            other => panic!("Expected Point, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_parse_wkt_polygon() -> Result<(), DigipinError> {
        let wkt = "POLYGON((77.0 28.0, 78.0 28.0, 78.0 29.0, 77.0 29.0, 77.0 28.0))";
        match parse_geometry(wkt)? {
            Geometry::Polygon(poly) => assert_eq!(poly.exterior().0.len(), 5),
            other => panic!("Expected Polygon, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_parse_invalid_input() {
        for input in ["", "   ", "POINT(", "not a geometry", "{\"type\":\"Point\"}"] {
            assert!(
                matches!(
                    parse_geometry(input),
                    Err(DigipinError::GeometryParseError(_))
                ),
                "{}",
                input
            );
        }
    }
}
