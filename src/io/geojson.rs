use crate::cell::DigiPinCell;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue};

fn cell_to_feature(cell: &DigiPinCell) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert(
        "digipin".to_string(),
        JsonValue::from(cell.code.to_string()),
    );
    properties.insert("latitude".to_string(), JsonValue::from(cell.latitude()));
    properties.insert("longitude".to_string(), JsonValue::from(cell.longitude()));

    Feature {
        bbox: None,
        geometry: Some(Geometry::from(&cell.to_polygon())),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Builds a GeoJSON FeatureCollection with one polygon feature per cell.
///
/// Each feature carries `digipin`, `latitude` and `longitude` properties.
pub fn cells_to_feature_collection(cells: &[DigiPinCell]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: cells.iter().map(cell_to_feature).collect(),
        foreign_members: None,
    }
}

/// Trait for exporting collections of [`DigiPinCell`]s as GeoJSON.
///
/// Implemented for `[DigiPinCell]`, and so for `Vec<DigiPinCell>`.
pub trait DigiPinCellsToGeoJson {
    fn to_feature_collection(&self) -> FeatureCollection;

    fn to_geojson_string(&self) -> String {
        self.to_feature_collection().to_string()
    }
}

impl DigiPinCellsToGeoJson for [DigiPinCell] {
    fn to_feature_collection(&self) -> FeatureCollection {
        cells_to_feature_collection(self)
    }
}
