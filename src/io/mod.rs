pub mod csv;
pub mod geojson;

pub use self::csv::{
    CoordinateSource, CsvDecodeConfig, CsvEncodeConfig, CsvToDigiPin, DIGIPIN_COLUMN,
    GeometryFormat, csv_to_digipin_csv, digipin_csv_to_lat_lon_csv,
};
pub use self::geojson::{DigiPinCellsToGeoJson, cells_to_feature_collection};
