use crate::cell::DigiPinCell;
use crate::error::DigipinError;
use crate::geom::parse_geometry;
use crate::index::decode;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info, warn};

/// Name of the code column written by [`csv_to_digipin_csv`] and read by default
/// by [`digipin_csv_to_lat_lon_csv`].
pub const DIGIPIN_COLUMN: &str = "digipin";

enum SourceIndices {
    Geometry(usize),
    Coordinates { lat_idx: usize, lon_idx: usize },
}

/// Output format for cell polygon geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

/// Specifies how to extract location data from CSV rows.
#[derive(Debug, Clone)]
pub enum CoordinateSource {
    /// A single column containing WKT or GeoJSON geometry (lon/lat order)
    GeometryColumn(String),
    /// Separate latitude and longitude columns
    CoordinateColumns {
        lat_column: String,
        lon_column: String,
    },
}

/// Configuration for CSV to DIGIPIN conversion.
#[derive(Debug, Clone)]
pub struct CsvEncodeConfig {
    pub source: CoordinateSource,
    pub exclude_columns: Vec<String>,
    pub include_cell_geometry: Option<GeometryFormat>,
    pub skip_invalid: bool,
}

impl CsvEncodeConfig {
    /// Create config for a CSV with a geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use digipin_rs::CsvEncodeConfig;
    ///
    /// let config = CsvEncodeConfig::new("geometry");
    /// ```
    pub fn new(geometry_column: impl Into<String>) -> Self {
        Self {
            source: CoordinateSource::GeometryColumn(geometry_column.into()),
            exclude_columns: Vec::new(),
            include_cell_geometry: None,
            skip_invalid: false,
        }
    }

    /// Create config for a CSV with separate latitude/longitude columns.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::{CsvEncodeConfig, GeometryFormat};
    ///
    /// let config = CsvEncodeConfig::from_coords("Latitude", "Longitude")
    ///     .with_cell_geometry(GeometryFormat::Wkt);
    /// ```
    pub fn from_coords(lat_column: impl Into<String>, lon_column: impl Into<String>) -> Self {
        Self {
            source: CoordinateSource::CoordinateColumns {
                lat_column: lat_column.into(),
                lon_column: lon_column.into(),
            },
            exclude_columns: Vec::new(),
            include_cell_geometry: None,
            skip_invalid: false,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    /// Include the cell polygon in output.
    pub fn with_cell_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_cell_geometry = Some(format);
        self
    }

    /// Write rows that cannot be encoded with an empty code instead of failing.
    pub fn skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }
}

/// Configuration for DIGIPIN CSV to latitude/longitude conversion.
#[derive(Debug, Clone)]
pub struct CsvDecodeConfig {
    pub code_column: String,
    pub skip_invalid: bool,
}

impl Default for CsvDecodeConfig {
    fn default() -> Self {
        Self::new(DIGIPIN_COLUMN)
    }
}

impl CsvDecodeConfig {
    pub fn new(code_column: impl Into<String>) -> Self {
        Self {
            code_column: code_column.into(),
            skip_invalid: false,
        }
    }

    /// Write rows with invalid codes with empty coordinates instead of failing.
    pub fn skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }
}

pub trait CsvToDigiPin {
    fn to_digipin_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvEncodeConfig,
    ) -> Result<(), DigipinError>;

    fn to_lat_lon_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvDecodeConfig,
    ) -> Result<(), DigipinError>;
}

impl<P: AsRef<Path>> CsvToDigiPin for P {
    fn to_digipin_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvEncodeConfig,
    ) -> Result<(), DigipinError> {
        csv_to_digipin_csv(self, output_path, config)
    }

    fn to_lat_lon_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvDecodeConfig,
    ) -> Result<(), DigipinError> {
        digipin_csv_to_lat_lon_csv(self, output_path, config)
    }
}

fn polygon_to_wkt(polygon: &geo_types::Polygon<f64>) -> String {
    use wkt::ToWkt;
    polygon.wkt_string()
}

fn polygon_to_geojson(polygon: &geo_types::Polygon<f64>) -> String {
    let geom = geojson::Geometry::from(polygon);
    geom.to_string()
}

fn column_index(headers: &csv::StringRecord, name: &str, role: &str) -> Result<usize, DigipinError> {
    if name.is_empty() {
        return Err(DigipinError::CsvError(format!(
            "{} column name cannot be empty",
            role
        )));
    }
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| DigipinError::CsvError(format!("{} column '{}' not found", role, name)))
}

fn parse_degrees(record: &csv::StringRecord, idx: usize, role: &str) -> Result<f64, DigipinError> {
    let raw = record
        .get(idx)
        .ok_or_else(|| DigipinError::CsvError(format!("Missing {} column at index {}", role, idx)))?
        .trim();

    raw.parse()
        .map_err(|_| DigipinError::CsvError(format!("Invalid {}: '{}'", role, raw)))
}

fn cells_for_record(
    record: &csv::StringRecord,
    source: &SourceIndices,
) -> Result<Vec<DigiPinCell>, DigipinError> {
    match source {
        SourceIndices::Geometry(idx) => {
            let geom_str = record.get(*idx).ok_or_else(|| {
                DigipinError::CsvError(format!("Missing geometry column at index {}", idx))
            })?;
            let cells = DigiPinCell::from_geometry(parse_geometry(geom_str)?)?;
            if cells.is_empty() {
                return Err(DigipinError::GeometryParseError(
                    "Geometry has no cells".to_string(),
                ));
            }
            Ok(cells)
        }
        SourceIndices::Coordinates { lat_idx, lon_idx } => {
            let lat = parse_degrees(record, *lat_idx, "latitude")?;
            let lon = parse_degrees(record, *lon_idx, "longitude")?;
            Ok(vec![DigiPinCell::from_lat_lon(lat, lon)?])
        }
    }
}

/// Converts a CSV file with geometry or latitude/longitude columns to a CSV
/// file with a DIGIPIN column.
///
/// The output starts with a `digipin` column, then the optional
/// `cell_geometry` column, then every input column except the source and
/// excluded columns. A geometry that spans several cells (e.g. a line) yields
/// one output row per cell. Streams output to minimize memory usage for large
/// files.
///
/// # Example
///
/// ```no_run
/// use digipin_rs::{csv_to_digipin_csv, CsvEncodeConfig};
///
/// let config = CsvEncodeConfig::from_coords("Latitude", "Longitude")
///     .exclude(vec!["Geo Point".into()])
///     .skip_invalid(true);
///
/// csv_to_digipin_csv("post_offices.csv", "output.csv", &config).unwrap();
/// ```
pub fn csv_to_digipin_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvEncodeConfig,
) -> Result<(), DigipinError> {
    let csv_path = csv_path.as_ref();
    info!(input = %csv_path.display(), "Encoding CSV to DIGIPIN");

    let file = File::open(csv_path)?;
    let mut reader = csv::Reader::from_reader(file);
    let headers = reader.headers()?.clone();

    // Source columns never appear in the output
    let (source_indices, mut exclude_indices) = match &config.source {
        CoordinateSource::GeometryColumn(col) => {
            let idx = column_index(&headers, col, "Geometry")?;
            (SourceIndices::Geometry(idx), HashSet::from([idx]))
        }
        CoordinateSource::CoordinateColumns {
            lat_column,
            lon_column,
        } => {
            let lat_idx = column_index(&headers, lat_column, "Latitude")?;
            let lon_idx = column_index(&headers, lon_column, "Longitude")?;
            (
                SourceIndices::Coordinates { lat_idx, lon_idx },
                HashSet::from([lat_idx, lon_idx]),
            )
        }
    };

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }
    debug!(excluded = ?exclude_indices, "Resolved CSV columns");

    let out_file = File::create(output_path)?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = vec![DIGIPIN_COLUMN];
    if config.include_cell_geometry.is_some() {
        header_row.push("cell_geometry");
    }
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer.write_record(&header_row)?;

    let mut rows_written = 0usize;
    let mut rows_skipped = 0usize;

    for (line, result) in reader.records().enumerate() {
        let record = result?;

        let cells: Vec<Option<DigiPinCell>> = match cells_for_record(&record, &source_indices) {
            Ok(cells) => cells.into_iter().map(Some).collect(),
            Err(e) if config.skip_invalid => {
                warn!(row = line + 1, error = %e, "Skipping row that cannot be encoded");
                rows_skipped += 1;
                vec![None]
            }
            Err(e) => return Err(e),
        };

        for cell in cells {
            let mut row: Vec<String> = vec![cell.map(|c| c.code.to_string()).unwrap_or_default()];

            if let Some(format) = config.include_cell_geometry {
                let geom_str = match (cell, format) {
                    (Some(c), GeometryFormat::Wkt) => polygon_to_wkt(&c.to_polygon()),
                    (Some(c), GeometryFormat::GeoJson) => polygon_to_geojson(&c.to_polygon()),
                    (None, _) => String::new(),
                };
                row.push(geom_str);
            }

            for (i, field) in record.iter().enumerate() {
                if !exclude_indices.contains(&i) {
                    row.push(field.to_string());
                }
            }
            writer.write_record(&row)?;
            rows_written += 1;
        }
    }

    writer.flush()?;
    info!(rows_written, rows_skipped, "Finished encoding CSV");

    Ok(())
}

/// Converts a CSV file with a DIGIPIN column to one with `latitude` and
/// `longitude` columns appended.
///
/// Coordinates are the decoded cell centers, written with 6 decimal places.
///
/// # Example
///
/// ```no_run
/// use digipin_rs::{digipin_csv_to_lat_lon_csv, CsvDecodeConfig};
///
/// let config = CsvDecodeConfig::new("DIGIPIN").skip_invalid(true);
/// digipin_csv_to_lat_lon_csv("addresses.csv", "output.csv", &config).unwrap();
/// ```
pub fn digipin_csv_to_lat_lon_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvDecodeConfig,
) -> Result<(), DigipinError> {
    let csv_path = csv_path.as_ref();
    info!(input = %csv_path.display(), "Decoding DIGIPIN CSV");

    let file = File::open(csv_path)?;
    let mut reader = csv::Reader::from_reader(file);
    let headers = reader.headers()?.clone();
    let code_idx = column_index(&headers, &config.code_column, "DIGIPIN")?;

    let out_file = File::create(output_path)?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = headers.iter().collect();
    header_row.push("latitude");
    header_row.push("longitude");
    writer.write_record(&header_row)?;

    let mut rows_skipped = 0usize;

    for (line, result) in reader.records().enumerate() {
        let record = result?;
        let code = record.get(code_idx).unwrap_or_default();

        let (lat, lon) = match decode(code) {
            Ok(ll) => (
                format!("{:.6}", ll.latitude),
                format!("{:.6}", ll.longitude),
            ),
            Err(e) if config.skip_invalid => {
                warn!(row = line + 1, code, error = %e, "Skipping invalid DIGIPIN");
                rows_skipped += 1;
                (String::new(), String::new())
            }
            Err(e) => return Err(e),
        };

        let mut row: Vec<&str> = record.iter().collect();
        row.push(&lat);
        row.push(&lon);
        writer.write_record(&row)?;
    }

    writer.flush()?;
    info!(rows_skipped, "Finished decoding CSV");

    Ok(())
}
