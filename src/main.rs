//! Command-line DIGIPIN encoder and decoder.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use digipin_rs::{
    CsvDecodeConfig, CsvEncodeConfig, CsvToDigiPin, DIGIPIN_COLUMN, DigiPinCell, GeometryFormat,
};

#[derive(Parser, Debug)]
#[command(name = "digipin")]
#[command(about = "Encode and decode DIGIPIN grid addresses")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a latitude/longitude into a DIGIPIN
    Encode {
        /// Latitude in degrees (2.5 to 38.5)
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in degrees (63.5 to 99.5)
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Print as XXX-XXX-XXXX
        #[arg(long)]
        grouped: bool,

        /// Print the cell as JSON
        #[arg(long)]
        json: bool,
    },
    /// Decode a DIGIPIN into the latitude/longitude of its cell center
    Decode {
        /// DIGIPIN, with or without separators
        code: String,

        /// Print the cell as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a DIGIPIN column to a CSV file
    CsvEncode {
        /// Input CSV file
        input: PathBuf,

        /// Output CSV file
        output: PathBuf,

        /// Latitude column
        #[arg(long, requires = "lon_column", conflicts_with = "geometry_column")]
        lat_column: Option<String>,

        /// Longitude column
        #[arg(long, requires = "lat_column")]
        lon_column: Option<String>,

        /// WKT or GeoJSON geometry column
        #[arg(long, required_unless_present = "lat_column")]
        geometry_column: Option<String>,

        /// Columns to leave out of the output
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,

        /// Also write each cell polygon
        #[arg(long, value_enum)]
        cell_geometry: Option<CellGeometry>,

        /// Write an empty code for rows that cannot be encoded
        #[arg(long)]
        skip_invalid: bool,
    },
    /// Append latitude/longitude columns decoded from a DIGIPIN column
    CsvDecode {
        /// Input CSV file
        input: PathBuf,

        /// Output CSV file
        output: PathBuf,

        /// Column holding the codes
        #[arg(long, default_value = DIGIPIN_COLUMN)]
        code_column: String,

        /// Write empty coordinates for invalid codes
        #[arg(long)]
        skip_invalid: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CellGeometry {
    Wkt,
    Geojson,
}

impl From<CellGeometry> for GeometryFormat {
    fn from(g: CellGeometry) -> Self {
        match g {
            CellGeometry::Wkt => GeometryFormat::Wkt,
            CellGeometry::Geojson => GeometryFormat::GeoJson,
        }
    }
}

fn print_cell(cell: &DigiPinCell, grouped: bool, as_json: bool) -> Result<()> {
    let code = if grouped {
        cell.code.grouped()
    } else {
        cell.code.to_string()
    };

    if as_json {
        let out = json!({
            "digipin": code,
            "latitude": cell.latitude(),
            "longitude": cell.longitude(),
            "bounds": cell.bounds,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", code);
    }
    Ok(())
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Encode {
            lat,
            lon,
            grouped,
            json,
        } => {
            let cell = DigiPinCell::from_lat_lon(lat, lon)?;
            print_cell(&cell, grouped, json)?;
        }
        Command::Decode { code, json } => {
            let cell = DigiPinCell::from_code(&code)?;
            if json {
                print_cell(&cell, true, true)?;
            } else {
                println!("Latitude: {:.6}", cell.latitude());
                println!("Longitude: {:.6}", cell.longitude());
            }
        }
        Command::CsvEncode {
            input,
            output,
            lat_column,
            lon_column,
            geometry_column,
            exclude,
            cell_geometry,
            skip_invalid,
        } => {
            let mut config = match (lat_column, lon_column, geometry_column) {
                (Some(lat), Some(lon), _) => CsvEncodeConfig::from_coords(lat, lon),
                (_, _, Some(geometry)) => CsvEncodeConfig::new(geometry),
                _ => anyhow::bail!(
                    "Either --lat-column/--lon-column or --geometry-column is required"
                ),
            };
            config = config.exclude(exclude).skip_invalid(skip_invalid);
            if let Some(format) = cell_geometry {
                config = config.with_cell_geometry(format.into());
            }

            input
                .to_digipin_csv(&output, &config)
                .with_context(|| format!("Failed to encode {}", input.display()))?;
        }
        Command::CsvDecode {
            input,
            output,
            code_column,
            skip_invalid,
        } => {
            let config = CsvDecodeConfig::new(code_column).skip_invalid(skip_invalid);

            input
                .to_lat_lon_csv(&output, &config)
                .with_context(|| format!("Failed to decode {}", input.display()))?;
        }
    }

    Ok(())
}
