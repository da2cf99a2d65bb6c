//! digipin CLI - encode, decode and batch-convert grid codes.

use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use digipin_rs::logging::init_logging;
use digipin_rs::{
    CsvPinConfig, DigipinError, Domain, GeometryFormat, csv_to_pin_csv, decode_bounds, encode,
    encode_in, format, is_valid,
};
use std::process;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DomainArg {
    /// 10-symbol code, only valid inside lat 2.5..38.5, lng 63.5..99.5
    Regional,
    /// 12-symbol code covering the whole Earth
    Global,
}

impl From<DomainArg> for Domain {
    fn from(arg: DomainArg) -> Self {
        match arg {
            DomainArg::Regional => Domain::Regional,
            DomainArg::Global => Domain::Global,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CellGeometryArg {
    Wkt,
    Geojson,
}

#[derive(Parser)]
#[command(name = "digipin")]
#[command(about = "Encode and decode hierarchical grid geocodes", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a coordinate into a code
    Encode {
        /// Latitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Force a domain instead of selecting it from the coordinate
        #[arg(long, value_enum)]
        domain: Option<DomainArg>,

        /// Print the code without separators
        #[arg(long)]
        raw: bool,
    },
    /// Decode a code into its center coordinate and cell bounds
    Decode { code: String },
    /// Check whether a string is a well-formed code
    Validate { code: String },
    /// Insert separators into a code
    Format { code: String },
    /// Add a pin_code column to a CSV file
    #[command(group(ArgGroup::new("source").required(true).args(["geometry_column", "lon_column"])))]
    Csv {
        input: String,
        output: String,

        /// Column holding WKT or GeoJSON geometry
        #[arg(long)]
        geometry_column: Option<String>,

        /// Longitude column (requires --lat-column)
        #[arg(long, requires = "lat_column")]
        lon_column: Option<String>,

        /// Latitude column
        #[arg(long, requires = "lon_column")]
        lat_column: Option<String>,

        /// Columns to leave out of the output
        #[arg(long, num_args = 1..)]
        exclude: Vec<String>,

        /// Also write each cell rectangle as a pin_geometry column
        #[arg(long, value_enum)]
        cell_geometry: Option<CellGeometryArg>,

        /// Write codes without separators
        #[arg(long)]
        raw: bool,

        /// Log and skip rows that cannot be encoded
        #[arg(long)]
        skip_invalid: bool,
    },
}

fn run(command: Command) -> Result<(), DigipinError> {
    match command {
        Command::Encode {
            lat,
            lon,
            domain,
            raw,
        } => {
            let code = match domain {
                Some(domain) => encode_in(lat, lon, domain.into())?,
                None => encode(lat, lon)?,
            };
            if raw {
                println!("{}", code);
            } else {
                println!("{}", format(&code));
            }
        }
        Command::Decode { code } => {
            let bounds = decode_bounds(&code)?;
            let (lat, lng) = bounds.center();
            println!("{} {}", lat, lng);
            println!(
                "bounds: lat {}..{}, lng {}..{}",
                bounds.min_lat, bounds.max_lat, bounds.min_lng, bounds.max_lng
            );
        }
        Command::Validate { code } => {
            if is_valid(&code) {
                println!("valid");
            } else {
                println!("invalid");
                process::exit(1);
            }
        }
        Command::Format { code } => println!("{}", format(&code)),
        Command::Csv {
            input,
            output,
            geometry_column,
            lon_column,
            lat_column,
            exclude,
            cell_geometry,
            raw,
            skip_invalid,
        } => {
            let config = match (geometry_column, lon_column, lat_column) {
                (Some(geometry), _, _) => CsvPinConfig::new(geometry),
                (None, Some(lon), Some(lat)) => CsvPinConfig::from_coords(lon, lat),
                _ => {
                    return Err(DigipinError::CsvError(
                        "either --geometry-column or --lon-column with --lat-column is required"
                            .to_string(),
                    ));
                }
            };
            let mut config = config
                .exclude(exclude)
                .formatted(!raw)
                .skip_invalid_rows(skip_invalid);
            if let Some(geometry_format) = cell_geometry {
                config = config.with_cell_geometry(match geometry_format {
                    CellGeometryArg::Wkt => GeometryFormat::Wkt,
                    CellGeometryArg::Geojson => GeometryFormat::GeoJson,
                });
            }

            let summary = csv_to_pin_csv(&input, &output, &config)?;
            println!(
                "{} rows read, {} rows written, {} rows skipped",
                summary.rows_read, summary.rows_written, summary.rows_skipped
            );
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging() {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(args.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
