//! # digipin-rs
//!
//! Hierarchical 4x4 grid geocodes. Points inside the regional box
//! (lat 2.5..38.5, lng 63.5..99.5) get a 10-symbol code; everything else on
//! Earth falls back to a 12-symbol global code.
//!
//! ### 1. Encoding and decoding
//!
//! ```
//! use digipin_rs::{decode, encode, format};
//!
//! # fn main() -> Result<(), digipin_rs::DigipinError> {
//! let code = encode(12.9716, 77.5946)?;
//! assert_eq!(code, "4P3JK852C9");
//! assert_eq!(format(&code), "4P3-JK8-52C9");
//!
//! let center = decode("4P3-JK8-52C9")?;
//! assert!((center.lat - 12.9716).abs() < 1e-4);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `PinCell` - Single Cell Operations
//!
//! ```
//! use digipin_rs::PinCell;
//!
//! # fn main() -> Result<(), digipin_rs::DigipinError> {
//! let cell = PinCell::from_lat_lng(51.5074, -0.1278)?;
//! println!("{} ({})", cell.formatted(), cell.domain);
//! let polygon = cell.to_polygon();
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `CsvToPin` - CSV File Conversion
//!
//! ```no_run
//! use digipin_rs::{CsvPinConfig, CsvToPin, GeometryFormat};
//!
//! let config = CsvPinConfig::new("geometry")
//!     .exclude(vec!["Geo Point".into()])
//!     .with_cell_geometry(GeometryFormat::Wkt);
//!
//! "input.csv".to_pin_csv("output.csv", &config).unwrap();
//! ```

pub mod cell;
pub mod coord;
pub mod error;
pub mod geom;
pub mod index;
pub mod io;
pub mod logging;

pub use cell::{MAX_LINE_SAMPLES, PinCell};
pub use coord::{Coordinate, GeoPoint};
pub use error::DigipinError;
pub use geom::{parse_geojson, parse_geometry, parse_wkt};
pub use index::{
    BoundingBox, Domain, GLOBAL_CODE_LENGTH, GLOBAL_EXTENTS, GRID_SIZE, REGIONAL_CODE_LENGTH,
    REGIONAL_EXTENTS, SEPARATOR, SYMBOL_GRID, cell_bounds, decode, decode_bounds, encode,
    encode_all, encode_in, format, is_valid, position_of, select_domain, symbol_at,
};
pub use io::{
    CoordinateSource, CsvPinConfig, CsvPinSummary, CsvToPin, GeometryFormat, PinCellsToArrow,
    PinCellsToGeoJson, PinCellsToGeoParquet, csv_to_pin_csv, write_geoparquet,
};

pub use geo_types;
pub use geoarrow_array;
pub use geoarrow_schema;
pub use geoparquet;
