pub mod arrow;
pub mod csv;
pub mod geojson;
pub mod parquet;

pub use self::arrow::PinCellsToArrow;
pub use self::csv::{
    CoordinateSource, CsvPinConfig, CsvPinSummary, CsvToPin, GeometryFormat, csv_to_pin_csv,
};
pub use self::geojson::PinCellsToGeoJson;
pub use self::parquet::{PinCellsToGeoParquet, write_geoparquet};
