use crate::cell::PinCell;
use crate::error::DigipinError;
use crate::geom::{parse_geometry, polygon_to_geojson, polygon_to_wkt};
use csv::StringRecord;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

enum SourceIndices {
    Geometry(usize),
    Coordinates { lon_idx: usize, lat_idx: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

#[derive(Debug, Clone)]
pub enum CoordinateSource {
    /// A single column containing WKT or GeoJSON geometry in WGS84
    GeometryColumn(String),
    /// Separate longitude and latitude columns
    CoordinateColumns {
        lon_column: String,
        lat_column: String,
    },
}

/// Options for [`csv_to_pin_csv`].
#[derive(Debug, Clone)]
pub struct CsvPinConfig {
    pub source: CoordinateSource,
    pub exclude_columns: Vec<String>,
    pub include_cell_geometry: Option<GeometryFormat>,
    /// Write codes in canonical hyphenated form (default) or raw.
    pub formatted: bool,
    /// Log and drop rows that fail to parse or encode instead of aborting.
    pub skip_invalid_rows: bool,
}

impl CsvPinConfig {
    /// Create config for a CSV with a geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use digipin_rs::CsvPinConfig;
    ///
    /// let config = CsvPinConfig::new("geometry");
    /// ```
    pub fn new(geometry_column: impl Into<String>) -> Self {
        Self::with_source(CoordinateSource::GeometryColumn(geometry_column.into()))
    }

    /// Create config for a CSV with separate longitude/latitude columns.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::CsvPinConfig;
    ///
    /// let config = CsvPinConfig::from_coords("Longitude", "Latitude")
    ///     .skip_invalid_rows(true);
    /// ```
    pub fn from_coords(lon_column: impl Into<String>, lat_column: impl Into<String>) -> Self {
        Self::with_source(CoordinateSource::CoordinateColumns {
            lon_column: lon_column.into(),
            lat_column: lat_column.into(),
        })
    }

    fn with_source(source: CoordinateSource) -> Self {
        Self {
            source,
            exclude_columns: Vec::new(),
            include_cell_geometry: None,
            formatted: true,
            skip_invalid_rows: false,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    /// Include the cell rectangle in the output.
    pub fn with_cell_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_cell_geometry = Some(format);
        self
    }

    pub fn formatted(mut self, formatted: bool) -> Self {
        self.formatted = formatted;
        self
    }

    pub fn skip_invalid_rows(mut self, skip: bool) -> Self {
        self.skip_invalid_rows = skip;
        self
    }
}

/// Counts reported by [`csv_to_pin_csv`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CsvPinSummary {
    pub rows_read: usize,
    pub rows_written: usize,
    pub rows_skipped: usize,
}

pub trait CsvToPin {
    fn to_pin_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvPinConfig,
    ) -> Result<CsvPinSummary, DigipinError>;
}

impl<P: AsRef<Path>> CsvToPin for P {
    fn to_pin_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvPinConfig,
    ) -> Result<CsvPinSummary, DigipinError> {
        csv_to_pin_csv(self, output_path, config)
    }
}

fn csv_error(e: impl ToString) -> DigipinError {
    DigipinError::CsvError(e.to_string())
}

fn column_index(headers: &StringRecord, name: &str, role: &str) -> Result<usize, DigipinError> {
    if name.is_empty() {
        return Err(csv_error(format!("{} column name cannot be empty", role)));
    }
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| csv_error(format!("{} column '{}' not found", role, name)))
}

fn field<'r>(record: &'r StringRecord, idx: usize, role: &str) -> Result<&'r str, DigipinError> {
    record
        .get(idx)
        .map(str::trim)
        .ok_or_else(|| csv_error(format!("Missing {} column at index {}", role, idx)))
}

fn parse_coordinate(value: &str, role: &str) -> Result<f64, DigipinError> {
    value
        .parse()
        .map_err(|_| csv_error(format!("Invalid {}: '{}'", role, value)))
}

fn cells_for_record(
    record: &StringRecord,
    source: &SourceIndices,
) -> Result<Vec<PinCell>, DigipinError> {
    match source {
        SourceIndices::Geometry(idx) => {
            let geom = parse_geometry(field(record, *idx, "geometry")?)?;
            let cells = PinCell::from_geometry(geom)?;
            if cells.is_empty() {
                return Err(DigipinError::GeometryParseError(
                    "Geometry has no coordinates to encode".to_string(),
                ));
            }
            Ok(cells)
        }
        SourceIndices::Coordinates { lon_idx, lat_idx } => {
            let lon = parse_coordinate(field(record, *lon_idx, "longitude")?, "longitude")?;
            let lat = parse_coordinate(field(record, *lat_idx, "latitude")?, "latitude")?;
            Ok(vec![PinCell::from_lat_lng(lat, lon)?])
        }
    }
}

/// Converts a CSV file with geometry or lon/lat columns to a CSV file with pin codes.
///
/// Output rows start with `pin_code` (and `pin_geometry` when requested),
/// followed by the input columns that are neither source nor excluded. A row
/// whose geometry yields several cells is written once per cell. Streams output
/// to minimize memory usage for large files.
///
/// # Example
///
/// ```no_run
/// use digipin_rs::{csv_to_pin_csv, CsvPinConfig, GeometryFormat};
///
/// let config = CsvPinConfig::from_coords("Longitude", "Latitude")
///     .with_cell_geometry(GeometryFormat::Wkt);
///
/// let summary = csv_to_pin_csv("post_offices.csv", "output.csv", &config).unwrap();
/// println!("{} rows written", summary.rows_written);
/// ```
pub fn csv_to_pin_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvPinConfig,
) -> Result<CsvPinSummary, DigipinError> {
    let csv_path = csv_path.as_ref();
    let output_path = output_path.as_ref();

    let file = File::open(csv_path).map_err(csv_error)?;
    let mut reader = csv::Reader::from_reader(file);
    let headers = reader.headers().map_err(csv_error)?.clone();

    // Source columns never appear in the output
    let (source_indices, mut exclude_indices) = match &config.source {
        CoordinateSource::GeometryColumn(col) => {
            let idx = column_index(&headers, col, "Geometry")?;
            (SourceIndices::Geometry(idx), HashSet::from([idx]))
        }
        CoordinateSource::CoordinateColumns {
            lon_column,
            lat_column,
        } => {
            let lon_idx = column_index(&headers, lon_column, "Longitude")?;
            let lat_idx = column_index(&headers, lat_column, "Latitude")?;
            (
                SourceIndices::Coordinates { lon_idx, lat_idx },
                HashSet::from([lon_idx, lat_idx]),
            )
        }
    };

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    tracing::info!(
        input = %csv_path.display(),
        output = %output_path.display(),
        "Converting CSV to pin codes"
    );

    let out_file = File::create(output_path).map_err(|e| DigipinError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = vec!["pin_code"];
    if config.include_cell_geometry.is_some() {
        header_row.push("pin_geometry");
    }
    header_row.extend(
        headers
            .iter()
            .enumerate()
            .filter(|(i, _)| !exclude_indices.contains(i))
            .map(|(_, h)| h),
    );
    writer.write_record(&header_row).map_err(csv_error)?;

    let mut summary = CsvPinSummary::default();

    for (line, result) in reader.records().enumerate() {
        let record = result.map_err(csv_error)?;
        summary.rows_read += 1;

        let cells = match cells_for_record(&record, &source_indices) {
            Ok(cells) => cells,
            Err(e) if config.skip_invalid_rows => {
                tracing::warn!(row = line + 1, error = %e, "Skipping row");
                summary.rows_skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        for cell in cells {
            let code = if config.formatted {
                cell.formatted()
            } else {
                cell.code.clone()
            };
            let mut row: Vec<String> = vec![code];

            if let Some(format) = config.include_cell_geometry {
                let polygon = cell.to_polygon();
                row.push(match format {
                    GeometryFormat::Wkt => polygon_to_wkt(&polygon),
                    GeometryFormat::GeoJson => polygon_to_geojson(&polygon),
                });
            }

            row.extend(
                record
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| !exclude_indices.contains(i))
                    .map(|(_, f)| f.to_string()),
            );
            writer.write_record(&row).map_err(csv_error)?;
            summary.rows_written += 1;
        }
    }

    writer.flush().map_err(csv_error)?;

    tracing::info!(
        rows_read = summary.rows_read,
        rows_written = summary.rows_written,
        rows_skipped = summary.rows_skipped,
        "CSV conversion finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{TempDir, tempdir};

    fn io_error(e: impl ToString) -> DigipinError {
        DigipinError::IoError(e.to_string())
    }

    fn write_input(lines: &[&str]) -> Result<(TempDir, std::path::PathBuf), DigipinError> {
        let dir = tempdir().map_err(io_error)?;
        let csv_path = dir.path().join("input.csv");
        let mut file = File::create(&csv_path).map_err(io_error)?;
        for line in lines {
            writeln!(file, "{}", line).map_err(io_error)?;
        }
        Ok((dir, csv_path))
    }

    fn read_output(path: &Path) -> Result<Vec<Vec<String>>, DigipinError> {
        let mut reader = csv::Reader::from_path(path).map_err(csv_error)?;
        let mut rows = vec![
            reader
                .headers()
                .map_err(csv_error)?
                .iter()
                .map(String::from)
                .collect(),
        ];
        for record in reader.records() {
            rows.push(record.map_err(csv_error)?.iter().map(String::from).collect());
        }
        Ok(rows)
    }

    #[test]
    fn test_csv_from_coords() -> Result<(), DigipinError> {
        let (dir, csv_path) = write_input(&[
            "Office,Longitude,Latitude,City",
            "Dak Bhawan,77.213033,28.622788,New Delhi",
            "GPO,77.5946,12.9716,Bengaluru",
        ])?;
        let output_path = dir.path().join("output.csv");

        let config = CsvPinConfig::from_coords("Longitude", "Latitude");
        let summary = csv_to_pin_csv(&csv_path, &output_path, &config)?;

        assert_eq!(summary.rows_read, 2);
        assert_eq!(summary.rows_written, 2);

        let rows = read_output(&output_path)?;
        assert_eq!(rows[0], vec!["pin_code", "Office", "City"]);
        assert_eq!(rows[1], vec!["39J-49L-L8T4", "Dak Bhawan", "New Delhi"]);
        assert_eq!(rows[2][0], "4P3-JK8-52C9");
        Ok(())
    }

    #[test]
    fn test_csv_geometry_column_with_cell_geometry() -> Result<(), DigipinError> {
        let (dir, csv_path) = write_input(&[
            "ASSET_ID,TYPE,geometry",
            "A1,Box,\"POINT(77.213033 28.622788)\"",
            "A2,Box,\"{\"\"type\"\":\"\"Point\"\",\"\"coordinates\"\":[-74.006,40.7128]}\"",
        ])?;
        let output_path = dir.path().join("output.csv");

        let config = CsvPinConfig::new("geometry")
            .with_cell_geometry(GeometryFormat::Wkt)
            .formatted(false);
        csv_to_pin_csv(&csv_path, &output_path, &config)?;

        let rows = read_output(&output_path)?;
        assert_eq!(rows[0], vec!["pin_code", "pin_geometry", "ASSET_ID", "TYPE"]);
        assert_eq!(rows[1][0], "39J49LL8T4");
        assert!(rows[1][1].starts_with("POLYGON"));
        assert_eq!(rows[2][0], "3F26C368P4T9");
        Ok(())
    }

    #[test]
    fn test_csv_exclude_columns() -> Result<(), DigipinError> {
        let (dir, csv_path) = write_input(&[
            "id,lon,lat,notes",
            "1,77.2,28.6,private",
        ])?;
        let output_path = dir.path().join("output.csv");

        let config = CsvPinConfig::from_coords("lon", "lat").exclude(vec!["notes".into()]);
        csv_path.to_pin_csv(&output_path, &config)?;

        let rows = read_output(&output_path)?;
        assert_eq!(rows[0], vec!["pin_code", "id"]);
        Ok(())
    }

    #[test]
    fn test_csv_invalid_row_fails_by_default() -> Result<(), DigipinError> {
        let (dir, csv_path) = write_input(&["id,lon,lat", "1,77.2,28.6", "2,abc,28.6"])?;
        let output_path = dir.path().join("output.csv");

        let config = CsvPinConfig::from_coords("lon", "lat");
        let result = csv_to_pin_csv(&csv_path, &output_path, &config);
        assert!(matches!(result, Err(DigipinError::CsvError(_))));
        Ok(())
    }

    #[test]
    fn test_csv_skip_invalid_rows() -> Result<(), DigipinError> {
        let (dir, csv_path) = write_input(&[
            "id,lon,lat",
            "1,77.2,28.6",
            "2,abc,28.6",
            "3,0.0,95.0",
            "4,-0.1278,51.5074",
        ])?;
        let output_path = dir.path().join("output.csv");

        let config = CsvPinConfig::from_coords("lon", "lat").skip_invalid_rows(true);
        let summary = csv_to_pin_csv(&csv_path, &output_path, &config)?;

        assert_eq!(
            summary,
            CsvPinSummary {
                rows_read: 4,
                rows_written: 2,
                rows_skipped: 2,
            }
        );
        let rows = read_output(&output_path)?;
        assert_eq!(rows[2], vec!["CT76-6PPK-5T6K", "4"]);
        Ok(())
    }

    #[test]
    fn test_csv_empty_geometry_is_an_invalid_row() -> Result<(), DigipinError> {
        let (dir, csv_path) = write_input(&[
            "id,geometry",
            "1,\"POINT(77.2 28.6)\"",
            "2,\"{\"\"type\"\":\"\"MultiPoint\"\",\"\"coordinates\"\":[]}\"",
        ])?;
        let output_path = dir.path().join("output.csv");

        let strict = CsvPinConfig::new("geometry");
        assert!(matches!(
            csv_to_pin_csv(&csv_path, &output_path, &strict),
            Err(DigipinError::GeometryParseError(_))
        ));

        let lenient = CsvPinConfig::new("geometry").skip_invalid_rows(true);
        let summary = csv_to_pin_csv(&csv_path, &output_path, &lenient)?;
        assert_eq!(
            summary,
            CsvPinSummary {
                rows_read: 2,
                rows_written: 1,
                rows_skipped: 1,
            }
        );
        Ok(())
    }

    #[test]
    fn test_csv_missing_column() -> Result<(), DigipinError> {
        let (dir, csv_path) = write_input(&["id,x,y", "1,77.2,28.6"])?;
        let output_path = dir.path().join("output.csv");

        let config = CsvPinConfig::from_coords("Longitude", "Latitude");
        let result = csv_to_pin_csv(&csv_path, &output_path, &config);
        assert_eq!(
            result,
            Err(DigipinError::CsvError(
                "Longitude column 'Longitude' not found".to_string()
            ))
        );
        Ok(())
    }
}
