use crate::cell::PinCell;
use crate::error::DigipinError;
use crate::io::arrow::PinCellsToArrow;
use arrow_array::RecordBatch;
use geoparquet::writer::{
    GeoParquetRecordBatchEncoder, GeoParquetWriterEncoding, GeoParquetWriterOptionsBuilder,
};
use parquet::arrow::ArrowWriter;
use std::fs::File;
use std::path::Path;

fn io_error(e: impl ToString) -> DigipinError {
    DigipinError::IoError(e.to_string())
}

/// Writes a record batch with a GeoArrow geometry column to a GeoParquet file (WKB encoded).
pub fn write_geoparquet(batch: &RecordBatch, path: impl AsRef<Path>) -> Result<(), DigipinError> {
    let path = path.as_ref();
    let schema = batch.schema();

    let options = GeoParquetWriterOptionsBuilder::default()
        .set_encoding(GeoParquetWriterEncoding::WKB)
        .build();
    let mut encoder = GeoParquetRecordBatchEncoder::try_new(&schema, &options).map_err(io_error)?;

    let file = File::create(path).map_err(io_error)?;
    let mut writer =
        ArrowWriter::try_new(file, encoder.target_schema(), None).map_err(io_error)?;

    let encoded_batch = encoder.encode_record_batch(batch).map_err(io_error)?;
    writer.write(&encoded_batch).map_err(io_error)?;

    writer.append_key_value_metadata(encoder.into_keyvalue().map_err(io_error)?);
    writer.finish().map_err(io_error)?;

    tracing::debug!(rows = batch.num_rows(), path = %path.display(), "Wrote GeoParquet");
    Ok(())
}

/// Trait for writing collections of [`PinCell`]s straight to GeoParquet.
pub trait PinCellsToGeoParquet: PinCellsToArrow {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), DigipinError>;
}

impl PinCellsToGeoParquet for [PinCell] {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), DigipinError> {
        let batch = self.to_record_batch()?;
        write_geoparquet(&batch, path)
    }
}

impl PinCellsToGeoParquet for Vec<PinCell> {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), DigipinError> {
        self.as_slice().to_geoparquet(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cells_to_geoparquet() -> Result<(), DigipinError> {
        let cells = vec![
            PinCell::from_lat_lng(28.622788, 77.213033)?,
            PinCell::from_lat_lng(51.5074, -0.1278)?,
        ];

        let dir = tempdir().map_err(io_error)?;
        let path = dir.path().join("pins.parquet");

        cells.to_geoparquet(&path)?;

        let metadata = std::fs::metadata(&path).map_err(io_error)?;
        assert!(metadata.len() > 0);
        Ok(())
    }

    #[test]
    fn test_single_cell_to_geoparquet() -> Result<(), DigipinError> {
        let dir = tempdir().map_err(io_error)?;
        let path = dir.path().join("pin.parquet");

        PinCell::from_code("39J-49L-L8T4")?.to_geoparquet(&path)?;
        assert!(path.exists());
        Ok(())
    }
}
