use crate::coord::GeoPoint;
use crate::error::DigipinError;
use crate::index::{BoundingBox, Domain, GRID_SIZE, cell_bounds, decode_cell, encode, format};
use crate::io::arrow::PinCellsToArrow;
use crate::io::parquet::PinCellsToGeoParquet;
use arrow_array::RecordBatch;
use geo::Centroid;
use geo_types::{Geometry, LineString, Point, Polygon};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

/// Most points [`PinCell::from_line_string`] will sample along one line.
pub const MAX_LINE_SAMPLES: usize = 1_000_000;

/// Half the smallest full-precision cell side over both domains, in degrees.
fn line_sample_step() -> f64 {
    [Domain::Regional, Domain::Global]
        .iter()
        .map(|domain| {
            let divisions = (GRID_SIZE as f64).powi(domain.code_length() as i32);
            let bounds = domain.bounds();
            bounds.lat_span().min(bounds.lng_span()) / divisions
        })
        .fold(f64::INFINITY, f64::min)
        * 0.5
}

/// A single cell of the grid, identified by its code.
///
/// Holds the raw code, the domain the code belongs to, the cell's bounding box
/// and its center as a `geo_types::Point` (x = longitude, y = latitude).
///
/// # Example
///
/// ```
/// use digipin_rs::PinCell;
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// let cell = PinCell::from_lat_lng(28.622788, 77.213033)?;
/// assert_eq!(cell.formatted(), "39J-49L-L8T4");
///
/// let polygon = cell.to_polygon();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PinCell {
    /// Raw code, uppercase without separators
    pub code: String,
    /// Regional (10 symbols) or Global (12 symbols)
    pub domain: Domain,
    /// Extent of the cell
    pub bounds: BoundingBox,
    /// Center of the cell, x = longitude, y = latitude
    #[serde(skip)]
    pub center: Point<f64>,
}

impl PinCell {
    /// Create a PinCell from a code in raw or canonical form.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::{Domain, PinCell};
    ///
    /// # fn main() -> Result<(), digipin_rs::DigipinError> {
    /// let cell = PinCell::from_code("3f26-c368-p4t9")?;
    /// assert_eq!(cell.code, "3F26C368P4T9");
    /// assert_eq!(cell.domain, Domain::Global);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_code(code: &str) -> Result<Self, DigipinError> {
        let (code, domain, bounds) = decode_cell(code)?;

        Ok(Self {
            code,
            domain,
            center: bounds.center_point(),
            bounds,
        })
    }

    /// Create a PinCell for a WGS84 latitude/longitude.
    pub fn from_lat_lng(lat: f64, lng: f64) -> Result<Self, DigipinError> {
        let code = encode(lat, lng)?;
        Self::from_code(&code)
    }

    /// Create a PinCell from anything implementing [`GeoPoint`].
    ///
    /// # Example
    /// ```
    /// use digipin_rs::PinCell;
    /// use geo_types::Point;
    ///
    /// # fn main() -> Result<(), digipin_rs::DigipinError> {
    /// // Tuples are (lon, lat)
    /// let a = PinCell::from_wgs84(&(77.213033, 28.622788))?;
    /// let b = PinCell::from_wgs84(&Point::new(77.213033, 28.622788))?;
    /// assert_eq!(a, b);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_wgs84(coord: &impl GeoPoint) -> Result<Self, DigipinError> {
        Self::from_lat_lng(coord.lat(), coord.lon())
    }

    /// Create PinCells along a LineString (x = longitude, y = latitude).
    ///
    /// Samples points along each segment and returns every unique cell crossed,
    /// in the order they are first reached. Consecutive samples are never more
    /// than half a cell apart in either domain, so segments that cross the
    /// Regional edge keep the finer Global cells contiguous.
    ///
    /// # Errors
    ///
    /// [`DigipinError::LineTooLong`] if the walk would take more than
    /// [`MAX_LINE_SAMPLES`] samples.
    pub fn from_line_string(line: &LineString<f64>) -> Result<Vec<Self>, DigipinError> {
        let step = line_sample_step();

        let segment_steps: Vec<usize> = line
            .0
            .windows(2)
            .map(|window| {
                let dx = window[1].x - window[0].x;
                let dy = window[1].y - window[0].y;
                ((dx * dx + dy * dy).sqrt() / step).ceil() as usize
            })
            .collect();

        let required = segment_steps
            .iter()
            .map(|steps| steps.saturating_add(1))
            .fold(line.0.len().min(1), usize::saturating_add);
        if required > MAX_LINE_SAMPLES {
            return Err(DigipinError::LineTooLong {
                required,
                limit: MAX_LINE_SAMPLES,
            });
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut cells: Vec<PinCell> = Vec::new();

        let mut visit = |x: f64, y: f64| -> Result<(), DigipinError> {
            let code = encode(y, x)?;
            if !seen.contains(&code) {
                cells.push(PinCell::from_code(&code)?);
                seen.insert(code);
            }
            Ok(())
        };

        if let [only] = line.0.as_slice() {
            visit(only.x, only.y)?;
        }

        for (window, &steps) in line.0.windows(2).zip(&segment_steps) {
            let start = window[0];
            let dx = window[1].x - start.x;
            let dy = window[1].y - start.y;

            for i in 0..=steps {
                let t = if steps == 0 {
                    0.0
                } else {
                    i as f64 / steps as f64
                };
                visit(start.x + t * dx, start.y + t * dy)?;
            }
        }

        Ok(cells)
    }

    /// Create PinCells from an arbitrary `geo_types::Geometry` in WGS84.
    ///
    /// Points and polygon centroids produce a single cell; lines and
    /// collections may produce many.
    pub fn from_geometry(geom: Geometry<f64>) -> Result<Vec<Self>, DigipinError> {
        match geom {
            Geometry::Point(pt) => Ok(vec![Self::from_wgs84(&pt)?]),
            Geometry::LineString(line) => Self::from_line_string(&line),
            Geometry::MultiLineString(mls) => {
                let mut all_cells = Vec::new();
                for line in mls.0 {
                    all_cells.extend(Self::from_line_string(&line)?);
                }
                Ok(all_cells)
            }
            Geometry::Polygon(poly) => match poly.centroid() {
                Some(centroid) => Ok(vec![Self::from_wgs84(&centroid)?]),
                None => Ok(vec![]),
            },
            Geometry::MultiPolygon(mp) => mp
                .0
                .iter()
                .filter_map(|poly| poly.centroid())
                .map(|centroid| Self::from_wgs84(&centroid))
                .collect(),
            Geometry::MultiPoint(mp) => mp.0.iter().map(Self::from_wgs84).collect(),
            Geometry::GeometryCollection(gc) => {
                let mut all_cells = Vec::new();
                for g in gc.0 {
                    all_cells.extend(Self::from_geometry(g)?);
                }
                Ok(all_cells)
            }
            _ => Err(DigipinError::GeometryParseError(
                "Unsupported geometry type".to_string(),
            )),
        }
    }

    /// Code in canonical, hyphenated form.
    pub fn formatted(&self) -> String {
        format(&self.code)
    }

    /// Latitude of the cell center.
    pub fn lat(&self) -> f64 {
        self.center.y()
    }

    /// Longitude of the cell center.
    pub fn lng(&self) -> f64 {
        self.center.x()
    }

    /// Bounding box of the enclosing cell at `level` (0 is the whole domain).
    pub fn parent(&self, level: usize) -> Result<BoundingBox, DigipinError> {
        cell_bounds(&self.code, level)
    }

    /// Whether a point lies within this cell, edges included.
    pub fn contains(&self, coord: &impl GeoPoint) -> bool {
        self.bounds.contains(coord.lat(), coord.lon())
    }

    /// Converts this cell to a rectangular polygon.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.bounds.to_polygon()
    }

    /// Converts this cell to an Arrow RecordBatch with all attributes.
    pub fn to_record_batch(&self) -> Result<RecordBatch, DigipinError> {
        std::slice::from_ref(self).to_record_batch()
    }

    /// Writes this cell to a GeoParquet file.
    pub fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), DigipinError> {
        std::slice::from_ref(self).to_geoparquet(path)
    }
}
