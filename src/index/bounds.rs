use crate::index::constants::GRID_SIZE;
use geo_types::{Point, Polygon, Rect, coord};
use serde::Serialize;

/// A latitude/longitude box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    pub const fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    /// Inclusive on every edge.
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lng >= self.min_lng && lng <= self.max_lng
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    /// Returns `(lat, lng)` of the box midpoint.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// Narrows to the sub-cell at `(row, col)`, rows counted from the north.
    ///
    /// The encoder and decoder both narrow through here so that the two sides
    /// produce bit-identical boxes.
    pub fn subdivide(&self, row: usize, col: usize) -> Self {
        let lat_div = self.lat_span() / GRID_SIZE as f64;
        let lng_div = self.lng_span() / GRID_SIZE as f64;

        Self {
            min_lat: self.max_lat - (row + 1) as f64 * lat_div,
            max_lat: self.max_lat - row as f64 * lat_div,
            min_lng: self.min_lng + col as f64 * lng_div,
            max_lng: self.min_lng + (col + 1) as f64 * lng_div,
        }
    }

    /// Center as a `geo_types::Point` (x = longitude, y = latitude).
    pub fn center_point(&self) -> Point<f64> {
        let (lat, lng) = self.center();
        Point::new(lng, lat)
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min_lng, y: self.min_lat },
            coord! { x: self.max_lng, y: self.max_lat },
        )
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        self.to_rect().to_polygon()
    }
}
