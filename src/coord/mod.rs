use geo_types::Point;
use serde::{Deserialize, Serialize};

/// A WGS84 latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Converts to a `geo_types::Point` (x = longitude, y = latitude).
    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.lng, self.lat)
    }
}

impl From<Point<f64>> for Coordinate {
    fn from(point: Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

/// Trait for types that can provide a WGS84 position.
///
/// Implemented for `(f64, f64)` tuples in `(lon, lat)` order, `geo_types::Point<f64>`
/// (x = longitude) and [`Coordinate`]. This allows functions to accept any of them.
pub trait GeoPoint {
    /// Returns the longitude in degrees.
    fn lon(&self) -> f64;
    /// Returns the latitude in degrees.
    fn lat(&self) -> f64;
}

impl GeoPoint for (f64, f64) {
    fn lon(&self) -> f64 {
        self.0
    }
    fn lat(&self) -> f64 {
        self.1
    }
}

impl GeoPoint for Point<f64> {
    fn lon(&self) -> f64 {
        self.x()
    }
    fn lat(&self) -> f64 {
        self.y()
    }
}

impl GeoPoint for Coordinate {
    fn lon(&self) -> f64 {
        self.lng
    }
    fn lat(&self) -> f64 {
        self.lat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_tuple_is_lon_lat() {
        let tuple = (77.2, 28.6);
        assert_eq!(tuple.lon(), 77.2);
        assert_eq!(tuple.lat(), 28.6);
    }

    #[test]
    fn test_geo_point_point() {
        let point = Point::new(77.2, 28.6);
        assert_eq!(GeoPoint::lon(&point), 77.2);
        assert_eq!(GeoPoint::lat(&point), 28.6);
    }

    #[test]
    fn test_coordinate_point_conversion() {
        let coord = Coordinate::new(28.6, 77.2);
        let point = coord.to_point();
        assert_eq!(point.x(), 77.2);
        assert_eq!(point.y(), 28.6);
        assert_eq!(Coordinate::from(point), coord);
        assert_eq!(coord.lon(), 77.2);
    }

    #[test]
    fn test_coordinate_serializes_lat_lng() {
        let json = serde_json::to_string(&Coordinate::new(28.5, 77.25)).unwrap();
        assert_eq!(json, r#"{"lat":28.5,"lng":77.25}"#);
    }
}
