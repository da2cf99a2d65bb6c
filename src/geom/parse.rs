use crate::error::DigipinError;
use geo_types::Geometry;
use geojson::GeoJson;
use std::str::FromStr;
use wkt::Wkt;

fn parse_error(e: impl ToString) -> DigipinError {
    DigipinError::GeometryParseError(e.to_string())
}

/// Parses a geometry string, auto-detecting WKT or GeoJSON format.
///
/// Anything starting with `{` is treated as GeoJSON, everything else as WKT.
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, DigipinError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(parse_error("Empty geometry"));
    }
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

/// Parses a GeoJSON geometry or feature into a `geo_types::Geometry`.
pub fn parse_geojson(s: &str) -> Result<Geometry<f64>, DigipinError> {
    let geometry = match s.parse::<GeoJson>().map_err(parse_error)? {
        GeoJson::Geometry(geom) => geom,
        GeoJson::Feature(feat) => feat
            .geometry
            .ok_or_else(|| parse_error("Feature has no geometry"))?,
        GeoJson::FeatureCollection(_) => {
            return Err(parse_error(
                "FeatureCollection not supported, use individual geometries",
            ));
        }
    };
    Geometry::try_from(geometry).map_err(parse_error)
}

/// Parses a WKT string into a `geo_types::Geometry`.
pub fn parse_wkt(s: &str) -> Result<Geometry<f64>, DigipinError> {
    let wkt: Wkt<f64> = Wkt::from_str(s).map_err(parse_error)?;
    wkt.try_into()
        .map_err(|_| parse_error("Failed to convert WKT to geometry"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_geojson_point() -> Result<(), DigipinError> {
        let json = r#"{"type":"Point","coordinates":[77.213033,28.622788]}"#;
        match parse_geometry(json)? {
            Geometry::Point(pt) => {
                assert!((pt.x() - 77.213033).abs() < 1e-9);
                assert!((pt.y() - 28.622788).abs() < 1e-9);
            }
            other => panic!("Expected Point, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_parse_geojson_feature() -> Result<(), DigipinError> {
        let json = r#"{"type":"Feature","properties":{"name":"Dak Bhawan"},"geometry":{"type":"Point","coordinates":[77.2,28.6]}}"#;
        assert!(matches!(parse_geometry(json)?, Geometry::Point(_)));
        Ok(())
    }

    #[test]
    fn test_parse_geojson_feature_collection_rejected() {
        let json = r#"{"type":"FeatureCollection","features":[]}"#;
        assert!(matches!(
            parse_geometry(json),
            Err(DigipinError::GeometryParseError(_))
        ));
    }

    #[test]
    fn test_parse_wkt_linestring() -> Result<(), DigipinError> {
        match parse_geometry("LINESTRING(77.2 28.6, 77.3 28.7)")? {
            Geometry::LineString(line) => assert_eq!(line.0.len(), 2),
            other => panic!("Expected LineString, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_parse_wkt_polygon() -> Result<(), DigipinError> {
        let wkt = "POLYGON((77.0 28.0, 78.0 28.0, 78.0 29.0, 77.0 29.0, 77.0 28.0))";
        assert!(matches!(parse_geometry(wkt)?, Geometry::Polygon(_)));
        Ok(())
    }

    #[test]
    fn test_parse_garbage_and_empty() {
        assert!(parse_geometry("not a geometry").is_err());
        assert!(parse_geometry("   ").is_err());
        assert!(parse_geometry("{ broken").is_err());
    }
}
