use crate::coord::GeoPoint;
use crate::error::DigipinError;
use crate::index::bounds::BoundingBox;
use crate::index::constants::{Domain, GRID_SIZE, SYMBOL_GRID, select_domain};
use rayon::prelude::*;

/// Encodes a WGS84 latitude/longitude into a raw code (no separators).
///
/// The domain is chosen automatically: points inside the Regional box (edges
/// included) get a 10-symbol code, everything else a 12-symbol Global code.
/// Use [`format`](crate::format) for the canonical, hyphenated form.
///
/// # Example
/// ```
/// use digipin_rs::{encode, format};
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// let code = encode(28.622788, 77.213033)?;
/// assert_eq!(code, "39J49LL8T4");
/// assert_eq!(format(&code), "39J-49L-L8T4");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// - [`DigipinError::NonFiniteCoordinate`] - latitude or longitude is NaN or infinite
/// - [`DigipinError::InvalidLatitude`] - latitude outside -90..=90
/// - [`DigipinError::InvalidLongitude`] - longitude outside -180..=180
pub fn encode(lat: f64, lng: f64) -> Result<String, DigipinError> {
    check_coordinate(lat, lng)?;
    let domain = select_domain(lat, lng);
    Ok(encode_within(lat, lng, domain.bounds(), domain.code_length()))
}

/// Encodes in an explicitly chosen domain instead of the automatic selection.
///
/// Useful near the Regional boundary when a caller needs a code of fixed length.
/// Fails with [`DigipinError::OutsideDomain`] if the point is not inside the domain.
pub fn encode_in(lat: f64, lng: f64, domain: Domain) -> Result<String, DigipinError> {
    check_coordinate(lat, lng)?;
    let bounds = domain.bounds();
    if !bounds.contains(lat, lng) {
        return Err(DigipinError::OutsideDomain { domain, lat, lng });
    }
    Ok(encode_within(lat, lng, bounds, domain.code_length()))
}

/// Encodes many points in parallel, returning raw codes in input order.
///
/// Points follow the [`GeoPoint`] convention: tuples are `(lon, lat)`.
pub fn encode_all<C: GeoPoint + Sync>(points: &[C]) -> Result<Vec<String>, DigipinError> {
    points.par_iter().map(|p| encode(p.lat(), p.lon())).collect()
}

fn check_coordinate(lat: f64, lng: f64) -> Result<(), DigipinError> {
    if !lat.is_finite() || !lng.is_finite() {
        return Err(DigipinError::NonFiniteCoordinate { lat, lng });
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(DigipinError::InvalidLatitude(lat));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(DigipinError::InvalidLongitude(lng));
    }
    Ok(())
}

fn encode_within(lat: f64, lng: f64, mut bbox: BoundingBox, levels: usize) -> String {
    let mut code = String::with_capacity(levels);

    for _ in 0..levels {
        let (row, col) = select_cell(&bbox, lat, lng);
        code.push(SYMBOL_GRID[row][col]);
        bbox = bbox.subdivide(row, col);
    }

    code
}

/// Rows are north-inclusive from the top; columns are west-inclusive, with the
/// last row and column absorbing the southern and eastern edges.
fn select_cell(bbox: &BoundingBox, lat: f64, lng: f64) -> (usize, usize) {
    let lat_div = bbox.lat_span() / GRID_SIZE as f64;
    let lng_div = bbox.lng_span() / GRID_SIZE as f64;

    let row = (0..GRID_SIZE)
        .find(|&i| lat >= bbox.max_lat - (i + 1) as f64 * lat_div)
        .unwrap_or(GRID_SIZE - 1);
    let col = (0..GRID_SIZE)
        .find(|&i| lng < bbox.min_lng + (i + 1) as f64 * lng_div)
        .unwrap_or(GRID_SIZE - 1);

    (row, col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::code::is_valid;

    #[test]
    fn test_encode_regional_reference_point() -> Result<(), DigipinError> {
        assert_eq!(encode(28.622788, 77.213033)?, "39J49LL8T4");
        assert_eq!(encode(12.9716, 77.5946)?, "4P3JK852C9");
        Ok(())
    }

    #[test]
    fn test_encode_global_points() -> Result<(), DigipinError> {
        assert_eq!(encode(40.7128, -74.0060)?, "3F26C368P4T9");
        assert_eq!(encode(51.5074, -0.1278)?, "CT766PPK5T6K");
        assert_eq!(encode(-33.8688, 151.2093)?, "6P989K4P7CFF");
        Ok(())
    }

    #[test]
    fn test_encode_near_hyderabad() -> Result<(), DigipinError> {
        // Both points fall in the same Regional cell.
        assert_eq!(encode(17.362230, 78.523235)?, "422573CF86");
        assert_eq!(encode(17.362231, 78.523231)?, "422573CF86");
        Ok(())
    }

    #[test]
    fn test_domain_switch_at_regional_boundary() -> Result<(), DigipinError> {
        let inside = encode(38.5, 80.0)?;
        let outside = encode(38.501, 80.0)?;

        assert_eq!(inside, "C8CCCCCCCC");
        assert_eq!(outside, "285J8PL69L75");
        assert_eq!(inside.len(), 10);
        assert_eq!(outside.len(), 12);

        assert_eq!(encode(2.499, 70.0)?.len(), 12);
        assert_eq!(encode(20.0, 63.499)?.len(), 12);
        assert_eq!(encode(20.0, 99.501)?.len(), 12);
        Ok(())
    }

    #[test]
    fn test_encode_box_corners() -> Result<(), DigipinError> {
        assert_eq!(encode(38.5, 63.5)?, "FFFFFFFFFF");
        assert_eq!(encode(2.5, 99.5)?, "TTTTTTTTTT");
        assert_eq!(encode(90.0, 180.0)?, "888888888888");
        assert_eq!(encode(-90.0, -180.0)?, "LLLLLLLLLLLL");
        Ok(())
    }

    #[test]
    fn test_encode_in_global_override() -> Result<(), DigipinError> {
        assert_eq!(
            encode_in(17.362231, 78.523231, Domain::Global)?,
            "263T7CM55746"
        );
        assert_eq!(
            encode_in(28.622788, 77.213033, Domain::Regional)?,
            encode(28.622788, 77.213033)?
        );
        Ok(())
    }

    #[test]
    fn test_encode_in_outside_domain() {
        let result = encode_in(51.5074, -0.1278, Domain::Regional);
        assert!(matches!(
            result,
            Err(DigipinError::OutsideDomain {
                domain: Domain::Regional,
                ..
            })
        ));
    }

    #[test]
    fn test_encode_rejects_out_of_range() {
        assert_eq!(encode(91.0, 0.0), Err(DigipinError::InvalidLatitude(91.0)));
        assert_eq!(
            encode(0.0, -180.5),
            Err(DigipinError::InvalidLongitude(-180.5))
        );
        assert!(matches!(
            encode(f64::NAN, 0.0),
            Err(DigipinError::NonFiniteCoordinate { .. })
        ));
        assert!(matches!(
            encode(0.0, f64::INFINITY),
            Err(DigipinError::NonFiniteCoordinate { .. })
        ));
    }

    #[test]
    fn test_encode_all_preserves_order() -> Result<(), DigipinError> {
        let points = vec![(77.213033, 28.622788), (-74.0060, 40.7128)];
        let codes = encode_all(&points)?;

        assert_eq!(codes, vec!["39J49LL8T4", "3F26C368P4T9"]);
        assert!(codes.iter().all(|c| is_valid(c)));
        Ok(())
    }

    #[test]
    fn test_encode_all_fails_on_bad_point() {
        let points = vec![(77.2, 28.6), (0.0, 95.0)];
        assert_eq!(
            encode_all(&points),
            Err(DigipinError::InvalidLatitude(95.0))
        );
    }
}
