use crate::coord::Coordinate;
use crate::error::DigipinError;
use crate::index::bounds::BoundingBox;
use crate::index::code::clean;
use crate::index::constants::{Domain, position_of};

/// Decodes a code to the center of the cell it names.
///
/// Separators are ignored and case does not matter. The domain follows from the
/// symbol count: 10 is Regional, 12 is Global.
///
/// # Example
/// ```
/// use digipin_rs::decode;
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// let coord = decode("39J-49L-L8T4")?;
/// assert!((coord.lat - 28.622788).abs() < 1e-4);
/// assert!((coord.lng - 77.213033).abs() < 1e-4);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// - [`DigipinError::InvalidFormat`] - cleaned length is not 10 or 12
/// - [`DigipinError::InvalidCharacter`] - a symbol is outside the alphabet
pub fn decode(code: &str) -> Result<Coordinate, DigipinError> {
    let (lat, lng) = decode_bounds(code)?.center();
    Ok(Coordinate::new(lat, lng))
}

/// Decodes a code to the bounding box of its full-precision cell.
pub fn decode_bounds(code: &str) -> Result<BoundingBox, DigipinError> {
    let (symbols, domain) = parse(code)?;
    narrow(&symbols, domain.bounds())
}

/// Bounding box of the cell named by the first `level` symbols of `code`.
///
/// Level 0 is the whole domain; level equal to the code length is the same box
/// [`decode_bounds`] returns.
pub fn cell_bounds(code: &str, level: usize) -> Result<BoundingBox, DigipinError> {
    let (symbols, domain) = parse(code)?;
    if level > symbols.len() {
        return Err(DigipinError::InvalidLevel(level));
    }
    narrow(&symbols[..level], domain.bounds())
}

/// Returns the cleaned symbols and the domain implied by their count.
pub(crate) fn parse(code: &str) -> Result<(Vec<char>, Domain), DigipinError> {
    let symbols: Vec<char> = clean(code).chars().collect();
    let domain = Domain::from_code_length(symbols.len()).ok_or(DigipinError::InvalidFormat {
        length: symbols.len(),
    })?;
    Ok((symbols, domain))
}

/// Cleaned code, its domain and its full-precision cell from a single parse.
pub(crate) fn decode_cell(code: &str) -> Result<(String, Domain, BoundingBox), DigipinError> {
    let (symbols, domain) = parse(code)?;
    let bounds = narrow(&symbols, domain.bounds())?;
    Ok((symbols.into_iter().collect(), domain, bounds))
}

fn narrow(symbols: &[char], mut bbox: BoundingBox) -> Result<BoundingBox, DigipinError> {
    for (position, &character) in symbols.iter().enumerate() {
        let (row, col) = position_of(character).ok_or(DigipinError::InvalidCharacter {
            character,
            position,
        })?;
        bbox = bbox.subdivide(row, col);
    }
    Ok(bbox)
}
