use crate::index::bounds::BoundingBox;
use serde::Serialize;
use std::fmt;

/// Separator inserted between symbol groups in canonical codes.
pub const SEPARATOR: char = '-';

/// Number of rows and columns subdividing a cell at every level.
pub const GRID_SIZE: usize = 4;

/// The 4x4 symbol matrix. Row 0 is north, column 0 is west.
pub const SYMBOL_GRID: [[char; GRID_SIZE]; GRID_SIZE] = [
    ['F', 'C', '9', '8'],
    ['J', '3', '2', '7'],
    ['K', '4', '5', '6'],
    ['L', 'M', 'P', 'T'],
];

/// Regional bounds [min_lat, max_lat, min_lng, max_lng]
pub const REGIONAL_EXTENTS: [f64; 4] = [2.5, 38.5, 63.5, 99.5];

/// Global bounds [min_lat, max_lat, min_lng, max_lng]
pub const GLOBAL_EXTENTS: [f64; 4] = [-90.0, 90.0, -180.0, 180.0];

/// Code length in the Regional domain
pub const REGIONAL_CODE_LENGTH: usize = 10;

/// Code length in the Global domain
pub const GLOBAL_CODE_LENGTH: usize = 12;

// Indexed by ASCII value; `None` for anything outside the alphabet.
static SYMBOL_POSITIONS: [Option<(u8, u8)>; 128] = build_symbol_positions();

const fn build_symbol_positions() -> [Option<(u8, u8)>; 128] {
    let mut table = [None; 128];
    let mut row = 0;
    while row < GRID_SIZE {
        let mut col = 0;
        while col < GRID_SIZE {
            let symbol = SYMBOL_GRID[row][col] as usize;
            table[symbol] = Some((row as u8, col as u8));
            col += 1;
        }
        row += 1;
    }
    table
}

/// Returns the symbol at the given grid position, or `None` when out of range.
pub fn symbol_at(row: usize, col: usize) -> Option<char> {
    SYMBOL_GRID.get(row)?.get(col).copied()
}

/// Reverse lookup from symbol to `(row, col)`.
///
/// Only uppercase symbols are recognised; callers normalise case first.
pub fn position_of(symbol: char) -> Option<(usize, usize)> {
    let idx = symbol as usize;
    if idx >= SYMBOL_POSITIONS.len() {
        return None;
    }
    SYMBOL_POSITIONS[idx].map(|(row, col)| (row as usize, col as usize))
}

/// The two precision domains of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// The subcontinental box, 10 symbols.
    Regional,
    /// The whole earth, 12 symbols.
    Global,
}

impl Domain {
    pub fn bounds(&self) -> BoundingBox {
        let [min_lat, max_lat, min_lng, max_lng] = match self {
            Domain::Regional => REGIONAL_EXTENTS,
            Domain::Global => GLOBAL_EXTENTS,
        };
        BoundingBox::new(min_lat, max_lat, min_lng, max_lng)
    }

    pub fn code_length(&self) -> usize {
        match self {
            Domain::Regional => REGIONAL_CODE_LENGTH,
            Domain::Global => GLOBAL_CODE_LENGTH,
        }
    }

    /// Symbol counts after which a separator is placed in canonical form.
    pub fn separator_positions(&self) -> [usize; 2] {
        match self {
            Domain::Regional => [3, 6],
            Domain::Global => [4, 8],
        }
    }

    /// Domain implied by a cleaned code length.
    pub fn from_code_length(length: usize) -> Option<Self> {
        match length {
            REGIONAL_CODE_LENGTH => Some(Domain::Regional),
            GLOBAL_CODE_LENGTH => Some(Domain::Global),
            _ => None,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Regional => write!(f, "regional"),
            Domain::Global => write!(f, "global"),
        }
    }
}

/// Picks Regional when the point lies inside its box (every edge inclusive), Global otherwise.
pub fn select_domain(lat: f64, lng: f64) -> Domain {
    if Domain::Regional.bounds().contains(lat, lng) {
        Domain::Regional
    } else {
        Domain::Global
    }
}
