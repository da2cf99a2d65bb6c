pub mod bounds;
mod code;
pub mod constants;
mod decoder;
mod encoder;

pub use bounds::BoundingBox;
pub use code::{format, is_valid};
pub use constants::{
    Domain, GLOBAL_CODE_LENGTH, GLOBAL_EXTENTS, GRID_SIZE, REGIONAL_CODE_LENGTH, REGIONAL_EXTENTS,
    SEPARATOR, SYMBOL_GRID, position_of, select_domain, symbol_at,
};
pub(crate) use decoder::decode_cell;
pub use decoder::{cell_bounds, decode, decode_bounds};
pub use encoder::{encode, encode_all, encode_in};
