pub mod bbox;
pub mod constants;
pub mod digipin;
pub mod grid;
mod indexing;

pub use bbox::BoundingBox;
pub use constants::{BOUNDS, CODE_LENGTH, GRID_SIZE, GROUPS, SEPARATOR, SYMBOL_GRID};
pub use digipin::DigiPin;
pub use grid::{is_symbol, position_of, symbol_at};
pub use indexing::{decode, decode_bounds, encode, encode_coord};
