use crate::error::DigipinError;
use crate::index::constants::{GRID_SIZE, SYMBOL_GRID};

/// `(row, col)` for every ASCII byte that is a symbol, keyed by its uppercase
/// and lowercase form.
const POSITIONS: [Option<(u8, u8)>; 128] = build_positions();

const fn build_positions() -> [Option<(u8, u8)>; 128] {
    let mut table = [None; 128];
    let mut row = 0;
    while row < GRID_SIZE {
        let mut col = 0;
        while col < GRID_SIZE {
            let symbol = SYMBOL_GRID[row][col] as u8;
            table[symbol as usize] = Some((row as u8, col as u8));
            table[symbol.to_ascii_lowercase() as usize] = Some((row as u8, col as u8));
            col += 1;
        }
        row += 1;
    }
    table
}

/// Returns the symbol assigned to `(row, col)`, or `None` if either index is
/// not in `0..4`.
pub fn symbol_at(row: usize, col: usize) -> Option<char> {
    SYMBOL_GRID.get(row)?.get(col).copied()
}

/// Returns the `(row, col)` of a symbol. Lowercase letters are accepted.
///
/// # Example
/// ```
/// use digipin_rs::{position_of, symbol_at};
///
/// let (row, col) = position_of('J').unwrap();
/// assert_eq!((row, col), (1, 0));
/// assert_eq!(symbol_at(row, col), Some('J'));
/// ```
///
/// # Errors
///
/// [`DigipinError::InvalidSymbol`] with position 0 for characters outside
/// the alphabet. The decoder replaces the position with the real one.
pub fn position_of(symbol: char) -> Result<(usize, usize), DigipinError> {
    let entry = if symbol.is_ascii() {
        POSITIONS[symbol as usize]
    } else {
        None
    };

    entry
        .map(|(row, col)| (row as usize, col as usize))
        .ok_or(DigipinError::InvalidSymbol {
            symbol,
            position: 0,
        })
}

/// Returns `true` if the character is a DIGIPIN symbol (case-insensitive).
pub fn is_symbol(c: char) -> bool {
    c.is_ascii() && POSITIONS[c as usize].is_some()
}
