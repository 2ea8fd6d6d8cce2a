use crate::index::bbox::BoundingBox;

/// The region covered by DIGIPIN, in WGS84 degrees.
pub const BOUNDS: BoundingBox = BoundingBox {
    min_lat: 2.5,
    max_lat: 38.5,
    min_lon: 63.5,
    max_lon: 99.5,
};

/// Number of symbols (and subdivision levels) in a code
pub const CODE_LENGTH: usize = 10;

/// Rows and columns per subdivision level
pub const GRID_SIZE: usize = 4;

/// Separator used by the grouped display form (`XXX-XXX-XXXX`)
pub const SEPARATOR: char = '-';

/// Symbol counts of the display groups
pub const GROUPS: [usize; 3] = [3, 3, 4];

/// The spiral symbol arrangement. Row 0 is north, column 0 is west.
pub const SYMBOL_GRID: [[char; GRID_SIZE]; GRID_SIZE] = [
    ['F', 'C', '9', '8'],
    ['J', '3', '2', '7'],
    ['K', '4', '5', '6'],
    ['L', 'M', 'P', 'T'],
];
