//! Provides constants for the library.

use crate::grid::GridPos;

/// Smallest number of columns or rows a maze may have
pub const MIN_DIMENSION: i32 = 4;
/// Columns used when no configuration is given
pub const DEFAULT_COLUMNS: i32 = 6;
/// Rows used when no configuration is given
pub const DEFAULT_ROWS: i32 = 4;

/// Bottom left cell of the centre room; also where the ball spawns
pub const CENTRE_ANCHOR: GridPos = GridPos { col: 1, row: 1 };

/// Distance a pointer must travel before a swipe is recognized
pub const SWIPE_THRESHOLD: f32 = 50.0;
