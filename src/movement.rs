//! Move legality and fork detection against a [`MazeGrid`]

use crate::grid::{Direction, GridPos, MazeGrid};
use nalgebra::Vector2;

/// Number of open connections at which a cell becomes a fork
pub const FORK_CONNECTIONS: usize = 3;

/// Snap an input vector to the dominant cardinal axis
///
/// Ties go to the horizontal axis. A zero or non-finite vector has no direction.
///
/// # Examples
///
/// ```
/// use maze_ball::grid::Direction;
/// use maze_ball::movement::normalize_direction;
/// use nalgebra::Vector2;
///
/// assert_eq!(normalize_direction(Vector2::new(0.8, -0.3)), Some(Direction::East));
/// assert_eq!(normalize_direction(Vector2::new(0.1, -0.9)), Some(Direction::South));
/// assert_eq!(normalize_direction(Vector2::new(-0.5, 0.5)), Some(Direction::West));
/// assert_eq!(normalize_direction(Vector2::new(0.0, 0.0)), None);
/// ```
pub fn normalize_direction(v: Vector2<f32>) -> Option<Direction> {
    if !v.x.is_finite() || !v.y.is_finite() {
        return None;
    }
    if v.x.abs() >= v.y.abs() {
        if v.x > 0.0 {
            Some(Direction::East)
        } else if v.x < 0.0 {
            Some(Direction::West)
        } else {
            None
        }
    } else if v.y > 0.0 {
        Some(Direction::North)
    } else {
        Some(Direction::South)
    }
}

/// Whether a single step from `from` in `direction` is allowed
///
/// Both the source wall and the destination's facing wall are checked, so a one-sided
/// opening never lets the ball through.
///
/// # Examples
///
/// ```
/// use maze_ball::grid::{Dimensions, Direction, GridPos, MazeGrid};
/// use maze_ball::movement::can_move;
///
/// let mut grid = MazeGrid::new(Dimensions::new(4, 4));
/// let p = GridPos::new(1, 1);
/// assert!(!can_move(&grid, p, Direction::East));
///
/// grid.carve_between(p, GridPos::new(2, 1)).unwrap();
/// assert!(can_move(&grid, p, Direction::East));
/// assert!(!can_move(&grid, p, Direction::West));
/// ```
pub fn can_move(grid: &MazeGrid, from: GridPos, direction: Direction) -> bool {
    let (Some(source), Some(dest)) = (grid.get(from), grid.neighbor(from, direction)) else {
        return false;
    };
    !source.walls.get(direction) && !dest.walls.get(direction.opposite())
}

/// The cell reached by stepping from `from`, or `None` if the move is not allowed
pub fn target(grid: &MazeGrid, from: GridPos, direction: Direction) -> Option<GridPos> {
    can_move(grid, from, direction).then(|| from.step(direction))
}

/// Number of in-bounds neighbors reachable through an open wall pair
pub fn open_connections(grid: &MazeGrid, p: GridPos) -> usize {
    Direction::ALL
        .iter()
        .filter(|&&d| can_move(grid, p, d))
        .count()
}

/// Whether the cell is a branch point where automatic movement stops
///
/// Corridors (2 connections), dead ends (1) and sealed cells (0) are not forks.
pub fn is_fork(grid: &MazeGrid, p: GridPos) -> bool {
    open_connections(grid, p) >= FORK_CONNECTIONS
}
