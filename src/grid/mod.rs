//! Logical grid structs and utilities.

use crate::constants::MIN_DIMENSION;
use anyhow::{anyhow, Error};
use nalgebra::Point2;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An integer location on the maze grid
///
/// Both axes are 1-indexed; `(1, 1)` is the bottom left cell.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridPos {
    /// Column - increases to the right
    pub col: i32,
    /// Row - increases upwards
    pub row: i32,
}

impl GridPos {
    /// Create a new GridPos
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// The position one step away in the given direction
    ///
    /// No bounds checking is done; see [`MazeGrid::neighbor`].
    ///
    /// # Examples
    ///
    /// ```
    /// use maze_ball::grid::{Direction, GridPos};
    ///
    /// assert_eq!(GridPos::new(1, 1).step(Direction::North), GridPos::new(1, 2));
    /// assert_eq!(GridPos::new(1, 1).step(Direction::West), GridPos::new(0, 1));
    /// ```
    pub fn step(self, direction: Direction) -> Self {
        let (dc, dr) = direction.offset();
        Self::new(self.col + dc, self.row + dr)
    }
}

impl From<GridPos> for Point2<i32> {
    fn from(val: GridPos) -> Self {
        Point2::new(val.col, val.row)
    }
}

impl From<Point2<i32>> for GridPos {
    fn from(p: Point2<i32>) -> Self {
        Self { col: p.x, row: p.y }
    }
}

/// Enum for the four cardinal directions.
#[derive(
    Clone, Copy, Debug, Hash, Eq, PartialEq, IntoPrimitive, TryFromPrimitive, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Direction {
    /// Up, or +row
    North = 0,
    /// Right, or +col
    East = 1,
    /// Down, or -row
    South = 2,
    /// Left, or -col
    West = 3,
}

impl Direction {
    /// Every direction, in the order neighbors are examined
    pub const ALL: [Direction; 4] = [
        Direction::West,
        Direction::East,
        Direction::North,
        Direction::South,
    ];

    /// The direction pointing the other way
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// `(col, row)` offset of a single step in this direction
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }

    /// Find the direction leading from `from` to an adjacent `to`
    ///
    /// Returns `None` if the two positions are not orthogonal neighbors.
    ///
    /// # Examples
    ///
    /// ```
    /// use maze_ball::grid::{Direction, GridPos};
    ///
    /// let a = GridPos::new(2, 2);
    /// assert_eq!(Direction::between(a, GridPos::new(3, 2)), Some(Direction::East));
    /// assert_eq!(Direction::between(a, GridPos::new(2, 1)), Some(Direction::South));
    /// assert_eq!(Direction::between(a, GridPos::new(3, 3)), None);
    /// assert_eq!(Direction::between(a, a), None);
    /// ```
    pub fn between(from: GridPos, to: GridPos) -> Option<Self> {
        let delta = (to.col - from.col, to.row - from.row);
        Self::ALL.into_iter().find(|d| d.offset() == delta)
    }
}

/// The four walls of a single [`Cell`]
///
/// `true` means the wall is present and blocks movement.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Walls {
    /// Wall on the +row side
    pub north: bool,
    /// Wall on the -row side
    pub south: bool,
    /// Wall on the +col side
    pub east: bool,
    /// Wall on the -col side
    pub west: bool,
}

impl Default for Walls {
    fn default() -> Self {
        Self {
            north: true,
            south: true,
            east: true,
            west: true,
        }
    }
}

impl Walls {
    /// Whether the wall facing `direction` is present
    pub fn get(&self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }

    /// Set the wall facing `direction`
    pub fn set(&mut self, direction: Direction, present: bool) {
        match direction {
            Direction::North => self.north = present,
            Direction::South => self.south = present,
            Direction::East => self.east = present,
            Direction::West => self.west = present,
        }
    }
}

/// A single node of the maze
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Where this cell sits in the grid
    pub pos: GridPos,
    /// Which sides are blocked
    pub walls: Walls,
}

impl Cell {
    /// A cell with all four walls up
    pub fn new(pos: GridPos) -> Self {
        Self {
            pos,
            walls: Walls::default(),
        }
    }
}

/// Effective size of a maze
///
/// Both axes are even and at least [`MIN_DIMENSION`]. Use [`Dimensions::new`] to correct
/// requested values.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    columns: i32,
    rows: i32,
}

impl Dimensions {
    /// Correct requested dimensions
    ///
    /// Odd values are reduced by one, then anything below [`MIN_DIMENSION`] is raised to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use maze_ball::grid::Dimensions;
    ///
    /// let d = Dimensions::new(3, 5);
    /// assert_eq!((d.columns(), d.rows()), (4, 4));
    ///
    /// let d = Dimensions::new(7, 8);
    /// assert_eq!((d.columns(), d.rows()), (6, 8));
    /// ```
    pub fn new(columns: i32, rows: i32) -> Self {
        fn correct(value: i32) -> i32 {
            let even = if value % 2 != 0 { value - 1 } else { value };
            even.max(MIN_DIMENSION)
        }

        Self {
            columns: correct(columns),
            rows: correct(rows),
        }
    }

    /// Width, in cells
    pub fn columns(&self) -> i32 {
        self.columns
    }

    /// Height, in cells
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        (self.columns * self.rows) as usize
    }

    /// Whether the position is in `[1..columns] x [1..rows]`
    pub fn contains(&self, p: GridPos) -> bool {
        p.col >= 1 && p.row >= 1 && p.col <= self.columns && p.row <= self.rows
    }

    /// The cell with the largest column and row
    pub fn far_corner(&self) -> GridPos {
        GridPos::new(self.columns, self.rows)
    }

    /// Every in-bounds position, column by column
    pub fn positions(&self) -> impl Iterator<Item = GridPos> {
        let rows = self.rows;
        (1..=self.columns).flat_map(move |col| (1..=rows).map(move |row| GridPos::new(col, row)))
    }
}

/// The full collection of cells making up a maze
///
/// Every in-bounds position has a cell from construction until [`MazeGrid::clear`].
///
/// # Examples
///
/// ```
/// use maze_ball::grid::{Dimensions, GridPos, MazeGrid};
///
/// let grid = MazeGrid::new(Dimensions::new(6, 4));
/// assert_eq!(grid.len(), 24);
/// assert!(grid.get(GridPos::new(6, 4)).is_some());
/// assert!(grid.get(GridPos::new(7, 4)).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    dimensions: Dimensions,
    cells: HashMap<GridPos, Cell>,
}

impl MazeGrid {
    /// Create a grid where every cell has all of its walls
    pub fn new(dimensions: Dimensions) -> Self {
        let cells = dimensions
            .positions()
            .map(|p| (p, Cell::new(p)))
            .collect();
        Self { dimensions, cells }
    }

    /// The effective dimensions
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Number of cells currently present
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has been emptied
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the cell at the given position, or `None` if there isn't one
    pub fn get(&self, p: GridPos) -> Option<&Cell> {
        self.cells.get(&p)
    }

    /// Mutable access to the cell at the given position
    ///
    /// Changing walls through this bypasses the matched-pair carving of
    /// [`MazeGrid::carve_between`].
    pub fn get_mut(&mut self, p: GridPos) -> Option<&mut Cell> {
        self.cells.get_mut(&p)
    }

    /// Returns the cell one step from `p` in `direction`, or `None` if that is out of bounds
    ///
    /// # Examples
    ///
    /// ```
    /// use maze_ball::grid::{Dimensions, Direction, GridPos, MazeGrid};
    ///
    /// let grid = MazeGrid::new(Dimensions::new(4, 4));
    /// let east = grid.neighbor(GridPos::new(1, 1), Direction::East).unwrap();
    /// assert_eq!(east.pos, GridPos::new(2, 1));
    /// assert!(grid.neighbor(GridPos::new(1, 1), Direction::South).is_none());
    /// ```
    pub fn neighbor(&self, p: GridPos, direction: Direction) -> Option<&Cell> {
        let n = p.step(direction);
        if !self.dimensions.contains(n) {
            return None;
        }
        self.cells.get(&n)
    }

    /// Cells in a stable column-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.dimensions.positions().filter_map(|p| self.cells.get(&p))
    }

    /// Removes the walls separating two adjacent cells, on both sides
    ///
    /// The direction is inferred from the relative positions.
    ///
    /// # Examples
    ///
    /// ```
    /// use maze_ball::grid::{Dimensions, GridPos, MazeGrid};
    ///
    /// let mut grid = MazeGrid::new(Dimensions::new(4, 4));
    /// grid.carve_between(GridPos::new(1, 1), GridPos::new(1, 2)).unwrap();
    /// assert!(!grid.get(GridPos::new(1, 1)).unwrap().walls.north);
    /// assert!(!grid.get(GridPos::new(1, 2)).unwrap().walls.south);
    ///
    /// assert!(grid.carve_between(GridPos::new(1, 1), GridPos::new(3, 1)).is_err());
    /// ```
    pub fn carve_between(&mut self, a: GridPos, b: GridPos) -> Result<(), Error> {
        let direction = Direction::between(a, b)
            .ok_or_else(|| anyhow!("Cells at {:?} and {:?} are not adjacent", a, b))?;
        if !self.cells.contains_key(&a) || !self.cells.contains_key(&b) {
            return Err(anyhow!("Cannot carve between {:?} and {:?}: cell missing", a, b));
        }

        if let Some(cell) = self.cells.get_mut(&a) {
            cell.walls.set(direction, false);
        }
        if let Some(cell) = self.cells.get_mut(&b) {
            cell.walls.set(direction.opposite(), false);
        }
        Ok(())
    }

    /// Removes a single wall of one cell, leaving any neighbor untouched
    ///
    /// Returns whether the cell exists.
    pub fn remove_wall(&mut self, p: GridPos, direction: Direction) -> bool {
        match self.cells.get_mut(&p) {
            Some(cell) => {
                cell.walls.set(direction, false);
                true
            }
            None => false,
        }
    }

    /// Removes every cell; used before a maze is rebuilt
    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_are_corrected() {
        assert_eq!(Dimensions::new(3, 5), Dimensions::new(4, 4));
        assert_eq!(Dimensions::new(7, 8).columns(), 6);
        assert_eq!(Dimensions::new(7, 8).rows(), 8);
        assert_eq!(Dimensions::new(0, -3).columns(), 4);
        assert_eq!(Dimensions::new(0, -3).rows(), 4);
        assert_eq!(Dimensions::new(10, 11).rows(), 10);
    }

    #[test]
    fn grid_is_total() {
        let grid = MazeGrid::new(Dimensions::new(6, 4));
        assert_eq!(grid.len(), 24);
        for col in 1..=6 {
            for row in 1..=4 {
                let cell = grid.get(GridPos::new(col, row)).unwrap();
                assert_eq!(cell.pos, GridPos::new(col, row));
                assert_eq!(cell.walls, Walls::default());
            }
        }
    }

    #[test]
    fn grid_get_oob() {
        let grid = MazeGrid::new(Dimensions::new(4, 4));
        assert_eq!(grid.get(GridPos::new(0, 1)), None);
        assert_eq!(grid.get(GridPos::new(1, 0)), None);
        assert_eq!(grid.get(GridPos::new(5, 1)), None);
        assert_eq!(grid.get(GridPos::new(1, 5)), None);
    }

    #[test]
    fn grid_neighbor() {
        let grid = MazeGrid::new(Dimensions::new(4, 4));
        let p = GridPos::new(2, 2);
        assert_eq!(
            grid.neighbor(p, Direction::North).map(|c| c.pos),
            Some(GridPos::new(2, 3))
        );
        assert_eq!(
            grid.neighbor(p, Direction::South).map(|c| c.pos),
            Some(GridPos::new(2, 1))
        );
        assert_eq!(
            grid.neighbor(p, Direction::East).map(|c| c.pos),
            Some(GridPos::new(3, 2))
        );
        assert_eq!(
            grid.neighbor(p, Direction::West).map(|c| c.pos),
            Some(GridPos::new(1, 2))
        );
    }

    #[test]
    fn grid_neighbor_oob() {
        let grid = MazeGrid::new(Dimensions::new(4, 4));
        assert!(grid.neighbor(GridPos::new(1, 1), Direction::West).is_none());
        assert!(grid.neighbor(GridPos::new(1, 1), Direction::South).is_none());
        assert!(grid.neighbor(GridPos::new(4, 4), Direction::East).is_none());
        assert!(grid.neighbor(GridPos::new(4, 4), Direction::North).is_none());
    }

    #[test]
    fn carve_clears_both_sides() {
        let mut grid = MazeGrid::new(Dimensions::new(4, 4));
        grid.carve_between(GridPos::new(3, 2), GridPos::new(2, 2))
            .unwrap();
        assert!(!grid.get(GridPos::new(3, 2)).unwrap().walls.west);
        assert!(!grid.get(GridPos::new(2, 2)).unwrap().walls.east);
        assert!(grid.get(GridPos::new(3, 2)).unwrap().walls.east);
        assert!(grid.get(GridPos::new(2, 2)).unwrap().walls.west);
    }

    #[test]
    fn carve_rejects_missing_cells() {
        let mut grid = MazeGrid::new(Dimensions::new(4, 4));
        let v = grid.carve_between(GridPos::new(4, 1), GridPos::new(5, 1));
        assert!(v.is_err());
        assert!(grid.get(GridPos::new(4, 1)).unwrap().walls.east);
    }

    #[test]
    fn remove_wall_is_one_sided() {
        let mut grid = MazeGrid::new(Dimensions::new(4, 4));
        assert!(grid.remove_wall(GridPos::new(1, 1), Direction::East));
        assert!(!grid.get(GridPos::new(1, 1)).unwrap().walls.east);
        assert!(grid.get(GridPos::new(2, 1)).unwrap().walls.west);
        assert!(!grid.remove_wall(GridPos::new(9, 9), Direction::East));
    }

    #[test]
    fn clear_empties_grid() {
        let mut grid = MazeGrid::new(Dimensions::new(4, 4));
        grid.clear();
        assert!(grid.is_empty());
        assert_eq!(grid.get(GridPos::new(1, 1)), None);
        assert_eq!(grid.cells().count(), 0);
    }

    #[test]
    fn direction_roundtrip() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            let p = GridPos::new(2, 2);
            assert_eq!(Direction::between(p, p.step(d)), Some(d));
            let raw: u8 = d.into();
            assert_eq!(Direction::try_from(raw).unwrap(), d);
        }
    }

    #[test]
    fn point_conversion() {
        let p: Point2<i32> = GridPos::new(3, 4).into();
        assert_eq!(p, Point2::new(3, 4));
        assert_eq!(GridPos::from(p), GridPos::new(3, 4));
    }
}
