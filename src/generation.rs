//! Randomized depth-first maze generation
//!
//! The generator produces a spanning tree over the grid: every cell is reachable from every
//! other cell by exactly one path. A 2x2 centre room is linked up before the backtracker runs,
//! and a single boundary wall is removed afterwards to form the exit.

use crate::constants::CENTRE_ANCHOR;
use crate::grid::{Cell, Dimensions, Direction, GridPos, MazeGrid};
use crate::settings::MazeSettings;
use anyhow::{anyhow, Error};
use log::{debug, error, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Bookkeeping for a single run of the backtracker
///
/// Created fresh for every generation and dropped once every cell has been visited.
#[derive(Clone, Debug)]
pub struct GenerationState {
    /// Cells not yet part of the spanning tree
    unvisited: HashSet<GridPos>,
    /// Path back to earlier branch points, most recent last
    stack: Vec<GridPos>,
    /// The cell being expanded
    current: GridPos,
}

impl GenerationState {
    /// Start a run at `current`, with the given cells still to visit
    ///
    /// `current` is marked visited immediately.
    pub fn new(unvisited: impl IntoIterator<Item = GridPos>, current: GridPos) -> Self {
        let mut unvisited: HashSet<GridPos> = unvisited.into_iter().collect();
        unvisited.remove(&current);
        Self {
            unvisited,
            stack: vec![],
            current,
        }
    }

    /// The cell being expanded
    pub fn current(&self) -> GridPos {
        self.current
    }

    /// Number of cells still waiting to be visited
    pub fn remaining(&self) -> usize {
        self.unvisited.len()
    }

    /// Whether `p` has not been visited yet
    pub fn is_unvisited(&self, p: GridPos) -> bool {
        self.unvisited.contains(&p)
    }

    /// In-bounds neighbors of `p` that have not been visited, in [`Direction::ALL`] order
    pub fn unvisited_neighbors(&self, grid: &MazeGrid, p: GridPos) -> Vec<GridPos> {
        Direction::ALL
            .iter()
            .filter_map(|&d| grid.neighbor(p, d))
            .map(|cell| cell.pos)
            .filter(|n| self.unvisited.contains(n))
            .collect()
    }

    /// Run the backtracker until every cell has been visited
    ///
    /// Returns the number of wall pairs carved. Fails if the run gets stuck with cells left
    /// over, which can only happen if the unvisited cells are not connected to `current`.
    pub fn run<R: Rng + ?Sized>(&mut self, grid: &mut MazeGrid, rng: &mut R) -> Result<usize, Error> {
        let mut carves = 0;

        while !self.unvisited.is_empty() {
            let neighbors = self.unvisited_neighbors(grid, self.current);
            if let Some(&check) = neighbors.choose(rng) {
                self.stack.push(self.current);
                grid.carve_between(self.current, check)?;
                carves += 1;
                self.current = check;
                self.unvisited.remove(&check);
            } else if let Some(previous) = self.stack.pop() {
                self.current = previous;
            } else {
                error!(
                    "Maze generation stuck at {:?} with {} cells unvisited",
                    self.current,
                    self.unvisited.len()
                );
                return Err(anyhow!(
                    "Generation stuck at {:?} with {} unvisited cells and an empty stack",
                    self.current,
                    self.unvisited.len()
                ));
            }
        }

        Ok(carves)
    }
}

/// A finished maze
///
/// This struct is created by [`MazeGenerator::generate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    grid: MazeGrid,
    spawn: GridPos,
    exit: GridPos,
    exit_direction: Direction,
    exit_opened: bool,
    carves: usize,
}

impl Maze {
    /// Returns the underlying [`MazeGrid`]
    pub fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    /// Effective dimensions, after correction
    pub fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    /// Returns the cell at the given position, or `None` if there isn't one
    pub fn cell(&self, p: GridPos) -> Option<&Cell> {
        self.grid.get(p)
    }

    /// Where the ball starts; the centre room anchor
    pub fn spawn(&self) -> GridPos {
        self.spawn
    }

    /// The boundary cell with its outer wall removed
    pub fn exit(&self) -> GridPos {
        self.exit
    }

    /// Which wall of the exit cell was removed
    pub fn exit_direction(&self) -> Direction {
        self.exit_direction
    }

    /// Whether the exit wall was removed
    pub fn exit_opened(&self) -> bool {
        self.exit_opened
    }

    /// Number of wall removals performed, including the centre room and the exit
    pub fn carves(&self) -> usize {
        self.carves
    }

    /// Removes every cell of the maze
    pub fn teardown(&mut self) {
        self.grid.clear();
    }
}

/// Builds [`Maze`]s of a fixed size
///
/// # Examples
///
/// ```
/// use maze_ball::generation::MazeGenerator;
/// use maze_ball::grid::GridPos;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let maze = MazeGenerator::new(7, 8).generate(&mut rng).unwrap();
///
/// assert_eq!(maze.dimensions().columns(), 6);
/// assert_eq!(maze.dimensions().rows(), 8);
/// assert_eq!(maze.exit(), GridPos::new(6, 8));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGenerator {
    dimensions: Dimensions,
    exit: Option<GridPos>,
    centre: GridPos,
}

impl MazeGenerator {
    /// Create a generator, correcting the requested size
    pub fn new(columns: i32, rows: i32) -> Self {
        Self {
            dimensions: Dimensions::new(columns, rows),
            exit: None,
            centre: CENTRE_ANCHOR,
        }
    }

    /// Same exit choice, different size
    pub fn resized(&self, columns: i32, rows: i32) -> Self {
        Self {
            dimensions: Dimensions::new(columns, rows),
            exit: self.exit,
            centre: self.centre,
        }
    }

    /// Create a generator from settings
    pub fn from_settings(settings: &MazeSettings) -> Self {
        Self {
            dimensions: settings.dimensions(),
            exit: settings.exit,
            centre: CENTRE_ANCHOR,
        }
    }

    /// Use a specific boundary cell as the exit instead of the far corner
    ///
    /// Cells that are not on the edge of the maze are ignored when generating.
    pub fn with_exit(mut self, exit: GridPos) -> Self {
        self.exit = Some(exit);
        self
    }

    /// Move the centre room, and with it the spawn, so its bottom left cell is `anchor`
    ///
    /// The whole 2x2 room must fit inside the maze, otherwise generation fails.
    pub fn with_centre_anchor(mut self, anchor: GridPos) -> Self {
        self.centre = anchor;
        self
    }

    /// The dimensions mazes will actually have
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// The four centre room cells: anchor, east of anchor, north of anchor, north east of anchor
    pub fn centre_cells(&self) -> [GridPos; 4] {
        let a = self.centre;
        [
            a,
            a.step(Direction::East),
            a.step(Direction::North),
            a.step(Direction::East).step(Direction::North),
        ]
    }

    /// Generate a new maze
    ///
    /// All randomness is drawn from `rng`, so a seeded generator always produces the same maze.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Maze, Error> {
        let mut grid = MazeGrid::new(self.dimensions);
        let centre = self.centre_cells();

        // link the room with three carves so it is connected without a loop
        grid.carve_between(centre[0], centre[1])?;
        grid.carve_between(centre[0], centre[2])?;
        grid.carve_between(centre[1], centre[3])?;
        let mut carves = 3;

        // only the chosen cell takes part in the backtracker, so every
        // connection out of the room goes through it
        let doors = self.room_doors(&grid, &centre);
        if doors.is_empty() {
            return Err(anyhow!("Centre room at {:?} has no way out", self.centre));
        }
        let start = doors[rng.gen_range(0..doors.len())];
        let unvisited = self
            .dimensions
            .positions()
            .filter(|p| *p == start || !centre.contains(p));
        let mut state = GenerationState::new(unvisited, start);
        carves += state.run(&mut grid, rng)?;

        let exit = self.exit_cell();
        let exit_direction = self.exit_wall(exit);
        let exit_opened = grid.remove_wall(exit, exit_direction);
        if exit_opened {
            carves += 1;
        }

        debug!("Carved {} walls, room entered through {:?}", carves, start);
        info!(
            "Maze generation finished: {}x{}",
            self.dimensions.columns(),
            self.dimensions.rows()
        );

        Ok(Maze {
            grid,
            spawn: self.centre,
            exit,
            exit_direction,
            exit_opened,
            carves,
        })
    }

    /// Room cells with an in-bounds neighbor outside the room
    fn room_doors(&self, grid: &MazeGrid, centre: &[GridPos; 4]) -> Vec<GridPos> {
        centre
            .iter()
            .copied()
            .filter(|&c| {
                Direction::ALL
                    .iter()
                    .filter_map(|&d| grid.neighbor(c, d))
                    .any(|n| !centre.contains(&n.pos))
            })
            .collect()
    }

    fn is_boundary(&self, p: GridPos) -> bool {
        self.dimensions.contains(p)
            && (p.col == 1
                || p.row == 1
                || p.col == self.dimensions.columns()
                || p.row == self.dimensions.rows())
    }

    fn exit_cell(&self) -> GridPos {
        match self.exit {
            Some(p) if self.is_boundary(p) => p,
            Some(p) => {
                warn!("Exit {:?} is not on the edge of the maze, using the far corner", p);
                self.dimensions.far_corner()
            }
            None => self.dimensions.far_corner(),
        }
    }

    /// The wall of `p` facing the nearest edge, checked left, right, top, then bottom
    fn exit_wall(&self, p: GridPos) -> Direction {
        if p.col == 1 {
            Direction::West
        } else if p.col == self.dimensions.columns() {
            Direction::East
        } else if p.row == self.dimensions.rows() {
            Direction::North
        } else {
            Direction::South
        }
    }
}
