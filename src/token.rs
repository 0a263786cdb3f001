//! The ball: a single token moved through the maze one cell at a time
//!
//! Movement is driven from outside. [`TokenController::request_move`] starts a move and
//! [`TokenController::complete_move`] is called once the move has finished animating. After
//! each completed step the ball keeps rolling in the same direction until it reaches a fork
//! or can't go any further.

use crate::grid::{Direction, GridPos, MazeGrid};
use crate::movement::{is_fork, normalize_direction, target};
use log::{debug, warn};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Whether a move is in flight
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum TokenState {
    /// Waiting for input
    #[default]
    Idle,
    /// Travelling towards `target`
    Moving {
        /// Direction of travel
        direction: Direction,
        /// The cell the ball will occupy when the move completes
        target: GridPos,
    },
}

/// Why a move request was ignored
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RejectReason {
    /// Another move is still in flight
    Busy,
    /// The input vector had no usable direction
    NoDirection,
    /// A wall or the edge of the maze is in the way
    Blocked,
}

/// Result of [`TokenController::request_move`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MoveOutcome {
    /// The ball is now moving
    Started {
        /// Direction of travel
        direction: Direction,
        /// Destination cell
        target: GridPos,
    },
    /// Nothing changed
    Rejected(RejectReason),
}

/// Why the ball came to rest
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StopReason {
    /// The cell has three or more openings and needs new input
    Fork,
    /// The way ahead is closed
    Blocked,
}

/// Result of [`TokenController::complete_move`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StepOutcome {
    /// The step was committed and the ball is already moving on to `target`
    Continuing {
        /// Where the ball is now
        position: GridPos,
        /// Where the ball is heading
        target: GridPos,
    },
    /// The step was committed and the ball is idle
    Stopped {
        /// Where the ball is now
        position: GridPos,
        /// Why it stopped
        reason: StopReason,
    },
    /// There was no move to complete
    NotMoving,
}

/// Position and movement state of the ball
///
/// # Examples
///
/// ```
/// use maze_ball::grid::{Dimensions, GridPos, MazeGrid};
/// use maze_ball::token::{MoveOutcome, StepOutcome, StopReason, TokenController};
/// use nalgebra::Vector2;
///
/// let mut grid = MazeGrid::new(Dimensions::new(4, 4));
/// grid.carve_between(GridPos::new(1, 1), GridPos::new(2, 1)).unwrap();
///
/// let mut ball = TokenController::new(GridPos::new(1, 1));
/// assert!(matches!(ball.request_move(&grid, Vector2::new(1.0, 0.0)), MoveOutcome::Started { .. }));
/// assert!(ball.is_moving());
///
/// let step = ball.complete_move(&grid);
/// assert_eq!(step, StepOutcome::Stopped { position: GridPos::new(2, 1), reason: StopReason::Blocked });
/// assert!(!ball.is_moving());
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TokenController {
    position: GridPos,
    state: TokenState,
}

impl TokenController {
    /// An idle ball at `spawn`
    pub fn new(spawn: GridPos) -> Self {
        Self {
            position: spawn,
            state: TokenState::Idle,
        }
    }

    /// The cell the ball currently occupies
    pub fn position(&self) -> GridPos {
        self.position
    }

    /// Whether a move is in flight
    pub fn is_moving(&self) -> bool {
        matches!(self.state, TokenState::Moving { .. })
    }

    /// Current movement state
    pub fn state(&self) -> TokenState {
        self.state
    }

    /// Destination of the move in flight, if any
    pub fn target(&self) -> Option<GridPos> {
        match self.state {
            TokenState::Moving { target, .. } => Some(target),
            TokenState::Idle => None,
        }
    }

    /// Put the ball back at `spawn`, dropping any move in flight
    pub fn reset(&mut self, spawn: GridPos) {
        self.position = spawn;
        self.state = TokenState::Idle;
    }

    /// Try to start moving in the direction of `input`
    ///
    /// Ignored while another move is in flight. The input is snapped to its dominant axis with
    /// [`normalize_direction`].
    pub fn request_move(&mut self, grid: &MazeGrid, input: Vector2<f32>) -> MoveOutcome {
        if self.is_moving() {
            return MoveOutcome::Rejected(RejectReason::Busy);
        }
        match normalize_direction(input) {
            Some(direction) => self.start(grid, direction),
            None => MoveOutcome::Rejected(RejectReason::NoDirection),
        }
    }

    /// Commit the move in flight, then keep rolling if the new cell is not a fork
    ///
    /// Must only be called while moving; otherwise nothing happens and
    /// [`StepOutcome::NotMoving`] is returned.
    pub fn complete_move(&mut self, grid: &MazeGrid) -> StepOutcome {
        let TokenState::Moving { direction, target } = self.state else {
            warn!("Move completed while the ball was idle at {:?}", self.position);
            return StepOutcome::NotMoving;
        };

        self.position = target;
        self.state = TokenState::Idle;

        if is_fork(grid, self.position) {
            debug!("Ball stopped at fork {:?}", self.position);
            return StepOutcome::Stopped {
                position: self.position,
                reason: StopReason::Fork,
            };
        }

        match self.start(grid, direction) {
            MoveOutcome::Started { target, .. } => StepOutcome::Continuing {
                position: self.position,
                target,
            },
            MoveOutcome::Rejected(_) => StepOutcome::Stopped {
                position: self.position,
                reason: StopReason::Blocked,
            },
        }
    }

    fn start(&mut self, grid: &MazeGrid, direction: Direction) -> MoveOutcome {
        match target(grid, self.position, direction) {
            Some(target) => {
                debug!("Ball moving {:?} from {:?}", direction, self.position);
                self.state = TokenState::Moving { direction, target };
                MoveOutcome::Started { direction, target }
            }
            None => MoveOutcome::Rejected(RejectReason::Blocked),
        }
    }
}
