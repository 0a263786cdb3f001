//! A maze together with the ball moving through it

use crate::generation::{Maze, MazeGenerator};
use crate::grid::{Dimensions, GridPos};
use crate::settings::MazeSettings;
use crate::token::{MoveOutcome, StepOutcome, TokenController};
use anyhow::Error;
use log::info;
use nalgebra::Vector2;
use rand::Rng;

/// Owns the current [`Maze`] and the [`TokenController`] for the ball
///
/// The ball only exists once a maze has been generated successfully.
///
/// # Examples
///
/// ```
/// use maze_ball::session::MazeSession;
/// use maze_ball::settings::MazeSettings;
///
/// let settings = MazeSettings { seed: Some(3), ..Default::default() };
/// let session = MazeSession::from_settings(&settings).unwrap();
///
/// assert_eq!(session.position(), session.maze().spawn());
/// assert!(!session.is_moving());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeSession {
    generator: MazeGenerator,
    maze: Maze,
    ball: TokenController,
}

impl MazeSession {
    /// Generate a maze and place the ball at its spawn
    pub fn new<R: Rng + ?Sized>(generator: &MazeGenerator, rng: &mut R) -> Result<Self, Error> {
        let maze = generator.generate(rng)?;
        let ball = TokenController::new(maze.spawn());
        Ok(Self {
            generator: generator.clone(),
            maze,
            ball,
        })
    }

    /// Generate a maze using the random source described by `settings`
    ///
    /// The random source is dropped afterwards. Callers that regenerate later should create it
    /// once with [`MazeSettings::rng`] and pass it to [`MazeSession::new`] and
    /// [`MazeSession::regenerate`].
    pub fn from_settings(settings: &MazeSettings) -> Result<Self, Error> {
        Self::new(&MazeGenerator::from_settings(settings), &mut settings.rng())
    }

    /// Throw away the current maze and build a new one of the given size
    ///
    /// The configured exit is kept. The new maze is generated first; only then is the old grid
    /// emptied and replaced, and the ball returns to the new spawn. If generation fails, the old
    /// maze and ball are left untouched.
    pub fn regenerate<R: Rng + ?Sized>(
        &mut self,
        columns: i32,
        rows: i32,
        rng: &mut R,
    ) -> Result<Dimensions, Error> {
        self.rebuild(self.generator.resized(columns, rows), rng)
    }

    /// Rebuild with a different generator, which is kept for later regenerations
    pub fn rebuild<R: Rng + ?Sized>(
        &mut self,
        generator: MazeGenerator,
        rng: &mut R,
    ) -> Result<Dimensions, Error> {
        let maze = generator.generate(rng)?;
        self.maze.teardown();
        self.maze = maze;
        self.generator = generator;
        self.ball.reset(self.maze.spawn());
        info!("Maze regenerated, ball reset to {:?}", self.maze.spawn());
        Ok(self.maze.dimensions())
    }

    /// The generator used for the current maze
    pub fn generator(&self) -> &MazeGenerator {
        &self.generator
    }

    /// The current maze
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// The ball
    pub fn ball(&self) -> &TokenController {
        &self.ball
    }

    /// The cell the ball occupies
    pub fn position(&self) -> GridPos {
        self.ball.position()
    }

    /// Whether a move is in flight
    pub fn is_moving(&self) -> bool {
        self.ball.is_moving()
    }

    /// Whether the ball sits on the exit cell
    pub fn at_exit(&self) -> bool {
        self.ball.position() == self.maze.exit()
    }

    /// See [`TokenController::request_move`]
    pub fn request_move(&mut self, input: Vector2<f32>) -> MoveOutcome {
        self.ball.request_move(self.maze.grid(), input)
    }

    /// See [`TokenController::complete_move`]
    pub fn complete_move(&mut self) -> StepOutcome {
        self.ball.complete_move(self.maze.grid())
    }

    /// Complete moves until the ball comes to rest, returning the final step
    ///
    /// This is what a driver without animation does after every request.
    pub fn settle(&mut self) -> StepOutcome {
        loop {
            match self.complete_move() {
                StepOutcome::Continuing { .. } => continue,
                outcome => return outcome,
            }
        }
    }
}
