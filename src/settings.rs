//! Options for building a maze
use crate::constants::{DEFAULT_COLUMNS, DEFAULT_ROWS};
use crate::grid::{Dimensions, GridPos};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Rarely changed options for maze generation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeSettings {
    /// Requested width; corrected to an even number of at least 4
    pub columns: i32,
    /// Requested height; corrected to an even number of at least 4
    pub rows: i32,
    /// Seed for the random source, or `None` to seed from entropy
    pub seed: Option<u64>,
    /// Boundary cell to open as the exit, or `None` for the far corner
    pub exit: Option<GridPos>,
}

impl Default for MazeSettings {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            seed: None,
            exit: None,
        }
    }
}

impl MazeSettings {
    /// The dimensions a maze built from these settings will have
    ///
    /// # Examples
    ///
    /// ```
    /// use maze_ball::settings::MazeSettings;
    ///
    /// let settings = MazeSettings { columns: 3, rows: 5, ..Default::default() };
    /// let d = settings.dimensions();
    /// assert_eq!((d.columns(), d.rows()), (4, 4));
    /// ```
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.columns, self.rows)
    }

    /// A random source: seeded if a seed is configured
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Fill settings from positional `[columns] [rows] [seed]` arguments
    ///
    /// Missing or unparsable values keep their defaults.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut settings = Self::default();
        let mut args = args.into_iter();
        if let Some(Ok(columns)) = args.next().map(|a| a.as_ref().trim().parse::<i32>()) {
            settings.columns = columns;
        }
        if let Some(Ok(rows)) = args.next().map(|a| a.as_ref().trim().parse::<i32>()) {
            settings.rows = rows;
        }
        if let Some(Ok(seed)) = args.next().map(|a| a.as_ref().trim().parse::<u64>()) {
            settings.seed = Some(seed);
        }
        settings
    }
}
