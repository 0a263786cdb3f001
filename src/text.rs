//! Plain text drawing of a maze, for terminals and logs

use crate::generation::Maze;
use crate::grid::{Direction, GridPos, Walls};

/// Draw the maze, highest row first, marking the ball with `o` and the exit with `x`
///
/// # Examples
///
/// ```
/// use maze_ball::generation::MazeGenerator;
/// use maze_ball::text::render;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let maze = MazeGenerator::new(4, 4).generate(&mut StdRng::seed_from_u64(1)).unwrap();
/// let drawing = render(&maze, Some(maze.spawn()));
///
/// assert_eq!(drawing.lines().count(), 9);
/// assert!(drawing.contains(" o "));
/// ```
pub fn render(maze: &Maze, ball: Option<GridPos>) -> String {
    let dims = maze.dimensions();
    let walls = |p: GridPos| maze.cell(p).map(|c| c.walls).unwrap_or_default();
    let mut out = String::new();

    for row in (1..=dims.rows()).rev() {
        draw_horizontal(&mut out, dims.columns(), |col| {
            walls(GridPos::new(col, row)).north
        });

        for col in 1..=dims.columns() {
            let p = GridPos::new(col, row);
            out.push(if walls(p).west { '|' } else { ' ' });
            out.push_str(if ball == Some(p) {
                " o "
            } else if p == maze.exit() {
                " x "
            } else {
                "   "
            });
        }
        let last: Walls = walls(GridPos::new(dims.columns(), row));
        out.push(if last.get(Direction::East) { '|' } else { ' ' });
        out.push('\n');
    }

    draw_horizontal(&mut out, dims.columns(), |col| {
        walls(GridPos::new(col, 1)).south
    });
    out
}

fn draw_horizontal(out: &mut String, columns: i32, wall: impl Fn(i32) -> bool) {
    for col in 1..=columns {
        out.push('+');
        out.push_str(if wall(col) { "---" } else { "   " });
    }
    out.push_str("+\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::MazeGenerator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn drawing_size() {
        let maze = MazeGenerator::new(6, 4)
            .generate(&mut StdRng::seed_from_u64(2))
            .unwrap();
        let drawing = render(&maze, None);
        let lines: Vec<&str> = drawing.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines.iter().all(|l| l.len() == 6 * 4 + 1));
        assert!(!drawing.contains(" o "));
    }

    #[test]
    fn exit_is_open_on_the_right() {
        let maze = MazeGenerator::new(6, 4)
            .generate(&mut StdRng::seed_from_u64(2))
            .unwrap();
        let drawing = render(&maze, None);
        // second line is the top row of cells; the far corner has its east wall removed
        let top_row = drawing.lines().nth(1).unwrap();
        assert!(top_row.ends_with(" x  "));
    }

    #[test]
    fn horizontal_gaps() {
        let mut out = String::new();
        draw_horizontal(&mut out, 3, |col| col != 2);
        assert_eq!(out, "+---+   +---+\n");
    }

    #[test]
    fn outer_walls_are_closed() {
        let maze = MazeGenerator::new(4, 4)
            .generate(&mut StdRng::seed_from_u64(8))
            .unwrap();
        let drawing = render(&maze, Some(maze.spawn()));
        let lines: Vec<&str> = drawing.lines().collect();
        assert_eq!(lines[0], "+---+---+---+---+");
        assert_eq!(lines[8], "+---+---+---+---+");
        assert!(lines[7].starts_with("| o "));
    }
}
