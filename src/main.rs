use anyhow::Error;
use log::info;
use maze_ball::generation::MazeGenerator;
use maze_ball::session::MazeSession;
use maze_ball::settings::MazeSettings;
use maze_ball::text::render;
use maze_ball::token::{MoveOutcome, StepOutcome};
use nalgebra::Vector2;
use std::io::{self, BufRead, Write};

fn main() -> Result<(), Error> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let settings = MazeSettings::from_args(std::env::args().skip(1));
    let dims = settings.dimensions();
    info!(
        "Maze ball starting up with a {}x{} maze",
        dims.columns(),
        dims.rows()
    );

    // one random source for the whole run, so regenerating never repeats the first maze
    let mut rng = settings.rng();
    let mut session = MazeSession::new(&MazeGenerator::from_settings(&settings), &mut rng)?;

    println!("{}", render(session.maze(), Some(session.position())));
    println!("Move with w/a/s/d, regenerate with r, quit with q");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = match line.trim() {
            "w" => Vector2::new(0.0, 1.0),
            "s" => Vector2::new(0.0, -1.0),
            "a" => Vector2::new(-1.0, 0.0),
            "d" => Vector2::new(1.0, 0.0),
            "r" => {
                session.regenerate(settings.columns, settings.rows, &mut rng)?;
                println!("{}", render(session.maze(), Some(session.position())));
                continue;
            }
            "q" => break,
            _ => continue,
        };

        match session.request_move(input) {
            MoveOutcome::Started { .. } => {
                // no animation here, so every step finishes immediately
                if let StepOutcome::Stopped { position, reason } = session.settle() {
                    info!("Ball stopped at {:?}: {:?}", position, reason);
                }
            }
            MoveOutcome::Rejected(reason) => info!("Move rejected: {:?}", reason),
        }

        println!("{}", render(session.maze(), Some(session.position())));
        if session.at_exit() {
            println!("Reached the exit!");
        }
        io::stdout().flush()?;
    }

    Ok(())
}
