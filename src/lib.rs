#![warn(missing_docs)]
//! Perfect maze generation and a ball that rolls through it

pub mod constants;
pub mod generation;
pub mod grid;
pub mod movement;
pub mod session;
pub mod settings;
pub mod swipe;
pub mod text;
pub mod token;
