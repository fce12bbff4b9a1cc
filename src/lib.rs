//! Perfect maze generation with a randomized recursive backtracker, and a depth-first solver
//! that draws its progress on a pluggable surface.

pub mod app;
pub mod error;
mod generators;
pub mod maze;
pub mod solvers;
pub mod surface;

pub use error::MazeError;
pub use maze::{Maze, MazeConfig};
