use thiserror::Error;

/// Errors raised while building a maze.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("{name} must not be negative (got {value})")]
    NegativeDimension { name: &'static str, value: i32 },
    #[error("Maze geometry does not fit in pixel coordinates")]
    GeometryOverflow,
}

pub type Result<T> = core::result::Result<T, MazeError>;
