use thiserror::Error;

use crate::CellCount;

/// Rejected board configuration. No board is constructed.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board must be at least 1x1")]
    EmptyBoard,
    #[error("Board needs at least one hazard")]
    NoHazards,
    #[error("Too many hazards, requested {hazards} but the board only has {total} cells")]
    TooManyHazards { hazards: CellCount, total: CellCount },
}

/// Coordinates outside the board. Game state is left untouched.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("Invalid coordinates ({x}, {y})")]
pub struct OutOfBoundsError {
    pub x: i64,
    pub y: i64,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    OutOfBounds(#[from] OutOfBoundsError),
    #[error("Board data is inconsistent: {0}")]
    InconsistentBoard(&'static str),
}

pub type Result<T, E = GameError> = core::result::Result<T, E>;
