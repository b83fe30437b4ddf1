//! Error types for grid construction and game setup.

use crate::game::Coord;

/// Errors raised while building a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Board size outside the supported range.
    #[error("unsupported grid size {0} (expected 2..=16)")]
    InvalidSize(u16),
    /// A row of the value matrix has the wrong length.
    #[error("row {row} has {len} cells, expected {expected}")]
    Ragged {
        /// Row index.
        row: usize,
        /// Actual length.
        len: usize,
        /// Required length (number of rows).
        expected: usize,
    },
    /// A value that is not a power of two ≥ 2.
    #[error("invalid tile value {value} at {coord}")]
    InvalidValue {
        /// Where the value was found.
        coord: Coord,
        /// The offending value.
        value: u32,
    },
}

/// Errors raised while configuring or starting a game.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    /// The configuration is out of range.
    #[error("invalid config: {0}")]
    Config(String),
    /// The grid could not be built.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Result type for game setup.
pub type GameResult<T> = Result<T, GameError>;
