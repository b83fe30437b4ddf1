//! Game layer for the sliding-tile puzzle.
//!
//! Implements the rules on a square grid:
//! - Tiles and the cells that own them
//! - Grid views by row and column
//! - Move resolution (slides, scheduled merges)
//! - The turn controller (merge, spawn, game over)
//! - Key and swipe mapping to directions

mod cell;
mod coord;
mod grid;
mod input;
pub mod invariants;
pub mod resolver;
mod score;
mod state;
mod tile;

pub use cell::Cell;
pub use coord::{Coord, Direction, ParseDirectionError};
pub use grid::{DEFAULT_SIZE, Grid, MAX_SIZE, MIN_SIZE};
pub use input::Swipe;
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use resolver::{SlideKind, can_move, can_move_any, legal_moves, preview};
pub use score::Scoreboard;
pub use state::{
    DEFAULT_FOUR_PROBABILITY, DEFAULT_START_TILES, Game, GameConfig, IgnoreReason, Phase, Turn,
    TurnEvent, TurnOutcome,
};
pub use tile::{MAX_TILE_VALUE, Tile, TileId, is_tile_value};
