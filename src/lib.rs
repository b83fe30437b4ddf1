// Allow unwrap and casts in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::cast_possible_truncation))]
//! slide2048: a deterministic sliding-tile merge puzzle engine.
//!
//! This crate provides the rules of a 2048-style puzzle on an N×N grid:
//! - Synchronous turn resolution: `(grid, direction) -> (grid, score, events)`
//! - Seeded spawning, so a game is reproducible from its seed and moves
//! - Structured turn events for renderers
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Batch runner / Replay / CLI       │
//! ├─────────────────────────────────────┤
//! │   Strategies (automatic players)    │
//! ├─────────────────────────────────────┤
//! │   Game controller (turn phases)     │
//! ├─────────────────────────────────────┤
//! │   Move resolver                     │
//! ├─────────────────────────────────────┤
//! │   Grid / Cell / Tile                │
//! └─────────────────────────────────────┘
//! ```

pub mod batch;
pub mod error;
pub mod game;
pub mod replay;
pub mod strategy;

pub use error::{GameError, GridError};

// Re-export key game types at crate root for convenience
pub use game::{
    Cell, Coord, Direction, Game, GameConfig, Grid, Phase, Scoreboard, Swipe, Tile, TileId, Turn,
    TurnEvent, TurnOutcome,
};
