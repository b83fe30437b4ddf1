//! Game recordings and replay.
//!
//! Because spawning is seeded, replay requires only:
//! - `seed: u64` - The random seed for spawning
//! - `config: GameConfig` - Board size and spawn settings
//! - `moves: Vec<Direction>` - Every legal direction played
//!
//! No board snapshots needed. To view turn N, re-run the game from turn 0 to N.
//!
//! # Time Travel
//!
//! - **Forward**: Play the next recorded move
//! - **Backward**: Re-run from turn 0 to (current_turn - 1)
//! - **Jump to turn N**: Re-run from turn 0 to N

mod render;

pub use render::render_ascii;

use crate::error::GameError;
use crate::game::{Direction, Game, GameConfig, Turn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Current recording file format version.
pub const RECORDING_VERSION: u32 = 1;

/// Errors from loading or stepping through a recording.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// File could not be read or written.
    #[error("recording I/O failed: {0}")]
    Io(#[from] io::Error),
    /// File is not a valid recording.
    #[error("malformed recording: {0}")]
    Format(#[from] serde_json::Error),
    /// Recording was written by an incompatible version.
    #[error("unsupported recording version {0} (expected {RECORDING_VERSION})")]
    Version(u32),
    /// The recorded config cannot start a game.
    #[error(transparent)]
    Game(#[from] GameError),
    /// No more recorded moves.
    #[error("end of recording")]
    EndOfRecording,
    /// Requested turn is past the end of the recording.
    #[error("turn {turn} out of range (recording has {len} turns)")]
    TurnOutOfRange {
        /// Requested turn.
        turn: usize,
        /// Number of recorded turns.
        len: usize,
    },
    /// A recorded move was illegal when replayed.
    #[error("recorded move {direction} at turn {turn} is illegal")]
    IllegalMove {
        /// Turn index of the bad move.
        turn: usize,
        /// The recorded direction.
        direction: Direction,
    },
}

/// Minimal recording - seed, config and moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    /// File format version.
    pub version: u32,
    /// Spawn seed.
    pub seed: u64,
    /// Game configuration.
    pub config: GameConfig,
    /// Legal moves in the order they were played.
    pub moves: Vec<Direction>,
}

impl Recording {
    /// Create a recording with no moves yet.
    #[must_use]
    pub const fn new(seed: u64, config: GameConfig) -> Self {
        Self {
            version: RECORDING_VERSION,
            seed,
            config,
            moves: Vec::new(),
        }
    }

    /// Append a move if it consumed a turn.
    pub fn record(&mut self, turn: &Turn) {
        if turn.moved() {
            self.moves.push(turn.direction);
        }
    }

    /// Number of recorded turns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Whether no moves have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Save recording to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), ReplayError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load recording from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is malformed, or has an
    /// unsupported version.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let json = fs::read_to_string(path)?;
        let recording: Self = serde_json::from_str(&json)?;
        if recording.version != RECORDING_VERSION {
            return Err(ReplayError::Version(recording.version));
        }
        Ok(recording)
    }
}

/// Steps through a recording by re-running the game.
#[derive(Debug, Clone)]
pub struct ReplayEngine {
    recording: Recording,
    game: Game,
    turn: usize,
}

impl ReplayEngine {
    /// Start a replay at turn 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorded config is invalid.
    pub fn new(recording: Recording) -> Result<Self, ReplayError> {
        let game = Game::new(recording.seed, recording.config)?;
        Ok(Self {
            recording,
            game,
            turn: 0,
        })
    }

    /// The recording being replayed.
    #[must_use]
    pub const fn recording(&self) -> &Recording {
        &self.recording
    }

    /// The game at the current turn.
    #[must_use]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// Current turn index (number of moves applied).
    #[must_use]
    pub const fn turn(&self) -> usize {
        self.turn
    }

    /// Whether every recorded move has been applied.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.turn >= self.recording.moves.len()
    }

    /// Apply the next recorded move.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::EndOfRecording`] at the end, or
    /// [`ReplayError::IllegalMove`] if the recording does not match the game.
    pub fn step_forward(&mut self) -> Result<Turn, ReplayError> {
        let Some(&direction) = self.recording.moves.get(self.turn) else {
            return Err(ReplayError::EndOfRecording);
        };
        let turn = self.game.play(direction);
        if !turn.moved() {
            return Err(ReplayError::IllegalMove {
                turn: self.turn,
                direction,
            });
        }
        self.turn += 1;
        Ok(turn)
    }

    /// Go back one turn by re-running from the start.
    ///
    /// Does nothing at turn 0.
    ///
    /// # Errors
    ///
    /// Returns an error if re-running the recording fails.
    pub fn step_backward(&mut self) -> Result<(), ReplayError> {
        if self.turn == 0 {
            return Ok(());
        }
        self.goto_turn(self.turn - 1)
    }

    /// Jump to `target` turns applied.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::TurnOutOfRange`] past the end of the recording,
    /// or an error if re-running fails.
    pub fn goto_turn(&mut self, target: usize) -> Result<(), ReplayError> {
        let len = self.recording.moves.len();
        if target > len {
            return Err(ReplayError::TurnOutOfRange { turn: target, len });
        }
        if target < self.turn {
            self.game = Game::new(self.recording.seed, self.recording.config)?;
            self.turn = 0;
        }
        while self.turn < target {
            self.step_forward()?;
        }
        Ok(())
    }
}
