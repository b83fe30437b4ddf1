//! Current and best score across games in one session.

use serde::{Deserialize, Serialize};

/// Tracks the running score and the best finished score.
///
/// Kept in memory only; nothing is persisted between sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    score: u64,
    best: u64,
}

impl Scoreboard {
    /// Empty scoreboard.
    #[must_use]
    pub const fn new() -> Self {
        Self { score: 0, best: 0 }
    }

    /// Score of the game in progress.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Best score seen so far, including the current game.
    #[must_use]
    pub const fn best(&self) -> u64 {
        if self.score > self.best {
            self.score
        } else {
            self.best
        }
    }

    /// Add the points from one turn.
    pub const fn add(&mut self, delta: u64) {
        self.score += delta;
    }

    /// Record the current score as finished and reset for a new game.
    pub const fn reset(&mut self) {
        self.best = self.best();
        self.score = 0;
    }
}
