//! Output formatting utilities for CLI.

// Allow format! with push_str for readability
#![allow(clippy::format_push_string, clippy::cast_precision_loss)]

use serde::Serialize;
use slide2048::batch::{BatchStats, GameRecord};
use slide2048::replay::render_ascii;
use slide2048::strategy::StrategyKind;
use std::collections::BTreeMap;

/// JSON-serializable game record.
#[derive(Debug, Serialize)]
pub(super) struct JsonGameRecord {
    /// Random seed used.
    seed: u64,
    /// Board edge length.
    size: u16,
    /// Strategy that played.
    strategy: StrategyKind,
    /// Final score.
    score: u64,
    /// Largest tile reached.
    max_tile: u32,
    /// Legal turns played.
    turns: u32,
    /// Whether the game ended with no legal move.
    game_over: bool,
    /// Final board, row by row (0 = empty).
    board: Vec<Vec<u32>>,
}

impl JsonGameRecord {
    /// Create from a `GameRecord`.
    pub(super) fn from_record(record: &GameRecord) -> Self {
        Self {
            seed: record.seed,
            size: record.config.size,
            strategy: record.strategy,
            score: record.score,
            max_tile: record.max_tile,
            turns: record.turns,
            game_over: record.game_over,
            board: record.final_grid.rows(),
        }
    }
}

/// Format a game record as human-readable text.
pub(super) fn format_record_text(record: &GameRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Game Result (seed: {}, strategy: {})\n",
        record.seed, record.strategy
    ));
    output.push_str(&render_ascii(&record.final_grid, record.score));
    output.push_str(&format!("  Turns: {}\n", record.turns));
    output.push_str(&format!("  Max tile: {}\n", record.max_tile));
    if record.game_over {
        output.push_str("  Ended: no legal moves\n");
    } else {
        output.push_str("  Ended: turn limit reached\n");
    }

    output
}

/// JSON-serializable batch result.
#[derive(Debug, Serialize)]
pub(super) struct JsonBatchResult {
    /// Strategy every game used.
    strategy: StrategyKind,
    /// Total games played.
    games_played: u64,
    /// Games that ended with no legal move.
    games_finished: u64,
    /// Mean final score.
    mean_score: f64,
    /// Score standard deviation.
    score_std_dev: f64,
    /// Best final score.
    best_score: u64,
    /// Seed of the best game.
    best_seed: Option<u64>,
    /// Mean game length in turns.
    mean_turns: f64,
    /// Games per final max tile.
    max_tiles: BTreeMap<u32, u64>,
}

impl JsonBatchResult {
    /// Create from stats.
    pub(super) fn from_stats(stats: &BatchStats, strategy: StrategyKind) -> Self {
        Self {
            strategy,
            games_played: stats.games_played,
            games_finished: stats.games_finished,
            mean_score: stats.mean_score(),
            score_std_dev: stats.score_std_dev(),
            best_score: stats.best_score,
            best_seed: stats.best_seed,
            mean_turns: stats.mean_turns(),
            max_tiles: stats.max_tiles.clone(),
        }
    }
}

/// Format batch stats as human-readable text.
pub(super) fn format_batch_text(stats: &BatchStats, strategy: StrategyKind) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Batch Results ({} games, strategy: {strategy})\n",
        stats.games_played
    ));
    output.push_str("========================================\n\n");

    output.push_str(&format!(
        "Score: {:.1} (+/- {:.1})\n",
        stats.mean_score(),
        stats.score_std_dev()
    ));
    if let Some(seed) = stats.best_seed {
        output.push_str(&format!("Best:  {} (seed {seed})\n", stats.best_score));
    }
    output.push_str(&format!("Average Game Length: {:.0} turns\n", stats.mean_turns()));
    output.push_str(&format!(
        "Finished: {} of {}\n\n",
        stats.games_finished, stats.games_played
    ));

    output.push_str("Max Tile Reached:\n");
    for &tile in stats.max_tiles.keys().rev() {
        output.push_str(&format!(
            "  >= {tile:>6}: {:>5.1}%\n",
            stats.reach_rate(tile) * 100.0
        ));
    }

    output
}

/// Format batch stats as CSV, one row per max tile.
pub(super) fn format_batch_csv(stats: &BatchStats, strategy: StrategyKind) -> String {
    let mut output = String::new();

    output.push_str("strategy,max_tile,games,reach_rate\n");
    for (&tile, &games) in &stats.max_tiles {
        output.push_str(&format!(
            "{strategy},{tile},{games},{:.4}\n",
            stats.reach_rate(tile)
        ));
    }

    output
}
