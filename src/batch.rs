//! Autoplay and batch runs.
//!
//! Provides a pure function interface: `(seed, config, strategy) -> GameRecord`,
//! plus a parallel runner that folds many games into [`BatchStats`].

use crate::error::GameResult;
use crate::game::{Direction, Game, GameConfig, Grid};
use crate::strategy::StrategyKind;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// Salt mixed into the game seed for the strategy's own randomness.
const STRATEGY_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Outcome of one autoplayed game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    /// Seed the game was started with.
    pub seed: u64,
    /// Game configuration.
    pub config: GameConfig,
    /// Strategy that played.
    pub strategy: StrategyKind,
    /// Final cumulative score.
    pub score: u64,
    /// Largest tile reached.
    pub max_tile: u32,
    /// Legal turns played.
    pub turns: u32,
    /// Whether the game ended (as opposed to hitting the turn limit).
    pub game_over: bool,
    /// Every direction played, in order.
    pub moves: Vec<Direction>,
    /// Board at the end.
    pub final_grid: Grid,
}

/// Play a game to the end (or `max_turns`) with a built-in strategy.
///
/// # Errors
///
/// Returns an error if the config is invalid.
pub fn play_out(
    seed: u64,
    config: GameConfig,
    strategy: StrategyKind,
    max_turns: u32,
) -> GameResult<GameRecord> {
    let mut game = Game::new(seed, config)?;
    let mut player = strategy.build(seed ^ STRATEGY_SEED_SALT);
    let mut moves = Vec::new();

    while !game.is_game_over() && game.turns() < max_turns {
        let Some(direction) = player.choose(game.grid()) else {
            break;
        };
        if game.play(direction).moved() {
            moves.push(direction);
        } else {
            // A strategy returning an illegal move would spin forever
            log::warn!("{} chose illegal move {direction}", player.name());
            break;
        }
    }

    Ok(GameRecord {
        seed,
        config,
        strategy,
        score: game.score(),
        max_tile: game.grid().max_value(),
        turns: game.turns(),
        game_over: game.is_game_over(),
        moves,
        final_grid: game.grid().clone(),
    })
}

/// Aggregated statistics over many games.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchStats {
    /// Games completed.
    pub games_played: u64,
    /// Games that ended with no legal move (rest hit the turn limit).
    pub games_finished: u64,
    /// Sum of final scores.
    pub total_score: u64,
    /// Sum of squared final scores, for the standard deviation.
    score_sq_sum: f64,
    /// Best final score.
    pub best_score: u64,
    /// Seed of the best game.
    pub best_seed: Option<u64>,
    /// Sum of turns across all games.
    pub total_turns: u64,
    /// How many games ended with each max tile.
    pub max_tiles: BTreeMap<u32, u64>,
}

impl BatchStats {
    /// Add one game to the stats.
    pub fn add_record(&mut self, record: &GameRecord) {
        self.games_played += 1;
        if record.game_over {
            self.games_finished += 1;
        }
        self.total_score += record.score;
        #[allow(clippy::cast_precision_loss)]
        let score = record.score as f64;
        self.score_sq_sum += score * score;
        self.offer_best(record.score, record.seed);
        self.total_turns += u64::from(record.turns);
        *self.max_tiles.entry(record.max_tile).or_insert(0) += 1;
    }

    /// Merge another stats block into this one.
    pub fn merge(&mut self, other: &BatchStats) {
        self.games_played += other.games_played;
        self.games_finished += other.games_finished;
        self.total_score += other.total_score;
        self.score_sq_sum += other.score_sq_sum;
        if let Some(seed) = other.best_seed {
            self.offer_best(other.best_score, seed);
        }
        self.total_turns += other.total_turns;
        for (&tile, &count) in &other.max_tiles {
            *self.max_tiles.entry(tile).or_insert(0) += count;
        }
    }

    /// Keep the highest score; equal scores go to the smaller seed.
    fn offer_best(&mut self, score: u64, seed: u64) {
        let better = match self.best_seed {
            None => true,
            Some(best_seed) => {
                score > self.best_score || (score == self.best_score && seed < best_seed)
            }
        };
        if better {
            self.best_score = score;
            self.best_seed = Some(seed);
        }
    }

    /// Mean final score.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_score(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_score as f64 / self.games_played as f64
    }

    /// Population standard deviation of the final score.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn score_std_dev(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        let n = self.games_played as f64;
        let mean = self.mean_score();
        (self.score_sq_sum / n - mean * mean).max(0.0).sqrt()
    }

    /// Mean turns per game.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_turns(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.games_played as f64
    }

    /// Fraction of games whose max tile reached at least `value`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn reach_rate(&self, value: u32) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        let reached: u64 = self.max_tiles.range(value..).map(|(_, &count)| count).sum();
        reached as f64 / self.games_played as f64
    }
}

/// Batch run settings.
#[derive(Debug, Clone, Copy)]
pub struct BatchConfig {
    /// Per-game configuration.
    pub game: GameConfig,
    /// Strategy for every game.
    pub strategy: StrategyKind,
    /// Turn limit per game.
    pub max_turns: u32,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            strategy: StrategyKind::Corner,
            max_turns: 100_000,
        }
    }
}

/// Play `games` games in parallel, seeded `base_seed`, `base_seed + 1`, ...
///
/// Each thread accumulates its own stats which are merged at the end.
///
/// # Errors
///
/// Returns an error if the game config is invalid.
pub fn run_batch(base_seed: u64, games: u64, config: &BatchConfig) -> GameResult<BatchStats> {
    config.game.validate()?;

    let stats = (0..games)
        .into_par_iter()
        .fold(BatchStats::default, |mut local, i| {
            let seed = base_seed.wrapping_add(i);
            if let Ok(record) = play_out(seed, config.game, config.strategy, config.max_turns) {
                local.add_record(&record);
            }
            local
        })
        .reduce(BatchStats::default, |mut a, b| {
            a.merge(&b);
            a
        });

    log::info!(
        "batch of {} {} games: mean score {:.1}",
        stats.games_played,
        config.strategy,
        stats.mean_score()
    );
    Ok(stats)
}
