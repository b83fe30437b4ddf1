//! Game state controller.
//!
//! Drives one turn at a time through `Idle → Resolving → Finalizing →
//! (GameOver | Idle)` and reports what happened so renderers and score
//! keepers can follow along.

use crate::error::{GameError, GameResult};
use crate::game::grid::{DEFAULT_SIZE, MAX_SIZE, MIN_SIZE};
use crate::game::invariants::assert_invariants;
use crate::game::resolver::{SlideKind, can_move, can_move_any, finalize_merges, slide};
use crate::game::{Coord, Direction, Grid, Tile, TileId};
use serde::{Deserialize, Serialize};

/// Probability that a spawned tile is a 4 rather than a 2.
pub const DEFAULT_FOUR_PROBABILITY: f64 = 0.1;

/// Number of tiles placed on a fresh board.
pub const DEFAULT_START_TILES: usize = 2;

/// Configuration for a game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board edge length.
    pub size: u16,
    /// Tiles spawned when a game starts.
    pub start_tiles: usize,
    /// Chance that a spawned tile is a 4.
    pub four_probability: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            start_tiles: DEFAULT_START_TILES,
            four_probability: DEFAULT_FOUR_PROBABILITY,
        }
    }
}

impl GameConfig {
    /// Check that every field is in range.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] naming the first bad field.
    pub fn validate(&self) -> GameResult<()> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(GameError::Config(format!(
                "size {} outside {MIN_SIZE}..={MAX_SIZE}",
                self.size
            )));
        }
        let cells = usize::from(self.size) * usize::from(self.size);
        if self.start_tiles == 0 || self.start_tiles > cells {
            return Err(GameError::Config(format!(
                "start_tiles {} outside 1..={cells}",
                self.start_tiles
            )));
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(GameError::Config(format!(
                "four_probability {} outside 0..=1",
                self.four_probability
            )));
        }
        Ok(())
    }
}

/// Controller state between inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for a direction.
    Idle,
    /// Tiles are being slid.
    Resolving,
    /// Merges are applied and a tile spawned.
    Finalizing,
    /// No direction is legal; input is ignored until a new game starts.
    GameOver,
}

/// Something a renderer can animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEvent {
    /// A tile slid from one cell to another.
    Moved {
        /// The tile that moved.
        tile: TileId,
        /// Starting cell.
        from: Coord,
        /// Destination cell.
        to: Coord,
        /// Whether it landed on an empty cell or a merge target.
        kind: SlideKind,
    },
    /// Two tiles merged; `consumed` is gone and `tile` holds `value`.
    Merged {
        /// The surviving tile.
        tile: TileId,
        /// The tile that was removed.
        consumed: TileId,
        /// Where the merge happened.
        at: Coord,
        /// The surviving tile's new value.
        value: u32,
    },
    /// A new tile appeared.
    Spawned {
        /// The new tile.
        tile: TileId,
        /// Where it appeared.
        at: Coord,
        /// Its value (2 or 4).
        value: u32,
    },
}

/// Why an input did not consume a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Nothing can slide or merge in that direction.
    Blocked,
    /// The game has already ended.
    GameOver,
}

/// Whether an input consumed a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The move was legal and fully resolved.
    Moved,
    /// The input was a no-op.
    Ignored(IgnoreReason),
}

/// Result of one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// The requested direction.
    pub direction: Direction,
    /// Whether the turn happened.
    pub outcome: TurnOutcome,
    /// Sum of the values produced by merges this turn.
    pub score_delta: u64,
    /// Moves, then merges, then the spawn.
    pub events: Vec<TurnEvent>,
    /// The tile spawned at the end of the turn.
    pub spawned: Option<Tile>,
    /// Whether the game ended with this turn.
    pub game_over: bool,
}

impl Turn {
    fn ignored(direction: Direction, reason: IgnoreReason) -> Self {
        Self {
            direction,
            outcome: TurnOutcome::Ignored(reason),
            score_delta: 0,
            events: Vec::new(),
            spawned: None,
            game_over: reason == IgnoreReason::GameOver,
        }
    }

    /// Whether the input consumed a turn.
    #[must_use]
    pub fn moved(&self) -> bool {
        self.outcome == TurnOutcome::Moved
    }
}

/// A single game: grid, spawner and score.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    seed: u64,
    grid: Grid,
    rng: fastrand::Rng,
    phase: Phase,
    score: u64,
    turns: u32,
    next_tile_id: u32,
}

impl Game {
    /// Start a game with `config.start_tiles` spawned tiles.
    ///
    /// The same seed and config always produce the same game.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid.
    pub fn new(seed: u64, config: GameConfig) -> GameResult<Self> {
        config.validate()?;
        let mut game = Self {
            config,
            seed,
            grid: Grid::new(config.size)?,
            rng: fastrand::Rng::with_seed(seed),
            phase: Phase::Idle,
            score: 0,
            turns: 0,
            next_tile_id: 1,
        };
        game.spawn_start_tiles();
        Ok(game)
    }

    /// Continue from an existing grid, spawning with `seed`.
    ///
    /// The config's size is taken from the grid.
    ///
    /// # Errors
    ///
    /// Returns an error if the rest of the config is invalid.
    pub fn from_grid(grid: Grid, seed: u64, config: GameConfig) -> GameResult<Self> {
        let config = GameConfig {
            size: grid.size(),
            ..config
        };
        config.validate()?;
        let phase = if can_move_any(&grid) {
            Phase::Idle
        } else {
            Phase::GameOver
        };
        Ok(Self {
            config,
            seed,
            next_tile_id: grid.max_tile_id() + 1,
            grid,
            rng: fastrand::Rng::with_seed(seed),
            phase,
            score: 0,
            turns: 0,
        })
    }

    /// Discard the board and start over with a fresh grid.
    pub fn new_game(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = fastrand::Rng::with_seed(seed);
        for cell in self.grid.cells_mut() {
            cell.set_tile(None);
            cell.set_merge_tile(None);
        }
        self.phase = Phase::Idle;
        self.score = 0;
        self.turns = 0;
        self.next_tile_id = 1;
        self.spawn_start_tiles();
    }

    /// The game configuration.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seed of the current game.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// The board.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current controller phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Cumulative score.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Number of legal turns played.
    #[must_use]
    pub const fn turns(&self) -> u32 {
        self.turns
    }

    /// Whether no further input will be accepted.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Whether `direction` is legal right now.
    #[must_use]
    pub fn can_move(&self, direction: Direction) -> bool {
        !self.is_game_over() && can_move(&self.grid, direction)
    }

    /// Map `key` to a direction and play it.
    ///
    /// Unrecognized keys are ignored and return `None`.
    pub fn play_key(&mut self, key: char) -> Option<Turn> {
        let Some(direction) = Direction::from_key(key) else {
            log::trace!("ignoring unmapped key {key:?}");
            return None;
        };
        Some(self.play(direction))
    }

    /// Play one turn.
    ///
    /// Illegal moves and moves after game over leave everything untouched.
    pub fn play(&mut self, direction: Direction) -> Turn {
        if self.phase == Phase::GameOver {
            log::trace!("ignoring {direction}: game over");
            return Turn::ignored(direction, IgnoreReason::GameOver);
        }
        if !can_move(&self.grid, direction) {
            log::trace!("ignoring {direction}: blocked");
            return Turn::ignored(direction, IgnoreReason::Blocked);
        }

        self.phase = Phase::Resolving;
        let mut events: Vec<TurnEvent> = slide(&mut self.grid, direction)
            .into_iter()
            .map(|slide| TurnEvent::Moved {
                tile: slide.tile,
                from: slide.from,
                to: slide.to,
                kind: slide.kind,
            })
            .collect();

        self.phase = Phase::Finalizing;
        let mut score_delta = 0u64;
        for merge in finalize_merges(&mut self.grid) {
            score_delta += u64::from(merge.survivor.value());
            events.push(TurnEvent::Merged {
                tile: merge.survivor.id(),
                consumed: merge.consumed.id(),
                at: merge.survivor.position(),
                value: merge.survivor.value(),
            });
        }

        let spawned = self.spawn_tile();
        if let Some(tile) = spawned {
            events.push(TurnEvent::Spawned {
                tile: tile.id(),
                at: tile.position(),
                value: tile.value(),
            });
        }

        self.score += score_delta;
        self.turns += 1;

        let game_over = !can_move_any(&self.grid);
        self.phase = if game_over {
            log::info!(
                "game over after {} turns: score {}, max tile {}",
                self.turns,
                self.score,
                self.grid.max_value()
            );
            Phase::GameOver
        } else {
            Phase::Idle
        };

        log::debug!(
            "turn {} {direction}: +{score_delta}, {} events",
            self.turns,
            events.len()
        );
        assert_invariants(&self.grid);

        Turn {
            direction,
            outcome: TurnOutcome::Moved,
            score_delta,
            events,
            spawned,
            game_over,
        }
    }

    fn spawn_start_tiles(&mut self) {
        for _ in 0..self.config.start_tiles {
            self.spawn_tile();
        }
        if !can_move_any(&self.grid) {
            self.phase = Phase::GameOver;
        }
    }

    /// Spawn one tile on a random empty cell, unless the grid is full.
    fn spawn_tile(&mut self) -> Option<Tile> {
        let coord = self.grid.random_empty_cell(&mut self.rng)?;
        let value = if self.rng.f64() < self.config.four_probability {
            4
        } else {
            2
        };
        let tile = Tile::new(TileId(self.next_tile_id), value);
        self.next_tile_id += 1;
        self.grid.place(coord, tile);
        self.grid.cell(coord).and_then(|cell| cell.tile()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_from(rows: &[[u32; 4]]) -> Game {
        let grid = Grid::from_rows(rows).unwrap();
        Game::from_grid(grid, 1, GameConfig::default()).unwrap()
    }

    #[test]
    fn test_new_game_spawns_start_tiles() {
        let game = Game::new(42, GameConfig::default()).unwrap();
        assert_eq!(game.grid().tile_count(), 2);
        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(game.score(), 0);
        for tile in game.grid().tiles() {
            assert!(tile.value() == 2 || tile.value() == 4);
        }
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = Game::new(99, GameConfig::default()).unwrap();
        let mut b = Game::new(99, GameConfig::default()).unwrap();
        for dir in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
            assert_eq!(a.play(dir), b.play(dir));
        }
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn test_invalid_config() {
        let bad_size = GameConfig {
            size: 1,
            ..GameConfig::default()
        };
        assert!(matches!(Game::new(0, bad_size), Err(GameError::Config(_))));

        let bad_prob = GameConfig {
            four_probability: 1.5,
            ..GameConfig::default()
        };
        assert!(bad_prob.validate().is_err());

        let bad_start = GameConfig {
            start_tiles: 17,
            ..GameConfig::default()
        };
        assert!(bad_start.validate().is_err());
    }

    #[test]
    fn test_simple_turn() {
        let mut game = game_from(&[[2, 0, 0, 2], [0; 4], [0; 4], [0; 4]]);
        let turn = game.play(Direction::Left);
        assert!(turn.moved());
        assert_eq!(turn.score_delta, 4);
        assert_eq!(game.grid().value_at(Coord::new(0, 0)), 4);
        assert_eq!(game.score(), 4);
        assert_eq!(game.turns(), 1);
        assert_eq!(game.grid().tile_count(), 2);

        let spawned = turn.spawned.unwrap();
        assert!(matches!(
            turn.events.last(),
            Some(TurnEvent::Spawned { tile, .. }) if *tile == spawned.id()
        ));
        assert!(turn.events.iter().any(|event| matches!(
            event,
            TurnEvent::Merged { value: 4, at, .. } if *at == Coord::new(0, 0)
        )));
    }

    #[test]
    fn test_blocked_turn_is_noop() {
        let mut game = game_from(&[[2, 4, 8, 16], [0; 4], [0; 4], [0; 4]]);
        let before = game.grid().clone();
        let turn = game.play(Direction::Left);
        assert_eq!(turn.outcome, TurnOutcome::Ignored(IgnoreReason::Blocked));
        assert_eq!(turn.score_delta, 0);
        assert!(turn.events.is_empty());
        assert!(turn.spawned.is_none());
        assert_eq!(game.grid(), &before);
        assert_eq!(game.turns(), 0);
        assert_eq!(game.phase(), Phase::Idle);
    }

    #[test]
    fn test_full_grid_with_merge_left_is_not_over() {
        let mut game = game_from(&[
            [2, 2, 4, 8],
            [4, 8, 16, 32],
            [8, 16, 32, 64],
            [16, 32, 64, 128],
        ]);
        let turn = game.play(Direction::Left);
        assert!(turn.moved());
        assert_eq!(turn.score_delta, 4);
        assert!(turn.spawned.is_some());
        assert!(game.grid().is_full());
        // Row 0 is now [4, 4, 8, x]
        assert!(!turn.game_over);
        assert_eq!(game.phase(), Phase::Idle);
    }

    #[test]
    fn test_game_over_detected_after_spawn() {
        let grid = Grid::from_rows(&[[2u32, 2], [8, 16]]).unwrap();
        let config = GameConfig {
            four_probability: 0.0,
            ..GameConfig::default()
        };
        let mut game = Game::from_grid(grid, 3, config).unwrap();
        let turn = game.play(Direction::Left);
        assert!(turn.moved());
        assert_eq!(game.grid().rows(), vec![vec![4, 2], vec![8, 16]]);
        assert!(turn.game_over);
        assert!(game.is_game_over());
        assert_eq!(game.phase(), Phase::GameOver);
    }

    #[test]
    fn test_game_over_rejects_input() {
        let mut game = game_from(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(game.is_game_over());
        for dir in Direction::ALL {
            let turn = game.play(dir);
            assert_eq!(turn.outcome, TurnOutcome::Ignored(IgnoreReason::GameOver));
            assert!(turn.game_over);
        }
    }

    #[test]
    fn test_play_key() {
        let mut game = game_from(&[[2, 0, 0, 2], [0; 4], [0; 4], [0; 4]]);
        assert!(game.play_key('x').is_none());
        assert_eq!(game.turns(), 0);
        let turn = game.play_key('a').unwrap();
        assert_eq!(turn.direction, Direction::Left);
        assert!(turn.moved());
    }

    #[test]
    fn test_tile_ids_continue_after_from_grid() {
        let mut game = game_from(&[[2, 0, 0, 2], [0; 4], [0; 4], [0; 4]]);
        let turn = game.play(Direction::Left);
        assert_eq!(turn.spawned.unwrap().id(), TileId(3));
    }

    #[test]
    fn test_moves_report_slide_kind() {
        let mut game = game_from(&[[2, 0, 2, 4], [0; 4], [0; 4], [0; 4]]);
        let turn = game.play(Direction::Left);
        let kinds: Vec<_> = turn
            .events
            .iter()
            .filter_map(|event| match *event {
                TurnEvent::Moved { to, kind, .. } => Some((to, kind)),
                _ => None,
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                (Coord::new(0, 0), SlideKind::Merge),
                (Coord::new(1, 0), SlideKind::Shift),
            ]
        );
    }

    #[test]
    fn test_max_value_tiles_stay_put() {
        use crate::game::MAX_TILE_VALUE;

        let grid = Grid::from_rows(&[[MAX_TILE_VALUE, MAX_TILE_VALUE], [0, 0]]).unwrap();
        let mut game = Game::from_grid(grid, 1, GameConfig::default()).unwrap();
        let turn = game.play(Direction::Left);
        assert_eq!(turn.outcome, TurnOutcome::Ignored(IgnoreReason::Blocked));

        let turn = game.play(Direction::Down);
        assert!(turn.moved());
        assert_eq!(turn.score_delta, 0);
        assert_eq!(game.grid().rows()[1], vec![MAX_TILE_VALUE, MAX_TILE_VALUE]);
    }

    #[test]
    fn test_large_merges_in_one_turn() {
        let big = 1u32 << 30;
        let mut game = game_from(&[[big, big, big, big], [big, big, 0, 0], [0; 4], [0; 4]]);
        let turn = game.play(Direction::Left);
        assert_eq!(turn.score_delta, 3 << 31);
        assert_eq!(game.score(), 3 << 31);
        assert_eq!(&game.grid().rows()[0][..2], &[1 << 31, 1 << 31]);
        assert_eq!(game.grid().rows()[1][0], 1 << 31);
    }

    /// Spawn `spawns` tiles one at a time on an empty board, returning how
    /// many were 2s and 4s.
    fn spawn_counts(four_probability: f64, spawns: u32) -> (u32, u32) {
        let config = GameConfig {
            four_probability,
            ..GameConfig::default()
        };
        let mut game = Game::from_grid(Grid::new(4).unwrap(), 17, config).unwrap();
        let (mut twos, mut fours) = (0, 0);
        for _ in 0..spawns {
            let tile = game.spawn_tile().unwrap();
            match tile.value() {
                2 => twos += 1,
                4 => fours += 1,
                other => panic!("spawned {other}"),
            }
            game.grid.cell_mut(tile.position()).unwrap().set_tile(None);
        }
        (twos, fours)
    }

    #[test]
    fn test_spawn_value_weighting() {
        let (twos, fours) = spawn_counts(DEFAULT_FOUR_PROBABILITY, 10_000);
        assert_eq!(twos + fours, 10_000);
        // 10% of 10k, with a generous margin
        assert!((850..=1150).contains(&fours), "{fours} fours");
    }

    #[test]
    fn test_spawn_probability_extremes() {
        assert_eq!(spawn_counts(0.0, 1000), (1000, 0));
        assert_eq!(spawn_counts(1.0, 1000), (0, 1000));
    }

    #[test]
    fn test_restart() {
        let mut game = Game::new(5, GameConfig::default()).unwrap();
        game.play(Direction::Left);
        game.play(Direction::Up);
        game.new_game(6);
        assert_eq!(game.seed(), 6);
        assert_eq!(game.score(), 0);
        assert_eq!(game.turns(), 0);
        assert_eq!(game.grid().tile_count(), 2);
        assert_eq!(game.grid(), Game::new(6, GameConfig::default()).unwrap().grid());
    }
}
