#![no_main]

//! Turn sequence fuzzer.
//!
//! Builds a board from fuzzer-chosen values (or a fresh seeded game) and
//! plays a fuzzer-chosen sequence of directions, checking after every turn:
//! 1. Board invariants hold
//! 2. Illegal moves leave the board untouched
//! 3. Score only grows by the reported delta
//! 4. Game over exactly when no direction is legal

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use slide2048::game::{can_move, can_move_any, check_invariants};
use slide2048::{Direction, Game, GameConfig, Grid};

/// A fuzzer-generated direction.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzDirection {
    Up,
    Down,
    Left,
    Right,
}

impl From<FuzzDirection> for Direction {
    fn from(dir: FuzzDirection) -> Self {
        match dir {
            FuzzDirection::Up => Direction::Up,
            FuzzDirection::Down => Direction::Down,
            FuzzDirection::Left => Direction::Left,
            FuzzDirection::Right => Direction::Right,
        }
    }
}

/// Structured input for turn fuzzing.
#[derive(Arbitrary, Debug)]
struct TurnInput {
    /// Board edge length (mapped into 2..=8).
    size: u8,
    /// Exponents for a starting board; empty means a fresh game.
    exponents: Vec<u8>,
    /// Spawn seed.
    seed: u64,
    /// Chance of a 4, in 1/255ths.
    four_weight: u8,
    /// Moves to play.
    moves: Vec<FuzzDirection>,
}

fuzz_target!(|input: TurnInput| {
    let size = u16::from(input.size % 7) + 2;
    let config = GameConfig {
        size,
        four_probability: f64::from(input.four_weight) / 255.0,
        ..GameConfig::default()
    };

    let game = if input.exponents.is_empty() {
        Game::new(input.seed, config)
    } else {
        // Cycle the exponents over the board, 0 = empty, capped at 2^16
        let n = usize::from(size);
        let rows: Vec<Vec<u32>> = (0..n)
            .map(|y| {
                (0..n)
                    .map(|x| {
                        let exp = input.exponents[(y * n + x) % input.exponents.len()] % 17;
                        if exp == 0 { 0 } else { 1u32 << exp }
                    })
                    .collect()
            })
            .collect();
        let Ok(grid) = Grid::from_rows(&rows) else {
            return;
        };
        Game::from_grid(grid, input.seed, config)
    };
    let Ok(mut game) = game else {
        return;
    };

    for dir in input.moves.into_iter().take(500).map(Direction::from) {
        let before = game.grid().clone();
        let score = game.score();
        let legal = can_move(&before, dir) && !game.is_game_over();

        let turn = game.play(dir);

        assert_eq!(turn.moved(), legal, "legality mismatch for {dir}");
        if !legal {
            assert_eq!(game.grid(), &before, "illegal move changed the board");
            assert_eq!(turn.score_delta, 0);
        }
        assert_eq!(game.score(), score + turn.score_delta);

        let violations = check_invariants(game.grid());
        assert!(violations.is_empty(), "invariant violations: {violations:?}");
        assert_eq!(game.is_game_over(), !can_move_any(game.grid()));
    }
});
