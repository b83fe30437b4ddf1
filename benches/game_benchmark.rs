//! Benchmarks for move resolution and complete games.
//!
//! Covers the per-turn hot path (legality check, slide, preview) and full
//! autoplayed games.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use slide2048::batch::{BatchConfig, play_out, run_batch};
use slide2048::game::{legal_moves, preview};
use slide2048::strategy::StrategyKind;
use slide2048::{Direction, Game, GameConfig, Grid};

/// A busy mid-game board with merges available in every direction.
fn mid_game_grid() -> Grid {
    Grid::from_rows(&[
        [2u32, 2, 4, 8],
        [4, 0, 4, 16],
        [8, 8, 0, 32],
        [16, 2, 2, 64],
    ])
    .unwrap()
}

fn bench_turn(c: &mut Criterion) {
    let grid = mid_game_grid();

    c.bench_function("legal_moves_4x4", |b| {
        b.iter(|| black_box(legal_moves(black_box(&grid))));
    });

    c.bench_function("preview_all_directions_4x4", |b| {
        b.iter(|| {
            for dir in Direction::ALL {
                black_box(preview(black_box(&grid), dir));
            }
        });
    });

    c.bench_function("play_turn_4x4", |b| {
        b.iter(|| {
            let mut game = Game::from_grid(grid.clone(), 42, GameConfig::default()).unwrap();
            black_box(game.play(black_box(Direction::Left)))
        });
    });
}

fn bench_full_game(c: &mut Criterion) {
    let config = GameConfig::default();

    c.bench_function("full_game_corner", |b| {
        b.iter(|| black_box(play_out(black_box(42), config, StrategyKind::Corner, u32::MAX)));
    });

    c.bench_function("full_game_greedy", |b| {
        b.iter(|| black_box(play_out(black_box(42), config, StrategyKind::Greedy, u32::MAX)));
    });
}

fn bench_batch(c: &mut Criterion) {
    // 64 games across the rayon pool
    let config = BatchConfig::default();

    c.bench_function("batch_64_corner", |b| {
        b.iter(|| black_box(run_batch(black_box(0), 64, &config)));
    });
}

criterion_group!(benches, bench_turn, bench_full_game, bench_batch);
criterion_main!(benches);
