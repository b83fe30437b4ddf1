//! Automatic players.
//!
//! A strategy looks at the grid and picks a legal direction. All of them are
//! deterministic given their seed, so autoplayed games can be recorded and
//! replayed like human ones.

use crate::game::{Direction, Grid, legal_moves, preview};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Picks moves for an automatic player.
pub trait Strategy {
    /// Short name for reports.
    fn name(&self) -> &'static str;

    /// Choose a legal direction, or `None` if no direction is legal.
    fn choose(&mut self, grid: &Grid) -> Option<Direction>;
}

/// Uniformly random legal moves.
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    rng: fastrand::Rng,
}

impl RandomStrategy {
    /// Create a random player with its own seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose(&mut self, grid: &Grid) -> Option<Direction> {
        let moves = legal_moves(grid);
        if moves.is_empty() {
            return None;
        }
        Some(moves[self.rng.usize(..moves.len())])
    }
}

/// Takes the move with the best immediate merge score.
///
/// Ties go to the move leaving more empty cells, then to [`Direction::ALL`]
/// order.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyStrategy;

impl Strategy for GreedyStrategy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn choose(&mut self, grid: &Grid) -> Option<Direction> {
        let mut best: Option<(Direction, u64, usize)> = None;
        for dir in Direction::ALL {
            let Some((next, score)) = preview(grid, dir) else {
                continue;
            };
            let empty = next.empty_cells().len();
            let better = match best {
                None => true,
                Some((_, best_score, best_empty)) => {
                    score > best_score || (score == best_score && empty > best_empty)
                }
            };
            if better {
                best = Some((dir, score, empty));
            }
        }
        best.map(|(dir, _, _)| dir)
    }
}

/// Keeps tiles packed toward the bottom-left corner.
#[derive(Debug, Clone, Copy, Default)]
pub struct CornerStrategy;

impl CornerStrategy {
    /// Directions in order of preference.
    pub const PREFERENCE: [Direction; 4] = [
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::Up,
    ];
}

impl Strategy for CornerStrategy {
    fn name(&self) -> &'static str {
        "corner"
    }

    fn choose(&mut self, grid: &Grid) -> Option<Direction> {
        let legal = legal_moves(grid);
        Self::PREFERENCE.into_iter().find(|dir| legal.contains(dir))
    }
}

/// Named strategy, for configs and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// [`RandomStrategy`].
    Random,
    /// [`GreedyStrategy`].
    Greedy,
    /// [`CornerStrategy`].
    Corner,
}

impl StrategyKind {
    /// Every strategy.
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Random,
        StrategyKind::Greedy,
        StrategyKind::Corner,
    ];

    /// Instantiate the strategy. `seed` only matters for random play.
    #[must_use]
    pub fn build(self, seed: u64) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Random => Box::new(RandomStrategy::new(seed)),
            StrategyKind::Greedy => Box::new(GreedyStrategy),
            StrategyKind::Corner => Box::new(CornerStrategy),
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Random => "random",
            StrategyKind::Greedy => "greedy",
            StrategyKind::Corner => "corner",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown strategy: {s:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[[u32; 4]]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_strategies_return_none_when_stuck() {
        let stuck = grid(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        for kind in StrategyKind::ALL {
            assert_eq!(kind.build(1).choose(&stuck), None, "{kind}");
        }
    }

    #[test]
    fn test_strategies_pick_legal_moves() {
        let board = grid(&[[2, 4, 8, 16], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        for kind in StrategyKind::ALL {
            assert_eq!(kind.build(7).choose(&board), Some(Direction::Down), "{kind}");
        }
    }

    #[test]
    fn test_greedy_prefers_merges() {
        let board = grid(&[[0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [8, 8, 2, 0]]);
        // Left and Right both merge the 8s; Left comes first in ALL order
        let choice = GreedyStrategy.choose(&board);
        assert!(matches!(choice, Some(Direction::Left | Direction::Right)));
        let (_, score) = preview(&board, choice.unwrap()).unwrap();
        assert_eq!(score, 16);
    }

    #[test]
    fn test_corner_preference_order() {
        let board = grid(&[[0, 0, 0, 2], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        assert_eq!(CornerStrategy.choose(&board), Some(Direction::Down));

        let bottom = grid(&[[0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 2]]);
        assert_eq!(CornerStrategy.choose(&bottom), Some(Direction::Left));
    }

    #[test]
    fn test_random_is_seeded() {
        let board = grid(&[[2, 0, 0, 0], [0, 0, 0, 0], [0, 0, 4, 0], [0, 0, 0, 0]]);
        let mut a = RandomStrategy::new(11);
        let mut b = RandomStrategy::new(11);
        for _ in 0..10 {
            assert_eq!(a.choose(&board), b.choose(&board));
        }
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("Greedy".parse::<StrategyKind>().unwrap(), StrategyKind::Greedy);
        assert!("minimax".parse::<StrategyKind>().is_err());
        for kind in StrategyKind::ALL {
            assert_eq!(kind.to_string().parse::<StrategyKind>().unwrap(), kind);
            assert_eq!(kind.build(0).name(), kind.as_str());
        }
    }
}
