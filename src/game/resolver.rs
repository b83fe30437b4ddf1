//! Move resolution: legality checks, sliding, and merge scheduling.
//!
//! A move is applied independently to every line of the grid. Each line is
//! ordered from the edge tiles slide toward, and is scanned in that order so
//! tiles relocated earlier in the scan block or absorb later ones. Merges are
//! only scheduled here; [`finalize_merges`] applies them once the whole move
//! has been resolved, which keeps a tile from merging twice in one turn.

use crate::game::{Coord, Direction, Grid, Tile, TileId};

/// How a tile reached its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideKind {
    /// Moved into an empty cell.
    Shift,
    /// Moved onto an equal tile and is scheduled to merge with it.
    Merge,
}

/// One tile relocation produced by [`slide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide {
    /// The tile that moved.
    pub tile: TileId,
    /// Where it started.
    pub from: Coord,
    /// Where it stopped.
    pub to: Coord,
    /// Whether it stopped on an empty cell or a merge target.
    pub kind: SlideKind,
}

/// A merge applied by [`finalize_merges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Merge {
    /// The surviving tile, already carrying the doubled value.
    pub survivor: Tile,
    /// The tile folded into the survivor and removed.
    pub consumed: Tile,
}

/// Whether moving in `direction` would change the grid.
///
/// A move is legal when some tile has a neighbour, toward the destination
/// edge, that it may stop on: an empty cell or an unmerged equal tile.
#[must_use]
pub fn can_move(grid: &Grid, direction: Direction) -> bool {
    grid.lines(direction).iter().any(|line| {
        line.windows(2).any(|pair| {
            grid.cell_at(pair[1])
                .tile()
                .is_some_and(|tile| grid.cell_at(pair[0]).can_merge(tile))
        })
    })
}

/// Whether any direction is legal.
#[must_use]
pub fn can_move_any(grid: &Grid) -> bool {
    Direction::ALL.iter().any(|&dir| can_move(grid, dir))
}

/// All legal directions, in [`Direction::ALL`] order.
#[must_use]
pub fn legal_moves(grid: &Grid) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|&dir| can_move(grid, dir))
        .collect()
}

/// Slide every tile as far as it can go in `direction`.
///
/// A tile travels back through cells it may stop on and takes the farthest
/// one. Landing on an occupied cell schedules a merge instead of applying it.
/// Returns the relocations in scan order; tiles that stay put are not listed.
pub fn slide(grid: &mut Grid, direction: Direction) -> Vec<Slide> {
    let mut slides = Vec::new();

    for line in grid.lines(direction) {
        for current in 1..line.len() {
            let Some(tile) = grid.cell_at(line[current]).tile().copied() else {
                continue;
            };

            let mut target = None;
            for &previous in line[..current].iter().rev() {
                if !grid.cell_at(previous).can_merge(&tile) {
                    break;
                }
                target = Some(previous);
            }

            let Some(target) = target else {
                continue;
            };
            let Some(moving) = grid.cell_at_mut(line[current]).take_tile() else {
                continue;
            };

            let destination = grid.cell_at_mut(target);
            let kind = if destination.is_empty() {
                destination.set_tile(Some(moving));
                SlideKind::Shift
            } else {
                destination.set_merge_tile(Some(moving));
                SlideKind::Merge
            };

            slides.push(Slide {
                tile: moving.id(),
                from: tile.position(),
                to: destination.coord(),
                kind,
            });
        }
    }

    slides
}

/// Apply every pending merge, visiting each cell exactly once.
///
/// Returns the merges in row-major cell order. The score of the turn is the
/// sum of the survivors' values.
pub fn finalize_merges(grid: &mut Grid) -> Vec<Merge> {
    grid.cells_mut()
        .iter_mut()
        .filter_map(|cell| cell.resolve_merge())
        .map(|(survivor, consumed)| Merge { survivor, consumed })
        .collect()
}

/// Resolve a move on a copy of the grid, without spawning.
///
/// Returns the resulting grid and the merge score, or `None` if the move is
/// illegal.
#[must_use]
pub fn preview(grid: &Grid, direction: Direction) -> Option<(Grid, u64)> {
    if !can_move(grid, direction) {
        return None;
    }
    let mut next = grid.clone();
    slide(&mut next, direction);
    let score = finalize_merges(&mut next)
        .iter()
        .map(|merge| u64::from(merge.survivor.value()))
        .sum();
    Some((next, score))
}
