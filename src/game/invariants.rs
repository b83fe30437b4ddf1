//! Grid invariants - sanity checks that detect bugs.
//!
//! These should NEVER trigger on a grid produced by the controller. If they
//! do, the resolver or a cell assignment is broken.

use crate::game::{Grid, is_tile_value};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invariant violation: {message}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl InvariantViolation {
    fn new(message: String) -> Self {
        Self { message }
    }
}

/// Check all grid invariants outside of move resolution.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(grid: &Grid) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for cell in grid.cells() {
        let coord = cell.coord();

        if let Some(tile) = cell.tile() {
            if !is_tile_value(tile.value()) {
                violations.push(InvariantViolation::new(format!(
                    "Tile {:?} at {coord} has value {} which is not a power of two >= 2",
                    tile.id(),
                    tile.value()
                )));
            }
            if tile.position() != coord {
                violations.push(InvariantViolation::new(format!(
                    "Tile {:?} in cell {coord} reports position {}",
                    tile.id(),
                    tile.position()
                )));
            }
        }

        match (cell.tile(), cell.merge_tile()) {
            (_, None) => {}
            (None, Some(pending)) => violations.push(InvariantViolation::new(format!(
                "Empty cell {coord} has pending merge tile {:?}",
                pending.id()
            ))),
            (Some(_), Some(pending)) => violations.push(InvariantViolation::new(format!(
                "Cell {coord} still has pending merge tile {:?} after the turn",
                pending.id()
            ))),
        }
    }

    let mut ids: Vec<_> = grid.tiles().map(|tile| tile.id()).collect();
    ids.sort_unstable();
    if ids.windows(2).any(|pair| pair[0] == pair[1]) {
        violations.push(InvariantViolation::new(
            "The same tile id occupies more than one cell".to_string(),
        ));
    }

    violations
}

/// Assert all grid invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(grid: &Grid) {
    let violations = check_invariants(grid);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Grid invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_grid: &Grid) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::resolver::slide;
    use crate::game::{Coord, Direction};

    #[test]
    fn test_valid_grid_has_no_violations() {
        let grid = Grid::from_rows(&[[2u32, 4, 0], [0, 8, 0], [0, 0, 2048]]).unwrap();
        assert!(check_invariants(&grid).is_empty());
    }

    #[test]
    fn test_pending_merge_is_reported() {
        let mut grid = Grid::from_rows(&[[2u32, 2], [0, 0]]).unwrap();
        slide(&mut grid, Direction::Left);
        let violations = check_invariants(&grid);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("pending merge"));
        assert!(violations[0].to_string().starts_with("Invariant violation"));
    }

    #[test]
    fn test_orphan_merge_tile_is_reported() {
        let mut grid = Grid::from_rows(&[[2u32, 0], [0, 0]]).unwrap();
        let tile = grid.cell(Coord::new(0, 0)).unwrap().tile().copied();
        grid.cell_mut(Coord::new(1, 1)).unwrap().set_merge_tile(tile);
        let violations = check_invariants(&grid);
        assert!(violations.iter().any(|v| v.message.contains("Empty cell")));
    }

    #[test]
    fn test_duplicate_ids_are_reported() {
        let mut grid = Grid::from_rows(&[[2u32, 0], [0, 0]]).unwrap();
        let tile = grid.cell(Coord::new(0, 0)).unwrap().tile().copied();
        grid.cell_mut(Coord::new(1, 0)).unwrap().set_tile(tile);
        let violations = check_invariants(&grid);
        assert!(violations.iter().any(|v| v.message.contains("same tile id")));
    }
}
