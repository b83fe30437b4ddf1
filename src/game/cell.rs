//! Grid cells.

use crate::game::{Coord, Tile};

/// A fixed slot on the grid.
///
/// A cell holds at most one tile plus, while a move is being resolved, one
/// pending merge target of the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    coord: Coord,
    tile: Option<Tile>,
    merge_tile: Option<Tile>,
}

impl Cell {
    /// Create an empty cell at `coord`.
    #[must_use]
    pub const fn new(coord: Coord) -> Self {
        Self {
            coord,
            tile: None,
            merge_tile: None,
        }
    }

    /// The cell's coordinate.
    #[must_use]
    pub const fn coord(&self) -> Coord {
        self.coord
    }

    /// The occupying tile, if any.
    #[must_use]
    pub const fn tile(&self) -> Option<&Tile> {
        self.tile.as_ref()
    }

    /// The tile scheduled to merge into this cell, if any.
    #[must_use]
    pub const fn merge_tile(&self) -> Option<&Tile> {
        self.merge_tile.as_ref()
    }

    /// Whether the cell holds no tile.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tile.is_none()
    }

    /// Value of the occupying tile, or 0 when empty.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.tile.as_ref().map_or(0, Tile::value)
    }

    /// Whether a sliding `candidate` may stop here.
    ///
    /// True for an empty cell, or for an equal-valued tile that has not
    /// already accepted a merge this turn and is below [`MAX_TILE_VALUE`].
    ///
    /// [`MAX_TILE_VALUE`]: crate::game::MAX_TILE_VALUE
    #[must_use]
    pub fn can_merge(&self, candidate: &Tile) -> bool {
        match &self.tile {
            None => true,
            Some(tile) => {
                self.merge_tile.is_none() && tile.value() == candidate.value() && tile.can_double()
            }
        }
    }

    /// Place `tile` in the cell, moving it to the cell's coordinate.
    pub fn set_tile(&mut self, tile: Option<Tile>) {
        let coord = self.coord;
        self.tile = tile.map(|mut tile| {
            tile.place(coord);
            tile
        });
    }

    /// Schedule `tile` to merge into the occupying tile.
    pub fn set_merge_tile(&mut self, tile: Option<Tile>) {
        let coord = self.coord;
        self.merge_tile = tile.map(|mut tile| {
            tile.place(coord);
            tile
        });
    }

    /// Remove and return the occupying tile.
    pub fn take_tile(&mut self) -> Option<Tile> {
        self.tile.take()
    }

    /// Apply a pending merge.
    ///
    /// Returns the merged value (the score contribution), or 0 when there is
    /// nothing to merge.
    pub fn merge_tiles(&mut self) -> u32 {
        self.resolve_merge().map_or(0, |(merged, _)| merged.value())
    }

    /// Apply a pending merge, returning the surviving tile and the consumed one.
    pub(crate) fn resolve_merge(&mut self) -> Option<(Tile, Tile)> {
        let tile = self.tile.as_mut()?;
        let consumed = self.merge_tile.take()?;
        tile.absorb(&consumed);
        Some((*tile, consumed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::TileId;

    fn tile(id: u32, value: u32) -> Tile {
        Tile::new(TileId(id), value)
    }

    #[test]
    fn test_empty_cell_accepts_anything() {
        let cell = Cell::new(Coord::new(1, 2));
        assert!(cell.can_merge(&tile(1, 2)));
        assert!(cell.can_merge(&tile(1, 1024)));
        assert_eq!(cell.value(), 0);
    }

    #[test]
    fn test_can_merge_equal_values_once() {
        let mut cell = Cell::new(Coord::new(0, 0));
        cell.set_tile(Some(tile(1, 4)));
        assert!(cell.can_merge(&tile(2, 4)));
        assert!(!cell.can_merge(&tile(2, 8)));

        cell.set_merge_tile(Some(tile(2, 4)));
        assert!(!cell.can_merge(&tile(3, 4)));
    }

    #[test]
    fn test_max_value_tiles_do_not_merge() {
        use crate::game::MAX_TILE_VALUE;

        let mut cell = Cell::new(Coord::new(0, 0));
        cell.set_tile(Some(tile(1, MAX_TILE_VALUE)));
        assert!(!cell.can_merge(&tile(2, MAX_TILE_VALUE)));

        cell.set_tile(Some(tile(1, MAX_TILE_VALUE / 2)));
        assert!(cell.can_merge(&tile(2, MAX_TILE_VALUE / 2)));
    }

    #[test]
    fn test_set_tile_syncs_position() {
        let mut cell = Cell::new(Coord::new(3, 1));
        cell.set_tile(Some(tile(1, 2)));
        assert_eq!(cell.tile().unwrap().position(), Coord::new(3, 1));

        cell.set_merge_tile(Some(tile(2, 2)));
        assert_eq!(cell.merge_tile().unwrap().position(), Coord::new(3, 1));
    }

    #[test]
    fn test_merge_tiles() {
        let mut cell = Cell::new(Coord::new(0, 0));
        cell.set_tile(Some(tile(1, 8)));
        cell.set_merge_tile(Some(tile(2, 8)));

        assert_eq!(cell.merge_tiles(), 16);
        assert_eq!(cell.value(), 16);
        assert!(cell.merge_tile().is_none());
        assert_eq!(cell.tile().unwrap().id(), TileId(1));

        // Second call has nothing left to merge
        assert_eq!(cell.merge_tiles(), 0);
        assert_eq!(cell.value(), 16);
    }

    #[test]
    fn test_merge_without_target_is_noop() {
        let mut cell = Cell::new(Coord::new(0, 0));
        assert_eq!(cell.merge_tiles(), 0);

        cell.set_tile(Some(tile(1, 2)));
        assert_eq!(cell.merge_tiles(), 0);
        assert_eq!(cell.value(), 2);
    }
}
