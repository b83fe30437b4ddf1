//! Numbered tiles.

use crate::game::Coord;
use serde::{Deserialize, Serialize};

/// Largest value a tile can hold.
///
/// Every power of two that fits in a `u32` is at most this, so any grid
/// accepted by [`Grid::from_rows`](crate::game::Grid::from_rows) respects it.
/// A tile at this value can no longer merge.
pub const MAX_TILE_VALUE: u32 = 1 << 31;

/// Stable identity of a tile within one game.
///
/// Ids are handed out in spawn order and never reused, so a renderer can
/// follow a tile across turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

/// A single numbered piece.
///
/// The position mirrors the cell holding the tile. Only [`Cell`](crate::game::Cell)
/// assignments write it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    id: TileId,
    value: u32,
    position: Coord,
}

impl Tile {
    /// Create a tile that has not been placed yet.
    #[must_use]
    pub const fn new(id: TileId, value: u32) -> Self {
        Self {
            id,
            value,
            position: Coord::new(0, 0),
        }
    }

    /// The tile's identity.
    #[must_use]
    pub const fn id(&self) -> TileId {
        self.id
    }

    /// The tile's value, always a power of two.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// The coordinate of the owning (or merge-target) cell.
    #[must_use]
    pub const fn position(&self) -> Coord {
        self.position
    }

    /// Column of the owning cell.
    #[must_use]
    pub const fn x(&self) -> u16 {
        self.position.x
    }

    /// Row of the owning cell.
    #[must_use]
    pub const fn y(&self) -> u16 {
        self.position.y
    }

    /// Whether merging with an equal tile would still fit in a tile value.
    #[must_use]
    pub const fn can_double(&self) -> bool {
        self.value < MAX_TILE_VALUE
    }

    pub(crate) const fn place(&mut self, position: Coord) {
        self.position = position;
    }

    /// Fold another tile's value into this one.
    pub(crate) const fn absorb(&mut self, other: &Tile) {
        self.value += other.value;
    }
}

/// Whether `value` is a legal tile value (a power of two, at least 2).
///
/// Legal values never exceed [`MAX_TILE_VALUE`].
#[must_use]
pub const fn is_tile_value(value: u32) -> bool {
    value >= 2 && value.is_power_of_two()
}
