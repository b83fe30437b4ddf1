//! Grid coordinates and move directions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A resolved logical move direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Tiles slide toward row 0.
    Up,
    /// Tiles slide toward the last row.
    Down,
    /// Tiles slide toward column 0.
    Left,
    /// Tiles slide toward the last column.
    Right,
}

impl Direction {
    /// All four directions, in the order legality is probed.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Whether tiles move along columns for this direction.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Whether the natural line order is reversed (tiles slide toward the high edge).
    #[must_use]
    pub const fn is_reversed(self) -> bool {
        matches!(self, Direction::Down | Direction::Right)
    }

    /// The opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a direction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction: {0:?}")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            "left" | "l" => Ok(Direction::Left),
            "right" | "r" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parse() {
        assert_eq!("Up".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!(" down ".parse::<Direction>().unwrap(), Direction::Down);
        assert_eq!("l".parse::<Direction>().unwrap(), Direction::Left);
        assert_eq!("RIGHT".parse::<Direction>().unwrap(), Direction::Right);
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_direction_axes() {
        assert!(Direction::Up.is_vertical());
        assert!(!Direction::Left.is_vertical());
        assert!(Direction::Down.is_reversed());
        assert!(Direction::Right.is_reversed());
        assert!(!Direction::Up.is_reversed());
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_direction_display_round_trip() {
        for dir in Direction::ALL {
            assert_eq!(dir.to_string().parse::<Direction>().unwrap(), dir);
        }
    }
}
