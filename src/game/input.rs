//! Turning raw input into directions.
//!
//! Key codes and swipe gestures are resolved here so the controller only
//! ever sees a [`Direction`].

use crate::game::Direction;

impl Direction {
    /// Map a key to a direction.
    ///
    /// `w`/`k` Up, `s`/`j` Down, `a`/`h` Left, `d`/`l` Right (either case).
    #[must_use]
    pub const fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'w' | 'k' => Some(Direction::Up),
            's' | 'j' => Some(Direction::Down),
            'a' | 'h' => Some(Direction::Left),
            'd' | 'l' => Some(Direction::Right),
            _ => None,
        }
    }
}

/// One touch gesture, from first contact to release.
///
/// Screen coordinates grow rightward and downward. A session is created per
/// gesture and consumed when it finishes, so nothing leaks between turns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swipe {
    start: (f64, f64),
    end: (f64, f64),
}

impl Swipe {
    /// Begin a gesture at the first touch point.
    #[must_use]
    pub const fn start(x: f64, y: f64) -> Self {
        Self {
            start: (x, y),
            end: (x, y),
        }
    }

    /// Record the latest touch point.
    pub const fn update(&mut self, x: f64, y: f64) {
        self.end = (x, y);
    }

    /// Resolve the gesture.
    ///
    /// The axis with the larger travel wins; equal travel counts as
    /// vertical. A gesture that never moved resolves to `None`.
    #[must_use]
    pub fn finish(self) -> Option<Direction> {
        let dx = self.end.0 - self.start.0;
        let dy = self.end.1 - self.start.1;

        if dx.abs() < f64::EPSILON && dy.abs() < f64::EPSILON {
            return None;
        }

        if dx.abs() > dy.abs() {
            Some(if dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            })
        } else {
            Some(if dy > 0.0 {
                Direction::Down
            } else {
                Direction::Up
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Direction::from_key('w'), Some(Direction::Up));
        assert_eq!(Direction::from_key('K'), Some(Direction::Up));
        assert_eq!(Direction::from_key('s'), Some(Direction::Down));
        assert_eq!(Direction::from_key('j'), Some(Direction::Down));
        assert_eq!(Direction::from_key('a'), Some(Direction::Left));
        assert_eq!(Direction::from_key('h'), Some(Direction::Left));
        assert_eq!(Direction::from_key('d'), Some(Direction::Right));
        assert_eq!(Direction::from_key('l'), Some(Direction::Right));
        assert_eq!(Direction::from_key('q'), None);
        assert_eq!(Direction::from_key(' '), None);
    }

    #[test]
    fn test_swipe_dominant_axis() {
        let mut swipe = Swipe::start(100.0, 100.0);
        swipe.update(180.0, 120.0);
        assert_eq!(swipe.finish(), Some(Direction::Right));

        let mut swipe = Swipe::start(100.0, 100.0);
        swipe.update(90.0, 20.0);
        assert_eq!(swipe.finish(), Some(Direction::Up));

        let mut swipe = Swipe::start(100.0, 100.0);
        swipe.update(40.0, 110.0);
        assert_eq!(swipe.finish(), Some(Direction::Left));

        let mut swipe = Swipe::start(0.0, 0.0);
        swipe.update(5.0, 30.0);
        assert_eq!(swipe.finish(), Some(Direction::Down));
    }

    #[test]
    fn test_swipe_tie_is_vertical() {
        let mut swipe = Swipe::start(0.0, 0.0);
        swipe.update(10.0, 10.0);
        assert_eq!(swipe.finish(), Some(Direction::Down));
    }

    #[test]
    fn test_tap_is_not_a_swipe() {
        assert_eq!(Swipe::start(3.0, 4.0).finish(), None);
    }
}
