use core::fmt;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A cell position on the area map. Both axes start at zero and grow to the right (`x`) and
/// downwards (`y`), matching how the map files are laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}

/// The four cardinal moves. Declaration order is the order in which the search visits
/// neighbours, see [NEIGHBOUR_ORDER].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

/// Fixed visiting order used by the breadth-first search. Path length does not depend on it, but
/// which of several equally short paths is returned does.
pub const NEIGHBOUR_ORDER: [Direction; 4] = [
    Direction::Right,
    Direction::Down,
    Direction::Left,
    Direction::Up,
];

impl Direction {
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
        }
    }
}

impl Coordinate {
    pub const fn new(x: u32, y: u32) -> Coordinate {
        Coordinate { x, y }
    }

    pub fn manhattan_distance(&self, other: &Coordinate) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// True if the two coordinates differ by exactly one step along exactly one axis.
    pub fn is_adjacent(&self, other: &Coordinate) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// The neighbour in the given direction, or [None] when the move would leave the
    /// non-negative quadrant.
    pub fn step(&self, dir: Direction) -> Option<Coordinate> {
        let (dx, dy) = dir.delta();
        let x = u32::try_from(self.x as i64 + dx).ok()?;
        let y = u32::try_from(self.y as i64 + dy).ok()?;
        Some(Coordinate::new(x, y))
    }

    /// Von Neumann neighbourhood in [NEIGHBOUR_ORDER].
    pub fn neumann_neighbourhood(&self) -> SmallVec<[Coordinate; 4]> {
        NEIGHBOUR_ORDER
            .iter()
            .filter_map(|&dir| self.step(dir))
            .collect()
    }
}

impl From<(u32, u32)> for Coordinate {
    fn from((x, y): (u32, u32)) -> Self {
        Coordinate::new(x, y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbourhood_follows_fixed_order() {
        let c = Coordinate::new(2, 2);
        let n = c.neumann_neighbourhood();
        assert_eq!(
            n.as_slice(),
            &[
                Coordinate::new(3, 2),
                Coordinate::new(2, 3),
                Coordinate::new(1, 2),
                Coordinate::new(2, 1)
            ]
        );
    }

    #[test]
    fn neighbourhood_clipped_at_origin() {
        let n = Coordinate::new(0, 0).neumann_neighbourhood();
        assert_eq!(n.as_slice(), &[Coordinate::new(1, 0), Coordinate::new(0, 1)]);
    }

    #[test]
    fn adjacency_excludes_diagonals() {
        let c = Coordinate::new(1, 1);
        assert!(c.is_adjacent(&Coordinate::new(1, 2)));
        assert!(!c.is_adjacent(&Coordinate::new(2, 2)));
        assert!(!c.is_adjacent(&c));
        assert_eq!(c.manhattan_distance(&Coordinate::new(3, 0)), 3);
    }
}
