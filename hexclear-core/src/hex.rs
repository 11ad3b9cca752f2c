//! Hex grid geometry: flat-top hexagons in odd-q offset coordinates

use serde::{Deserialize, Serialize};
use std::fmt;

/// Grid cell in offset coordinates (column q, row r)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub q: i8,
    pub r: i8,
}

impl Cell {
    pub const fn new(q: i8, r: i8) -> Self {
        Self { q, r }
    }

    /// Raw neighbor in a direction; ignores any board mask
    pub fn neighbor(&self, dir: Direction) -> Cell {
        let (dq, dr) = dir.offset(self.q % 2 != 0);
        Cell::new(self.q + dq, self.r + dr)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.q, self.r)
    }
}

/// Neighbor directions in cyclic order; opposites sit 3 apart
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    NE = 0,
    SE = 1,
    S = 2,
    SW = 3,
    NW = 4,
    N = 5,
}

/// All directions, walking the cycle once
pub const ALL_DIRECTIONS: [Direction; 6] = [
    Direction::NE,
    Direction::SE,
    Direction::S,
    Direction::SW,
    Direction::NW,
    Direction::N,
];

/// Neighbor offsets (dq, dr) for even columns, indexed by direction
pub const EVEN_COL_OFFSETS: [(i8, i8); 6] = [
    (1, -1),  // NE
    (1, 0),   // SE
    (0, 1),   // S
    (-1, 0),  // SW
    (-1, -1), // NW
    (0, -1),  // N
];

/// Neighbor offsets (dq, dr) for odd columns
pub const ODD_COL_OFFSETS: [(i8, i8); 6] = [
    (1, 0),  // NE
    (1, 1),  // SE
    (0, 1),  // S
    (-1, 1), // SW
    (-1, 0), // NW
    (0, -1), // N
];

impl Direction {
    /// Index on the 6-cycle (0-5)
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Direction {
        ALL_DIRECTIONS[(index % 6) as usize]
    }

    /// Direction three steps around the cycle
    pub fn opposite(self) -> Direction {
        Direction::from_index((self.index() + 3) % 6)
    }

    /// Offset (dq, dr) for a column of the given parity
    pub fn offset(self, odd_column: bool) -> (i8, i8) {
        if odd_column {
            ODD_COL_OFFSETS[self.index() as usize]
        } else {
            EVEN_COL_OFFSETS[self.index() as usize]
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Direction::NE => "NE",
            Direction::SE => "SE",
            Direction::S => "S",
            Direction::SW => "SW",
            Direction::NW => "NW",
            Direction::N => "N",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites() {
        assert_eq!(Direction::NE.opposite(), Direction::SW);
        assert_eq!(Direction::SE.opposite(), Direction::NW);
        assert_eq!(Direction::S.opposite(), Direction::N);
        for dir in ALL_DIRECTIONS {
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_even_column_neighbors() {
        let cell = Cell::new(2, 2);
        assert_eq!(cell.neighbor(Direction::NE), Cell::new(3, 1));
        assert_eq!(cell.neighbor(Direction::SE), Cell::new(3, 2));
        assert_eq!(cell.neighbor(Direction::S), Cell::new(2, 3));
        assert_eq!(cell.neighbor(Direction::SW), Cell::new(1, 2));
        assert_eq!(cell.neighbor(Direction::NW), Cell::new(1, 1));
        assert_eq!(cell.neighbor(Direction::N), Cell::new(2, 1));
    }

    #[test]
    fn test_odd_column_neighbors() {
        let cell = Cell::new(3, 2);
        assert_eq!(cell.neighbor(Direction::NE), Cell::new(4, 2));
        assert_eq!(cell.neighbor(Direction::SE), Cell::new(4, 3));
        assert_eq!(cell.neighbor(Direction::S), Cell::new(3, 3));
        assert_eq!(cell.neighbor(Direction::SW), Cell::new(2, 3));
        assert_eq!(cell.neighbor(Direction::NW), Cell::new(2, 2));
        assert_eq!(cell.neighbor(Direction::N), Cell::new(3, 1));
    }

    #[test]
    fn test_neighbors_are_mutual() {
        // Walking any direction and back lands on the start, on both parities
        for start in [Cell::new(2, 2), Cell::new(3, 2)] {
            for dir in ALL_DIRECTIONS {
                let there = start.neighbor(dir);
                assert_eq!(there.neighbor(dir.opposite()), start);
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Cell::new(4, 1).to_string(), "(4,1)");
        assert_eq!(Direction::NW.to_string(), "NW");
    }
}
