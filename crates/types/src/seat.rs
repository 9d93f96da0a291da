use serde::{Deserialize, Serialize};
use std::fmt;

/// A compass seat at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Seat {
    #[default]
    North,
    East,
    South,
    West,
}

impl Seat {
    pub const ALL: [Seat; 4] = [Seat::North, Seat::East, Seat::South, Seat::West];

    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn from_idx(idx: usize) -> Self {
        Self::ALL[idx % 4]
    }

    /// The seat that calls after this one.
    pub fn next(self) -> Self {
        Self::from_idx(self.idx() + 1)
    }

    pub fn partner(self) -> Self {
        Self::from_idx(self.idx() + 2)
    }

    /// Left-hand opponent: calls immediately after this seat.
    pub fn lho(self) -> Self {
        self.next()
    }

    /// Right-hand opponent: called immediately before this seat.
    pub fn rho(self) -> Self {
        Self::from_idx(self.idx() + 3)
    }

    pub fn to_char(self) -> char {
        match self {
            Seat::North => 'N',
            Seat::East => 'E',
            Seat::South => 'S',
            Seat::West => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Seat::North),
            'E' => Some(Seat::East),
            'S' => Some(Seat::South),
            'W' => Some(Seat::West),
            _ => None,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_rotation() {
        assert_eq!(Seat::North.next(), Seat::East);
        assert_eq!(Seat::West.next(), Seat::North);
        assert_eq!(Seat::East.partner(), Seat::West);
        assert_eq!(Seat::North.lho(), Seat::East);
        assert_eq!(Seat::North.rho(), Seat::West);
    }

    #[test]
    fn test_seat_parsing() {
        assert_eq!(Seat::from_char('s'), Some(Seat::South));
        assert_eq!(Seat::from_char('Q'), None);
    }
}
