//! What is known about one seat's hand

use crate::dsl::{Attr, CmpOp};
use serde::{Deserialize, Serialize};
use std::fmt;
use types::{Hand, Rank, Suit};

/// An inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bound {
    pub min: i32,
    pub max: i32,
}

impl Bound {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    pub fn contains(&self, value: i32) -> bool {
        self.min <= value && value <= self.max
    }

    fn intersect(self, other: Bound) -> Bound {
        Bound::new(self.min.max(other.min), self.max.min(other.max))
    }
}

/// Ranges for every hand attribute a constraint can mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandBounds {
    pub points: Bound,
    pub lengths: [Bound; 4],
    pub aces: Bound,
    pub kings: Bound,
}

impl Default for HandBounds {
    fn default() -> Self {
        Self {
            points: Bound::new(0, 37),
            lengths: [Bound::new(0, 13); 4],
            aces: Bound::new(0, 4),
            kings: Bound::new(0, 4),
        }
    }
}

impl HandBounds {
    /// Bounds pinned to exactly this hand.
    pub fn exact(hand: &Hand) -> Self {
        let pin = |v: u8| Bound::new(i32::from(v), i32::from(v));
        Self {
            points: pin(hand.hcp()),
            lengths: Suit::ALL.map(|suit| pin(hand.length(suit))),
            aces: pin(hand.count_rank(Rank::Ace)),
            kings: pin(hand.count_rank(Rank::King)),
        }
    }

    pub fn get(&self, attr: Attr) -> Bound {
        match attr {
            Attr::Points => self.points,
            Attr::Length(suit) => self.lengths[suit.idx()],
            Attr::Aces => self.aces,
            Attr::Kings => self.kings,
        }
    }

    fn get_mut(&mut self, attr: Attr) -> &mut Bound {
        match attr {
            Attr::Points => &mut self.points,
            Attr::Length(suit) => &mut self.lengths[suit.idx()],
            Attr::Aces => &mut self.aces,
            Attr::Kings => &mut self.kings,
        }
    }

    pub fn length(&self, suit: Suit) -> Bound {
        self.lengths[suit.idx()]
    }

    /// Restrict `attr` to values satisfying `attr op value`. `!=` only
    /// narrows when it trims an endpoint.
    pub fn narrow(&mut self, attr: Attr, op: CmpOp, value: i32) {
        let bound = self.get_mut(attr);
        match op {
            CmpOp::Lt => bound.max = bound.max.min(value - 1),
            CmpOp::Le => bound.max = bound.max.min(value),
            CmpOp::Eq => *bound = bound.intersect(Bound::new(value, value)),
            CmpOp::Ge => bound.min = bound.min.max(value),
            CmpOp::Gt => bound.min = bound.min.max(value + 1),
            CmpOp::Ne => {
                if bound.min == value {
                    bound.min += 1;
                } else if bound.max == value {
                    bound.max -= 1;
                }
            }
        }
    }

    pub fn intersect(&self, other: &HandBounds) -> HandBounds {
        let mut lengths = self.lengths;
        for (length, theirs) in lengths.iter_mut().zip(other.lengths) {
            *length = length.intersect(theirs);
        }
        HandBounds {
            points: self.points.intersect(other.points),
            lengths,
            aces: self.aces.intersect(other.aces),
            kings: self.kings.intersect(other.kings),
        }
    }

    /// False when some range is empty or the suit lengths cannot total 13.
    pub fn is_satisfiable(&self) -> bool {
        let ranges = [self.points, self.aces, self.kings];
        if ranges.iter().chain(&self.lengths).any(Bound::is_empty) {
            return false;
        }
        let min_total: i32 = self.lengths.iter().map(|b| b.min).sum();
        let max_total: i32 = self.lengths.iter().map(|b| b.max).sum();
        min_total <= 13 && 13 <= max_total
    }
}

impl fmt::Display for HandBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let points = match (self.points.min, self.points.max) {
            (0, 37) => "? hcp".to_string(),
            (min, 37) => format!("{min}+ hcp"),
            (0, max) => format!("0-{max} hcp"),
            (min, max) if min == max => format!("{min} hcp"),
            (min, max) => format!("{min}-{max} hcp"),
        };
        let suits: Vec<String> = Suit::ALL
            .iter()
            .filter_map(|&suit| {
                let c = suit.to_char();
                match (self.length(suit).min, self.length(suit).max) {
                    (0, 13) => None,
                    (min, 13) => Some(format!("{min}+{c}")),
                    (0, max) => Some(format!("0-{max}{c}")),
                    (min, max) if min == max => Some(format!("{min}{c}")),
                    (min, max) => Some(format!("{min}-{max}{c}")),
                }
            })
            .collect();
        if suits.is_empty() {
            write!(f, "{points}")
        } else {
            write!(f, "{points}, {}", suits.join(" "))
        }
    }
}
