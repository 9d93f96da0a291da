use serde::{Deserialize, Serialize};
use std::fmt;

/// Card rank. Discriminants are the pip values, ace high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

/// Rank characters indexed by `rank as usize - 2`.
const RANK_CHARS: [char; 13] = [
    '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A',
];

const ASCENDING: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

impl Rank {
    /// Honours from the top down; `TOP_HONORS[..n]` is "the top n".
    pub const TOP_HONORS: [Rank; 5] = [Rank::Ace, Rank::King, Rank::Queen, Rank::Jack, Rank::Ten];

    /// Milton count: A=4, K=3, Q=2, J=1.
    pub fn hcp(self) -> u8 {
        (self as u8).saturating_sub(10)
    }

    pub fn to_char(self) -> char {
        RANK_CHARS[self as usize - 2]
    }

    /// Accepts `0` for the ten as some hand records write "10" that way.
    pub fn from_char(c: char) -> Option<Self> {
        let c = match c.to_ascii_uppercase() {
            '0' => 'T',
            other => other,
        };
        RANK_CHARS
            .iter()
            .position(|&r| r == c)
            .map(|idx| ASCENDING[idx])
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
