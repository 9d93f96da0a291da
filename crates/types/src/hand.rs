// cspell:ignore AKQJT
use crate::card::Card;
use crate::rank::Rank;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Shape {
    /// No singletons, no voids, max one doubleton (4-3-3-3, 4-4-3-2, 5-3-3-2)
    Balanced,
    /// One singleton OR two doubletons, no voids (5-4-2-2, 6-3-2-2)
    SemiBalanced,
    /// Everything else
    Unbalanced,
}

impl Shape {
    /// Classify suit lengths that sum to thirteen.
    pub fn classify(lengths: [u8; 4]) -> Self {
        let mut sorted = lengths;
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        let count = |n: u8| sorted.iter().filter(|&&l| l == n).count();
        let (voids, singletons, doubletons) = (count(0), count(1), count(2));

        if voids == 0 && singletons == 0 && doubletons <= 1 {
            Shape::Balanced
        } else if sorted[0] <= 6 && voids == 0 && (singletons == 1 || doubletons == 2) {
            Shape::SemiBalanced
        } else {
            Shape::Unbalanced
        }
    }
}

/// Suit lengths indexed by `Suit::idx()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Distribution(pub [u8; 4]);

impl Distribution {
    pub fn length(&self, suit: Suit) -> u8 {
        self.0[suit.idx()]
    }

    pub fn set_length(&mut self, suit: Suit, length: u8) {
        self.0[suit.idx()] = length;
    }

    /// The two longest suit lengths added together.
    pub fn two_longest(&self) -> u8 {
        let mut sorted = self.0;
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted[0] + sorted[1]
    }

    pub fn shape(&self) -> Shape {
        Shape::classify(self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Hand {
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Parse a hand string in the format "Clubs.Diamonds.Hearts.Spades".
    pub fn parse(s: &str) -> Option<Self> {
        crate::io::hand_parser::parse_hand(s)
    }

    /// Exactly 13 cards, none repeated.
    pub fn is_valid(&self) -> bool {
        let mut cards = self.cards.clone();
        cards.sort_unstable();
        cards.dedup();
        self.cards.len() == 13 && cards.len() == 13
    }

    pub fn hcp(&self) -> u8 {
        self.cards.iter().map(|c| c.hcp()).sum()
    }

    pub fn length(&self, suit: Suit) -> u8 {
        self.cards.iter().filter(|c| c.suit == suit).count() as u8
    }

    pub fn distribution(&self) -> Distribution {
        let mut dist = Distribution::default();
        for suit in Suit::ALL {
            dist.set_length(suit, self.length(suit));
        }
        dist
    }

    pub fn shape(&self) -> Shape {
        self.distribution().shape()
    }

    /// Returns true if the hand is balanced (4-3-3-3, 4-4-3-2, 5-3-3-2)
    pub fn is_balanced(&self) -> bool {
        self.shape() == Shape::Balanced
    }

    /// Number of cards of the given rank across all suits (e.g. aces held).
    pub fn count_rank(&self, rank: Rank) -> u8 {
        self.cards.iter().filter(|c| c.rank == rank).count() as u8
    }

    /// Count how many of the top N honors (A, K, Q, J, T) the hand holds in a suit.
    ///
    /// `top_honors(suit, 5)` counts honors among {A, K, Q, J, T}.
    pub fn top_honors(&self, suit: Suit, n: u8) -> u8 {
        let top_n = &Rank::TOP_HONORS[..usize::from(n.min(5))];
        self.cards
            .iter()
            .filter(|c| c.suit == suit && top_n.contains(&c.rank))
            .count() as u8
    }

    /// A value identifying this set of cards regardless of card order.
    pub fn fingerprint(&self) -> u64 {
        let mut cards = self.cards.clone();
        cards.sort_unstable();
        let mut hasher = DefaultHasher::new();
        cards.hash(&mut hasher);
        hasher.finish()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sections: Vec<String> = Suit::ALL
            .iter()
            .map(|&suit| {
                let mut ranks: Vec<Rank> = self
                    .cards
                    .iter()
                    .filter(|c| c.suit == suit)
                    .map(|c| c.rank)
                    .collect();
                ranks.sort_unstable_by(|a, b| b.cmp(a));
                ranks.into_iter().map(Rank::to_char).collect()
            })
            .collect();
        write!(f, "{}", sections.join("."))
    }
}
