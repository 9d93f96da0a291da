//! Annotations and categories for bidding rules
//!
//! Annotations are tags attached to a call once a rule licenses it. They are
//! the only way one rule communicates with another: later preconditions look
//! them up by position. Categories break ties between rules whose priorities
//! are otherwise incomparable.

use serde::{Deserialize, Serialize};
use types::Suit;

/// Metadata attached to a call by the rule that explains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Annotation {
    /// The first contract bid of the auction
    Opening,
    /// This call activates the notrump system (Stayman, transfers, etc.)
    NoTrumpSystemsOn,
    /// Says nothing about the named strain; partner must not pass
    Artificial,
    Stayman,
    Gerber,
    Transfer,
    /// A transfer asking partner to bid the given suit
    TransferTo(Suit),
    Jacoby2NT,
    NegativeDouble,
}

/// Intra-bid tie-break between rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Relay,
    FeatureAsking,
    NoTrump,
}

impl Category {
    /// Higher wins. Uncategorised rules rank below every category.
    pub fn rank(category: Option<Category>) -> u8 {
        match category {
            Some(Category::Relay) => 3,
            Some(Category::FeatureAsking) => 2,
            Some(Category::NoTrump) => 1,
            None => 0,
        }
    }
}
