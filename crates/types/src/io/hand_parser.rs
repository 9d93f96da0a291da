use crate::card::Card;
use crate::hand::Hand;
use crate::rank::Rank;
use crate::suit::Suit;

/// Parses a hand string in the format "Clubs.Diamonds.Hearts.Spades".
///
/// Suits appear in ascending rank order (C, D, H, S); an empty section is a
/// void. Returns `None` unless there are exactly four sections and every
/// character is a rank.
pub fn parse_hand(s: &str) -> Option<Hand> {
    let sections: Vec<&str> = s.trim().split('.').collect();
    if sections.len() != Suit::ALL.len() {
        return None;
    }
    let mut cards = Vec::new();
    for (suit, section) in Suit::ALL.into_iter().zip(sections) {
        for c in section.chars() {
            cards.push(Card::new(suit, Rank::from_char(c)?));
        }
    }
    Some(Hand::new(cards))
}
