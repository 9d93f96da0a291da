//! Input parsing and table formatting for the bidding debugger.

use engine::kernel::{Candidate, CallRecord, History};
use std::fmt::Write;
use types::{Auction, Call, Hand, Seat, Suit};

pub fn get_hand_suits(hand: &Hand) -> Vec<String> {
    [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs]
        .into_iter()
        .map(|suit| {
            let mut ranks: Vec<_> = hand
                .cards
                .iter()
                .filter(|c| c.suit == suit)
                .map(|c| c.rank)
                .collect();
            ranks.sort_unstable_by(|a, b| b.cmp(a));
            let cards: String = ranks.into_iter().map(|r| r.to_char()).collect();
            format!(
                "{}: {}",
                suit.to_char(),
                if cards.is_empty() { "-" } else { &cards }
            )
        })
        .collect()
}

pub fn parse_calls(s: &str) -> Result<Vec<Call>, String> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<Call>().map_err(|e| e.to_string()))
        .collect()
}

pub fn parse_seat(s: &str) -> Result<Seat, String> {
    s.chars()
        .next()
        .and_then(Seat::from_char)
        .ok_or_else(|| format!("invalid seat {s:?}"))
}

/// A hand, the auction so far, and optionally the call we expect next.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    pub hand: Hand,
    pub auction: Auction,
    pub expected: Option<String>,
}

/// Parse `'["Hand", "ExpectedBid"?, "Auction"?]'`, the shape of one line of
/// the bidding vectors. North deals.
pub fn parse_test_case(test_case_json: &str) -> Result<TestCase, String> {
    let parts: Vec<String> =
        serde_json::from_str(test_case_json).map_err(|e| format!("invalid test case: {e}"))?;
    let hand_str = parts.first().ok_or("empty test case")?;
    let hand = Hand::parse(hand_str).ok_or_else(|| format!("invalid hand {hand_str:?}"))?;
    let calls = parse_calls(parts.get(2).map_or("", String::as_str))?;
    Ok(TestCase {
        hand,
        auction: Auction {
            dealer: Seat::North,
            calls,
        },
        expected: parts.get(1).cloned(),
    })
}

pub fn format_row(idx: usize, seat: Seat, call: &str, rule: &str, desc: &str) -> String {
    format!("{:<3} | {:<3} | {:<5} | {:<28} | {}", idx, seat, call, rule, desc)
}

pub fn format_table_header() -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<3} | {:<3} | {:<5} | {:<28} | Annotations",
        "Idx", "Pos", "Call", "Rule Name"
    );
    let _ = writeln!(out, "{}", "-".repeat(70));
    out
}

fn format_record(idx: usize, record: &CallRecord) -> String {
    let annotations: Vec<String> = record.annotations.iter().map(|a| format!("{a:?}")).collect();
    format_row(
        idx,
        record.seat,
        &record.call.to_string(),
        record.rule.as_deref().unwrap_or("-"),
        &annotations.join(", "),
    )
}

/// The auction as the engine read it, one row per call.
pub fn format_history(history: &History) -> String {
    let mut out = format_table_header();
    for (idx, record) in history.records().iter().enumerate() {
        let _ = writeln!(out, "{}", format_record(idx + 1, record));
    }
    out
}

pub fn format_candidates(candidates: &[Candidate]) -> String {
    let mut out = String::new();
    for candidate in candidates {
        let _ = writeln!(
            out,
            "  {:<5} {:<28} {}",
            candidate.call.to_string(),
            candidate.rule,
            candidate.outcome
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_test_case() {
        let case = parse_test_case(r#"["86.KJ74.AQ63.975", "2C", "1N P"]"#).unwrap();
        assert_eq!(case.expected.as_deref(), Some("2C"));
        assert_eq!(case.auction.calls.len(), 2);
        assert_eq!(case.auction.current_player(), Seat::South);
        assert_eq!(case.hand.hcp(), 10);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_test_case("[]").is_err());
        assert!(parse_test_case(r#"["AKQ"]"#).is_err());
        assert!(parse_calls("1C 9Z").is_err());
        assert!(parse_seat("Q").is_err());
        assert_eq!(parse_seat("south"), Ok(Seat::South));
    }

    #[test]
    fn test_hand_suits_display_high_first() {
        let hand = Hand::parse("86.KJ74.AQ63.975").unwrap();
        assert_eq!(
            get_hand_suits(&hand),
            vec!["S: 975", "H: AQ63", "D: KJ74", "C: 86"]
        );
    }
}
