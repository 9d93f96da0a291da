//! Interpreted auction history
//!
//! A [`History`] is the auction seen through the bidding system: every call
//! carries the annotations of the rule that explains it, and every seat has
//! accumulated [`HandBounds`] from what its calls showed. Preconditions read
//! it through per-position [`PositionView`]s, relative to the player on turn.

use crate::dsl::{Annotation, Expr};
use crate::kernel::HandBounds;
use crate::rules::System;
use log::{debug, trace};
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use types::{Auction, Call, Seat, Suit};

static NO_ANNOTATIONS: BTreeSet<Annotation> = BTreeSet::new();

/// A seat relative to the player on turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Position {
    Me,
    Partner,
    Lho,
    Rho,
}

impl Position {
    pub const ALL: [Position; 4] = [Position::Me, Position::Partner, Position::Lho, Position::Rho];

    pub fn seat(self, me: Seat) -> Seat {
        match self {
            Position::Me => me,
            Position::Partner => me.partner(),
            Position::Lho => me.lho(),
            Position::Rho => me.rho(),
        }
    }
}

/// One call and what the system made of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CallRecord {
    pub seat: Seat,
    pub call: Call,
    pub annotations: BTreeSet<Annotation>,
    /// Name of the rule that explains the call, if any did.
    pub rule: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct History {
    auction: Auction,
    records: Vec<CallRecord>,
    knowledge: [HandBounds; 4],
    fingerprint: u64,
}

impl History {
    fn empty(dealer: Seat) -> Self {
        let mut history = Self {
            auction: Auction::new(dealer),
            records: Vec::new(),
            knowledge: [HandBounds::default(); 4],
            fingerprint: 0,
        };
        history.fingerprint = history.compute_fingerprint();
        history
    }

    pub fn builder(dealer: Seat) -> HistoryBuilder {
        HistoryBuilder {
            history: Self::empty(dealer),
        }
    }

    /// Replay `auction` through `system`, one call at a time. Each call is
    /// explained by the rule the system prefers for it given the history so
    /// far; calls nothing explains carry no annotations.
    pub fn from_auction(auction: &Auction, system: &System) -> Self {
        let mut history = Self::empty(auction.dealer);
        for &call in &auction.calls {
            let seat = history.auction.current_player();
            match system.interpret(&history, &call) {
                Some(rule) => {
                    debug!("{seat:?} {call}: {}", rule.name());
                    let shows = rule.constraints_expr_for_call(&history, &call);
                    let annotations = rule.annotations().iter().copied().collect();
                    history.push(call, annotations, Some(rule.name().to_string()), &shows);
                }
                None => {
                    debug!("{seat:?} {call}: no rule");
                    history.push(call, BTreeSet::new(), None, &Expr::True);
                }
            }
        }
        history
    }

    fn push(
        &mut self,
        call: Call,
        annotations: BTreeSet<Annotation>,
        rule: Option<String>,
        shows: &Expr,
    ) {
        let seat = self.auction.current_player();
        let narrowed = self.knowledge[seat.idx()].intersect(&shows.implied_bounds());
        if narrowed.is_satisfiable() {
            self.knowledge[seat.idx()] = narrowed;
        } else {
            trace!("{seat:?} {call} contradicts earlier calls, keeping {}", self.knowledge[seat.idx()]);
        }
        self.records.push(CallRecord {
            seat,
            call,
            annotations,
            rule,
        });
        self.auction.add_call(call);
        self.fingerprint = self.compute_fingerprint();
    }

    fn compute_fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.auction.dealer.hash(&mut hasher);
        for record in &self.records {
            record.call.hash(&mut hasher);
            record.annotations.hash(&mut hasher);
        }
        self.knowledge.hash(&mut hasher);
        hasher.finish()
    }

    /// Stable id of this snapshot: dealer, calls, annotations and knowledge.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    pub fn auction(&self) -> &Auction {
        &self.auction
    }

    pub fn records(&self) -> &[CallRecord] {
        &self.records
    }

    /// The seat whose call is being considered.
    pub fn seat_on_turn(&self) -> Seat {
        self.auction.current_player()
    }

    pub fn view_for(&self, position: Position) -> PositionView<'_> {
        PositionView {
            history: self,
            seat: position.seat(self.seat_on_turn()),
        }
    }

    pub fn me(&self) -> PositionView<'_> {
        self.view_for(Position::Me)
    }

    pub fn partner(&self) -> PositionView<'_> {
        self.view_for(Position::Partner)
    }

    pub fn lho(&self) -> PositionView<'_> {
        self.view_for(Position::Lho)
    }

    pub fn rho(&self) -> PositionView<'_> {
        self.view_for(Position::Rho)
    }

    /// Every annotation attached to any call so far.
    pub fn annotations(&self) -> BTreeSet<Annotation> {
        self.records
            .iter()
            .flat_map(|r| r.annotations.iter().copied())
            .collect()
    }

    pub fn last_contract(&self) -> Option<Call> {
        self.auction.last_contract()
    }

    pub fn is_unbid_suit(&self, suit: Suit) -> bool {
        !self.records.iter().any(|r| r.call.suit() == Some(suit))
    }

    pub fn legal_calls(&self) -> Vec<Call> {
        self.auction.legal_calls()
    }
}

/// Builds a history from calls whose interpretation is already known.
#[derive(Debug, Clone)]
pub struct HistoryBuilder {
    history: History,
}

impl HistoryBuilder {
    /// Append a call by the seat on turn, with its annotations and what it
    /// showed about the caller's hand.
    pub fn call(mut self, call: Call, annotations: &[Annotation], shows: Expr) -> Self {
        self.history
            .push(call, annotations.iter().copied().collect(), None, &shows);
        self
    }

    pub fn pass(self) -> Self {
        self.call(Call::Pass, &[], Expr::True)
    }

    pub fn build(self) -> History {
        self.history
    }
}

/// One seat's calls and knowledge, seen from the player on turn.
#[derive(Debug, Clone, Copy)]
pub struct PositionView<'a> {
    history: &'a History,
    seat: Seat,
}

fn clamp_u8(value: i32) -> u8 {
    value.clamp(0, i32::from(u8::MAX)) as u8
}

impl<'a> PositionView<'a> {
    pub fn seat(&self) -> Seat {
        self.seat
    }

    fn last_record(&self) -> Option<&'a CallRecord> {
        self.history
            .records
            .iter()
            .rev()
            .find(|r| r.seat == self.seat)
    }

    pub fn last_call(&self) -> Option<Call> {
        self.last_record().map(|r| r.call)
    }

    pub fn annotations_for_last_call(&self) -> &'a BTreeSet<Annotation> {
        self.last_record()
            .map_or(&NO_ANNOTATIONS, |r| &r.annotations)
    }

    /// Annotations across every call this seat has made.
    pub fn annotations(&self) -> BTreeSet<Annotation> {
        self.history
            .records
            .iter()
            .filter(|r| r.seat == self.seat)
            .flat_map(|r| r.annotations.iter().copied())
            .collect()
    }

    pub fn bounds(&self) -> &'a HandBounds {
        &self.history.knowledge[self.seat.idx()]
    }

    pub fn min_points(&self) -> u8 {
        clamp_u8(self.bounds().points.min)
    }

    pub fn max_points(&self) -> u8 {
        clamp_u8(self.bounds().points.max)
    }

    pub fn could_have_more_points_than(&self, points: u8) -> bool {
        self.max_points() > points
    }

    pub fn min_length(&self, suit: Suit) -> u8 {
        clamp_u8(self.bounds().length(suit).min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::{and, balanced, hearts, points};

    fn call(name: &str) -> Call {
        name.parse().unwrap()
    }

    fn notrump_opening() -> History {
        History::builder(Seat::North)
            .call(
                call("1N"),
                &[Annotation::Opening, Annotation::NoTrumpSystemsOn],
                and([points().ge(15), points().le(17), balanced()]),
            )
            .pass()
            .build()
    }

    #[test]
    fn test_positions_are_relative_to_turn() {
        let history = notrump_opening();
        assert_eq!(history.seat_on_turn(), Seat::South);
        assert_eq!(history.partner().seat(), Seat::North);
        assert_eq!(history.rho().seat(), Seat::East);
        assert_eq!(history.lho().seat(), Seat::West);
        assert_eq!(history.partner().last_call(), Some(call("1N")));
        assert_eq!(history.rho().last_call(), Some(Call::Pass));
        assert_eq!(history.me().last_call(), None);
    }

    #[test]
    fn test_annotations() {
        let history = notrump_opening();
        assert!(history
            .partner()
            .annotations_for_last_call()
            .contains(&Annotation::NoTrumpSystemsOn));
        assert!(history.rho().annotations_for_last_call().is_empty());
        assert!(history.me().annotations_for_last_call().is_empty());
        assert!(history.annotations().contains(&Annotation::Opening));
    }

    #[test]
    fn test_knowledge_accumulates() {
        let history = notrump_opening();
        let partner = history.partner();
        assert_eq!(partner.min_points(), 15);
        assert_eq!(partner.max_points(), 17);
        assert!(!partner.could_have_more_points_than(25));
        assert_eq!(partner.min_length(Suit::Spades), 2);
        assert!(history.rho().could_have_more_points_than(25));
    }

    #[test]
    fn test_contradictory_call_keeps_earlier_knowledge() {
        let history = History::builder(Seat::North)
            .call(call("1H"), &[Annotation::Opening], hearts().ge(5))
            .pass()
            .call(call("1S"), &[], Expr::True)
            .pass()
            .call(call("2H"), &[], hearts().le(3))
            .build();
        assert_eq!(history.seat_on_turn(), Seat::East);
        assert_eq!(history.rho().min_length(Suit::Hearts), 5);
    }

    #[test]
    fn test_unbid_suits() {
        let history = notrump_opening();
        assert!(history.is_unbid_suit(Suit::Clubs));
        let history = History::builder(Seat::North)
            .call(call("1C"), &[Annotation::Opening], Expr::True)
            .build();
        assert!(!history.is_unbid_suit(Suit::Clubs));
        assert!(history.is_unbid_suit(Suit::Hearts));
    }

    #[test]
    fn test_fingerprint_tracks_annotations() {
        let plain = History::builder(Seat::North)
            .call(call("1N"), &[], Expr::True)
            .build();
        let annotated = History::builder(Seat::North)
            .call(call("1N"), &[Annotation::Opening], Expr::True)
            .build();
        assert_ne!(plain.fingerprint(), annotated.fingerprint());
        assert_eq!(notrump_opening().fingerprint(), notrump_opening().fingerprint());
    }

    #[test]
    fn test_legal_calls() {
        let history = notrump_opening();
        let legal = history.legal_calls();
        assert!(legal.contains(&call("2C")));
        assert!(!legal.contains(&call("1S")));
        assert!(!legal.contains(&Call::Double));
        assert_eq!(history.last_contract(), Some(call("1N")));
    }
}
