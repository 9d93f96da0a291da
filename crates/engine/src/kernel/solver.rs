//! Satisfiability oracle for hand constraints
//!
//! A [`Solver`] answers one question: could the bidder's hand satisfy this
//! expression? [`HandSolver`] answers it for a concrete hand or, when only
//! ranges are known, by searching for a witness assignment.

use crate::dsl::{Attr, Expr, Valuation};
use crate::kernel::HandBounds;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use types::{Hand, Suit};

static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

/// Sessions over a concrete hand carry this bit; counter sessions never do.
const HAND_SESSION: u64 = 1 << 63;

fn hand_session(hand: &Hand, budget: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    hand.fingerprint().hash(&mut hasher);
    budget.hash(&mut hasher);
    hasher.finish() | HAND_SESSION
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SolveResult {
    Sat,
    Unsat,
    /// The oracle ran out of budget before deciding.
    Unknown,
}

pub trait Solver: Send + Sync {
    /// Identifies the knowledge this solver reasons over. Two solvers with
    /// the same id must give the same answers.
    fn session_id(&self) -> u64;

    fn is_possible(&self, expr: &Expr) -> SolveResult;
}

/// A solver session over one bidder's hand.
#[derive(Debug, Clone)]
pub struct HandSolver {
    session: u64,
    hand: Option<Hand>,
    bounds: HandBounds,
    budget: u64,
}

impl HandSolver {
    /// Solvers over the same hand and budget share a session id, so their
    /// answers are served from the rule caches.
    pub fn for_hand(hand: &Hand, budget: u64) -> Self {
        Self {
            session: hand_session(hand, budget),
            hand: Some(hand.clone()),
            bounds: HandBounds::exact(hand),
            budget,
        }
    }

    pub fn for_bounds(bounds: HandBounds, budget: u64) -> Self {
        Self {
            session: NEXT_SESSION.fetch_add(1, Ordering::Relaxed) & !HAND_SESSION,
            hand: None,
            bounds,
            budget,
        }
    }

    pub fn bounds(&self) -> &HandBounds {
        &self.bounds
    }

    fn search(&self, expr: &Expr) -> SolveResult {
        if !self.bounds.is_satisfiable() {
            return SolveResult::Unsat;
        }
        let mut attrs = expr.attrs();
        // Honour counts are only consistent against a chosen point count.
        if attrs.contains(&Attr::Aces) || attrs.contains(&Attr::Kings) {
            attrs.insert(Attr::Points);
        }
        let attrs: Vec<Attr> = attrs.into_iter().collect();
        let mut search = Search {
            expr,
            attrs: &attrs,
            bounds: &self.bounds,
            assignment: Assignment::from_bounds(&self.bounds),
            assigned_lengths: BTreeSet::new(),
            remaining: self.budget,
        };
        match search.visit(0) {
            Some(true) => SolveResult::Sat,
            Some(false) => SolveResult::Unsat,
            None => SolveResult::Unknown,
        }
    }
}

impl Solver for HandSolver {
    fn session_id(&self) -> u64 {
        self.session
    }

    fn is_possible(&self, expr: &Expr) -> SolveResult {
        match &self.hand {
            Some(hand) => {
                let known = Known {
                    hand,
                    bounds: &self.bounds,
                };
                match expr.eval(&known) {
                    Some(true) => SolveResult::Sat,
                    Some(false) => SolveResult::Unsat,
                    None => SolveResult::Unknown,
                }
            }
            None => self.search(expr),
        }
    }
}

struct Known<'a> {
    hand: &'a Hand,
    bounds: &'a HandBounds,
}

impl Valuation for Known<'_> {
    fn value(&self, attr: Attr) -> i32 {
        self.bounds.get(attr).min
    }

    fn top_honors(&self, suit: Suit, top: u8) -> Option<u8> {
        Some(self.hand.top_honors(suit, top))
    }
}

/// A point in the search space. Unassigned attributes hold their minimum.
#[derive(Debug, Clone, Copy)]
struct Assignment {
    values: [i32; 7],
}

impl Assignment {
    fn slot(attr: Attr) -> usize {
        match attr {
            Attr::Points => 0,
            Attr::Length(suit) => 1 + suit.idx(),
            Attr::Aces => 5,
            Attr::Kings => 6,
        }
    }

    fn from_bounds(bounds: &HandBounds) -> Self {
        let mut values = [0; 7];
        values[0] = bounds.points.min;
        for suit in Suit::ALL {
            values[Self::slot(Attr::Length(suit))] = bounds.length(suit).min;
        }
        values[5] = bounds.aces.min;
        values[6] = bounds.kings.min;
        Self { values }
    }

    fn set(&mut self, attr: Attr, value: i32) {
        self.values[Self::slot(attr)] = value;
    }

    /// Aces and kings carry points of their own.
    fn is_consistent(&self) -> bool {
        self.values[0] >= 4 * self.values[5] + 3 * self.values[6]
    }
}

impl Valuation for Assignment {
    fn value(&self, attr: Attr) -> i32 {
        self.values[Self::slot(attr)]
    }

    fn top_honors(&self, suit: Suit, _top: u8) -> Option<u8> {
        // Only a void settles the honour count.
        (self.value(Attr::Length(suit)) == 0).then_some(0)
    }
}

struct Search<'a> {
    expr: &'a Expr,
    attrs: &'a [Attr],
    bounds: &'a HandBounds,
    assignment: Assignment,
    assigned_lengths: BTreeSet<Suit>,
    remaining: u64,
}

impl Search<'_> {
    /// `Some(true)` on a witness, `Some(false)` when the space is exhausted,
    /// `None` when the budget ran out first.
    fn visit(&mut self, depth: usize) -> Option<bool> {
        let Some(&attr) = self.attrs.get(depth) else {
            return self.check_leaf();
        };
        let bound = self.bounds.get(attr);
        let mut exhausted = Some(false);
        for value in bound.min..=bound.max {
            self.assignment.set(attr, value);
            if let Attr::Length(suit) = attr {
                self.assigned_lengths.insert(suit);
                let feasible = self.lengths_can_total_thirteen();
                if !feasible {
                    continue;
                }
            }
            match self.visit(depth + 1) {
                Some(true) => return Some(true),
                None => exhausted = None,
                Some(false) => {}
            }
            if exhausted.is_none() && self.remaining == 0 {
                return None;
            }
        }
        if let Attr::Length(suit) = attr {
            self.assigned_lengths.remove(&suit);
            self.assignment.set(attr, bound.min);
        }
        exhausted
    }

    fn lengths_can_total_thirteen(&self) -> bool {
        let (mut low, mut high) = (0, 0);
        for suit in Suit::ALL {
            if self.assigned_lengths.contains(&suit) {
                let value = self.assignment.value(Attr::Length(suit));
                low += value;
                high += value;
            } else {
                low += self.bounds.length(suit).min;
                high += self.bounds.length(suit).max;
            }
        }
        low <= 13 && 13 <= high
    }

    fn check_leaf(&mut self) -> Option<bool> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        if !self.assignment.is_consistent() {
            return Some(false);
        }
        // An undecidable honour atom counts as a possible witness.
        Some(self.expr.eval(&self.assignment).unwrap_or(true))
    }
}
