//! Symbolic hand constraints
//!
//! A rule describes the hand it promises as an [`Expr`] over a handful of
//! hand attributes. Expressions are handed to a [`crate::kernel::Solver`]
//! which decides whether the bidder's hand could satisfy them.
//!
//! Some constraints depend on the auction ("combined points with partner",
//! "length in the suit being bid"); those are [`Constraint`]s and are turned
//! into an `Expr` for a particular history and call.

use crate::kernel::{HandBounds, History};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use types::{Call, Distribution, Shape, Suit};

/// A numeric property of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Attr {
    /// High card points
    Points,
    Length(Suit),
    Aces,
    Kings,
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attr::Points => write!(f, "points"),
            Attr::Length(suit) => write!(f, "{}", suit.name()),
            Attr::Aces => write!(f, "aces"),
            Attr::Kings => write!(f, "kings"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CmpOp {
    Lt,
    Le,
    Eq,
    Ne,
    Ge,
    Gt,
}

impl CmpOp {
    pub fn apply(self, lhs: i32, rhs: i32) -> bool {
        match self {
            CmpOp::Lt => lhs < rhs,
            CmpOp::Le => lhs <= rhs,
            CmpOp::Eq => lhs == rhs,
            CmpOp::Ne => lhs != rhs,
            CmpOp::Ge => lhs >= rhs,
            CmpOp::Gt => lhs > rhs,
        }
    }

    /// The operator with its operands swapped: `a < b` iff `b > a`.
    pub fn flip(self) -> Self {
        match self {
            CmpOp::Lt => CmpOp::Gt,
            CmpOp::Le => CmpOp::Ge,
            CmpOp::Ge => CmpOp::Le,
            CmpOp::Gt => CmpOp::Lt,
            other => other,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Ge => ">=",
            CmpOp::Gt => ">",
        }
    }
}

/// An integer-valued term: an attribute, a literal, or a sum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Attr(Attr),
    Lit(i32),
    Sum(Vec<Term>),
}

impl From<i32> for Term {
    fn from(value: i32) -> Self {
        Term::Lit(value)
    }
}

impl From<Attr> for Term {
    fn from(attr: Attr) -> Self {
        Term::Attr(attr)
    }
}

impl Term {
    pub fn ge(self, rhs: impl Into<Term>) -> Expr {
        Expr::Cmp(self, CmpOp::Ge, rhs.into())
    }

    pub fn gt(self, rhs: impl Into<Term>) -> Expr {
        Expr::Cmp(self, CmpOp::Gt, rhs.into())
    }

    pub fn le(self, rhs: impl Into<Term>) -> Expr {
        Expr::Cmp(self, CmpOp::Le, rhs.into())
    }

    pub fn lt(self, rhs: impl Into<Term>) -> Expr {
        Expr::Cmp(self, CmpOp::Lt, rhs.into())
    }

    pub fn equals(self, rhs: impl Into<Term>) -> Expr {
        Expr::Cmp(self, CmpOp::Eq, rhs.into())
    }

    pub fn plus(self, rhs: impl Into<Term>) -> Term {
        match self {
            Term::Sum(mut terms) => {
                terms.push(rhs.into());
                Term::Sum(terms)
            }
            lhs => Term::Sum(vec![lhs, rhs.into()]),
        }
    }

    fn value<V: Valuation + ?Sized>(&self, valuation: &V) -> i32 {
        match self {
            Term::Attr(attr) => valuation.value(*attr),
            Term::Lit(value) => *value,
            Term::Sum(terms) => terms.iter().map(|t| t.value(valuation)).sum(),
        }
    }

    fn collect_attrs(&self, out: &mut BTreeSet<Attr>) {
        match self {
            Term::Attr(attr) => {
                out.insert(*attr);
            }
            Term::Lit(_) => {}
            Term::Sum(terms) => terms.iter().for_each(|t| t.collect_attrs(out)),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Attr(attr) => write!(f, "{attr}"),
            Term::Lit(value) => write!(f, "{value}"),
            Term::Sum(terms) => {
                let parts: Vec<String> = terms.iter().map(Term::to_string).collect();
                write!(f, "({})", parts.join(" + "))
            }
        }
    }
}

/// An assignment of values to hand attributes, possibly partial.
pub trait Valuation {
    fn value(&self, attr: Attr) -> i32;

    /// How many of the top `top` honours are held in `suit`, if known.
    fn top_honors(&self, suit: Suit, top: u8) -> Option<u8>;

    fn distribution(&self) -> Distribution {
        let mut dist = Distribution::default();
        for suit in Suit::ALL {
            let length = self.value(Attr::Length(suit)).clamp(0, 13);
            dist.set_length(suit, length as u8);
        }
        dist
    }
}

/// A boolean constraint over hand attributes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expr {
    True,
    False,
    Cmp(Term, CmpOp, Term),
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Not(Box<Expr>),
    /// 4-3-3-3, 4-4-3-2 or 5-3-3-2
    Balanced,
    /// Points plus the lengths of the two longest suits is at least 20
    RuleOfTwenty,
    /// At least `at_least` of the top `top` honours in `suit`
    TopHonors { suit: Suit, top: u8, at_least: u8 },
}

impl Expr {
    /// Three-valued evaluation. `None` means the valuation cannot decide,
    /// which only happens for honour-structure atoms on a partial valuation.
    pub fn eval<V: Valuation + ?Sized>(&self, valuation: &V) -> Option<bool> {
        match self {
            Expr::True => Some(true),
            Expr::False => Some(false),
            Expr::Cmp(lhs, op, rhs) => Some(op.apply(lhs.value(valuation), rhs.value(valuation))),
            Expr::And(exprs) => {
                let mut result = Some(true);
                for expr in exprs {
                    match expr.eval(valuation) {
                        Some(false) => return Some(false),
                        None => result = None,
                        Some(true) => {}
                    }
                }
                result
            }
            Expr::Or(exprs) => {
                let mut result = Some(false);
                for expr in exprs {
                    match expr.eval(valuation) {
                        Some(true) => return Some(true),
                        None => result = None,
                        Some(false) => {}
                    }
                }
                result
            }
            Expr::Not(expr) => expr.eval(valuation).map(|b| !b),
            Expr::Balanced => Some(valuation.distribution().shape() == Shape::Balanced),
            Expr::RuleOfTwenty => {
                let points = valuation.value(Attr::Points);
                Some(points + i32::from(valuation.distribution().two_longest()) >= 20)
            }
            Expr::TopHonors {
                suit,
                top,
                at_least,
            } => {
                if valuation.value(Attr::Length(*suit)) < i32::from(*at_least) {
                    return Some(false);
                }
                valuation.top_honors(*suit, *top).map(|held| held >= *at_least)
            }
        }
    }

    /// Every attribute the expression reads.
    pub fn attrs(&self) -> BTreeSet<Attr> {
        let mut out = BTreeSet::new();
        self.collect_attrs(&mut out);
        out
    }

    fn collect_attrs(&self, out: &mut BTreeSet<Attr>) {
        match self {
            Expr::True | Expr::False => {}
            Expr::Cmp(lhs, _, rhs) => {
                lhs.collect_attrs(out);
                rhs.collect_attrs(out);
            }
            Expr::And(exprs) | Expr::Or(exprs) => exprs.iter().for_each(|e| e.collect_attrs(out)),
            Expr::Not(expr) => expr.collect_attrs(out),
            Expr::Balanced => out.extend(Suit::ALL.map(Attr::Length)),
            Expr::RuleOfTwenty => {
                out.insert(Attr::Points);
                out.extend(Suit::ALL.map(Attr::Length));
            }
            Expr::TopHonors { suit, .. } => {
                out.insert(Attr::Length(*suit));
            }
        }
    }

    /// Attribute ranges implied by the top-level conjunction of
    /// `attribute op literal` atoms. Disjunctions and negations contribute
    /// nothing.
    pub fn implied_bounds(&self) -> HandBounds {
        let mut bounds = HandBounds::default();
        self.narrow(&mut bounds);
        bounds
    }

    fn narrow(&self, bounds: &mut HandBounds) {
        match self {
            Expr::And(exprs) => exprs.iter().for_each(|e| e.narrow(bounds)),
            Expr::Cmp(Term::Attr(attr), op, Term::Lit(value)) => bounds.narrow(*attr, *op, *value),
            Expr::Cmp(Term::Lit(value), op, Term::Attr(attr)) => {
                bounds.narrow(*attr, op.flip(), *value)
            }
            Expr::Balanced => {
                for suit in Suit::ALL {
                    bounds.narrow(Attr::Length(suit), CmpOp::Ge, 2);
                    bounds.narrow(Attr::Length(suit), CmpOp::Le, 5);
                }
            }
            _ => {}
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |exprs: &[Expr], sep: &str| {
            exprs
                .iter()
                .map(|e| match e {
                    Expr::And(_) | Expr::Or(_) => format!("({e})"),
                    _ => e.to_string(),
                })
                .collect::<Vec<_>>()
                .join(sep)
        };
        match self {
            Expr::True => write!(f, "true"),
            Expr::False => write!(f, "false"),
            Expr::Cmp(lhs, op, rhs) => write!(f, "{lhs} {} {rhs}", op.symbol()),
            Expr::And(exprs) if exprs.is_empty() => write!(f, "true"),
            Expr::Or(exprs) if exprs.is_empty() => write!(f, "false"),
            Expr::And(exprs) => write!(f, "{}", join(exprs, " and ")),
            Expr::Or(exprs) => write!(f, "{}", join(exprs, " or ")),
            Expr::Not(expr) => write!(f, "not ({expr})"),
            Expr::Balanced => write!(f, "balanced"),
            Expr::RuleOfTwenty => write!(f, "rule of twenty"),
            Expr::TopHonors {
                suit,
                top,
                at_least,
            } => write!(f, "{at_least} of the top {top} {}", suit.name()),
        }
    }
}

pub fn points() -> Term {
    Term::Attr(Attr::Points)
}

pub fn length(suit: Suit) -> Term {
    Term::Attr(Attr::Length(suit))
}

pub fn clubs() -> Term {
    length(Suit::Clubs)
}

pub fn diamonds() -> Term {
    length(Suit::Diamonds)
}

pub fn hearts() -> Term {
    length(Suit::Hearts)
}

pub fn spades() -> Term {
    length(Suit::Spades)
}

pub fn number_of_aces() -> Term {
    Term::Attr(Attr::Aces)
}

pub fn number_of_kings() -> Term {
    Term::Attr(Attr::Kings)
}

pub fn balanced() -> Expr {
    Expr::Balanced
}

pub fn rule_of_twenty() -> Expr {
    Expr::RuleOfTwenty
}

pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::And(exprs.into_iter().collect())
}

pub fn or(exprs: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Or(exprs.into_iter().collect())
}

pub fn not(expr: Expr) -> Expr {
    Expr::Not(Box::new(expr))
}

/// A constraint whose expression depends on the auction and the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// Our points plus partner's known minimum reach the target.
    MinimumCombinedPoints(u8),
    /// Our length plus partner's known minimum in the call's suit reach the target.
    MinimumCombinedLength(u8),
    /// At least this many cards in the call's suit.
    MinLength(u8),
    /// Three of the top five honours in the call's suit.
    ThreeOfTheTopFive,
}

impl Constraint {
    /// Suit-relative constraints are unsatisfiable for non-suit calls.
    pub fn expr(&self, history: &History, call: &Call) -> Expr {
        let partner = history.partner();
        match *self {
            Constraint::MinimumCombinedPoints(target) => {
                let needed = i32::from(target) - i32::from(partner.min_points());
                points().ge(needed.max(0))
            }
            Constraint::MinimumCombinedLength(target) => match call.suit() {
                Some(suit) => {
                    let needed = i32::from(target) - i32::from(partner.min_length(suit));
                    length(suit).ge(needed.max(0))
                }
                None => Expr::False,
            },
            Constraint::MinLength(min) => match call.suit() {
                Some(suit) => length(suit).ge(i32::from(min)),
                None => Expr::False,
            },
            Constraint::ThreeOfTheTopFive => match call.suit() {
                Some(suit) => Expr::TopHonors {
                    suit,
                    top: 5,
                    at_least: 3,
                },
                None => Expr::False,
            },
        }
    }
}

/// The constraint data a rule declares, in any of the shapes the catalog
/// uses: nothing, a literal expression, an auction-dependent constraint, or a
/// (possibly nested) list of those.
#[derive(Debug, Clone, Default)]
pub enum ConstraintData {
    #[default]
    None,
    Expr(Expr),
    Constraint(Constraint),
    All(Vec<ConstraintData>),
}

impl From<Expr> for ConstraintData {
    fn from(expr: Expr) -> Self {
        ConstraintData::Expr(expr)
    }
}

impl From<Constraint> for ConstraintData {
    fn from(constraint: Constraint) -> Self {
        ConstraintData::Constraint(constraint)
    }
}

impl<T: Into<ConstraintData>> From<Vec<T>> for ConstraintData {
    fn from(items: Vec<T>) -> Self {
        ConstraintData::All(items.into_iter().map(Into::into).collect())
    }
}

impl ConstraintData {
    /// Flatten into expressions for the given history and call. Absent data
    /// contributes a trivially true expression.
    pub fn exprs(&self, history: &History, call: &Call) -> Vec<Expr> {
        let mut out = Vec::new();
        self.collect_exprs(history, call, &mut out);
        out
    }

    fn collect_exprs(&self, history: &History, call: &Call, out: &mut Vec<Expr>) {
        match self {
            ConstraintData::None => out.push(Expr::True),
            ConstraintData::Expr(expr) => out.push(expr.clone()),
            ConstraintData::Constraint(constraint) => out.push(constraint.expr(history, call)),
            ConstraintData::All(items) if items.is_empty() => out.push(Expr::True),
            ConstraintData::All(items) => {
                for item in items {
                    item.collect_exprs(history, call, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::HandBounds;
    use types::{Hand, Strain};

    struct Exact(Hand);

    impl Valuation for Exact {
        fn value(&self, attr: Attr) -> i32 {
            HandBounds::exact(&self.0).get(attr).min
        }

        fn top_honors(&self, suit: Suit, top: u8) -> Option<u8> {
            Some(self.0.top_honors(suit, top))
        }
    }

    fn hand(s: &str) -> Exact {
        Exact(Hand::parse(s).unwrap())
    }

    #[test]
    fn test_eval_comparisons() {
        // 10 hcp, 4 hearts
        let h = hand("86.KJ74.AQ63.975");
        assert_eq!(points().ge(10).eval(&h), Some(true));
        assert_eq!(hearts().gt(spades()).eval(&h), Some(true));
        assert_eq!(clubs().equals(3).eval(&h), Some(false));
        assert_eq!(and([hearts().ge(4), diamonds().ge(4)]).eval(&h), Some(true));
        assert_eq!(or([hearts().ge(5), spades().ge(5)]).eval(&h), Some(false));
        assert_eq!(not(balanced()).eval(&h), Some(false));
    }

    #[test]
    fn test_rule_of_twenty() {
        // 10 hcp with 5-5 shape: 10 + 10 = 20
        assert_eq!(rule_of_twenty().eval(&hand("AQ754.KJ853.2.43")), Some(true));
        // 10 hcp with 4-3-3-3: 10 + 7 = 17
        assert_eq!(rule_of_twenty().eval(&hand("A543.K32.Q32.J32")), Some(false));
    }

    #[test]
    fn test_sum_terms() {
        let h = hand("86.KJ74.AQ63.975");
        assert_eq!(points().plus(hearts()).ge(14).eval(&h), Some(true));
        assert_eq!(points().plus(hearts()).plus(1).ge(16).eval(&h), Some(false));
    }

    #[test]
    fn test_kleene_logic_with_unknown_honours() {
        struct Partial;
        impl Valuation for Partial {
            fn value(&self, _attr: Attr) -> i32 {
                3
            }
            fn top_honors(&self, _suit: Suit, _top: u8) -> Option<u8> {
                None
            }
        }
        let honours = Expr::TopHonors {
            suit: Suit::Spades,
            top: 5,
            at_least: 3,
        };
        assert_eq!(honours.eval(&Partial), None);
        assert_eq!(and([honours.clone(), Expr::False]).eval(&Partial), Some(false));
        assert_eq!(or([honours.clone(), Expr::True]).eval(&Partial), Some(true));
        assert_eq!(not(honours).eval(&Partial), None);
    }

    #[test]
    fn test_implied_bounds() {
        let bounds = and([points().ge(15), points().le(17), balanced(), hearts().gt(3)])
            .implied_bounds();
        assert_eq!(bounds.points.min, 15);
        assert_eq!(bounds.points.max, 17);
        assert_eq!(bounds.length(Suit::Hearts).min, 4);
        assert_eq!(bounds.length(Suit::Clubs).min, 2);
        assert_eq!(bounds.length(Suit::Clubs).max, 5);
    }

    #[test]
    fn test_implied_bounds_ignores_disjunctions() {
        let bounds = or([hearts().ge(4), spades().ge(4)]).implied_bounds();
        assert_eq!(bounds, HandBounds::default());
        let flipped = Expr::Cmp(Term::Lit(6), CmpOp::Le, points()).implied_bounds();
        assert_eq!(flipped.points.min, 6);
    }

    #[test]
    fn test_attrs() {
        let attrs = and([points().ge(10), hearts().gt(spades())]).attrs();
        assert!(attrs.contains(&Attr::Points));
        assert!(attrs.contains(&Attr::Length(Suit::Hearts)));
        assert!(!attrs.contains(&Attr::Aces));
    }

    #[test]
    fn test_display() {
        let expr = and([points().ge(6), or([hearts().ge(4), spades().ge(4)])]);
        assert_eq!(expr.to_string(), "points >= 6 and (hearts >= 4 or spades >= 4)");
    }

    #[test]
    fn test_constraint_data_flattens_nested_lists() {
        let history = History::builder(types::Seat::North).build();
        let call = Call::bid(2, Strain::Hearts);
        let data = ConstraintData::All(vec![
            ConstraintData::Expr(points().ge(6)),
            ConstraintData::All(vec![
                ConstraintData::Constraint(Constraint::MinLength(5)),
                ConstraintData::None,
            ]),
        ]);
        assert_eq!(
            data.exprs(&history, &call),
            vec![points().ge(6), hearts().ge(5), Expr::True]
        );
        assert_eq!(ConstraintData::None.exprs(&history, &call), vec![Expr::True]);
    }

    #[test]
    fn test_suit_constraints_reject_notrump_calls() {
        let history = History::builder(types::Seat::North).build();
        let call = Call::bid(1, Strain::NoTrump);
        assert_eq!(Constraint::MinLength(5).expr(&history, &call), Expr::False);
        assert_eq!(Constraint::ThreeOfTheTopFive.expr(&history, &call), Expr::False);
    }
}
