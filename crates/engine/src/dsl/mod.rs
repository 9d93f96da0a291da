//! Rule DSL
//!
//! The pieces a bidding rule is declared from: preconditions on the auction,
//! constraint expressions on the hand, annotations, and priorities.

pub mod annotations;
pub mod constraint;
pub mod precondition;
pub mod priority;
pub mod rule;

pub use annotations::{Annotation, Category};
pub use constraint::{
    and, balanced, clubs, diamonds, hearts, length, not, number_of_aces, number_of_kings, or,
    points, rule_of_twenty, spades, Attr, CmpOp, Constraint, ConstraintData, Expr, Term,
    Valuation,
};
pub use precondition::{
    invert, ForcedToBid, Inverted, IsStrain, Jump, JumpFrom, LastBidHasAnnotation,
    LastBidHasLevel, LastBidHasStrain, LastBidWas, LastBidWasSuit, MaxLevel,
    MinimumCombinedPoints, NoCompetition, NoOpening, Opened, PartnerHasAtLeastLengthInSuit,
    Precondition, RaiseOfPartnersLastSuit, RebidSameSuit, SuitLowerThanMyLastSuit, UnbidSuit,
};
pub use priority::{Family, PartialOrdering, Priority};
pub use rule::{PriorityOutcome, Rule, RuleBuilder};
