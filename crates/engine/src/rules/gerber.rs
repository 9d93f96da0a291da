//! Gerber
//!
//! 4C over partner's natural notrump asks for aces, 5C then asks for kings.
//! The answers step up from the next suit: none (or all four), one, two,
//! three. Asking requires a slam plan, so only the answers are ever chosen
//! directly; the asks still matter for reading an auction.

use crate::dsl::{
    invert, number_of_aces, number_of_kings, or, Annotation, Category, Expr, Jump,
    LastBidHasAnnotation, LastBidHasStrain, Rule, RuleBuilder, Term,
};
use crate::error::ConfigError;
use crate::kernel::Position;
use crate::priority_family;
use types::Strain;

priority_family! {
    pub enum FeatureAskingPriority: "feature_asking" {
        Gerber,
        Blackwood,
    }
}

fn gerber_rule(name: &str) -> RuleBuilder {
    Rule::builder(name)
        .category(Category::FeatureAsking)
        .requires_planning()
        .annotations(&[Annotation::Gerber])
        .priority(FeatureAskingPriority::Gerber)
}

pub fn gerber_for_aces() -> Result<Rule, ConfigError> {
    gerber_rule("GerberForAces")
        .call("4C")
        .precondition(LastBidHasStrain(Position::Partner, vec![Strain::NoTrump]))
        .precondition(invert(LastBidHasAnnotation(
            Position::Partner,
            Annotation::Artificial,
        )))
        .build()
}

pub fn gerber_for_kings() -> Result<Rule, ConfigError> {
    gerber_rule("GerberForKings")
        .call("5C")
        .precondition(LastBidHasAnnotation(Position::Me, Annotation::Gerber))
        .build()
}

/// `count` of something, where zero and four share a step.
fn step(term: fn() -> Term, count: i32) -> Expr {
    match count {
        0 => or([term().equals(0), term().equals(4)]),
        n => term().equals(n),
    }
}

pub fn response_to_gerber() -> Result<Rule, ConfigError> {
    let mut rule = Rule::builder("ResponseToGerber")
        .category(Category::Relay)
        .precondition(LastBidHasAnnotation(Position::Partner, Annotation::Gerber))
        .precondition(Jump::not_from_partner_last_bid())
        .priority(FeatureAskingPriority::Gerber)
        .annotations(&[Annotation::Artificial]);
    let steps = ["D", "H", "S", "N"];
    for (count, strain) in (0..).zip(steps) {
        rule = rule
            .constraint_for(&format!("4{strain}"), step(number_of_aces, count), None)
            .constraint_for(&format!("5{strain}"), step(number_of_kings, count), None);
    }
    rule.build()
}

pub fn rules() -> Result<Vec<Rule>, ConfigError> {
    Ok(vec![gerber_for_aces()?, gerber_for_kings()?, response_to_gerber()?])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::PriorityOutcome;
    use crate::kernel::{HandSolver, History};
    use types::{Call, Hand, Seat};

    fn notrump_then(ask: &str) -> History {
        History::builder(Seat::North)
            .call(
                "1N".parse().unwrap(),
                &[Annotation::Opening, Annotation::NoTrumpSystemsOn],
                Expr::True,
            )
            .pass()
            .call(ask.parse().unwrap(), &[Annotation::Gerber], Expr::True)
            .pass()
            .build()
    }

    fn answer(history: &History, hand: &str) -> Vec<Call> {
        let hand = Hand::parse(hand).unwrap();
        let solver = HandSolver::for_hand(&hand, 1_000);
        let rule = response_to_gerber().unwrap();
        rule.calls_over(history)
            .filter(|call| {
                rule.priority_for_call_and_hand(&solver, history, call, Some(&hand))
                    .priority()
                    .is_some()
            })
            .collect()
    }

    #[test]
    fn test_ace_steps() {
        let history = notrump_then("4C");
        // One ace
        assert_eq!(answer(&history, "KQ2.KJ3.A432.Q32"), vec!["4H".parse().unwrap()]);
        // No aces and four aces share 4D
        assert_eq!(answer(&history, "KQ2.KJ3.K432.Q32"), vec!["4D".parse().unwrap()]);
        assert_eq!(answer(&history, "A32.A32.A432.A32"), vec!["4D".parse().unwrap()]);
    }

    #[test]
    fn test_king_steps() {
        let history = notrump_then("5C");
        // Two kings
        assert_eq!(answer(&history, "KQ2.KJ3.A432.Q32"), vec!["5S".parse().unwrap()]);
    }

    #[test]
    fn test_gerber_needs_natural_notrump() {
        let rule = gerber_for_aces().unwrap();
        let four_clubs: Call = "4C".parse().unwrap();
        let natural = History::builder(Seat::North)
            .call(
                "1N".parse().unwrap(),
                &[Annotation::Opening, Annotation::NoTrumpSystemsOn],
                Expr::True,
            )
            .pass()
            .build();
        assert!(rule.fits_preconditions(&natural, &four_clubs));
        assert!(rule.requires_planning());

        let over_suit = History::builder(Seat::North)
            .call("1H".parse().unwrap(), &[Annotation::Opening], Expr::True)
            .pass()
            .build();
        assert!(!rule.fits_preconditions(&over_suit, &four_clubs));
    }
}
