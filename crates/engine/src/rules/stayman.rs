//! Opener's answers to Stayman
//!
//! Show a four-card major, hearts first, or deny one with the artificial
//! diamond bid. A double shows the major the opponents just overcalled.

use crate::dsl::{
    hearts, spades, Annotation, ConstraintData, Jump, LastBidHasAnnotation, LastBidWas,
    Precondition, Rule, RuleBuilder,
};
use crate::error::ConfigError;
use crate::kernel::Position;
use crate::priority_family;
use types::{Call, Strain};

priority_family! {
    pub enum StaymanResponsePriority: "stayman_response" {
        HeartStaymanResponse,
        SpadeStaymanResponse,
        DiamondStaymanResponse,
        PassStaymanResponse,
    }
}

/// Partner just asked with Stayman.
pub fn stayman_response() -> Vec<Box<dyn Precondition>> {
    vec![Box::new(LastBidHasAnnotation(Position::Partner, Annotation::Stayman))]
}

fn stayman_response_rule(name: &str) -> RuleBuilder {
    Rule::builder(name).preconditions(stayman_response())
}

pub fn natural_stayman_response() -> Result<Rule, ConfigError> {
    let heart = Some(StaymanResponsePriority::HeartStaymanResponse.into());
    let spade = Some(StaymanResponsePriority::SpadeStaymanResponse.into());
    stayman_response_rule("NaturalStaymanResponse")
        .precondition(Jump::not_from_partner_last_bid())
        .constraint_for("2H", hearts().ge(4), heart)
        .constraint_for("2S", spades().ge(4), spade)
        .constraint_for("3H", hearts().ge(4), heart)
        .constraint_for("3S", spades().ge(4), spade)
        .build()
}

pub fn pass_stayman_response() -> Result<Rule, ConfigError> {
    stayman_response_rule("PassStaymanResponse")
        .call("P")
        .priority(StaymanResponsePriority::PassStaymanResponse)
        .build()
}

/// No four-card major.
pub fn diamond_stayman_response() -> Result<Rule, ConfigError> {
    stayman_response_rule("DiamondStaymanResponse")
        .precondition(Jump::not_from_partner_last_bid())
        .constraint_for("2D", ConstraintData::None, None)
        .constraint_for("3D", ConstraintData::None, None)
        .priority(StaymanResponsePriority::DiamondStaymanResponse)
        .annotations(&[Annotation::Artificial])
        .build()
}

pub fn stolen_heart_stayman_response() -> Result<Rule, ConfigError> {
    stayman_response_rule("StolenHeartStaymanResponse")
        .precondition(LastBidWas(Position::Rho, Call::bid(2, Strain::Hearts)))
        .constraint_for("X", hearts().ge(4), None)
        .priority(StaymanResponsePriority::HeartStaymanResponse)
        .build()
}

pub fn stolen_spade_stayman_response() -> Result<Rule, ConfigError> {
    stayman_response_rule("StolenSpadeStaymanResponse")
        .precondition(LastBidWas(Position::Rho, Call::bid(2, Strain::Spades)))
        .constraint_for("X", spades().ge(4), None)
        .priority(StaymanResponsePriority::SpadeStaymanResponse)
        .build()
}

pub fn rules() -> Result<Vec<Rule>, ConfigError> {
    Ok(vec![
        natural_stayman_response()?,
        pass_stayman_response()?,
        diamond_stayman_response()?,
        stolen_heart_stayman_response()?,
        stolen_spade_stayman_response()?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::{or, Expr, PriorityOutcome};
    use crate::kernel::{HandSolver, History, HistoryBuilder};
    use types::{Hand, Seat};

    /// 1N P 2C(Stayman), with East's call still to come.
    fn after_stayman() -> HistoryBuilder {
        History::builder(Seat::North)
            .call(
                "1N".parse().unwrap(),
                &[Annotation::Opening, Annotation::NoTrumpSystemsOn],
                Expr::True,
            )
            .pass()
            .call(
                "2C".parse().unwrap(),
                &[Annotation::Artificial, Annotation::Stayman],
                or([hearts().ge(4), spades().ge(4)]),
            )
    }

    fn price(rule: &Rule, history: &History, hand: &str, call: &str) -> PriorityOutcome {
        let hand = Hand::parse(hand).unwrap();
        let solver = HandSolver::for_hand(&hand, 1_000);
        let call: Call = call.parse().unwrap();
        assert!(rule.fits_preconditions(history, &call), "{rule} rejects {call}");
        rule.priority_for_call_and_hand(&solver, history, &call, Some(&hand))
    }

    #[test]
    fn test_show_a_major() {
        let history = after_stayman().pass().build();
        // Both majors: hearts ranks first
        let both = "K32.A2.KQ32.AJ32";
        let rule = natural_stayman_response().unwrap();
        assert_eq!(
            price(&rule, &history, both, "2H"),
            PriorityOutcome::Applies(StaymanResponsePriority::HeartStaymanResponse.into())
        );
        assert_eq!(
            price(&rule, &history, both, "2S"),
            PriorityOutcome::Applies(StaymanResponsePriority::SpadeStaymanResponse.into())
        );
        // 3H would jump
        assert!(!rule.fits_preconditions(&history, &"3H".parse().unwrap()));
    }

    #[test]
    fn test_deny_a_major() {
        let history = after_stayman().pass().build();
        let no_major = "KJ32.AQ32.K32.Q2";
        assert_eq!(
            price(&natural_stayman_response().unwrap(), &history, no_major, "2H"),
            PriorityOutcome::DoesNotApply
        );
        assert_eq!(
            price(&diamond_stayman_response().unwrap(), &history, no_major, "2D"),
            PriorityOutcome::Applies(StaymanResponsePriority::DiamondStaymanResponse.into())
        );
    }

    #[test]
    fn test_double_shows_the_stolen_major() {
        let history = after_stayman()
            .call("2H".parse().unwrap(), &[], Expr::True)
            .build();
        let four_hearts = "K32.A2.KQ32.AJ32";
        assert_eq!(
            price(&stolen_heart_stayman_response().unwrap(), &history, four_hearts, "X"),
            PriorityOutcome::Applies(StaymanResponsePriority::HeartStaymanResponse.into())
        );
        assert!(!stolen_spade_stayman_response()
            .unwrap()
            .fits_preconditions(&history, &Call::Double));
    }
}
