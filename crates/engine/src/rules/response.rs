//! Responses to partner's suit opening
//!
//! New majors at the one level, single and limit raises of a major, new
//! suits at the two level with ten or more points, and 1NT as the catch-all.

use crate::dsl::{
    and, clubs, diamonds, hearts, points, spades, Annotation, Constraint, Jump,
    LastBidHasAnnotation, Precondition, RaiseOfPartnersLastSuit, Rule, RuleBuilder, UnbidSuit,
};
use crate::error::ConfigError;
use crate::kernel::Position;
use crate::priority_family;

priority_family! {
    pub enum ResponsePriority: "response" {
        MajorLimitRaise,
        MajorMinimumRaise,
        LongestNewMajor,
        OneSpadeWithFiveResponse,
        OneHeartWithFiveResponse,
        OneDiamondResponse,
        OneHeartWithFourResponse,
        OneSpadeWithFourResponse,
        TwoHeartNewSuitResponse,
        TwoSpadeNewSuitResponse,
        TwoClubNewSuitResponse,
        TwoDiamondNewSuitResponse,
        OneNotrumpResponse,
    }
}

/// Partner opened.
pub fn responding() -> Vec<Box<dyn Precondition>> {
    vec![Box::new(LastBidHasAnnotation(Position::Partner, Annotation::Opening))]
}

fn response_rule(name: &str) -> RuleBuilder {
    Rule::builder(name).preconditions(responding())
}

pub fn one_diamond_response() -> Result<Rule, ConfigError> {
    response_rule("OneDiamondResponse")
        .call("1D")
        .shared(vec![points().ge(6), diamonds().ge(4)])
        .priority(ResponsePriority::OneDiamondResponse)
        .build()
}

pub fn one_heart_response() -> Result<Rule, ConfigError> {
    response_rule("OneHeartResponse")
        .call("1H")
        .shared(vec![points().ge(6), hearts().ge(4)])
        .conditional(
            and([hearts().ge(5), hearts().gt(spades())]),
            ResponsePriority::LongestNewMajor,
        )
        .conditional(hearts().ge(5), ResponsePriority::OneHeartWithFiveResponse)
        .priority(ResponsePriority::OneHeartWithFourResponse)
        .build()
}

pub fn one_spade_response() -> Result<Rule, ConfigError> {
    response_rule("OneSpadeResponse")
        .call("1S")
        .shared(vec![points().ge(6), spades().ge(4)])
        .conditional(spades().ge(5), ResponsePriority::OneSpadeWithFiveResponse)
        .priority(ResponsePriority::OneSpadeWithFourResponse)
        .build()
}

pub fn one_notrump_response() -> Result<Rule, ConfigError> {
    response_rule("OneNotrumpResponse")
        .call("1N")
        .shared(points().ge(6))
        .priority(ResponsePriority::OneNotrumpResponse)
        .build()
}

fn major_raise(name: &str, calls: [&str; 2], min_points: i32) -> RuleBuilder {
    response_rule(name)
        .precondition(RaiseOfPartnersLastSuit)
        .calls(calls)
        .shared(Constraint::MinimumCombinedLength(8))
        .shared(points().ge(min_points))
}

pub fn major_minimum_raise() -> Result<Rule, ConfigError> {
    major_raise("MajorMinimumRaise", ["2H", "2S"], 6)
        .priority(ResponsePriority::MajorMinimumRaise)
        .build()
}

pub fn major_limit_raise() -> Result<Rule, ConfigError> {
    major_raise("MajorLimitRaise", ["3H", "3S"], 10)
        .priority(ResponsePriority::MajorLimitRaise)
        .build()
}

pub fn new_suit_at_the_two_level() -> Result<Rule, ConfigError> {
    response_rule("NewSuitAtTheTwoLevel")
        .precondition(UnbidSuit)
        .precondition(Jump::not_from_last_contract())
        .constraint_for(
            "2C",
            clubs().ge(4),
            Some(ResponsePriority::TwoClubNewSuitResponse.into()),
        )
        .constraint_for(
            "2D",
            diamonds().ge(4),
            Some(ResponsePriority::TwoDiamondNewSuitResponse.into()),
        )
        .constraint_for(
            "2H",
            hearts().ge(5),
            Some(ResponsePriority::TwoHeartNewSuitResponse.into()),
        )
        .constraint_for(
            "2S",
            spades().ge(5),
            Some(ResponsePriority::TwoSpadeNewSuitResponse.into()),
        )
        .shared(points().ge(10))
        .build()
}

pub fn rules() -> Result<Vec<Rule>, ConfigError> {
    Ok(vec![
        one_diamond_response()?,
        one_heart_response()?,
        one_spade_response()?,
        one_notrump_response()?,
        major_minimum_raise()?,
        major_limit_raise()?,
        new_suit_at_the_two_level()?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::{Expr, PriorityOutcome};
    use crate::kernel::{HandSolver, History};
    use types::{Call, Hand, Seat};

    /// North opened 1C, East passed; South to bid.
    fn over_one_club() -> History {
        History::builder(Seat::North)
            .call("1C".parse().unwrap(), &[Annotation::Opening], clubs().ge(3))
            .pass()
            .build()
    }

    /// North opened 1H, East passed; South to bid.
    fn over_one_heart() -> History {
        History::builder(Seat::North)
            .call("1H".parse().unwrap(), &[Annotation::Opening], hearts().ge(5))
            .pass()
            .build()
    }

    fn price(rule: &Rule, history: &History, hand: &str, call: &str) -> PriorityOutcome {
        let hand = Hand::parse(hand).unwrap();
        let solver = HandSolver::for_hand(&hand, 1_000);
        let call: Call = call.parse().unwrap();
        assert!(rule.fits_preconditions(history, &call), "{rule} rejects {call}");
        rule.priority_for_call_and_hand(&solver, history, &call, Some(&hand))
    }

    fn applies(level: ResponsePriority) -> PriorityOutcome {
        PriorityOutcome::Applies(level.into())
    }

    #[test]
    fn test_one_heart_response_prefers_longest_major() {
        // 5 hearts, 4 spades, 8 hcp
        let hand = "32.J2.KQ432.Q432";
        let rule = one_heart_response().unwrap();
        assert_eq!(
            price(&rule, &over_one_club(), hand, "1H"),
            applies(ResponsePriority::LongestNewMajor)
        );
        // 4-4 majors bid up the line
        let four_four = "32.J32.KQ43.Q432";
        assert_eq!(
            price(&rule, &over_one_club(), four_four, "1H"),
            applies(ResponsePriority::OneHeartWithFourResponse)
        );
    }

    #[test]
    fn test_response_needs_an_opening() {
        let rule = one_diamond_response().unwrap();
        let unopened = History::builder(Seat::North).build();
        assert!(!rule.fits_preconditions(&unopened, &"1D".parse().unwrap()));
    }

    #[test]
    fn test_major_raises() {
        // 3 hearts, 12 hcp
        let hand = "K32.Q32.K32.A432";
        let history = over_one_heart();
        assert_eq!(
            price(&major_limit_raise().unwrap(), &history, hand, "3H"),
            applies(ResponsePriority::MajorLimitRaise)
        );
        assert_eq!(
            price(&major_minimum_raise().unwrap(), &history, hand, "2H"),
            applies(ResponsePriority::MajorMinimumRaise)
        );
        // Not a raise: spades were never bid
        assert!(!major_minimum_raise()
            .unwrap()
            .fits_preconditions(&history, &"2S".parse().unwrap()));
    }

    #[test]
    fn test_new_suit_at_the_two_level() {
        // 5 clubs, 13 hcp
        let hand = "AKJ32.K32.Q2.432";
        let rule = new_suit_at_the_two_level().unwrap();
        let history = over_one_heart();
        assert_eq!(
            price(&rule, &history, hand, "2C"),
            applies(ResponsePriority::TwoClubNewSuitResponse)
        );
        assert_eq!(price(&rule, &history, hand, "2D"), PriorityOutcome::DoesNotApply);
        // Partner's suit is not new
        assert!(!rule.fits_preconditions(&history, &"2H".parse().unwrap()));
        assert_eq!(rule.possible_priorities_for_call(&"2S".parse().unwrap()).len(), 1);
    }

    #[test]
    fn test_one_notrump_response() {
        let history = History::builder(Seat::North)
            .call("1S".parse().unwrap(), &[Annotation::Opening], Expr::True)
            .pass()
            .build();
        assert_eq!(
            price(&one_notrump_response().unwrap(), &history, "Q432.K32.J32.432", "1N"),
            applies(ResponsePriority::OneNotrumpResponse)
        );
    }
}
