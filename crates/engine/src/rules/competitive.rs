//! Direct overcalls of the opponents' opening
//!
//! A five-card suit at the one level, or a jump to a preemptive level with
//! the same length and quality a preemptive opening would show.

use crate::dsl::{
    points, Annotation, Constraint, Jump, LastBidHasAnnotation, Precondition, Rule, RuleBuilder,
};
use crate::error::ConfigError;
use crate::kernel::Position;
use crate::priority_family;

priority_family! {
    pub enum OvercallPriority: "overcall" {
        DirectOvercall,
        FourLevelPreemptive,
        ThreeLevelPreemptive,
        TwoLevelPreemptive,
    }
}

/// Right-hand opponent just opened.
pub fn direct_overcall() -> Vec<Box<dyn Precondition>> {
    vec![Box::new(LastBidHasAnnotation(Position::Rho, Annotation::Opening))]
}

fn overcall_rule(name: &str) -> RuleBuilder {
    Rule::builder(name).preconditions(direct_overcall())
}

pub fn one_level_overcall() -> Result<Rule, ConfigError> {
    overcall_rule("OneLevelOvercall")
        .calls(["1D", "1H", "1S"])
        .shared(Constraint::MinLength(5))
        .shared(points().ge(8))
        .priority(OvercallPriority::DirectOvercall)
        .build()
}

fn preemptive_overcall(
    name: &str,
    calls: [&str; 4],
    length: u8,
    priority: OvercallPriority,
) -> Result<Rule, ConfigError> {
    overcall_rule(name)
        .precondition(Jump::from_last_contract())
        .calls(calls)
        .shared(Constraint::MinLength(length))
        .shared(Constraint::ThreeOfTheTopFive)
        .shared(points().ge(5))
        .priority(priority)
        .build()
}

pub fn two_level_preemptive_overcall() -> Result<Rule, ConfigError> {
    preemptive_overcall(
        "TwoLevelPreemptiveOvercall",
        ["2C", "2D", "2H", "2S"],
        6,
        OvercallPriority::TwoLevelPreemptive,
    )
}

pub fn three_level_preemptive_overcall() -> Result<Rule, ConfigError> {
    preemptive_overcall(
        "ThreeLevelPreemptiveOvercall",
        ["3C", "3D", "3H", "3S"],
        7,
        OvercallPriority::ThreeLevelPreemptive,
    )
}

pub fn four_level_preemptive_overcall() -> Result<Rule, ConfigError> {
    preemptive_overcall(
        "FourLevelPreemptiveOvercall",
        ["4C", "4D", "4H", "4S"],
        8,
        OvercallPriority::FourLevelPreemptive,
    )
}

pub fn rules() -> Result<Vec<Rule>, ConfigError> {
    Ok(vec![
        one_level_overcall()?,
        two_level_preemptive_overcall()?,
        three_level_preemptive_overcall()?,
        four_level_preemptive_overcall()?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::{clubs, PriorityOutcome};
    use crate::kernel::{HandSolver, History};
    use types::{Call, Hand, Seat};

    /// North opened 1C; East to call.
    fn over_one_club() -> History {
        History::builder(Seat::North)
            .call("1C".parse().unwrap(), &[Annotation::Opening], clubs().ge(3))
            .build()
    }

    fn price(rule: &Rule, history: &History, hand: &str, call: &str) -> PriorityOutcome {
        let hand = Hand::parse(hand).unwrap();
        let solver = HandSolver::for_hand(&hand, 1_000);
        let call: Call = call.parse().unwrap();
        assert!(rule.fits_preconditions(history, &call), "{rule} rejects {call}");
        rule.priority_for_call_and_hand(&solver, history, &call, Some(&hand))
    }

    #[test]
    fn test_one_level_overcall() {
        // 5 spades, 10 hcp
        let hand = "32.Q32.K32.AJ432";
        let rule = one_level_overcall().unwrap();
        assert_eq!(
            price(&rule, &over_one_club(), hand, "1S"),
            PriorityOutcome::Applies(OvercallPriority::DirectOvercall.into())
        );
        assert_eq!(price(&rule, &over_one_club(), hand, "1H"), PriorityOutcome::DoesNotApply);
    }

    #[test]
    fn test_preemptive_overcall_must_jump() {
        // 6 spades headed by KQJ
        let hand = "32.432.J2.KQJ432";
        let rule = two_level_preemptive_overcall().unwrap();
        let history = over_one_club();
        assert_eq!(
            price(&rule, &history, hand, "2S"),
            PriorityOutcome::Applies(OvercallPriority::TwoLevelPreemptive.into())
        );
        // 2C over 1C is not a jump
        assert!(!rule.fits_preconditions(&history, &"2C".parse().unwrap()));
        assert!(rule.fits_preconditions(&history, &"2D".parse().unwrap()));
    }

    #[test]
    fn test_no_overcall_without_an_opening() {
        let history = History::builder(Seat::North).pass().build();
        assert!(!one_level_overcall()
            .unwrap()
            .fits_preconditions(&history, &"1S".parse().unwrap()));
    }
}
