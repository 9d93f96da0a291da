//! Opening bids
//!
//! Suit openings follow the rule of twenty; majors need five cards. Among
//! openings that fit, strong 2C beats notrump beats majors beats minors.
//! Preemptive openings rank below every constructive opening.

use crate::dsl::{
    and, balanced, clubs, diamonds, hearts, or, points, rule_of_twenty, spades, Annotation,
    Constraint, NoOpening, Precondition, Rule, RuleBuilder,
};
use crate::error::ConfigError;
use crate::priority_family;

priority_family! {
    pub enum OpeningPriority: "opening" {
        StrongTwoClubs,
        NoTrumpOpening,
        LongestMajor,
        HigherMajor,
        LowerMajor,
        LongestMinor,
        HigherMinor,
        LowerMinor,
    }
}

priority_family! {
    pub enum PreemptPriority: "preempt" {
        FourLevelPreemptive,
        ThreeLevelPreemptive,
        TwoLevelPreemptive,
    }
}

/// Nobody has opened yet.
pub fn opening() -> Vec<Box<dyn Precondition>> {
    vec![Box::new(NoOpening)]
}

fn opening_rule(name: &str) -> RuleBuilder {
    Rule::builder(name)
        .preconditions(opening())
        .annotations(&[Annotation::Opening])
}

pub fn one_club_opening() -> Result<Rule, ConfigError> {
    opening_rule("OneClubOpening")
        .call("1C")
        .shared(vec![rule_of_twenty(), clubs().ge(3)])
        .conditional(
            or([clubs().gt(diamonds()), and([clubs().equals(3), diamonds().equals(3)])]),
            OpeningPriority::LongestMinor,
        )
        .priority(OpeningPriority::LowerMinor)
        .build()
}

pub fn one_diamond_opening() -> Result<Rule, ConfigError> {
    opening_rule("OneDiamondOpening")
        .call("1D")
        .shared(vec![rule_of_twenty(), diamonds().ge(3)])
        .conditional(diamonds().gt(clubs()), OpeningPriority::LongestMinor)
        .priority(OpeningPriority::HigherMinor)
        .build()
}

pub fn one_heart_opening() -> Result<Rule, ConfigError> {
    opening_rule("OneHeartOpening")
        .call("1H")
        .shared(vec![rule_of_twenty(), hearts().ge(5)])
        .conditional(hearts().gt(spades()), OpeningPriority::LongestMajor)
        .priority(OpeningPriority::LowerMajor)
        .build()
}

pub fn one_spade_opening() -> Result<Rule, ConfigError> {
    opening_rule("OneSpadeOpening")
        .call("1S")
        .shared(vec![rule_of_twenty(), spades().ge(5)])
        .conditional(spades().gt(hearts()), OpeningPriority::LongestMajor)
        .priority(OpeningPriority::HigherMajor)
        .build()
}

pub fn notrump_opening() -> Result<Rule, ConfigError> {
    opening_rule("NoTrumpOpening")
        .annotations(&[Annotation::NoTrumpSystemsOn])
        .constraint_for("1N", and([points().ge(15), points().le(17), balanced()]), None)
        .constraint_for("2N", and([points().ge(20), points().le(21), balanced()]), None)
        .priority(OpeningPriority::NoTrumpOpening)
        .build()
}

// TODO: also open 2C on nine playing tricks.
pub fn strong_two_clubs() -> Result<Rule, ConfigError> {
    opening_rule("StrongTwoClubs")
        .call("2C")
        .shared(points().ge(22))
        .priority(OpeningPriority::StrongTwoClubs)
        .build()
}

fn preemptive_open(
    name: &str,
    calls: &[&str],
    length: u8,
    priority: PreemptPriority,
) -> Result<Rule, ConfigError> {
    opening_rule(name)
        .calls(calls.iter().copied())
        .shared(Constraint::MinLength(length))
        .shared(Constraint::ThreeOfTheTopFive)
        .shared(points().ge(5))
        .priority(priority)
        .build()
}

pub fn two_level_preemptive_open() -> Result<Rule, ConfigError> {
    // 2C is strong
    preemptive_open(
        "TwoLevelPreemptiveOpen",
        &["2D", "2H", "2S"],
        6,
        PreemptPriority::TwoLevelPreemptive,
    )
}

pub fn three_level_preemptive_open() -> Result<Rule, ConfigError> {
    preemptive_open(
        "ThreeLevelPreemptiveOpen",
        &["3C", "3D", "3H", "3S"],
        7,
        PreemptPriority::ThreeLevelPreemptive,
    )
}

pub fn four_level_preemptive_open() -> Result<Rule, ConfigError> {
    preemptive_open(
        "FourLevelPreemptiveOpen",
        &["4C", "4D", "4H", "4S"],
        8,
        PreemptPriority::FourLevelPreemptive,
    )
}

pub fn rules() -> Result<Vec<Rule>, ConfigError> {
    Ok(vec![
        one_club_opening()?,
        one_diamond_opening()?,
        one_heart_opening()?,
        one_spade_opening()?,
        notrump_opening()?,
        strong_two_clubs()?,
        two_level_preemptive_open()?,
        three_level_preemptive_open()?,
        four_level_preemptive_open()?,
    ])
}
