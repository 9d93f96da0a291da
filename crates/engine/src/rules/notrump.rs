//! Responses to a 1NT or 2NT opening
//!
//! Stayman (including the double that replaces a 2C or 3C stolen by an
//! overcall) and Jacoby transfers to either major.

use crate::dsl::{
    and, hearts, or, points, spades, Annotation, Category, Constraint, Jump,
    LastBidHasAnnotation, LastBidWas, Precondition, Rule, RuleBuilder,
};
use crate::error::ConfigError;
use crate::kernel::Position;
use crate::priority_family;
use types::{Call, Strain, Suit};

priority_family! {
    pub enum NoTrumpResponsePriority: "nt_response" {
        NoTrumpJumpRaise,
        NoTrumpMinimumRaise,
        JacobyTransferToLongerMajor,
        JacobyTransferToSpadesWithGameForcingValues,
        JacobyTransferToHeartsWithGameForcingValues,
        JacobyTransferToHearts,
        JacobyTransferToSpades,
        Stayman,
        ClubBust,
    }
}

/// Partner opened in notrump and our system is on.
pub fn notrump_response() -> Vec<Box<dyn Precondition>> {
    vec![
        Box::new(LastBidHasAnnotation(Position::Partner, Annotation::Opening)),
        Box::new(LastBidHasAnnotation(Position::Partner, Annotation::NoTrumpSystemsOn)),
    ]
}

fn notrump_rule(name: &str) -> RuleBuilder {
    Rule::builder(name)
        .category(Category::NoTrump)
        .preconditions(notrump_response())
}

fn stayman_rule(name: &str) -> RuleBuilder {
    notrump_rule(name)
        .annotations(&[Annotation::Artificial, Annotation::Stayman])
        .priority(NoTrumpResponsePriority::Stayman)
        .shared(or([hearts().ge(4), spades().ge(4)]))
}

pub fn stayman() -> Result<Rule, ConfigError> {
    stayman_rule("Stayman")
        .precondition(Jump::not_from_partner_last_bid())
        .constraint_for("2C", Constraint::MinimumCombinedPoints(23), None)
        .constraint_for("3C", Constraint::MinimumCombinedPoints(25), None)
        .build()
}

/// Double stands in for 2C after the opponents overcall it.
pub fn stolen_two_club_stayman() -> Result<Rule, ConfigError> {
    stayman_rule("StolenTwoClubStayman")
        .precondition(LastBidWas(Position::Rho, Call::bid(2, Strain::Clubs)))
        .constraint_for("X", Constraint::MinimumCombinedPoints(23), None)
        .build()
}

pub fn stolen_three_club_stayman() -> Result<Rule, ConfigError> {
    stayman_rule("StolenThreeClubStayman")
        .precondition(LastBidWas(Position::Rho, Call::bid(3, Strain::Clubs)))
        .constraint_for("X", Constraint::MinimumCombinedPoints(25), None)
        .build()
}

fn jacoby_transfer(
    name: &str,
    call: &str,
    target: Suit,
    game_forcing: NoTrumpResponsePriority,
    weak: NoTrumpResponsePriority,
) -> Result<Rule, ConfigError> {
    let (length, other) = match target {
        Suit::Hearts => (hearts(), spades()),
        _ => (spades(), hearts()),
    };
    notrump_rule(name)
        .annotations(&[
            Annotation::Artificial,
            Annotation::Transfer,
            Annotation::TransferTo(target),
        ])
        .call(call)
        .shared(length.clone().ge(5))
        .conditional(
            length.clone().gt(other.clone()),
            NoTrumpResponsePriority::JacobyTransferToLongerMajor,
        )
        .conditional(and([length.equals(other), points().ge(10)]), game_forcing)
        .priority(weak)
        .build()
}

pub fn jacoby_transfer_to_hearts() -> Result<Rule, ConfigError> {
    jacoby_transfer(
        "JacobyTransferToHearts",
        "2D",
        Suit::Hearts,
        NoTrumpResponsePriority::JacobyTransferToHeartsWithGameForcingValues,
        NoTrumpResponsePriority::JacobyTransferToHearts,
    )
}

pub fn jacoby_transfer_to_spades() -> Result<Rule, ConfigError> {
    jacoby_transfer(
        "JacobyTransferToSpades",
        "2H",
        Suit::Spades,
        NoTrumpResponsePriority::JacobyTransferToSpadesWithGameForcingValues,
        NoTrumpResponsePriority::JacobyTransferToSpades,
    )
}

pub fn rules() -> Result<Vec<Rule>, ConfigError> {
    Ok(vec![
        stayman()?,
        stolen_two_club_stayman()?,
        stolen_three_club_stayman()?,
        jacoby_transfer_to_hearts()?,
        jacoby_transfer_to_spades()?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::{balanced, Expr, PriorityOutcome};
    use crate::kernel::{HandSolver, History};
    use types::{Hand, Seat};

    const OPENER: &[Annotation] = &[Annotation::Opening, Annotation::NoTrumpSystemsOn];

    fn one_notrump() -> crate::kernel::HistoryBuilder {
        History::builder(Seat::North).call(
            "1N".parse().unwrap(),
            OPENER,
            and([points().ge(15), points().le(17), balanced()]),
        )
    }

    fn price(rule: &Rule, history: &History, hand: &str, call: &str) -> PriorityOutcome {
        let hand = Hand::parse(hand).unwrap();
        let solver = HandSolver::for_hand(&hand, 10_000);
        let call: Call = call.parse().unwrap();
        assert!(rule.fits_preconditions(history, &call), "{rule} rejects {call}");
        rule.priority_for_call_and_hand(&solver, history, &call, Some(&hand))
    }

    fn applies(level: NoTrumpResponsePriority) -> PriorityOutcome {
        PriorityOutcome::Applies(level.into())
    }

    #[test]
    fn test_stayman_with_a_four_card_major() {
        let history = one_notrump().pass().build();
        let rule = stayman().unwrap();
        assert_eq!(
            price(&rule, &history, "86.KJ74.AQ63.975", "2C"),
            applies(NoTrumpResponsePriority::Stayman)
        );
        // 3C would be a jump over 1N
        assert!(!rule.fits_preconditions(&history, &"3C".parse().unwrap()));
        // Too weak to look for game
        assert_eq!(
            price(&rule, &history, "86.J742.Q763.975", "2C"),
            PriorityOutcome::DoesNotApply
        );
        assert!(rule.annotations().contains(&Annotation::Stayman));
    }

    #[test]
    fn test_stolen_stayman() {
        let history = one_notrump().call("2C".parse().unwrap(), &[], Expr::True).build();
        let rule = stolen_two_club_stayman().unwrap();
        assert_eq!(
            price(&rule, &history, "86.KJ74.AQ63.975", "X"),
            applies(NoTrumpResponsePriority::Stayman)
        );
        let quiet = one_notrump().pass().build();
        assert!(!rule.fits_preconditions(&quiet, &Call::Double));
    }

    #[test]
    fn test_jacoby_transfers() {
        let history = one_notrump().pass().build();
        // 5 hearts, 3 spades, weak
        let weak_hearts = "864.J2.Q7632.975";
        assert_eq!(
            price(&jacoby_transfer_to_hearts().unwrap(), &history, weak_hearts, "2D"),
            applies(NoTrumpResponsePriority::JacobyTransferToLongerMajor)
        );
        // 5-5 majors with game values prefers spades
        let five_five = "8.A2.KQ763.KJ975";
        assert_eq!(
            price(&jacoby_transfer_to_hearts().unwrap(), &history, five_five, "2D"),
            applies(NoTrumpResponsePriority::JacobyTransferToHeartsWithGameForcingValues)
        );
        assert_eq!(
            price(&jacoby_transfer_to_spades().unwrap(), &history, five_five, "2H"),
            applies(NoTrumpResponsePriority::JacobyTransferToSpadesWithGameForcingValues)
        );
        let spades = jacoby_transfer_to_spades().unwrap();
        assert!(spades
            .annotations()
            .contains(&Annotation::TransferTo(Suit::Spades)));
    }

    #[test]
    fn test_needs_notrump_opening() {
        let history = History::builder(Seat::North)
            .call("1C".parse().unwrap(), &[Annotation::Opening], Expr::True)
            .pass()
            .build();
        assert!(!stayman().unwrap().fits_preconditions(&history, &"2C".parse().unwrap()));
    }
}
