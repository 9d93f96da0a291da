//! Preconditions: structural facts about the auction
//!
//! A rule only considers a call when every one of its preconditions fits.
//! Preconditions look at the interpreted history and the candidate call,
//! never at the bidder's hand.

use crate::dsl::Annotation;
use crate::kernel::{History, Position};
use std::fmt;
use types::{Call, Strain};

pub trait Precondition: Send + Sync + fmt::Debug {
    fn fits(&self, history: &History, call: &Call) -> bool;
}

/// The complement of another precondition.
#[derive(Debug)]
pub struct Inverted(pub Box<dyn Precondition>);

impl Precondition for Inverted {
    fn fits(&self, history: &History, call: &Call) -> bool {
        !self.0.fits(history, call)
    }
}

pub fn invert(precondition: impl Precondition + 'static) -> Inverted {
    Inverted(Box::new(precondition))
}

/// Nobody has opened yet.
#[derive(Debug)]
pub struct NoOpening;

impl Precondition for NoOpening {
    fn fits(&self, history: &History, _call: &Call) -> bool {
        !history.annotations().contains(&Annotation::Opening)
    }
}

#[derive(Debug)]
pub struct Opened(pub Position);

impl Precondition for Opened {
    fn fits(&self, history: &History, _call: &Call) -> bool {
        history
            .view_for(self.0)
            .annotations()
            .contains(&Annotation::Opening)
    }
}

/// Partner bid, RHO passed, and partner's call cannot be passed: it was
/// artificial, or partner's strength is still open-ended.
#[derive(Debug)]
pub struct ForcedToBid;

impl Precondition for ForcedToBid {
    fn fits(&self, history: &History, _call: &Call) -> bool {
        let partner = history.partner();
        if partner.last_call().is_some_and(|c| c.is_pass()) {
            return false;
        }
        // TODO: a penalty double by RHO should not release us.
        if history.rho().last_call().is_some_and(|c| !c.is_pass()) {
            return false;
        }
        if partner
            .annotations_for_last_call()
            .contains(&Annotation::Artificial)
        {
            return true;
        }
        partner.could_have_more_points_than(25)
    }
}

/// Holds when RHO's last call was anything but a pass.
#[derive(Debug)]
pub struct NoCompetition;

impl Precondition for NoCompetition {
    fn fits(&self, history: &History, _call: &Call) -> bool {
        history.rho().last_call().is_some_and(|c| !c.is_pass())
    }
}

#[derive(Debug)]
pub struct LastBidHasAnnotation(pub Position, pub Annotation);

impl Precondition for LastBidHasAnnotation {
    fn fits(&self, history: &History, _call: &Call) -> bool {
        history
            .view_for(self.0)
            .annotations_for_last_call()
            .contains(&self.1)
    }
}

/// The position's last call was in one of the listed strains.
#[derive(Debug)]
pub struct LastBidHasStrain(pub Position, pub Vec<Strain>);

impl Precondition for LastBidHasStrain {
    fn fits(&self, history: &History, _call: &Call) -> bool {
        history
            .view_for(self.0)
            .last_call()
            .and_then(|c| c.strain())
            .is_some_and(|strain| self.1.contains(&strain))
    }
}

#[derive(Debug)]
pub struct LastBidWasSuit(pub Position);

impl Precondition for LastBidWasSuit {
    fn fits(&self, history: &History, _call: &Call) -> bool {
        history
            .view_for(self.0)
            .last_call()
            .and_then(|c| c.suit())
            .is_some()
    }
}

#[derive(Debug)]
pub struct LastBidHasLevel(pub Position, pub u8);

impl Precondition for LastBidHasLevel {
    fn fits(&self, history: &History, _call: &Call) -> bool {
        history.view_for(self.0).last_call().and_then(|c| c.level()) == Some(self.1)
    }
}

#[derive(Debug)]
pub struct LastBidWas(pub Position, pub Call);

impl Precondition for LastBidWas {
    fn fits(&self, history: &History, _call: &Call) -> bool {
        history.view_for(self.0).last_call() == Some(self.1)
    }
}

/// The call raises the suit partner just bid, and partner has shown three
/// or more cards in it.
#[derive(Debug)]
pub struct RaiseOfPartnersLastSuit;

impl Precondition for RaiseOfPartnersLastSuit {
    fn fits(&self, history: &History, call: &Call) -> bool {
        let partner = history.partner();
        let Some(suit) = partner.last_call().and_then(|c| c.suit()) else {
            return false;
        };
        call.suit() == Some(suit) && partner.min_length(suit) >= 3
    }
}

#[derive(Debug)]
pub struct SuitLowerThanMyLastSuit;

impl Precondition for SuitLowerThanMyLastSuit {
    fn fits(&self, history: &History, call: &Call) -> bool {
        match (call.suit(), history.me().last_call().and_then(|c| c.suit())) {
            (Some(suit), Some(mine)) => suit < mine,
            _ => false,
        }
    }
}

#[derive(Debug)]
pub struct RebidSameSuit;

impl Precondition for RebidSameSuit {
    fn fits(&self, history: &History, call: &Call) -> bool {
        match (call.suit(), history.me().last_call().and_then(|c| c.suit())) {
            (Some(suit), Some(mine)) => suit == mine,
            _ => false,
        }
    }
}

#[derive(Debug)]
pub struct PartnerHasAtLeastLengthInSuit(pub u8);

impl Precondition for PartnerHasAtLeastLengthInSuit {
    fn fits(&self, history: &History, call: &Call) -> bool {
        call.suit()
            .is_some_and(|suit| history.partner().min_length(suit) >= self.0)
    }
}

/// A suit nobody has bid yet.
#[derive(Debug)]
pub struct UnbidSuit;

impl Precondition for UnbidSuit {
    fn fits(&self, history: &History, call: &Call) -> bool {
        call.suit().is_some_and(|suit| history.is_unbid_suit(suit))
    }
}

#[derive(Debug)]
pub struct IsStrain(pub Strain);

impl Precondition for IsStrain {
    fn fits(&self, _history: &History, call: &Call) -> bool {
        call.strain() == Some(self.0)
    }
}

/// Contract calls up to the given level. A double is judged by the level of
/// the contract it doubles.
#[derive(Debug)]
pub struct MaxLevel(pub u8);

impl Precondition for MaxLevel {
    fn fits(&self, history: &History, call: &Call) -> bool {
        let level = if call.is_double() {
            history.last_contract().and_then(|c| c.level())
        } else {
            call.level()
        };
        level.is_some_and(|level| level <= self.0)
    }
}

/// Our minimum points plus partner's reach the target.
#[derive(Debug)]
pub struct MinimumCombinedPoints(pub u8);

impl Precondition for MinimumCombinedPoints {
    fn fits(&self, history: &History, _call: &Call) -> bool {
        let combined = u16::from(history.partner().min_points()) + u16::from(history.me().min_points());
        combined >= u16::from(self.0)
    }
}

/// The call a jump is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpFrom {
    LastContract,
    MyLastBid,
    PartnerLastBid,
}

/// Jumps relative to a reference call. Without an exact size any non-zero
/// jump fits; `NotJump` variants require a size of zero.
#[derive(Debug, Clone, Copy)]
pub struct Jump {
    from: JumpFrom,
    exact_size: Option<i8>,
}

impl Jump {
    pub fn new(from: JumpFrom, exact_size: Option<i8>) -> Self {
        Self { from, exact_size }
    }

    pub fn from_last_contract() -> Self {
        Self::new(JumpFrom::LastContract, None)
    }

    pub fn from_my_last_bid() -> Self {
        Self::new(JumpFrom::MyLastBid, None)
    }

    pub fn from_partner_last_bid() -> Self {
        Self::new(JumpFrom::PartnerLastBid, None)
    }

    pub fn not_from_last_contract() -> Self {
        Self::new(JumpFrom::LastContract, Some(0))
    }

    pub fn not_from_my_last_bid() -> Self {
        Self::new(JumpFrom::MyLastBid, Some(0))
    }

    pub fn not_from_partner_last_bid() -> Self {
        Self::new(JumpFrom::PartnerLastBid, Some(0))
    }

    /// Levels skipped going from `reference` to `call`. Bidding a strain at
    /// or below the reference strain already costs a level.
    pub fn size(reference: &Call, call: &Call) -> Option<i8> {
        let (Call::Bid { level: from, strain: from_strain }, Call::Bid { level, strain }) =
            (*reference, *call)
        else {
            return None;
        };
        let diff = level as i8 - from as i8;
        Some(if strain <= from_strain { diff - 1 } else { diff })
    }

    fn reference(&self, history: &History) -> Option<Call> {
        match self.from {
            JumpFrom::LastContract => history.last_contract(),
            JumpFrom::MyLastBid => history.me().last_call(),
            JumpFrom::PartnerLastBid => history.partner().last_call(),
        }
    }
}

impl Precondition for Jump {
    fn fits(&self, history: &History, call: &Call) -> bool {
        let call = match call {
            Call::Pass => return false,
            Call::Double | Call::Redouble => match history.last_contract() {
                Some(contract) => contract,
                None => return false,
            },
            bid => *bid,
        };
        let Some(reference) = self.reference(history).filter(Call::is_contract) else {
            return false;
        };
        match (Self::size(&reference, &call), self.exact_size) {
            (Some(size), Some(exact)) => size == exact,
            (Some(size), None) => size != 0,
            (None, _) => false,
        }
    }
}
