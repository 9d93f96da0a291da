//! SAYC bidding engine
//!
//! Rules declare which calls they explain, when, what each call promises
//! about the hand, and how strongly they want it. For a hand and an auction
//! the engine prices every legal (rule, call) pair and picks the best one.
//!
//! ```ignore
//! let hand = Hand::parse("86.KJ74.AQ63.975").unwrap();
//! let auction = Auction::parse(Seat::North, "1N P").unwrap();
//! assert_eq!(sayc_engine::select_call(&hand, &auction)?.call(), Some("2C".parse()?));
//! ```
//!
//! Hands must hold 13 distinct cards and auctions must be legal; anything
//! else is an [`EngineError`] rather than a decision.

pub mod config;
pub mod dsl;
pub mod error;
pub mod kernel;
pub mod rules;

pub use config::EngineConfig;
pub use error::{ConfigError, EngineError, EngineResult};
pub use kernel::{Bidder, Candidate, Decision, Evaluation, HandSolver, History};
pub use rules::{standard_american_yellow_card, System};

use log::debug;
use std::sync::OnceLock;
use types::{Auction, Hand};

impl Bidder {
    /// A bidder for the standard catalog.
    pub fn sayc(config: EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(standard_american_yellow_card()?, config))
    }

    /// Interpret `auction` and evaluate every candidate for `hand`.
    pub fn evaluate_hand(&self, hand: &Hand, auction: &Auction) -> EngineResult<Evaluation> {
        validate(hand, auction)?;
        let history = self.history(auction);
        debug!("{} to call with {}", history.seat_on_turn(), hand);
        let solver = HandSolver::for_hand(hand, self.config().solver_budget);
        Ok(self.evaluate(&history, &solver, Some(hand)))
    }
}

fn validate(hand: &Hand, auction: &Auction) -> EngineResult<()> {
    if !hand.is_valid() {
        return Err(EngineError::InvalidHand(hand.to_string()));
    }
    if !auction.is_valid() {
        let calls: Vec<String> = auction.calls.iter().map(ToString::to_string).collect();
        return Err(EngineError::InvalidAuction(calls.join(" ")));
    }
    Ok(())
}

fn shared_bidder() -> Result<&'static Bidder, ConfigError> {
    static BIDDER: OnceLock<Result<Bidder, ConfigError>> = OnceLock::new();
    BIDDER
        .get_or_init(|| Bidder::sayc(EngineConfig::default()))
        .as_ref()
        .map_err(Clone::clone)
}

/// Best call for `hand` at this point of `auction`, using the standard
/// catalog and default configuration.
pub fn select_call(hand: &Hand, auction: &Auction) -> EngineResult<Decision> {
    Ok(shared_bidder()?.evaluate_hand(hand, auction)?.decision)
}
