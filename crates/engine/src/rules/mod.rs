//! Standard American Yellow Card
//!
//! The rule catalog, grouped by the point in the auction where each rule
//! speaks, and the ordering between their priority families.

pub mod competitive;
pub mod gerber;
pub mod notrump;
pub mod opening;
pub mod registry;
pub mod response;
pub mod stayman;

pub use registry::System;

use crate::dsl::PartialOrdering;
use crate::error::ConfigError;
use log::debug;
use notrump::NoTrumpResponsePriority;
use opening::{OpeningPriority, PreemptPriority};
use response::ResponsePriority;

/// Families that rank against each other. Families not related here only
/// compete through rule categories.
pub fn family_ordering() -> Result<PartialOrdering, ConfigError> {
    PartialOrdering::new([
        (ResponsePriority::family(), NoTrumpResponsePriority::family()),
        (PreemptPriority::family(), OpeningPriority::family()),
    ])
}

pub fn standard_american_yellow_card() -> Result<System, ConfigError> {
    let mut rules = opening::rules()?;
    rules.extend(response::rules()?);
    rules.extend(notrump::rules()?);
    rules.extend(stayman::rules()?);
    rules.extend(competitive::rules()?);
    rules.extend(gerber::rules()?);
    debug!("loaded {} rules", rules.len());
    System::new("sayc", rules, family_ordering()?)
}
