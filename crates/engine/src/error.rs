//! Error types for the bidding engine
//!
//! Configuration errors are defects in the static rule catalog and are
//! raised while the system is being assembled. Nothing in here is used for
//! query-time outcomes; see [`crate::Decision`] for those.

use thiserror::Error;

/// A defect in the rule catalog or priority ordering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Some call the rule can produce has no priority to fall back on
    #[error("rule {rule} has no priority for call {call}")]
    MissingPriority { rule: String, call: String },

    /// Conditional priorities are evaluated against a single call
    #[error("rule {rule} declares conditional priorities but does not name exactly one call")]
    ConditionalNeedsSingleCall { rule: String },

    /// Conditional priorities and per-call priorities cannot be mixed
    #[error("rule {rule} declares both conditional priorities and per-call constraints")]
    ConditionalWithPerCall { rule: String },

    /// A declared call name does not parse
    #[error("rule {rule} declares invalid call name {name:?}")]
    InvalidCallName { rule: String, name: String },

    /// The same call is declared twice in one rule's constraint mapping
    #[error("rule {rule} declares constraints for {call} more than once")]
    DuplicateCall { rule: String, call: String },

    /// Two rules in one system share a name
    #[error("duplicate rule name {0}")]
    DuplicateRule(String),

    /// The family ordering is not acyclic
    #[error("priority ordering has a cycle through family {0}")]
    OrderingCycle(&'static str),
}

/// Top-level error for building and configuring an engine.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid bidding system: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid hand {0}: expected 13 distinct cards")]
    InvalidHand(String),

    #[error("illegal auction: {0}")]
    InvalidAuction(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
