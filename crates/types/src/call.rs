use crate::strain::Strain;
use crate::suit::Suit;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid call name: {0:?}")]
pub struct ParseCallError(pub String);

/// A call in the auction. Serialized by its short name ("P", "X", "1C").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Call {
    Pass,
    Double,
    Redouble,
    Bid { level: u8, strain: Strain },
}

impl Call {
    pub fn bid(level: u8, strain: Strain) -> Self {
        Call::Bid { level, strain }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Call::Pass)
    }

    pub fn is_double(&self) -> bool {
        matches!(self, Call::Double)
    }

    pub fn is_redouble(&self) -> bool {
        matches!(self, Call::Redouble)
    }

    /// True for contract bids (level and strain), false for Pass/X/XX.
    pub fn is_contract(&self) -> bool {
        matches!(self, Call::Bid { .. })
    }

    /// Returns the level of this call, if it's a bid.
    pub fn level(&self) -> Option<u8> {
        match self {
            Call::Bid { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Returns the strain of this call, if it's a bid.
    pub fn strain(&self) -> Option<Strain> {
        match self {
            Call::Bid { strain, .. } => Some(*strain),
            _ => None,
        }
    }

    /// Returns the suit of this call, if it's a suited bid.
    pub fn suit(&self) -> Option<Suit> {
        self.strain().and_then(Strain::to_suit)
    }

    /// Canonical short name: "P", "X", "XX", "1C" .. "7N".
    pub fn name(&self) -> String {
        match self {
            Call::Pass => "P".to_string(),
            Call::Double => "X".to_string(),
            Call::Redouble => "XX".to_string(),
            Call::Bid { level, strain } => format!("{}{}", level, strain.to_char()),
        }
    }
}

impl FromStr for Call {
    type Err = ParseCallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "P" | "PASS" => return Ok(Call::Pass),
            "X" | "DBL" | "DOUBLE" => return Ok(Call::Double),
            "XX" | "RDBL" | "REDOUBLE" => return Ok(Call::Redouble),
            _ => {}
        }
        let mut chars = normalized.chars();
        let level = chars
            .next()
            .and_then(|c| c.to_digit(10))
            .filter(|l| (1..=7).contains(l));
        let strain = chars.next().and_then(Strain::from_char);
        match (level, strain, chars.next()) {
            (Some(level), Some(strain), None) => Ok(Call::Bid {
                level: level as u8,
                strain,
            }),
            _ => Err(ParseCallError(s.to_string())),
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for Call {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Call {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        assert_eq!("P".parse::<Call>(), Ok(Call::Pass));
        assert_eq!("x".parse::<Call>(), Ok(Call::Double));
        assert_eq!("XX".parse::<Call>(), Ok(Call::Redouble));
        assert_eq!("2N".parse::<Call>(), Ok(Call::bid(2, Strain::NoTrump)));
        assert_eq!("1c".parse::<Call>(), Ok(Call::bid(1, Strain::Clubs)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("8C".parse::<Call>().is_err());
        assert!("0S".parse::<Call>().is_err());
        assert!("1Z".parse::<Call>().is_err());
        assert!("1SS".parse::<Call>().is_err());
        assert!("".parse::<Call>().is_err());
    }

    #[test]
    fn test_serde_uses_names() {
        let calls = vec![Call::Pass, Call::bid(3, Strain::NoTrump)];
        let json = serde_json::to_string(&calls).unwrap();
        assert_eq!(json, r#"["P","3N"]"#);
        assert_eq!(serde_json::from_str::<Vec<Call>>(&json).unwrap(), calls);
        assert!(serde_json::from_str::<Call>(r#""9Z""#).is_err());
    }

    #[test]
    fn test_name_round_trips() {
        for name in ["P", "X", "XX", "1C", "3H", "7N"] {
            assert_eq!(name.parse::<Call>().unwrap().name(), name);
        }
    }

    #[test]
    fn test_call_predicates() {
        let call = Call::bid(4, Strain::Spades);
        assert!(call.is_contract());
        assert_eq!(call.suit(), Some(Suit::Spades));
        assert!(!Call::Double.is_contract());
        assert_eq!(Call::bid(3, Strain::NoTrump).suit(), None);
        assert_eq!(Call::Pass.level(), None);
    }
}
