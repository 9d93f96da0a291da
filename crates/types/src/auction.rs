use crate::call::{Call, ParseCallError};
use crate::seat::Seat;
use crate::strain::Strain;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Auction {
    pub dealer: Seat,
    pub calls: Vec<Call>,
}

impl Auction {
    pub fn new(dealer: Seat) -> Self {
        Self {
            dealer,
            calls: Vec::new(),
        }
    }

    /// Parse space-separated calls like "P 1C P 2C" into an auction.
    pub fn parse(dealer: Seat, calls: &str) -> Result<Self, ParseCallError> {
        let calls = calls
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<Call>, _>>()?;
        Ok(Self { dealer, calls })
    }

    /// Build an auction from space-separated calls like "P 1C P 2C".
    /// Panics on invalid input. For tests and known-good data.
    pub fn bidding(dealer: Seat, calls: &str) -> Self {
        Self::parse(dealer, calls).expect("invalid call")
    }

    pub fn iter(&self) -> impl Iterator<Item = (Seat, &Call)> {
        let mut seat = self.dealer;
        self.calls.iter().map(move |call| {
            let current = seat;
            seat = seat.next();
            (current, call)
        })
    }

    pub fn add_call(&mut self, call: Call) {
        self.calls.push(call);
    }

    pub fn current_player(&self) -> Seat {
        Seat::from_idx(self.dealer.idx() + self.calls.len())
    }

    pub fn is_finished(&self) -> bool {
        Self::is_finished_at(&self.calls, self.calls.len())
    }

    /// The most recent contract bid and who made it.
    pub fn last_contract_with_seat(&self) -> Option<(Seat, Call)> {
        self.iter()
            .filter(|(_, call)| call.is_contract())
            .last()
            .map(|(seat, call)| (seat, *call))
    }

    /// The most recent contract bid (not pass/double/redouble).
    pub fn last_contract(&self) -> Option<Call> {
        self.last_contract_with_seat().map(|(_, call)| call)
    }

    /// Most recent call made by the given seat.
    pub fn last_call_for(&self, seat: Seat) -> Option<Call> {
        self.iter()
            .filter(|(s, _)| *s == seat)
            .last()
            .map(|(_, call)| *call)
    }

    pub fn is_valid(&self) -> bool {
        Self::validate_calls(&self.calls)
    }

    pub fn validate_calls(calls: &[Call]) -> bool {
        let mut last_bid: Option<(u8, Strain)> = None;
        let mut last_bid_index = None;
        let mut last_double_index = None;
        let mut is_redoubled = false;

        for (i, call) in calls.iter().enumerate() {
            if i > 0 && Self::is_finished_at(calls, i) {
                return false;
            }

            match *call {
                Call::Pass => {}
                Call::Bid { level, strain } => {
                    if !(1..=7).contains(&level) {
                        return false;
                    }
                    if let Some((last_level, last_strain)) = last_bid {
                        if level < last_level || (level == last_level && strain <= last_strain) {
                            return false;
                        }
                    }
                    last_bid = Some((level, strain));
                    last_bid_index = Some(i);
                    last_double_index = None;
                    is_redoubled = false;
                }
                Call::Double => {
                    let Some(bi) = last_bid_index else {
                        return false;
                    };
                    // Only the opponents of the bidder may double, and only once.
                    if last_double_index.is_some() || is_redoubled || (i - bi) % 2 == 0 {
                        return false;
                    }
                    last_double_index = Some(i);
                }
                Call::Redouble => {
                    let Some(di) = last_double_index else {
                        return false;
                    };
                    if is_redoubled || (i - di) % 2 == 0 {
                        return false;
                    }
                    is_redoubled = true;
                    last_double_index = None;
                }
            }
        }
        true
    }

    /// Return all calls that would be legal as the next call in this auction.
    pub fn legal_calls(&self) -> Vec<Call> {
        if self.is_finished() {
            return Vec::new();
        }

        let mut candidates = vec![Call::Pass, Call::Double, Call::Redouble];
        for level in 1..=7u8 {
            for strain in Strain::ALL {
                candidates.push(Call::Bid { level, strain });
            }
        }

        let mut probe = self.calls.clone();
        candidates
            .into_iter()
            .filter(|call| {
                probe.push(*call);
                let legal = Self::validate_calls(&probe);
                probe.pop();
                legal
            })
            .collect()
    }

    fn is_finished_at(calls: &[Call], len: usize) -> bool {
        if len < 4 {
            return false;
        }
        let prefix = &calls[..len];
        if prefix.iter().all(Call::is_pass) {
            return true;
        }
        prefix[len - 3..].iter().all(Call::is_pass)
    }
}
