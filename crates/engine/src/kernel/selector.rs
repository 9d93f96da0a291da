//! Call selection
//!
//! Every rule proposes the legal calls its preconditions allow, each
//! (rule, call) pair is priced against the hand, and the best priority
//! decides the call. Ties and undecidable answers are reported as such.

use crate::config::EngineConfig;
use crate::dsl::{Category, PartialOrdering, Priority, PriorityOutcome, Rule};
use crate::kernel::{History, Solver};
use crate::rules::System;
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use types::{Call, Hand};

/// One (rule, call) pair and what the rule made of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub rule: String,
    pub call: Call,
    pub outcome: PriorityOutcome,
    pub category: Option<Category>,
    /// Every priority the rule could have given this call.
    pub possible: Vec<Priority>,
}

impl Candidate {
    fn priority(&self) -> Option<Priority> {
        self.outcome.priority()
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} via {} ({})", self.call, self.rule, self.outcome)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Decision {
    /// A single best call. `rules` names every rule that licenses it at the
    /// winning rank.
    Call {
        call: Call,
        rules: Vec<String>,
        priority: Priority,
    },
    NoRuleApplies,
    /// Different calls tie or cannot be ranked against each other.
    Ambiguous(Vec<Candidate>),
    /// An undecided (rule, call) could have changed the answer.
    Undetermined(Vec<Candidate>),
}

impl Decision {
    pub fn call(&self) -> Option<Call> {
        match self {
            Decision::Call { call, .. } => Some(*call),
            _ => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = |candidates: &[Candidate]| {
            candidates
                .iter()
                .map(Candidate::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        match self {
            Decision::Call {
                call,
                rules,
                priority,
            } => write!(f, "{call} ({}, {priority})", rules.join(", ")),
            Decision::NoRuleApplies => write!(f, "no rule applies"),
            Decision::Ambiguous(candidates) => write!(f, "ambiguous: {}", list(candidates)),
            Decision::Undetermined(candidates) => write!(f, "undetermined: {}", list(candidates)),
        }
    }
}

/// Everything considered for one turn, and the verdict.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub candidates: Vec<Candidate>,
    pub decision: Decision,
}

/// Rank two priorities, falling back to rule categories when the priorities
/// are equal or unrelated. `Greater` means `a` wins.
pub fn compare_ranked(
    ordering: &PartialOrdering,
    a: &Priority,
    a_category: Option<Category>,
    b: &Priority,
    b_category: Option<Category>,
) -> Option<Ordering> {
    let by_priority = ordering.compare(a, b);
    if matches!(by_priority, Some(Ordering::Less | Ordering::Greater)) {
        return by_priority;
    }
    match Category::rank(a_category).cmp(&Category::rank(b_category)) {
        Ordering::Equal => by_priority,
        by_category => Some(by_category),
    }
}

fn beats(ordering: &PartialOrdering, a: &Candidate, b: &Candidate) -> bool {
    match (a.priority(), b.priority()) {
        (Some(pa), Some(pb)) => {
            compare_ranked(ordering, &pa, a.category, &pb, b.category) == Some(Ordering::Greater)
        }
        _ => false,
    }
}

/// Pick the winning call from evaluated candidates.
pub fn resolve(ordering: &PartialOrdering, candidates: &[Candidate]) -> Decision {
    let applicable: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| c.priority().is_some())
        .collect();
    let undetermined: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| c.outcome == PriorityOutcome::Undetermined)
        .collect();

    let best: Vec<&Candidate> = applicable
        .iter()
        .copied()
        .filter(|c| !applicable.iter().any(|other| beats(ordering, other, c)))
        .collect();

    let Some(first) = best.first() else {
        if undetermined.is_empty() {
            return Decision::NoRuleApplies;
        }
        return Decision::Undetermined(undetermined.into_iter().cloned().collect());
    };

    if best.iter().any(|c| c.call != first.call) {
        return Decision::Ambiguous(best.into_iter().cloned().collect());
    }

    // An undecided rule for another call matters unless everything it could
    // have scored loses to the winner.
    let open: Vec<Candidate> = undetermined
        .into_iter()
        .filter(|u| u.call != first.call)
        .filter(|u| {
            !u.possible.iter().all(|p| {
                best.iter().any(|w| {
                    w.priority().is_some_and(|wp| {
                        compare_ranked(ordering, p, u.category, &wp, w.category)
                            == Some(Ordering::Less)
                    })
                })
            })
        })
        .cloned()
        .collect();
    if !open.is_empty() {
        return Decision::Undetermined(open);
    }

    match first.priority() {
        Some(priority) => Decision::Call {
            call: first.call,
            rules: best.iter().map(|c| c.rule.clone()).collect(),
            priority,
        },
        None => Decision::NoRuleApplies,
    }
}

/// Chooses calls for one bidding system.
#[derive(Debug)]
pub struct Bidder {
    system: System,
    config: EngineConfig,
}

impl Bidder {
    pub fn new(system: System, config: EngineConfig) -> Self {
        Self { system, config }
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Interpret an auction under this bidder's system.
    pub fn history(&self, auction: &types::Auction) -> History {
        History::from_auction(auction, &self.system)
    }

    fn eligible(&self, rule: &Rule) -> bool {
        !(self.config.skip_planning_rules && rule.requires_planning())
    }

    fn evaluate_pair(
        &self,
        rule: &Rule,
        call: Call,
        history: &History,
        solver: &dyn Solver,
        hand: Option<&Hand>,
    ) -> Candidate {
        let outcome = rule.priority_for_call_and_hand(solver, history, &call, hand);
        debug!("{call} via {}: {outcome}", rule.name());
        Candidate {
            rule: rule.name().to_string(),
            call,
            outcome,
            category: rule.category(),
            possible: rule.possible_priorities_for_call(&call),
        }
    }

    /// Price every (rule, call) pair the history allows and resolve them.
    pub fn evaluate(&self, history: &History, solver: &dyn Solver, hand: Option<&Hand>) -> Evaluation {
        let pairs: Vec<(&Rule, Call)> = self
            .system
            .rules()
            .iter()
            .filter(|rule| self.eligible(rule))
            .flat_map(|rule| rule.calls_over(history).map(move |call| (rule, call)))
            .collect();

        let candidates: Vec<Candidate> = if self.config.parallel {
            pairs
                .par_iter()
                .map(|(rule, call)| self.evaluate_pair(rule, *call, history, solver, hand))
                .collect()
        } else {
            pairs
                .iter()
                .map(|(rule, call)| self.evaluate_pair(rule, *call, history, solver, hand))
                .collect()
        };

        let decision = resolve(self.system.ordering(), &candidates);
        match &decision {
            Decision::Ambiguous(_) | Decision::Undetermined(_) => warn!("{decision}"),
            _ => info!("{decision}"),
        }
        Evaluation {
            candidates,
            decision,
        }
    }

    pub fn best_call(&self, history: &History, solver: &dyn Solver, hand: Option<&Hand>) -> Decision {
        self.evaluate(history, solver, hand).decision
    }
}
