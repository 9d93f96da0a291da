use crate::dsl::{PartialOrdering, Rule};
use crate::error::ConfigError;
use crate::kernel::{compare_ranked, History};
use std::cmp::Ordering;
use std::collections::HashSet;
use types::Call;

/// A bidding system: its rules, in declaration order, and the ordering
/// between their priority families.
#[derive(Debug)]
pub struct System {
    name: &'static str,
    rules: Vec<Rule>,
    ordering: PartialOrdering,
}

impl System {
    pub fn new(
        name: &'static str,
        rules: Vec<Rule>,
        ordering: PartialOrdering,
    ) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        if let Some(duplicate) = rules.iter().find(|r| !seen.insert(r.name())) {
            return Err(ConfigError::DuplicateRule(duplicate.name().to_string()));
        }
        Ok(Self {
            name,
            rules,
            ordering,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name() == name)
    }

    pub fn ordering(&self) -> &PartialOrdering {
        &self.ordering
    }

    /// The rule that explains `call` made over `history`: among the rules
    /// whose call set and preconditions accept it, one no other outranks,
    /// earliest declared first.
    pub fn interpret(&self, history: &History, call: &Call) -> Option<&Rule> {
        let accepting: Vec<&Rule> = self
            .rules
            .iter()
            .filter(|r| r.fixed_calls().map_or(true, |calls| calls.contains(call)))
            .filter(|r| r.fits_preconditions(history, call))
            .collect();

        let outranks = |a: &Rule, b: &Rule| {
            let best = |r: &Rule| r.possible_priorities_for_call(call).first().copied();
            match (best(a), best(b)) {
                (Some(pa), Some(pb)) => {
                    compare_ranked(&self.ordering, &pa, a.category(), &pb, b.category())
                        == Some(Ordering::Greater)
                }
                _ => false,
            }
        };

        accepting
            .iter()
            .find(|r| !accepting.iter().any(|other| outranks(*other, *r)))
            .or(accepting.first())
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::{points, Annotation, Expr, NoOpening};
    use types::Seat;

    crate::priority_family! {
        enum Low: "low" { Only }
    }

    crate::priority_family! {
        enum High: "high" { Only }
    }

    fn rule(name: &str, priority: impl Into<crate::dsl::Priority>) -> Rule {
        Rule::builder(name)
            .call("1C")
            .precondition(NoOpening)
            .shared(points().ge(12))
            .priority(priority)
            .build()
            .unwrap()
    }

    #[test]
    fn test_duplicate_rule_names() {
        let result = System::new(
            "test",
            vec![rule("Same", Low::Only), rule("Same", High::Only)],
            PartialOrdering::default(),
        );
        assert_eq!(result.unwrap_err(), ConfigError::DuplicateRule("Same".into()));
    }

    #[test]
    fn test_interpret_prefers_higher_family() {
        let ordering = PartialOrdering::new([(Low::family(), High::family())]).unwrap();
        let system = System::new(
            "test",
            vec![rule("Lower", Low::Only), rule("Higher", High::Only)],
            ordering,
        )
        .unwrap();
        let history = History::builder(Seat::North).build();
        let club: Call = "1C".parse().unwrap();
        assert_eq!(system.interpret(&history, &club).map(Rule::name), Some("Higher"));
        assert!(system.interpret(&history, &Call::Pass).is_none());

        let opened = History::builder(Seat::North)
            .call(club, &[Annotation::Opening], Expr::True)
            .build();
        assert!(system.interpret(&opened, &"2C".parse().unwrap()).is_none());
    }

    #[test]
    fn test_interpret_falls_back_to_declaration_order() {
        let system = System::new(
            "test",
            vec![rule("First", Low::Only), rule("Second", High::Only)],
            PartialOrdering::default(),
        )
        .unwrap();
        let history = History::builder(Seat::North).build();
        let interpreted = system.interpret(&history, &"1C".parse().unwrap());
        assert_eq!(interpreted.map(Rule::name), Some("First"));
    }
}
