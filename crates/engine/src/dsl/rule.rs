use crate::dsl::{
    and, Annotation, Category, ConstraintData, Expr, Precondition, Priority,
};
use crate::error::ConfigError;
use crate::kernel::{History, PriorityCache, PriorityKey, SolveResult, Solver};
use serde::Serialize;
use std::fmt;
use types::{Call, Hand};

/// What a rule makes of one call for one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PriorityOutcome {
    Applies(Priority),
    /// The hand cannot satisfy the rule's constraints.
    DoesNotApply,
    /// The solver could not decide.
    Undetermined,
}

impl PriorityOutcome {
    pub fn priority(&self) -> Option<Priority> {
        match self {
            PriorityOutcome::Applies(priority) => Some(*priority),
            _ => None,
        }
    }
}

impl fmt::Display for PriorityOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityOutcome::Applies(priority) => write!(f, "{priority}"),
            PriorityOutcome::DoesNotApply => write!(f, "does not apply"),
            PriorityOutcome::Undetermined => write!(f, "undetermined"),
        }
    }
}

#[derive(Debug)]
struct PerCall {
    call: Call,
    constraints: ConstraintData,
    priority: Option<Priority>,
}

/// A bidding rule: which calls it explains, when, what they promise about
/// the hand, and how much it wants to make them.
#[derive(Debug)]
pub struct Rule {
    name: String,
    calls: Vec<Call>,
    preconditions: Vec<Box<dyn Precondition>>,
    per_call: Vec<PerCall>,
    shared: ConstraintData,
    conditional: Vec<(Expr, Priority)>,
    priority: Option<Priority>,
    category: Option<Category>,
    annotations: Vec<Annotation>,
    requires_planning: bool,
    cache: PriorityCache,
}

impl Rule {
    pub fn builder(name: impl Into<String>) -> RuleBuilder {
        RuleBuilder {
            name: name.into(),
            ..RuleBuilder::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn requires_planning(&self) -> bool {
        self.requires_planning
    }

    /// Calls this rule can ever make, when it names them up front.
    pub fn fixed_calls(&self) -> Option<&[Call]> {
        (!self.calls.is_empty()).then_some(self.calls.as_slice())
    }

    pub fn fits_preconditions(&self, history: &History, call: &Call) -> bool {
        self.preconditions.iter().all(|p| p.fits(history, call))
    }

    /// Legal calls whose preconditions all fit.
    pub fn calls_over<'a>(&'a self, history: &'a History) -> impl Iterator<Item = Call> + 'a {
        let legal = history.legal_calls();
        let candidates: Vec<Call> = match self.fixed_calls() {
            Some(calls) => calls.iter().copied().filter(|c| legal.contains(c)).collect(),
            None => legal,
        };
        candidates
            .into_iter()
            .filter(move |call| self.fits_preconditions(history, call))
    }

    fn per_call(&self, call: &Call) -> Option<&PerCall> {
        self.per_call.iter().find(|p| p.call == *call)
    }

    fn fallback_priority(&self, call: &Call) -> Option<Priority> {
        self.per_call(call)
            .and_then(|p| p.priority)
            .or(self.priority)
    }

    /// The call's own constraints and the shared ones, as one conjunction.
    pub fn constraints_expr_for_call(&self, history: &History, call: &Call) -> Expr {
        let mut exprs = Vec::new();
        if let Some(per_call) = self.per_call(call) {
            exprs.extend(per_call.constraints.exprs(history, call));
        }
        exprs.extend(self.shared.exprs(history, call));
        exprs.retain(|e| *e != Expr::True);
        match exprs.len() {
            0 => Expr::True,
            1 => exprs.remove(0),
            _ => and(exprs),
        }
    }

    /// Every priority this rule could give `call`, best first.
    pub fn possible_priorities_for_call(&self, call: &Call) -> Vec<Priority> {
        self.conditional
            .iter()
            .map(|(_, p)| *p)
            .chain(self.fallback_priority(call))
            .collect()
    }

    /// The priority this rule gives `call` for the hand behind `solver`.
    /// Answers are cached per (solver session, history, call, hand).
    pub fn priority_for_call_and_hand(
        &self,
        solver: &dyn Solver,
        history: &History,
        call: &Call,
        hand: Option<&Hand>,
    ) -> PriorityOutcome {
        let key = PriorityKey {
            session: solver.session_id(),
            history: history.fingerprint(),
            call: *call,
            hand: hand.map_or(0, Hand::fingerprint),
        };
        self.cache
            .get_or_compute(key, || self.compute_priority(solver, history, call))
    }

    fn compute_priority(&self, solver: &dyn Solver, history: &History, call: &Call) -> PriorityOutcome {
        let expr = self.constraints_expr_for_call(history, call);
        match solver.is_possible(&expr) {
            SolveResult::Sat => {}
            SolveResult::Unsat => return PriorityOutcome::DoesNotApply,
            SolveResult::Unknown => return PriorityOutcome::Undetermined,
        }
        for (condition, priority) in &self.conditional {
            match solver.is_possible(&and([expr.clone(), condition.clone()])) {
                SolveResult::Sat => return PriorityOutcome::Applies(*priority),
                SolveResult::Unsat => {}
                SolveResult::Unknown => return PriorityOutcome::Undetermined,
            }
        }
        match self.fallback_priority(call) {
            Some(priority) => PriorityOutcome::Applies(priority),
            None => PriorityOutcome::DoesNotApply,
        }
    }

    pub fn cache(&self) -> &PriorityCache {
        &self.cache
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Declarative construction of a [`Rule`]. Call names are validated by
/// [`RuleBuilder::build`].
#[derive(Debug, Default)]
pub struct RuleBuilder {
    name: String,
    calls: Vec<String>,
    preconditions: Vec<Box<dyn Precondition>>,
    per_call: Vec<(String, ConstraintData, Option<Priority>)>,
    shared: Vec<ConstraintData>,
    conditional: Vec<(Expr, Priority)>,
    priority: Option<Priority>,
    category: Option<Category>,
    annotations: Vec<Annotation>,
    requires_planning: bool,
}

impl RuleBuilder {
    pub fn call(mut self, name: &str) -> Self {
        self.calls.push(name.to_string());
        self
    }

    pub fn calls<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.calls.extend(names.into_iter().map(str::to_string));
        self
    }

    pub fn precondition(mut self, precondition: impl Precondition + 'static) -> Self {
        self.preconditions.push(Box::new(precondition));
        self
    }

    pub fn preconditions(mut self, preconditions: Vec<Box<dyn Precondition>>) -> Self {
        self.preconditions.extend(preconditions);
        self
    }

    /// Constraints and an optional priority for one call. The call joins the
    /// rule's call set.
    pub fn constraint_for(
        mut self,
        name: &str,
        constraints: impl Into<ConstraintData>,
        priority: Option<Priority>,
    ) -> Self {
        self.per_call
            .push((name.to_string(), constraints.into(), priority));
        self
    }

    /// Constraints every call of this rule must satisfy.
    pub fn shared(mut self, constraints: impl Into<ConstraintData>) -> Self {
        self.shared.push(constraints.into());
        self
    }

    /// Checked in declaration order; the first satisfiable condition wins.
    pub fn conditional(mut self, condition: Expr, priority: impl Into<Priority>) -> Self {
        self.conditional.push((condition, priority.into()));
        self
    }

    pub fn priority(mut self, priority: impl Into<Priority>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn annotations(mut self, annotations: &[Annotation]) -> Self {
        self.annotations.extend_from_slice(annotations);
        self
    }

    pub fn requires_planning(mut self) -> Self {
        self.requires_planning = true;
        self
    }

    pub fn build(self) -> Result<Rule, ConfigError> {
        let parse = |name: &str| {
            name.parse::<Call>()
                .map_err(|_| ConfigError::InvalidCallName {
                    rule: self.name.clone(),
                    name: name.to_string(),
                })
        };

        let mut per_call = Vec::with_capacity(self.per_call.len());
        for (name, constraints, priority) in &self.per_call {
            let call = parse(name)?;
            if per_call.iter().any(|p: &PerCall| p.call == call) {
                return Err(ConfigError::DuplicateCall {
                    rule: self.name.clone(),
                    call: call.to_string(),
                });
            }
            per_call.push(PerCall {
                call,
                constraints: constraints.clone(),
                priority: *priority,
            });
        }

        let mut calls = Vec::new();
        for name in &self.calls {
            let call = parse(name)?;
            if calls.contains(&call) {
                return Err(ConfigError::DuplicateCall {
                    rule: self.name.clone(),
                    call: call.to_string(),
                });
            }
            calls.push(call);
        }
        if calls.is_empty() {
            calls = per_call.iter().map(|p| p.call).collect();
        }

        if !self.conditional.is_empty() {
            if !per_call.is_empty() {
                return Err(ConfigError::ConditionalWithPerCall { rule: self.name });
            }
            if calls.len() != 1 {
                return Err(ConfigError::ConditionalNeedsSingleCall { rule: self.name });
            }
        }

        if self.priority.is_none() {
            let unresolved = if calls.is_empty() {
                Some("any".to_string())
            } else {
                calls
                    .iter()
                    .find(|c| !per_call.iter().any(|p| p.call == **c && p.priority.is_some()))
                    .map(Call::to_string)
            };
            if let Some(call) = unresolved {
                return Err(ConfigError::MissingPriority {
                    rule: self.name,
                    call,
                });
            }
        }

        Ok(Rule {
            name: self.name,
            calls,
            preconditions: self.preconditions,
            per_call,
            shared: ConstraintData::All(self.shared),
            conditional: self.conditional,
            priority: self.priority,
            category: self.category,
            annotations: self.annotations,
            requires_planning: self.requires_planning,
            cache: PriorityCache::default(),
        })
    }
}
