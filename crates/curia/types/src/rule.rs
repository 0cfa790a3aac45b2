//! Norms and sanctions.

use crate::category::SanctionCategory;
use crate::content::Content;
use crate::identifier::Identifier;
use curia_terms::{ConsequenceEngine, FactBase, Formula, Literal};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Not a rule state: {0:?} (expected enabled or disabled)")]
pub struct RuleStateParseError(String);

/// Lifecycle state shared by norms and sanctions.
///
/// Two states, flipped only through the legislation store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleState {
    Enabled,
    Disabled,
}

impl RuleState {
    pub fn is_enabled(&self) -> bool {
        matches!(self, RuleState::Enabled)
    }
}

impl Default for RuleState {
    fn default() -> Self {
        RuleState::Enabled
    }
}

impl fmt::Display for RuleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleState::Enabled => write!(f, "enabled"),
            RuleState::Disabled => write!(f, "disabled"),
        }
    }
}

impl FromStr for RuleState {
    type Err = RuleStateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enabled" => Ok(RuleState::Enabled),
            "disabled" => Ok(RuleState::Disabled),
            other => Err(RuleStateParseError(other.to_string())),
        }
    }
}

/// An obligation or prohibition with an activation condition.
///
/// All fields are set at construction and never change afterwards, with one
/// exception: `state`, which the legislation store flips through its
/// enable/disable operations. Informational equality covers every field;
/// the store's uniqueness check is by `id` alone.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Norm {
    pub id: Identifier,
    pub state: RuleState,
    pub condition: Formula,
    pub issuer: Identifier,
    pub content: Content,
}

impl Norm {
    pub fn new(
        id: Identifier,
        state: RuleState,
        condition: Formula,
        issuer: Identifier,
        content: Content,
    ) -> Self {
        Self {
            id,
            state,
            condition,
            issuer,
            content,
        }
    }

    /// Does `fact` satisfy this norm's activation condition?
    ///
    /// Pure query: evaluates the condition against a scratch base holding
    /// exactly `fact`. Neither the norm nor the fact is touched.
    pub fn matches(&self, fact: &Literal, engine: &impl ConsequenceEngine) -> bool {
        matches_condition(&self.condition, fact, engine)
    }

    /// [`matches`](Self::matches) over raw fact text.
    ///
    /// A fact that does not parse matches nothing; malformed observations
    /// are reported as `false`, never as an error.
    pub fn matches_text(&self, fact: &str, engine: &impl ConsequenceEngine) -> bool {
        matches_condition_text(&self.condition, fact, engine)
    }
}

impl fmt::Display for Norm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "norm({}, {}, {}, {}, {})",
            self.id, self.state, self.condition, self.issuer, self.content
        )
    }
}

/// A penalty with its own activation condition and six-dimension category.
///
/// Same immutability discipline as [`Norm`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sanction {
    pub id: Identifier,
    pub state: RuleState,
    pub condition: Formula,
    pub category: SanctionCategory,
    pub content: Content,
}

impl Sanction {
    pub fn new(
        id: Identifier,
        state: RuleState,
        condition: Formula,
        category: SanctionCategory,
        content: Content,
    ) -> Self {
        Self {
            id,
            state,
            condition,
            category,
            content,
        }
    }

    /// Does `fact` satisfy this sanction's activation condition?
    pub fn matches(&self, fact: &Literal, engine: &impl ConsequenceEngine) -> bool {
        matches_condition(&self.condition, fact, engine)
    }

    /// [`matches`](Self::matches) over raw fact text; parse failure is `false`.
    pub fn matches_text(&self, fact: &str, engine: &impl ConsequenceEngine) -> bool {
        matches_condition_text(&self.condition, fact, engine)
    }
}

impl fmt::Display for Sanction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sanction({}, {}, {}, {}, {})",
            self.id, self.state, self.condition, self.category, self.content
        )
    }
}

fn matches_condition(condition: &Formula, fact: &Literal, engine: &impl ConsequenceEngine) -> bool {
    engine.entails(condition, &FactBase::singleton(fact.clone()))
}

fn matches_condition_text(
    condition: &Formula,
    fact: &str,
    engine: &impl ConsequenceEngine,
) -> bool {
    match Literal::parse(fact) {
        Ok(fact) => matches_condition(condition, &fact, engine),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{
        CategoryIssuer, Discernability, Locus, Mode, Polarity, Purpose,
    };
    use curia_terms::{Term, UnificationEngine};

    fn id(text: &str) -> Identifier {
        Identifier::new(text).unwrap()
    }

    fn late_norm() -> Norm {
        Norm::new(
            id("n1"),
            RuleState::Enabled,
            Formula::parse("late(X)").unwrap(),
            id("org"),
            Content::parse("fail(not_delivering_on_time)").unwrap(),
        )
    }

    #[test]
    fn matches_fact_unifying_with_condition() {
        let engine = UnificationEngine::new();
        let norm = late_norm();
        assert!(norm.matches(&Literal::new("late", vec![Term::atom("alice")]), &engine));
        assert!(!norm.matches(&Literal::new("on_time", vec![Term::atom("alice")]), &engine));
    }

    #[test]
    fn matching_does_not_mutate_the_norm() {
        let engine = UnificationEngine::new();
        let norm = late_norm();
        let before = norm.clone();
        norm.matches(&Literal::atom("anything"), &engine);
        assert_eq!(norm, before);
    }

    #[test]
    fn malformed_fact_text_matches_nothing() {
        let engine = UnificationEngine::new();
        let norm = late_norm();
        assert!(norm.matches_text("late(alice)", &engine));
        assert!(!norm.matches_text("late(alice", &engine));
        assert!(!norm.matches_text("", &engine));
    }

    #[test]
    fn true_condition_matches_any_fact() {
        let engine = UnificationEngine::new();
        let norm = Norm::new(
            id("n2"),
            RuleState::Enabled,
            Formula::True,
            id("org"),
            Content::parse("fail(breach)").unwrap(),
        );
        assert!(norm.matches(&Literal::atom("whatever"), &engine));
    }

    #[test]
    fn norm_renders_its_literal_form() {
        assert_eq!(
            late_norm().to_string(),
            "norm(n1, enabled, late(X), org, fail(not_delivering_on_time))"
        );
    }

    #[test]
    fn sanction_renders_its_literal_form() {
        let sanction = Sanction::new(
            id("s1"),
            RuleState::Disabled,
            Formula::True,
            SanctionCategory::new(
                Purpose::Punishment,
                CategoryIssuer::Formal,
                Locus::OtherDirected,
                Mode::Direct,
                Polarity::Negative,
                Discernability::Noticeable,
            ),
            Content::parse("fail(penalty)").unwrap(),
        );
        assert_eq!(
            sanction.to_string(),
            "sanction(s1, disabled, true, \
             category(noticeable, formal, other_directed, direct, negative, punishment), \
             fail(penalty))"
        );
    }

    #[test]
    fn rule_state_parses_its_atoms() {
        assert_eq!("enabled".parse::<RuleState>().unwrap(), RuleState::Enabled);
        assert_eq!("disabled".parse::<RuleState>().unwrap(), RuleState::Disabled);
        assert!("Enabled".parse::<RuleState>().is_err());
    }

    #[test]
    fn equality_includes_state() {
        let enabled = late_norm();
        let mut disabled = enabled.clone();
        disabled.state = RuleState::Disabled;
        assert_ne!(enabled, disabled);
    }
}
