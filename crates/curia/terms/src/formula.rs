//! Formulas and fact bases.

use crate::term::Literal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A logical formula over literals.
///
/// Closed union: the legislation engine only ever needs truth, literals,
/// negation, conjunction, and disjunction. `&` binds tighter than `|` in the
/// textual form; `not` applies to the tightest operand.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formula {
    True,
    Lit(Literal),
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
}

impl Formula {
    /// Parse a formula from text, e.g. `late(X) & not excused(X)`.
    pub fn parse(input: &str) -> Result<Self, crate::parse::FormulaParseError> {
        crate::parse::parse_formula(input)
    }

    /// A formula consisting of a single zero-argument literal.
    pub fn atom(functor: impl Into<String>) -> Self {
        Formula::Lit(Literal::atom(functor))
    }

    pub fn and(left: Formula, right: Formula) -> Self {
        Formula::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Formula, right: Formula) -> Self {
        Formula::Or(Box::new(left), Box::new(right))
    }

    pub fn negate(inner: Formula) -> Self {
        Formula::Not(Box::new(inner))
    }
}

impl From<Literal> for Formula {
    fn from(literal: Literal) -> Self {
        Formula::Lit(literal)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::True => write!(f, "true"),
            Formula::Lit(literal) => write!(f, "{literal}"),
            Formula::Not(inner) => match inner.as_ref() {
                Formula::And(..) | Formula::Or(..) => write!(f, "not ({inner})"),
                _ => write!(f, "not {inner}"),
            },
            Formula::And(left, right) => {
                write_operand(f, left, true)?;
                write!(f, " & ")?;
                write_operand(f, right, true)
            }
            Formula::Or(left, right) => {
                write_operand(f, left, false)?;
                write!(f, " | ")?;
                write_operand(f, right, false)
            }
        }
    }
}

/// Parenthesize an `|` operand nested under `&`.
fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Formula, in_and: bool) -> fmt::Result {
    if in_and && matches!(operand, Formula::Or(..)) {
        write!(f, "({operand})")
    } else {
        write!(f, "{operand}")
    }
}

/// A set of ground literals a formula is evaluated against.
///
/// The matcher only ever builds singletons, but the engine accepts any base.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactBase {
    facts: Vec<Literal>,
}

impl FactBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// The scratch base used by condition matching: exactly one fact.
    pub fn singleton(fact: Literal) -> Self {
        Self { facts: vec![fact] }
    }

    pub fn assert(&mut self, fact: Literal) {
        if !self.facts.contains(&fact) {
            self.facts.push(fact);
        }
    }

    pub fn facts(&self) -> &[Literal] {
        &self.facts
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

impl FromIterator<Literal> for FactBase {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        let mut base = FactBase::new();
        for fact in iter {
            base.assert(fact);
        }
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Term;

    #[test]
    fn displays_with_minimal_parentheses() {
        let a = Formula::atom("a");
        let b = Formula::atom("b");
        let c = Formula::atom("c");

        let and_of_or = Formula::and(Formula::or(a.clone(), b.clone()), c.clone());
        assert_eq!(and_of_or.to_string(), "(a | b) & c");

        let or_of_and = Formula::or(Formula::and(a.clone(), b.clone()), c.clone());
        assert_eq!(or_of_and.to_string(), "a & b | c");

        let negated = Formula::negate(Formula::and(a, b));
        assert_eq!(negated.to_string(), "not (a & b)");
    }

    #[test]
    fn displays_literals_inside_connectives() {
        let formula = Formula::and(
            Formula::Lit(Literal::new("late", vec![Term::var("X")])),
            Formula::negate(Formula::Lit(Literal::new("excused", vec![Term::var("X")]))),
        );
        assert_eq!(formula.to_string(), "late(X) & not excused(X)");
    }

    #[test]
    fn formula_round_trips_through_serde() {
        let formula = Formula::parse("late(X) & not excused(X)").unwrap();
        let json = serde_json::to_string(&formula).unwrap();
        let parsed: Formula = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, formula);

        // The truth constant serializes as a bare atom string.
        assert_eq!(serde_json::to_string(&Formula::True).unwrap(), "\"true\"");
    }

    #[test]
    fn fact_base_deduplicates() {
        let mut base = FactBase::new();
        base.assert(Literal::atom("sunny"));
        base.assert(Literal::atom("sunny"));
        assert_eq!(base.len(), 1);
    }
}
