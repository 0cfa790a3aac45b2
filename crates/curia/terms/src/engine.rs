//! Logical-consequence evaluation.

use crate::formula::{FactBase, Formula};
use crate::term::{unify, Bindings};

/// The question the legislation engine asks of its reasoner: which
/// substitutions make `formula` a logical consequence of `base`?
///
/// The trait exists so a host runtime can substitute a richer reasoner; the
/// in-tree [`UnificationEngine`] is sufficient for condition matching.
pub trait ConsequenceEngine {
    /// All satisfying substitutions, possibly empty.
    fn solutions(&self, formula: &Formula, base: &FactBase) -> Vec<Bindings>;

    /// True iff at least one satisfying substitution exists.
    fn entails(&self, formula: &Formula, base: &FactBase) -> bool {
        !self.solutions(formula, base).is_empty()
    }
}

/// Plain first-order unification with negation as failure.
///
/// `True` yields the empty substitution, a literal unifies against every
/// fact in the base, `&` joins consistent bindings, `|` unions both sides,
/// and `not F` succeeds exactly when `F` has no solution under the current
/// bindings.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnificationEngine;

impl UnificationEngine {
    pub fn new() -> Self {
        Self
    }

    fn solve(&self, formula: &Formula, base: &FactBase, seed: &Bindings) -> Vec<Bindings> {
        match formula {
            Formula::True => vec![seed.clone()],
            Formula::Lit(literal) => {
                let goal = literal.as_term();
                base.facts()
                    .iter()
                    .filter_map(|fact| {
                        let mut candidate = seed.clone();
                        unify(&goal, &fact.as_term(), &mut candidate).then_some(candidate)
                    })
                    .collect()
            }
            Formula::And(left, right) => self
                .solve(left, base, seed)
                .iter()
                .flat_map(|partial| self.solve(right, base, partial))
                .collect(),
            Formula::Or(left, right) => {
                let mut solutions = self.solve(left, base, seed);
                solutions.extend(self.solve(right, base, seed));
                solutions
            }
            Formula::Not(inner) => {
                if self.solve(inner, base, seed).is_empty() {
                    vec![seed.clone()]
                } else {
                    vec![]
                }
            }
        }
    }
}

impl ConsequenceEngine for UnificationEngine {
    fn solutions(&self, formula: &Formula, base: &FactBase) -> Vec<Bindings> {
        self.solve(formula, base, &Bindings::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{Literal, Term};

    fn late_alice() -> FactBase {
        FactBase::singleton(Literal::new("late", vec![Term::atom("alice")]))
    }

    #[test]
    fn truth_always_holds() {
        let engine = UnificationEngine::new();
        assert!(engine.entails(&Formula::True, &FactBase::new()));
    }

    #[test]
    fn literal_matches_unifiable_fact() {
        let engine = UnificationEngine::new();
        let condition = Formula::parse("late(X)").unwrap();
        let solutions = engine.solutions(&condition, &late_alice());
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].resolve("X"), Some(&Term::atom("alice")));
    }

    #[test]
    fn literal_rejects_different_functor() {
        let engine = UnificationEngine::new();
        let condition = Formula::parse("on_time(X)").unwrap();
        assert!(!engine.entails(&condition, &late_alice()));
    }

    #[test]
    fn conjunction_shares_bindings() {
        let engine = UnificationEngine::new();
        let base: FactBase = [
            Literal::new("late", vec![Term::atom("alice")]),
            Literal::new("member", vec![Term::atom("alice")]),
            Literal::new("member", vec![Term::atom("bob")]),
        ]
        .into_iter()
        .collect();

        let condition = Formula::parse("late(X) & member(X)").unwrap();
        let solutions = engine.solutions(&condition, &base);
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].resolve("X"), Some(&Term::atom("alice")));
    }

    #[test]
    fn disjunction_collects_both_sides() {
        let engine = UnificationEngine::new();
        let base: FactBase = [
            Literal::new("late", vec![Term::atom("alice")]),
            Literal::new("absent", vec![Term::atom("bob")]),
        ]
        .into_iter()
        .collect();

        let condition = Formula::parse("late(X) | absent(X)").unwrap();
        assert_eq!(engine.solutions(&condition, &base).len(), 2);
    }

    #[test]
    fn negation_as_failure() {
        let engine = UnificationEngine::new();
        let condition = Formula::parse("not on_time(alice)").unwrap();
        assert!(engine.entails(&condition, &late_alice()));

        let refuted = Formula::parse("not late(alice)").unwrap();
        assert!(!engine.entails(&refuted, &late_alice()));
    }

    #[test]
    fn negation_respects_earlier_bindings() {
        let engine = UnificationEngine::new();
        let base: FactBase = [
            Literal::new("late", vec![Term::atom("alice")]),
            Literal::new("late", vec![Term::atom("bob")]),
            Literal::new("excused", vec![Term::atom("bob")]),
        ]
        .into_iter()
        .collect();

        let condition = Formula::parse("late(X) & not excused(X)").unwrap();
        let solutions = engine.solutions(&condition, &base);
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].resolve("X"), Some(&Term::atom("alice")));
    }
}
