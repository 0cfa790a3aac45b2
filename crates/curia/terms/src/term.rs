//! Terms, literals, and unification.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A first-order term.
///
/// Atoms are lowercase-initial symbols (`alice`), variables are
/// uppercase-initial (`Agent`), and structures are functor applications over
/// further terms (`delivery(alice, parcel_7)`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    Atom(String),
    Var(String),
    Int(i64),
    Structure { functor: String, args: Vec<Term> },
}

impl Term {
    pub fn atom(name: impl Into<String>) -> Self {
        Term::Atom(name.into())
    }

    pub fn var(name: impl Into<String>) -> Self {
        Term::Var(name.into())
    }

    /// True when the term contains no variables.
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Atom(_) | Term::Int(_) => true,
            Term::Var(_) => false,
            Term::Structure { args, .. } => args.iter().all(Term::is_ground),
        }
    }

    /// Replace every bound variable with its binding, recursively.
    pub fn apply(&self, bindings: &Bindings) -> Term {
        match self {
            Term::Var(name) => match bindings.resolve(name) {
                Some(term) => term.apply(bindings),
                None => self.clone(),
            },
            Term::Structure { functor, args } => Term::Structure {
                functor: functor.clone(),
                args: args.iter().map(|a| a.apply(bindings)).collect(),
            },
            _ => self.clone(),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(name) | Term::Var(name) => write!(f, "{name}"),
            Term::Int(value) => write!(f, "{value}"),
            Term::Structure { functor, args } => {
                write!(f, "{functor}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A predicate application: functor plus argument terms.
///
/// `late(alice)` has functor `late` and one atom argument. A zero-argument
/// literal renders as the bare functor.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub functor: String,
    pub args: Vec<Term>,
}

impl Literal {
    pub fn new(functor: impl Into<String>, args: Vec<Term>) -> Self {
        Self {
            functor: functor.into(),
            args,
        }
    }

    /// A literal with no arguments.
    pub fn atom(functor: impl Into<String>) -> Self {
        Self::new(functor, vec![])
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn is_ground(&self) -> bool {
        self.args.iter().all(Term::is_ground)
    }

    /// Parse a literal from text, e.g. `late(alice)`.
    pub fn parse(input: &str) -> Result<Self, crate::parse::TermParseError> {
        crate::parse::parse_literal(input)
    }

    /// View the literal as a structure term for unification.
    pub fn as_term(&self) -> Term {
        if self.args.is_empty() {
            Term::Atom(self.functor.clone())
        } else {
            Term::Structure {
                functor: self.functor.clone(),
                args: self.args.clone(),
            }
        }
    }

    pub fn apply(&self, bindings: &Bindings) -> Literal {
        Literal {
            functor: self.functor.clone(),
            args: self.args.iter().map(|a| a.apply(bindings)).collect(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            return write!(f, "{}", self.functor);
        }
        write!(f, "{}(", self.functor)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}

/// A substitution: variable names to terms.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bindings {
    map: HashMap<String, Term>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&self, var: &str) -> Option<&Term> {
        self.map.get(var)
    }

    pub fn bind(&mut self, var: impl Into<String>, term: Term) {
        self.map.insert(var.into(), term);
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Term)> {
        self.map.iter()
    }
}

/// Walk a term down to its current representative under the bindings.
fn walk<'a>(term: &'a Term, bindings: &'a Bindings) -> &'a Term {
    let mut current = term;
    while let Term::Var(name) = current {
        match bindings.resolve(name) {
            Some(next) => current = next,
            None => break,
        }
    }
    current
}

/// First-order unification, extending `bindings` in place.
///
/// Returns false and leaves `bindings` unspecified on failure; callers clone
/// before attempting alternatives. No occurs-check: condition and fact terms
/// in this domain are shallow and acyclic.
pub fn unify(a: &Term, b: &Term, bindings: &mut Bindings) -> bool {
    let a = walk(a, bindings).clone();
    let b = walk(b, bindings).clone();

    match (&a, &b) {
        (Term::Var(x), Term::Var(y)) if x == y => true,
        (Term::Var(x), _) => {
            bindings.bind(x.clone(), b);
            true
        }
        (_, Term::Var(y)) => {
            bindings.bind(y.clone(), a);
            true
        }
        (Term::Atom(x), Term::Atom(y)) => x == y,
        (Term::Int(x), Term::Int(y)) => x == y,
        (
            Term::Structure { functor: f, args: xs },
            Term::Structure { functor: g, args: ys },
        ) => f == g && xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| unify(x, y, bindings)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unifies_variable_with_atom() {
        let mut bindings = Bindings::new();
        assert!(unify(&Term::var("X"), &Term::atom("alice"), &mut bindings));
        assert_eq!(bindings.resolve("X"), Some(&Term::atom("alice")));
    }

    #[test]
    fn unifies_structures_argument_wise() {
        let left = Term::Structure {
            functor: "late".into(),
            args: vec![Term::var("X")],
        };
        let right = Term::Structure {
            functor: "late".into(),
            args: vec![Term::atom("alice")],
        };
        let mut bindings = Bindings::new();
        assert!(unify(&left, &right, &mut bindings));
        assert_eq!(bindings.resolve("X"), Some(&Term::atom("alice")));
    }

    #[test]
    fn rejects_functor_mismatch() {
        let left = Literal::new("late", vec![Term::var("X")]).as_term();
        let right = Literal::new("on_time", vec![Term::atom("alice")]).as_term();
        let mut bindings = Bindings::new();
        assert!(!unify(&left, &right, &mut bindings));
    }

    #[test]
    fn bound_variable_must_agree() {
        let mut bindings = Bindings::new();
        assert!(unify(&Term::var("X"), &Term::atom("alice"), &mut bindings));
        assert!(!unify(&Term::var("X"), &Term::atom("bob"), &mut bindings));
    }

    #[test]
    fn apply_substitutes_recursively() {
        let mut bindings = Bindings::new();
        bindings.bind("X", Term::atom("alice"));
        let term = Term::Structure {
            functor: "pair".into(),
            args: vec![Term::var("X"), Term::Int(2)],
        };
        assert_eq!(term.apply(&bindings).to_string(), "pair(alice, 2)");
    }

    #[test]
    fn literal_displays_canonically() {
        assert_eq!(Literal::atom("sunny").to_string(), "sunny");
        assert_eq!(
            Literal::new("late", vec![Term::atom("alice")]).to_string(),
            "late(alice)"
        );
    }
}
