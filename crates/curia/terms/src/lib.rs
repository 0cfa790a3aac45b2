//! Curia Terms - First-order terms, formulas, and logical consequence.
//!
//! This crate is the reasoning substrate of the legislation engine. Norm and
//! sanction activation conditions are [`Formula`] values over first-order
//! [`Term`]s; observed agent behavior arrives as [`Literal`] facts. The
//! [`ConsequenceEngine`] boundary answers the one question the rest of the
//! system asks: given a formula and a fact base, which substitutions make the
//! formula a logical consequence of the base?
//!
//! [`UnificationEngine`] is the built-in answer - plain first-order
//! unification with negation as failure. Hosts with a richer reasoner plug in
//! behind the same trait.

#![deny(unsafe_code)]

pub mod engine;
pub mod formula;
pub mod parse;
pub mod term;

pub use engine::{ConsequenceEngine, UnificationEngine};
pub use formula::{FactBase, Formula};
pub use parse::{FormulaParseError, TermParseError};
pub use term::{unify, Bindings, Literal, Term};
