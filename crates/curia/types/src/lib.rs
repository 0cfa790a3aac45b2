//! Curia Types - The domain vocabulary of the legislation engine.
//!
//! Norms and sanctions are the two kinds of rule an institution legislates:
//! a [`Norm`] obliges or prohibits behavior, a [`Sanction`] answers its
//! breach. Both carry an activation condition (a formula from
//! `curia-terms`), a lifecycle [`RuleState`], and a [`Content`] payload -
//! either a failure marker or an obligation with a symbolic deadline.
//! Sanctions additionally carry a six-dimension [`SanctionCategory`].
//!
//! Everything here is a value type: immutable once constructed, structural
//! equality, cheap to clone. Lifecycle transitions happen only inside the
//! legislation store.

#![deny(unsafe_code)]

pub mod category;
pub mod content;
pub mod identifier;
pub mod rule;
pub mod time;

pub use category::{
    CategoryIssuer, CategoryParseError, Discernability, Locus, Mode, Polarity, Purpose,
    SanctionCategory,
};
pub use content::{Content, ContentParseError, Obligation};
pub use identifier::{Identifier, IdentifierError};
pub use rule::{Norm, RuleState, RuleStateParseError, Sanction};
pub use time::{TimeExpr, TimeOp, TimeParseError, TimeUnit};
