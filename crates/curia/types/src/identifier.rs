//! Norm and sanction identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentifierError {
    #[error("Malformed identifier: {0:?} (expected a lowercase-initial atom)")]
    Malformed(String),
}

/// The key type for norms and sanctions: a lowercase-initial atom.
///
/// Equality is by text. Validation happens once at construction; a held
/// `Identifier` is always well-formed, including after deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Validate and intern `text` as an identifier.
    pub fn new(text: impl Into<String>) -> Result<Self, IdentifierError> {
        let text = text.into();
        if is_atom(&text) {
            Ok(Self(text))
        } else {
            Err(IdentifierError::Malformed(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_atom(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_lowercase_atoms() {
        for text in ["n1", "delivery_norm", "s", "a_2_b"] {
            assert!(Identifier::new(text).is_ok(), "{text} should be accepted");
        }
    }

    #[test]
    fn rejects_uppercase_initial_and_bad_syntax() {
        for text in ["N1", "", "1norm", "_n", "late(alice)", "has space", "dash-ed"] {
            assert!(
                matches!(Identifier::new(text), Err(IdentifierError::Malformed(_))),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn equality_is_by_text() {
        let a = Identifier::new("n1").unwrap();
        let b = Identifier::new("n1").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn deserialization_validates() {
        assert!(serde_json::from_str::<Identifier>("\"n1\"").is_ok());
        assert!(serde_json::from_str::<Identifier>("\"N1\"").is_err());
    }
}
