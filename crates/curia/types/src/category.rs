//! The six-dimension sanction classification.
//!
//! Every sanction is classified along six closed dimensions describing
//! how, why, and by whom it is applied. The category is a pure value:
//! construction, structural equality, and a canonical literal rendering
//! ordered alphabetically by dimension name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CategoryParseError {
    #[error("Unknown value for dimension {dimension}: {value:?}")]
    UnknownValue {
        dimension: &'static str,
        value: String,
    },
    #[error("Malformed category literal: {0:?}")]
    Malformed(String),
}

/// What the sanction is meant to achieve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    Punishment,
    Reward,
    Incapacitation,
    Guidance,
    Enablement,
}

impl Purpose {
    pub fn as_atom(&self) -> &'static str {
        match self {
            Purpose::Punishment => "punishment",
            Purpose::Reward => "reward",
            Purpose::Incapacitation => "incapacitation",
            Purpose::Guidance => "guidance",
            Purpose::Enablement => "enablement",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_atom())
    }
}

impl FromStr for Purpose {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "punishment" => Ok(Purpose::Punishment),
            "reward" => Ok(Purpose::Reward),
            "incapacitation" => Ok(Purpose::Incapacitation),
            "guidance" => Ok(Purpose::Guidance),
            "enablement" => Ok(Purpose::Enablement),
            _ => Err(CategoryParseError::UnknownValue {
                dimension: "purpose",
                value: s.to_string(),
            }),
        }
    }
}

/// Whether the sanction flows from the institution or from peers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryIssuer {
    Formal,
    Informal,
}

impl CategoryIssuer {
    pub fn as_atom(&self) -> &'static str {
        match self {
            CategoryIssuer::Formal => "formal",
            CategoryIssuer::Informal => "informal",
        }
    }
}

impl fmt::Display for CategoryIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_atom())
    }
}

impl FromStr for CategoryIssuer {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "formal" => Ok(CategoryIssuer::Formal),
            "informal" => Ok(CategoryIssuer::Informal),
            _ => Err(CategoryParseError::UnknownValue {
                dimension: "issuer",
                value: s.to_string(),
            }),
        }
    }
}

/// Whom the sanction lands on relative to the violator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locus {
    SelfDirected,
    OtherDirected,
}

impl Locus {
    pub fn as_atom(&self) -> &'static str {
        match self {
            Locus::SelfDirected => "self_directed",
            Locus::OtherDirected => "other_directed",
        }
    }
}

impl fmt::Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_atom())
    }
}

impl FromStr for Locus {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "self_directed" => Ok(Locus::SelfDirected),
            "other_directed" => Ok(Locus::OtherDirected),
            _ => Err(CategoryParseError::UnknownValue {
                dimension: "locus",
                value: s.to_string(),
            }),
        }
    }
}

/// Whether the sanction is applied directly or through intermediaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Direct,
    Indirect,
}

impl Mode {
    pub fn as_atom(&self) -> &'static str {
        match self {
            Mode::Direct => "direct",
            Mode::Indirect => "indirect",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_atom())
    }
}

impl FromStr for Mode {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "direct" => Ok(Mode::Direct),
            "indirect" => Ok(Mode::Indirect),
            _ => Err(CategoryParseError::UnknownValue {
                dimension: "mode",
                value: s.to_string(),
            }),
        }
    }
}

/// Whether the sanction adds a burden or removes a benefit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    pub fn as_atom(&self) -> &'static str {
        match self {
            Polarity::Positive => "positive",
            Polarity::Negative => "negative",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_atom())
    }
}

impl FromStr for Polarity {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Polarity::Positive),
            "negative" => Ok(Polarity::Negative),
            _ => Err(CategoryParseError::UnknownValue {
                dimension: "polarity",
                value: s.to_string(),
            }),
        }
    }
}

/// Whether the sanctioned agent can perceive the sanction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discernability {
    Noticeable,
    Unnoticeable,
}

impl Discernability {
    pub fn as_atom(&self) -> &'static str {
        match self {
            Discernability::Noticeable => "noticeable",
            Discernability::Unnoticeable => "unnoticeable",
        }
    }
}

impl fmt::Display for Discernability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_atom())
    }
}

impl FromStr for Discernability {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "noticeable" => Ok(Discernability::Noticeable),
            "unnoticeable" => Ok(Discernability::Unnoticeable),
            _ => Err(CategoryParseError::UnknownValue {
                dimension: "discernability",
                value: s.to_string(),
            }),
        }
    }
}

/// An immutable six-dimension classification attached to a sanction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SanctionCategory {
    pub purpose: Purpose,
    pub issuer: CategoryIssuer,
    pub locus: Locus,
    pub mode: Mode,
    pub polarity: Polarity,
    pub discernability: Discernability,
}

impl SanctionCategory {
    pub fn new(
        purpose: Purpose,
        issuer: CategoryIssuer,
        locus: Locus,
        mode: Mode,
        polarity: Polarity,
        discernability: Discernability,
    ) -> Self {
        Self {
            purpose,
            issuer,
            locus,
            mode,
            polarity,
            discernability,
        }
    }

    /// Parse the canonical literal produced by [`Display`](fmt::Display).
    pub fn parse(text: &str) -> Result<Self, CategoryParseError> {
        let malformed = || CategoryParseError::Malformed(text.to_string());
        let body = text
            .trim()
            .strip_prefix("category")
            .and_then(|rest| rest.trim_start().strip_prefix('('))
            .and_then(|rest| rest.trim_end().strip_suffix(')'))
            .ok_or_else(malformed)?;

        let fields: Vec<&str> = body.split(',').map(str::trim).collect();
        let [discernability, issuer, locus, mode, polarity, purpose] = fields.as_slice() else {
            return Err(malformed());
        };

        Ok(Self {
            purpose: purpose.parse()?,
            issuer: issuer.parse()?,
            locus: locus.parse()?,
            mode: mode.parse()?,
            polarity: polarity.parse()?,
            discernability: discernability.parse()?,
        })
    }
}

impl fmt::Display for SanctionCategory {
    /// Dimensions rendered in alphabetical order of their names.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "category({}, {}, {}, {}, {}, {})",
            self.discernability, self.issuer, self.locus, self.mode, self.polarity, self.purpose
        )
    }
}

impl FromStr for SanctionCategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
