//! Symbolic deadline expressions.
//!
//! Deadlines in obligation content are not wall-clock timestamps: they are
//! backtick-delimited phrases combined with `+`/`-`, resolved by the host
//! runtime when an obligation becomes active. `` `now` + `2 days` `` parses
//! to an arithmetic expression folded left-to-right over its phrases.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimeParseError {
    #[error("Empty time expression")]
    Empty,
    #[error("Unterminated time phrase: {0}")]
    Unterminated(String),
    #[error("Malformed time phrase: {0:?}")]
    MalformedPhrase(String),
    #[error("Unknown time unit: {0}")]
    UnknownUnit(String),
    #[error("Invalid magnitude: {0}")]
    InvalidMagnitude(String),
    #[error("Expected + or - between time phrases, found: {0:?}")]
    ExpectedOperator(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Year,
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeUnit::Millisecond => "millisecond",
            TimeUnit::Second => "second",
            TimeUnit::Minute => "minute",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
            TimeUnit::Year => "year",
        };
        write!(f, "{name}")
    }
}

impl FromStr for TimeUnit {
    type Err = TimeParseError;

    /// Accepts the singular unit name or its `s` plural.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let singular = s.strip_suffix('s').filter(|rest| !rest.is_empty()).unwrap_or(s);
        match singular {
            "millisecond" => Ok(TimeUnit::Millisecond),
            "second" => Ok(TimeUnit::Second),
            "minute" => Ok(TimeUnit::Minute),
            "hour" => Ok(TimeUnit::Hour),
            "day" => Ok(TimeUnit::Day),
            "year" => Ok(TimeUnit::Year),
            _ => Err(TimeParseError::UnknownUnit(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOp {
    Plus,
    Minus,
}

impl fmt::Display for TimeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeOp::Plus => write!(f, "+"),
            TimeOp::Minus => write!(f, "-"),
        }
    }
}

/// A deadline expression.
///
/// A single-token phrase is a named instant carrying no magnitude (`now`,
/// `never`); a two-token phrase is a magnitude and unit (`2 days`). Longer
/// expressions fold left-to-right: `` `now` + `1 hour` - `5 minutes` `` is
/// `Arith(Arith(now, +, 1 hour), -, 5 minutes)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeExpr {
    Instant(String),
    Amount { magnitude: i64, unit: TimeUnit },
    Arith {
        left: Box<TimeExpr>,
        op: TimeOp,
        right: Box<TimeExpr>,
    },
}

impl TimeExpr {
    pub fn instant(name: impl Into<String>) -> Self {
        TimeExpr::Instant(name.into())
    }

    pub fn amount(magnitude: i64, unit: TimeUnit) -> Self {
        TimeExpr::Amount { magnitude, unit }
    }

    /// Parse a backtick-delimited expression, e.g. `` `now` + `2 days` ``.
    pub fn parse(input: &str) -> Result<Self, TimeParseError> {
        let mut rest = input.trim();
        if rest.is_empty() {
            return Err(TimeParseError::Empty);
        }

        let (first, tail) = take_phrase(rest)?;
        let mut expr = parse_phrase(first)?;
        rest = tail.trim_start();

        while !rest.is_empty() {
            let op = match rest.chars().next() {
                Some('+') => TimeOp::Plus,
                Some('-') => TimeOp::Minus,
                _ => return Err(TimeParseError::ExpectedOperator(rest.to_string())),
            };
            rest = rest[1..].trim_start();
            let (phrase, tail) = take_phrase(rest)?;
            expr = TimeExpr::Arith {
                left: Box::new(expr),
                op,
                right: Box::new(parse_phrase(phrase)?),
            };
            rest = tail.trim_start();
        }

        Ok(expr)
    }
}

/// Consume one `` `...` `` phrase, returning its body and the remainder.
fn take_phrase(input: &str) -> Result<(&str, &str), TimeParseError> {
    let rest = input
        .strip_prefix('`')
        .ok_or_else(|| TimeParseError::MalformedPhrase(input.to_string()))?;
    match rest.find('`') {
        Some(end) => Ok((&rest[..end], &rest[end + 1..])),
        None => Err(TimeParseError::Unterminated(input.to_string())),
    }
}

fn parse_phrase(body: &str) -> Result<TimeExpr, TimeParseError> {
    let tokens: Vec<&str> = body.split_whitespace().collect();
    match tokens.as_slice() {
        [name] if name.parse::<i64>().is_err() => Ok(TimeExpr::Instant((*name).to_string())),
        [magnitude, unit] => {
            let magnitude = magnitude
                .parse::<i64>()
                .map_err(|_| TimeParseError::InvalidMagnitude((*magnitude).to_string()))?;
            Ok(TimeExpr::Amount {
                magnitude,
                unit: unit.parse()?,
            })
        }
        _ => Err(TimeParseError::MalformedPhrase(body.to_string())),
    }
}

impl fmt::Display for TimeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeExpr::Instant(name) => write!(f, "`{name}`"),
            TimeExpr::Amount { magnitude, unit } => {
                if magnitude.abs() == 1 {
                    write!(f, "`{magnitude} {unit}`")
                } else {
                    write!(f, "`{magnitude} {unit}s`")
                }
            }
            TimeExpr::Arith { left, op, right } => write!(f, "{left} {op} {right}"),
        }
    }
}
