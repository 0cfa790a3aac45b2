//! Rule content: the consequence a norm or sanction carries.
//!
//! Content is a closed union of two kinds - a failure marker recording why
//! something went wrong, and an obligation binding an agent to achieve a
//! goal by a deadline. Each has a canonical literal rendering used for
//! display and for round-tripping through the document loader:
//! `fail(Reason)` and `obligation(Agent, Reason, Goal, Deadline)`.

use crate::identifier::Identifier;
use crate::time::{TimeExpr, TimeParseError};
use curia_terms::{Formula, FormulaParseError, Term, TermParseError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentParseError {
    #[error("Content matches neither fail(..) nor obligation(..): {0:?}")]
    NoGrammarMatched(String),
    #[error("obligation(..) takes four arguments, found {found}: {text:?}")]
    WrongArity { found: usize, text: String },
    #[error("Unbalanced parentheses in content: {0:?}")]
    Unbalanced(String),
    #[error(transparent)]
    Term(#[from] TermParseError),
    #[error(transparent)]
    Formula(#[from] FormulaParseError),
    #[error(transparent)]
    Deadline(#[from] TimeParseError),
}

/// An obligation: `Agent` must achieve `aim` by `deadline` while
/// `maintenance` stays derivable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Obligation {
    pub target: Term,
    pub maintenance: Formula,
    pub aim: Formula,
    pub deadline: TimeExpr,
}

impl Obligation {
    pub fn new(target: Term, maintenance: Formula, aim: Formula, deadline: TimeExpr) -> Self {
        Self {
            target,
            maintenance,
            aim,
            deadline,
        }
    }
}

/// The payload of a norm or sanction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Content {
    Failure { reason: Term },
    Obligation(Obligation),
}

impl Content {
    pub fn failure(reason: Term) -> Self {
        Content::Failure { reason }
    }

    /// Parse content text with no owning rule in scope.
    ///
    /// Grammar order is fixed: `fail(..)` is tried first, then
    /// `obligation(..)`; the first functor match decides which grammar
    /// applies.
    pub fn parse(text: &str) -> Result<Self, ContentParseError> {
        parse_content(text, None)
    }

    /// Parse content text owned by a rule.
    ///
    /// An obligation's Reason argument that is textually equal to the owning
    /// rule's id is replaced by the owner's condition formula, so the content
    /// can refer back to why it was triggered.
    pub fn parse_scoped(
        text: &str,
        owner: &Identifier,
        condition: &Formula,
    ) -> Result<Self, ContentParseError> {
        parse_content(text, Some((owner, condition)))
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Failure { reason } => write!(f, "fail({reason})"),
            Content::Obligation(ob) => write!(
                f,
                "obligation({}, {}, {}, {})",
                ob.target, ob.maintenance, ob.aim, ob.deadline
            ),
        }
    }
}

fn parse_content(
    text: &str,
    owner: Option<(&Identifier, &Formula)>,
) -> Result<Content, ContentParseError> {
    let trimmed = text.trim();

    if let Some(body) = functor_body(trimmed, "fail") {
        let body = body?;
        let reason = curia_terms::parse::parse_term(body.trim())?;
        return Ok(Content::Failure { reason });
    }

    if let Some(body) = functor_body(trimmed, "obligation") {
        let body = body?;
        let args = split_top_level(body, trimmed)?;
        let [agent, reason, goal, deadline] = args.as_slice() else {
            return Err(ContentParseError::WrongArity {
                found: args.len(),
                text: trimmed.to_string(),
            });
        };

        let target = parse_agent(agent)?;
        let maintenance = match owner {
            Some((id, condition)) if *reason == id.as_str() => condition.clone(),
            _ => Formula::parse(reason)?,
        };
        let aim = Formula::parse(goal)?;
        let deadline = TimeExpr::parse(deadline)?;

        return Ok(Content::Obligation(Obligation::new(
            target,
            maintenance,
            aim,
            deadline,
        )));
    }

    Err(ContentParseError::NoGrammarMatched(trimmed.to_string()))
}

/// If `text` is `functor ( body )`, return the body; `None` when the functor
/// does not match at all (so the next grammar can be tried).
fn functor_body<'a>(
    text: &'a str,
    functor: &str,
) -> Option<Result<&'a str, ContentParseError>> {
    let rest = text.strip_prefix(functor)?;
    let rest = rest.trim_start();
    if !rest.starts_with('(') {
        return None;
    }
    let inner = match rest[1..].strip_suffix(')') {
        Some(inner) => inner,
        None => return Some(Err(ContentParseError::Unbalanced(text.to_string()))),
    };
    Some(Ok(inner))
}

/// Split on commas at parenthesis depth zero; nested parens and commas stay
/// inside their argument.
fn split_top_level(body: &str, context: &str) -> Result<Vec<String>, ContentParseError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;

    for ch in body.chars() {
        match ch {
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return Err(ContentParseError::Unbalanced(context.to_string()));
                }
                current.push(ch);
            }
            ',' if depth == 0 => {
                args.push(current.trim().to_string());
                current = String::new();
            }
            _ => current.push(ch),
        }
    }

    if depth != 0 {
        return Err(ContentParseError::Unbalanced(context.to_string()));
    }
    args.push(current.trim().to_string());
    Ok(args)
}

/// Agent is a variable when uppercase-initial, an atom term otherwise.
fn parse_agent(text: &str) -> Result<Term, ContentParseError> {
    if text.starts_with(|c: char| c.is_ascii_uppercase()) {
        Ok(Term::var(text))
    } else {
        Ok(curia_terms::parse::parse_term(text)?)
    }
}
