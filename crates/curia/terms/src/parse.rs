//! Tokenizer and recursive-descent parsers for terms, literals, and formulas.
//!
//! The grammar is recursive in nested structures, so this is a hand-written
//! descent parser rather than a regex layer.

use crate::formula::Formula;
use crate::term::{Literal, Term};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TermParseError {
    #[error("Unexpected end of input")]
    UnexpectedEof,
    #[error("Unexpected token: {0}")]
    UnexpectedToken(String),
    #[error("Unexpected character: {0}")]
    UnexpectedChar(char),
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    #[error("Expected a predicate symbol, found: {0}")]
    ExpectedFunctor(String),
    #[error("Trailing input: {0}")]
    TrailingInput(String),
}

#[derive(Debug, Error)]
pub enum FormulaParseError {
    #[error(transparent)]
    Term(#[from] TermParseError),
    #[error("Trailing input after formula: {0}")]
    TrailingInput(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Int(String),
    Symbol(char),
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Ident(value) | Token::Int(value) => value.clone(),
            Token::Symbol(ch) => ch.to_string(),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, TermParseError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.peek().copied() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        if ch == '-' {
            chars.next();
            match chars.peek().copied() {
                Some(digit) if digit.is_ascii_digit() => {
                    let mut value = String::from('-');
                    while let Some(d) = chars.peek().copied() {
                        if d.is_ascii_digit() {
                            value.push(d);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    tokens.push(Token::Int(value));
                    continue;
                }
                _ => return Err(TermParseError::UnexpectedChar('-')),
            }
        }

        if ch.is_ascii_digit() {
            let mut value = String::new();
            while let Some(d) = chars.peek().copied() {
                if d.is_ascii_digit() {
                    value.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Int(value));
            continue;
        }

        if is_ident_start(ch) {
            let mut value = String::new();
            while let Some(c) = chars.peek().copied() {
                if is_ident_char(c) {
                    value.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Ident(value));
            continue;
        }

        if matches!(ch, '(' | ')' | ',' | '&' | '|') {
            tokens.push(Token::Symbol(ch));
            chars.next();
            continue;
        }

        return Err(TermParseError::UnexpectedChar(ch));
    }

    Ok(tokens)
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Uppercase-initial (or `_`-initial) identifiers are variables.
fn is_variable_name(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_uppercase() || c == '_')
}

/// Parse a single term; the whole input must be consumed.
pub fn parse_term(input: &str) -> Result<Term, TermParseError> {
    let mut parser = Parser::new(tokenize(input)?);
    let term = parser.parse_term()?;
    parser.expect_eof()?;
    Ok(term)
}

/// Parse a single literal; the whole input must be consumed.
pub fn parse_literal(input: &str) -> Result<Literal, TermParseError> {
    let mut parser = Parser::new(tokenize(input)?);
    let literal = parser.parse_literal()?;
    parser.expect_eof()?;
    Ok(literal)
}

/// Parse a formula; the whole input must be consumed.
pub fn parse_formula(input: &str) -> Result<Formula, FormulaParseError> {
    let mut parser = Parser::new(tokenize(input)?);
    let formula = parser.parse_formula()?;
    if let Some(token) = parser.peek() {
        return Err(FormulaParseError::TrailingInput(token.describe()));
    }
    Ok(formula)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    // formula := and_expr ('|' and_expr)*
    fn parse_formula(&mut self) -> Result<Formula, TermParseError> {
        let mut formula = self.parse_and()?;
        while self.peek_symbol('|') {
            self.pos += 1;
            let right = self.parse_and()?;
            formula = Formula::or(formula, right);
        }
        Ok(formula)
    }

    // and_expr := unary ('&' unary)*
    fn parse_and(&mut self) -> Result<Formula, TermParseError> {
        let mut formula = self.parse_unary()?;
        while self.peek_symbol('&') {
            self.pos += 1;
            let right = self.parse_unary()?;
            formula = Formula::and(formula, right);
        }
        Ok(formula)
    }

    // unary := 'not' unary | 'true' | '(' formula ')' | literal
    fn parse_unary(&mut self) -> Result<Formula, TermParseError> {
        match self.peek() {
            Some(Token::Ident(name)) if name == "not" => {
                self.pos += 1;
                let inner = self.parse_unary()?;
                Ok(Formula::negate(inner))
            }
            Some(Token::Ident(name)) if name == "true" => {
                self.pos += 1;
                Ok(Formula::True)
            }
            Some(Token::Symbol('(')) => {
                self.pos += 1;
                let inner = self.parse_formula()?;
                self.consume_symbol(')')?;
                Ok(inner)
            }
            Some(_) => self.parse_literal().map(Formula::Lit),
            None => Err(TermParseError::UnexpectedEof),
        }
    }

    fn parse_literal(&mut self) -> Result<Literal, TermParseError> {
        let functor = match self.next() {
            Some(Token::Ident(name)) if !is_variable_name(&name) => name,
            Some(token) => return Err(TermParseError::ExpectedFunctor(token.describe())),
            None => return Err(TermParseError::UnexpectedEof),
        };
        let args = if self.peek_symbol('(') {
            self.parse_args()?
        } else {
            vec![]
        };
        Ok(Literal::new(functor, args))
    }

    fn parse_term(&mut self) -> Result<Term, TermParseError> {
        match self.next() {
            Some(Token::Ident(name)) => {
                if is_variable_name(&name) {
                    Ok(Term::Var(name))
                } else if self.peek_symbol('(') {
                    let args = self.parse_args()?;
                    Ok(Term::Structure {
                        functor: name,
                        args,
                    })
                } else {
                    Ok(Term::Atom(name))
                }
            }
            Some(Token::Int(value)) => value
                .parse::<i64>()
                .map(Term::Int)
                .map_err(|_| TermParseError::InvalidNumber(value)),
            Some(token) => Err(TermParseError::UnexpectedToken(token.describe())),
            None => Err(TermParseError::UnexpectedEof),
        }
    }

    // args := '(' term (',' term)* ')'
    fn parse_args(&mut self) -> Result<Vec<Term>, TermParseError> {
        self.consume_symbol('(')?;
        let mut args = vec![self.parse_term()?];
        while self.peek_symbol(',') {
            self.pos += 1;
            args.push(self.parse_term()?);
        }
        self.consume_symbol(')')?;
        Ok(args)
    }

    fn consume_symbol(&mut self, symbol: char) -> Result<(), TermParseError> {
        match self.next() {
            Some(Token::Symbol(ch)) if ch == symbol => Ok(()),
            Some(token) => Err(TermParseError::UnexpectedToken(token.describe())),
            None => Err(TermParseError::UnexpectedEof),
        }
    }

    fn peek_symbol(&self, symbol: char) -> bool {
        matches!(self.peek(), Some(Token::Symbol(ch)) if *ch == symbol)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect_eof(&self) -> Result<(), TermParseError> {
        match self.peek() {
            None => Ok(()),
            Some(token) => Err(TermParseError::TrailingInput(token.describe())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_atoms_variables_and_numbers() {
        assert_eq!(parse_term("alice").unwrap(), Term::atom("alice"));
        assert_eq!(parse_term("Agent").unwrap(), Term::var("Agent"));
        assert_eq!(parse_term("_anon").unwrap(), Term::var("_anon"));
        assert_eq!(parse_term("-42").unwrap(), Term::Int(-42));
    }

    #[test]
    fn parses_nested_structures() {
        let term = parse_term("delivery(alice, parcel(7))").unwrap();
        assert_eq!(term.to_string(), "delivery(alice, parcel(7))");
    }

    #[test]
    fn parses_literals() {
        let literal = parse_literal("late(alice)").unwrap();
        assert_eq!(literal.functor, "late");
        assert_eq!(literal.arity(), 1);

        let bare = parse_literal("sunny").unwrap();
        assert_eq!(bare.arity(), 0);
    }

    #[test]
    fn rejects_variable_as_functor() {
        assert!(matches!(
            parse_literal("Late(alice)"),
            Err(TermParseError::ExpectedFunctor(_))
        ));
    }

    #[test]
    fn rejects_trailing_input() {
        assert!(matches!(
            parse_literal("late(alice) extra"),
            Err(TermParseError::TrailingInput(_))
        ));
    }

    #[test]
    fn parses_formula_with_precedence() {
        let formula = parse_formula("a | b & c").unwrap();
        assert_eq!(formula.to_string(), "a | b & c");
        assert!(matches!(formula, Formula::Or(..)));

        let grouped = parse_formula("(a | b) & c").unwrap();
        assert!(matches!(grouped, Formula::And(..)));
    }

    #[test]
    fn parses_negation_and_truth() {
        assert_eq!(parse_formula("true").unwrap(), Formula::True);
        let formula = parse_formula("not late(X)").unwrap();
        assert_eq!(formula.to_string(), "not late(X)");
    }

    #[test]
    fn formula_round_trips_through_display() {
        for text in ["late(X) & not excused(X)", "(a | b) & c", "true"] {
            let formula = parse_formula(text).unwrap();
            assert_eq!(formula.to_string(), text);
        }
    }
}
