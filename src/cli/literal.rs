//! Literal expressions accepted by `--key` and `--date`
//!
//! The grammar is a small, data-only subset of familiar literal syntax:
//!
//! ```text
//! value  := string | list | tuple | bare
//! string := '...' | "..."          (backslash escapes the next character)
//! list   := '[' [value (',' value)* [',']] ']'
//! tuple  := '(' [value (',' value)* [',']] ')'
//! bare   := any run of characters other than , [ ] ( ) ' "
//! ```
//!
//! `(x)` is just `x`; a one-item tuple is written `(x,)`. A bare token that
//! parses as an integer is an integer, otherwise it is a trimmed string.

use crate::models::FilterSpec;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Str(String),
    Int(i64),
    List(Vec<Literal>),
    Tuple(Vec<Literal>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error("unexpected {found:?} at position {position}")]
    Unexpected { found: char, position: usize },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("unterminated string starting at position {position}")]
    UnterminatedString { position: usize },

    #[error("trailing input at position {position}")]
    TrailingInput { position: usize },
}

/// Parse a whole literal expression
pub fn parse_literal(input: &str) -> Result<Literal, LiteralError> {
    let mut parser = Parser {
        chars: input.char_indices().collect(),
        pos: 0,
    };
    let value = parser.value()?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(value),
        Some((position, _)) => Err(LiteralError::TrailingInput { position }),
    }
}

struct Parser {
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<(usize, char)> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let next = self.peek();
        if next.is_some() {
            self.pos += 1;
        }
        next
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some((_, c)) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn value(&mut self) -> Result<Literal, LiteralError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(LiteralError::UnexpectedEnd { expected: "a value" }),
            Some((_, '\'' | '"')) => self.string(),
            Some((_, '[')) => {
                self.pos += 1;
                let (items, _) = self.sequence(']')?;
                Ok(Literal::List(items))
            }
            Some((_, '(')) => {
                self.pos += 1;
                let (mut items, trailing_comma) = self.sequence(')')?;
                if items.len() == 1 && !trailing_comma {
                    Ok(items.remove(0))
                } else {
                    Ok(Literal::Tuple(items))
                }
            }
            Some((position, found @ (']' | ')' | ','))) => {
                Err(LiteralError::Unexpected { found, position })
            }
            Some(_) => Ok(self.bare()),
        }
    }

    /// Items up to `close`; also reports whether the last item was followed by a comma
    fn sequence(&mut self, close: char) -> Result<(Vec<Literal>, bool), LiteralError> {
        let mut items = Vec::new();
        let mut trailing_comma = false;

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(LiteralError::UnexpectedEnd { expected: "a closing bracket" }),
                Some((_, c)) if c == close => {
                    self.pos += 1;
                    return Ok((items, trailing_comma));
                }
                _ => {}
            }

            items.push(self.value()?);
            self.skip_whitespace();

            match self.bump() {
                Some((_, ',')) => trailing_comma = true,
                Some((_, c)) if c == close => return Ok((items, false)),
                Some((position, found)) => return Err(LiteralError::Unexpected { found, position }),
                None => return Err(LiteralError::UnexpectedEnd { expected: "a closing bracket" }),
            }
        }
    }

    fn string(&mut self) -> Result<Literal, LiteralError> {
        let (start, quote) = self.bump().ok_or(LiteralError::UnexpectedEnd { expected: "a string" })?;
        let mut text = String::new();

        loop {
            match self.bump() {
                None => return Err(LiteralError::UnterminatedString { position: start }),
                Some((_, '\\')) => match self.bump() {
                    Some((_, 'n')) => text.push('\n'),
                    Some((_, 't')) => text.push('\t'),
                    Some((_, c)) => text.push(c),
                    None => return Err(LiteralError::UnterminatedString { position: start }),
                },
                Some((_, c)) if c == quote => return Ok(Literal::Str(text)),
                Some((_, c)) => text.push(c),
            }
        }
    }

    fn bare(&mut self) -> Literal {
        let mut token = String::new();
        while let Some((_, c)) = self.peek() {
            if matches!(c, ',' | '[' | ']' | '(' | ')' | '\'' | '"') {
                break;
            }
            token.push(c);
            self.pos += 1;
        }

        let token = token.trim();
        match token.parse::<i64>() {
            Ok(n) => Literal::Int(n),
            Err(_) => Literal::Str(token.to_string()),
        }
    }
}

/// Interpret a `--key` literal: strings match text, lists are conjunctions,
/// tuples are disjunctions
pub fn key_filter(literal: &Literal) -> FilterSpec {
    match literal {
        Literal::Str(text) => FilterSpec::Text(text.clone()),
        Literal::List(items) => FilterSpec::All(items.iter().map(key_filter).collect()),
        Literal::Tuple(items) => FilterSpec::Any(items.iter().map(key_filter).collect()),
        Literal::Int(n) => FilterSpec::Unrecognized(n.to_string()),
    }
}

/// Interpret a `--date` literal: a string is a day, a list is any of several
/// date filters, and `(day, before, after)` is a tolerance window
pub fn date_filter(literal: &Literal) -> FilterSpec {
    match literal {
        Literal::Str(date) => FilterSpec::DateExact(date.clone()),
        Literal::List(items) => FilterSpec::DateAny(items.iter().map(date_filter).collect()),
        Literal::Tuple(items) => match items.as_slice() {
            [Literal::Str(date), Literal::Int(before), Literal::Int(after)] => FilterSpec::DateWindow {
                date: date.clone(),
                before_days: *before,
                after_days: *after,
            },
            _ => FilterSpec::Unrecognized(format!("{:?}", literal)),
        },
        Literal::Int(n) => FilterSpec::Unrecognized(n.to_string()),
    }
}
