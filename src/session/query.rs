/*
 * Copyright 2019-2020 Wren Powell
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! The subset of the CMIS query language understood by `MemorySession`.
//!
//! Supported statements look like this:
//!
//! ```text
//! SELECT * FROM cmis:folder
//! SELECT * FROM cmis:document WHERE cmis:name = 'hello.txt'
//! SELECT * FROM cmis:folder WHERE cmis:name LIKE '44-000001%'
//! ```

use super::error::{SessionError, SessionResult};
use super::object::BaseType;
use super::property::names;

/// A character in a string literal and whether it was escaped with a backslash.
type LiteralChar = (char, bool);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    Literal(Vec<LiteralChar>),
    Equals,
}

/// A condition on the `cmis:name` of the objects returned by a query.
#[derive(Debug, Clone, PartialEq, Eq)]
enum NameFilter {
    Equals(String),
    Like(Vec<LiteralChar>),
}

/// A parsed query statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Query {
    base_type: BaseType,
    filter: Option<NameFilter>,
}

impl Query {
    /// Parse the given query `statement`.
    ///
    /// # Errors
    /// - `SessionError::InvalidArgument`: The statement is malformed or uses unsupported syntax.
    pub fn parse(statement: &str) -> SessionResult<Self> {
        let tokens = tokenize(statement)?;
        let mut tokens = tokens.into_iter();

        expect_keyword(tokens.next(), "SELECT")?;
        expect_keyword(tokens.next(), "*")?;
        expect_keyword(tokens.next(), "FROM")?;

        let base_type = match tokens.next() {
            Some(Token::Word(word)) => match BaseType::from_id(&word) {
                Some(base_type @ (BaseType::Document | BaseType::Folder)) => base_type,
                _ => return Err(invalid(format!("unsupported type '{}'", word))),
            },
            _ => return Err(invalid("expected a type after FROM")),
        };

        let filter = match tokens.next() {
            None => None,
            Some(token) => {
                expect_keyword(Some(token), "WHERE")?;
                match tokens.next() {
                    Some(Token::Word(word)) if word == names::NAME => {}
                    _ => return Err(invalid("only cmis:name can be used in a WHERE clause")),
                }
                let operator = tokens.next();
                let literal = match tokens.next() {
                    Some(Token::Literal(literal)) => literal,
                    _ => return Err(invalid("expected a string literal")),
                };
                match operator {
                    Some(Token::Equals) => Some(NameFilter::Equals(
                        literal.into_iter().map(|(c, _)| c).collect(),
                    )),
                    Some(Token::Word(word)) if word.eq_ignore_ascii_case("LIKE") => {
                        Some(NameFilter::Like(literal))
                    }
                    _ => return Err(invalid("expected '=' or LIKE")),
                }
            }
        };

        if tokens.next().is_some() {
            return Err(invalid("unexpected trailing tokens"));
        }

        Ok(Query { base_type, filter })
    }

    /// The base type of the objects this query selects.
    pub fn base_type(&self) -> BaseType {
        self.base_type
    }

    /// Return whether an object with the given `name` matches this query's condition.
    pub fn matches_name(&self, name: &str) -> bool {
        match &self.filter {
            None => true,
            Some(NameFilter::Equals(expected)) => name == expected,
            Some(NameFilter::Like(pattern)) => {
                let name = name.chars().collect::<Vec<_>>();
                like_matches(pattern, &name)
            }
        }
    }
}

fn invalid(message: impl Into<String>) -> SessionError {
    SessionError::InvalidArgument(message.into())
}

fn expect_keyword(token: Option<Token>, keyword: &str) -> SessionResult<()> {
    match token {
        Some(Token::Word(word)) if word.eq_ignore_ascii_case(keyword) => Ok(()),
        _ => Err(invalid(format!("expected {}", keyword))),
    }
}

fn tokenize(statement: &str) -> SessionResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = statement.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '=' {
            chars.next();
            tokens.push(Token::Equals);
        } else if c == '\'' {
            chars.next();
            let mut literal = Vec::new();
            loop {
                match chars.next() {
                    Some('\\') => match chars.next() {
                        Some(escaped) => literal.push((escaped, true)),
                        None => return Err(invalid("unterminated string literal")),
                    },
                    Some('\'') => break,
                    Some(c) => literal.push((c, false)),
                    None => return Err(invalid("unterminated string literal")),
                }
            }
            tokens.push(Token::Literal(literal));
        } else {
            let mut word = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() || c == '=' || c == '\'' {
                    break;
                }
                word.push(c);
                chars.next();
            }
            tokens.push(Token::Word(word));
        }
    }

    Ok(tokens)
}

/// Match `name` against a LIKE `pattern` where `%` matches any sequence and `_` any character.
///
/// Only the most recent `%` is retried on a mismatch.
fn like_matches(pattern: &[LiteralChar], name: &[char]) -> bool {
    let (mut p, mut n) = (0, 0);
    // The position of the last `%` and the position in `name` it currently stops at.
    let mut wildcard: Option<(usize, usize)> = None;

    while n < name.len() {
        match pattern.get(p) {
            Some(('%', false)) => {
                wildcard = Some((p, n));
                p += 1;
            }
            Some(('_', false)) => {
                p += 1;
                n += 1;
            }
            Some((c, _)) if *c == name[n] => {
                p += 1;
                n += 1;
            }
            _ => match wildcard {
                Some((wildcard_p, wildcard_n)) => {
                    wildcard = Some((wildcard_p, wildcard_n + 1));
                    p = wildcard_p + 1;
                    n = wildcard_n + 1;
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&(c, escaped)| c == '%' && !escaped)
}
