//! Recursive-descent JSON parser.
//!
//! Pulls tokens from a fresh [`Lexer`] and builds a [`Value`] tree bottom-up.
//! The grammar is strict: keys must be strings, members are separated by
//! exactly one comma, trailing commas are rejected, duplicate keys are
//! rejected, and nothing but whitespace may follow the root value.
//!
//! The first error anywhere aborts the parse; no partial tree is returned.

use crate::error::{DuplicateKey, ParseError, ParseResult};
use crate::lexer::Lexer;
use crate::options::ParseOptions;
use crate::token::{Token, TokenKind};
use crate::value::{Number, Object, Value};

/// Parse JSON text into a [`Value`] tree with no nesting limit.
pub fn parse(text: &str) -> ParseResult<Value> {
    parse_with_options(text, &ParseOptions::default())
}

/// Parse JSON text into a [`Value`] tree under the given options.
pub fn parse_with_options(text: &str, options: &ParseOptions) -> ParseResult<Value> {
    let mut parser = Parser {
        lexer: Lexer::new(text),
        max_depth: options.max_depth(),
        depth: 0,
    };

    let value = parser.parse_document().inspect_err(|e| {
        tracing::debug!(error = %e, bytes = text.len(), "parse failed");
    })?;

    tracing::trace!(kind = %value.kind(), bytes = text.len(), "parsed document");
    Ok(value)
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    max_depth: Option<usize>,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn parse_document(&mut self) -> ParseResult<Value> {
        let first = self.lexer.next_token()?;
        let value = self.parse_value(first)?;

        let rest = self.lexer.next_token()?;
        if rest.kind != TokenKind::EndOfFile {
            return Err(ParseError::TrailingContent {
                found: describe(&rest),
                position: rest.position,
            });
        }

        Ok(value)
    }

    /// Build the value that starts with `token`.
    fn parse_value(&mut self, token: Token<'a>) -> ParseResult<Value> {
        match token.kind {
            TokenKind::ObjectStart => self.parse_object(token),
            TokenKind::ArrayStart => self.parse_array(token),
            TokenKind::String => Ok(Value::String(token.text.to_string())),
            TokenKind::Number => Number::parse(token.text)
                .map(Value::Number)
                .ok_or_else(|| ParseError::InvalidNumber {
                    literal: token.text.to_string(),
                    position: token.position,
                }),
            TokenKind::Boolean => Ok(Value::Boolean(token.text == "true")),
            TokenKind::Null => Ok(Value::Null),
            TokenKind::ObjectEnd
            | TokenKind::ArrayEnd
            | TokenKind::Comma
            | TokenKind::Colon
            | TokenKind::EndOfFile => Err(unexpected("a value", &token)),
        }
    }

    fn parse_object(&mut self, open: Token<'a>) -> ParseResult<Value> {
        self.enter(&open)?;
        let mut object = Object::new();

        let mut token = self.lexer.next_token()?;
        if token.kind != TokenKind::ObjectEnd {
            loop {
                if token.kind != TokenKind::String {
                    return Err(unexpected("a string key", &token));
                }
                let key = token;

                let colon = self.lexer.next_token()?;
                if colon.kind != TokenKind::Colon {
                    return Err(unexpected("':'", &colon));
                }

                let start = self.lexer.next_token()?;
                let value = self.parse_value(start)?;
                object
                    .insert(key.text, value)
                    .map_err(|DuplicateKey(key_text)| ParseError::DuplicateKey {
                        key: key_text,
                        position: key.position,
                    })?;

                let separator = self.lexer.next_token()?;
                match separator.kind {
                    TokenKind::Comma => token = self.lexer.next_token()?,
                    TokenKind::ObjectEnd => break,
                    _ => return Err(unexpected("',' or '}'", &separator)),
                }
            }
        }

        self.leave();
        Ok(Value::Object(object))
    }

    fn parse_array(&mut self, open: Token<'a>) -> ParseResult<Value> {
        self.enter(&open)?;
        let mut items = Vec::new();

        let mut token = self.lexer.next_token()?;
        if token.kind != TokenKind::ArrayEnd {
            loop {
                items.push(self.parse_value(token)?);

                let separator = self.lexer.next_token()?;
                match separator.kind {
                    TokenKind::Comma => token = self.lexer.next_token()?,
                    TokenKind::ArrayEnd => break,
                    _ => return Err(unexpected("',' or ']'", &separator)),
                }
            }
        }

        self.leave();
        Ok(Value::Array(items))
    }

    fn enter(&mut self, open: &Token<'a>) -> ParseResult<()> {
        self.depth += 1;
        if let Some(limit) = self.max_depth {
            if self.depth > limit {
                return Err(ParseError::NestingTooDeep {
                    limit,
                    position: open.position,
                });
            }
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}

/// Error for a token the grammar did not allow here. Hitting end of input is
/// reported separately so callers can tell truncated documents apart.
fn unexpected(expected: &'static str, token: &Token<'_>) -> ParseError {
    if token.kind == TokenKind::EndOfFile {
        ParseError::UnexpectedEof {
            expected,
            position: token.position,
        }
    } else {
        ParseError::UnexpectedToken {
            expected,
            found: describe(token),
            position: token.position,
        }
    }
}

fn describe(token: &Token<'_>) -> String {
    match token.kind {
        TokenKind::String => format!("\"{}\"", token.text),
        _ => token.text.to_string(),
    }
}
