//! Single-pass JSON tokenizer.
//!
//! The lexer keeps one forward cursor over the input and never backtracks.
//! Scanning is deliberately lenient in two places:
//!
//! - **Strings** are not unescaped. Everything between the quotes is kept
//!   verbatim; a backslash only prevents the following byte from closing the
//!   string.
//! - **Numbers** are scanned greedily (`-`, digits, `.` digits, `e`/`E` sign
//!   digits) without checking that each part has at least one digit. Literals
//!   such as `-` or `1.` become `Number` tokens here and are rejected by the
//!   parser when it converts the text.

use crate::error::LexError;
use crate::token::{Token, TokenKind};

pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            finished: false,
        }
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Scan the next token.
    ///
    /// At end of input this returns an `EndOfFile` token positioned at the
    /// input length.
    pub fn next_token(&mut self) -> Result<Token<'a>, LexError> {
        self.skip_whitespace();

        let start = self.position;
        let Some(&byte) = self.input.as_bytes().get(start) else {
            return Ok(Token::new(TokenKind::EndOfFile, "", start));
        };

        match byte {
            b'{' => Ok(self.single(TokenKind::ObjectStart)),
            b'}' => Ok(self.single(TokenKind::ObjectEnd)),
            b'[' => Ok(self.single(TokenKind::ArrayStart)),
            b']' => Ok(self.single(TokenKind::ArrayEnd)),
            b',' => Ok(self.single(TokenKind::Comma)),
            b':' => Ok(self.single(TokenKind::Colon)),
            b'"' => self.scan_string(),
            b't' | b'f' => self.scan_boolean(),
            b'n' => self.scan_keyword("null", TokenKind::Null),
            b'-' | b'0'..=b'9' => Ok(self.scan_number()),
            _ => Err(LexError::UnexpectedChar {
                ch: self.char_at(start),
                position: start,
            }),
        }
    }

    fn skip_whitespace(&mut self) {
        let bytes = self.input.as_bytes();
        while self.position < bytes.len() && is_whitespace(bytes[self.position]) {
            self.position += 1;
        }
    }

    fn single(&mut self, kind: TokenKind) -> Token<'a> {
        let start = self.position;
        self.position += 1;
        Token::new(kind, &self.input[start..self.position], start)
    }

    /// Scan from an opening quote to the next unescaped quote.
    fn scan_string(&mut self) -> Result<Token<'a>, LexError> {
        let start = self.position;
        let bytes = self.input.as_bytes();
        let mut i = start + 1;

        while i < bytes.len() {
            match bytes[i] {
                b'\\' => i += 2,
                b'"' => {
                    self.position = i + 1;
                    return Ok(Token::new(
                        TokenKind::String,
                        &self.input[start + 1..i],
                        start,
                    ));
                }
                _ => i += 1,
            }
        }

        self.position = bytes.len();
        Err(LexError::UnterminatedString { position: start })
    }

    fn scan_number(&mut self) -> Token<'a> {
        let start = self.position;

        self.eat(|b| b == b'-');
        self.eat_while(|b| b.is_ascii_digit());

        if self.eat(|b| b == b'.') {
            self.eat_while(|b| b.is_ascii_digit());
        }

        if self.eat(|b| b == b'e' || b == b'E') {
            self.eat(|b| b == b'+' || b == b'-');
            self.eat_while(|b| b.is_ascii_digit());
        }

        Token::new(TokenKind::Number, &self.input[start..self.position], start)
    }

    fn scan_boolean(&mut self) -> Result<Token<'a>, LexError> {
        if self.input[self.position..].starts_with("true") {
            self.scan_keyword("true", TokenKind::Boolean)
        } else {
            self.scan_keyword("false", TokenKind::Boolean)
        }
    }

    fn scan_keyword(&mut self, keyword: &str, kind: TokenKind) -> Result<Token<'a>, LexError> {
        let start = self.position;
        if self.input[start..].starts_with(keyword) {
            self.position += keyword.len();
            return Ok(Token::new(kind, &self.input[start..self.position], start));
        }

        Err(LexError::MalformedLiteral {
            word: self.word_at(start).to_string(),
            position: start,
        })
    }

    /// Consume one byte if it matches.
    fn eat(&mut self, pred: impl Fn(u8) -> bool) -> bool {
        match self.input.as_bytes().get(self.position) {
            Some(&b) if pred(b) => {
                self.position += 1;
                true
            }
            _ => false,
        }
    }

    fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.eat(&pred) {}
    }

    /// The run of characters from `start` up to the next whitespace.
    fn word_at(&self, start: usize) -> &'a str {
        let rest = &self.input[start..];
        let end = rest
            .bytes()
            .position(is_whitespace)
            .unwrap_or(rest.len());
        &rest[..end]
    }

    fn char_at(&self, position: usize) -> char {
        self.input[position..]
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

/// Yields every token up to and including `EndOfFile`, or up to the first error.
impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let item = self.next_token();
        match &item {
            Ok(token) if token.kind == TokenKind::EndOfFile => self.finished = true,
            Err(_) => self.finished = true,
            Ok(_) => {}
        }
        Some(item)
    }
}

fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}
