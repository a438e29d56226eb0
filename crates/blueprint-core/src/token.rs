//! Tokens produced by the [`Lexer`](crate::Lexer).

use std::fmt;

/// The closed set of token kinds in JSON text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    ObjectStart,
    ObjectEnd,
    ArrayStart,
    ArrayEnd,
    String,
    Number,
    Boolean,
    Null,
    Comma,
    Colon,
    EndOfFile,
}

impl TokenKind {
    /// True for the kinds that can begin a value.
    pub fn starts_value(self) -> bool {
        matches!(
            self,
            TokenKind::ObjectStart
                | TokenKind::ArrayStart
                | TokenKind::String
                | TokenKind::Number
                | TokenKind::Boolean
                | TokenKind::Null
        )
    }

    /// Short name used in diagnostics and the `lex` CLI output.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::ObjectStart => "object-start",
            TokenKind::ObjectEnd => "object-end",
            TokenKind::ArrayStart => "array-start",
            TokenKind::ArrayEnd => "array-end",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Boolean => "boolean",
            TokenKind::Null => "null",
            TokenKind::Comma => "comma",
            TokenKind::Colon => "colon",
            TokenKind::EndOfFile => "end-of-file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One lexical token. `text` borrows from the input; for strings it is the raw
/// content between the quotes, for `EndOfFile` it is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of the token's first character.
    pub position: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, position: usize) -> Self {
        Self {
            kind,
            text,
            position,
        }
    }
}
