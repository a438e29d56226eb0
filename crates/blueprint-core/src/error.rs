//! Error types for lexing, parsing, and schema validation.
//!
//! Each stage has its own error enum so callers can tell a malformed document
//! apart from a document that merely fails its schema. [`VerifyError`] is the
//! single diagnostic returned by [`crate::verify`]; its `Display` output is the
//! human-readable message handed back across the FFI boundary.

use thiserror::Error;

use crate::constraints::Constraint;
use crate::value::Kind;

/// Errors raised while scanning raw text into tokens.
///
/// Positions are byte offsets into the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// End of input reached before the closing `"` of a string.
    #[error("unterminated string starting at byte {position}")]
    UnterminatedString { position: usize },

    /// A word starting with `t`, `f`, or `n` that is not `true`, `false`, or `null`.
    #[error("malformed literal '{word}' at byte {position}")]
    MalformedLiteral { word: String, position: usize },

    /// A character that cannot start any token.
    #[error("unexpected character '{ch}' at byte {position}")]
    UnexpectedChar { ch: char, position: usize },
}

/// Inserting a key that already exists in an [`Object`](crate::Object).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("duplicate key \"{0}\"")]
pub struct DuplicateKey(pub String);

/// Errors raised while assembling a `Value` tree from tokens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    /// A structural token other than the one the grammar requires.
    #[error("expected {expected}, found '{found}' at byte {position}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        position: usize,
    },

    /// Input ended while the grammar still required a token.
    #[error("unexpected end of input at byte {position}: expected {expected}")]
    UnexpectedEof {
        expected: &'static str,
        position: usize,
    },

    #[error("duplicate key \"{key}\" at byte {position}")]
    DuplicateKey { key: String, position: usize },

    /// A number token that the lexer accepted but is not a valid JSON number.
    #[error("invalid number literal '{literal}' at byte {position}")]
    InvalidNumber { literal: String, position: usize },

    /// Extra tokens after a complete root value.
    #[error("trailing content '{found}' at byte {position}")]
    TrailingContent { found: String, position: usize },

    #[error("nesting deeper than {limit} levels at byte {position}")]
    NestingTooDeep { limit: usize, position: usize },
}

/// What went wrong at a single schema/data node.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    #[error("schema node must be an object, found {found}")]
    SchemaNotObject { found: Kind },

    #[error("schema is missing \"{field}\"")]
    MissingField { field: &'static str },

    #[error("schema field \"{field}\" must be {expected}, found {found}")]
    WrongFieldType {
        field: &'static str,
        expected: Kind,
        found: Kind,
    },

    #[error("constraint #{index} must be an object, found {found}")]
    ConstraintNotObject { index: usize, found: Kind },

    #[error("unknown constraint '{name}'")]
    UnknownConstraint { name: String },

    #[error("{constraint} expects {expected}, found {found}")]
    InvalidParameter {
        constraint: Constraint,
        expected: &'static str,
        found: String,
    },

    #[error("{constraint} cannot be applied to {found}")]
    TypeMismatch { constraint: Constraint, found: Kind },

    /// A data property with no matching entry in the schema's `"data"` mapping.
    #[error("property \"{key}\" is not declared in the schema")]
    UnknownProperty { key: String },

    #[error("required property \"{key}\" is missing")]
    MissingRequired { key: String },

    #[error("MIN_VALUE failed: {value} < {limit}")]
    BelowMinimum { value: String, limit: String },

    #[error("MAX_VALUE failed: {value} > {limit}")]
    AboveMaximum { value: String, limit: String },

    #[error("MIN_LENGTH failed: length {length} < {limit}")]
    TooShort { length: usize, limit: u64 },

    #[error("MAX_LENGTH failed: length {length} > {limit}")]
    TooLong { length: usize, limit: u64 },

    #[error("ENUM failed: {value} is not one of {allowed}")]
    NotInEnum { value: String, allowed: String },

    #[error("VALUES failed: {value} is not one of {allowed}")]
    NotInValues { value: String, allowed: String },
}

/// A validation failure together with the data location it occurred at.
///
/// `path` uses `$` for the root, `[i]` for array elements and `.key` for
/// object properties, e.g. `$.users[2].age`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at {path}")]
pub struct ValidationError {
    pub path: String,
    pub kind: ValidationErrorKind,
}

/// The single diagnostic produced by [`crate::verify`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("invalid schema: {0}")]
    InvalidSchema(ParseError),

    #[error("invalid data: {0}")]
    InvalidData(ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Convenience alias used by the lexer and parser.
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Convenience alias used by the schema engine.
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;
