//! # blueprint-core
//!
//! Pure-Rust JSON front end and constraint-schema validator for **Blueprint** schemas.
//!
//! A Blueprint schema is itself a JSON document. Every schema node is an object
//! with a `"constraints"` array of named checks and, for arrays and objects, a
//! `"data"` entry describing the nested elements or properties. The validator
//! walks a schema tree and a data tree side by side and stops at the first
//! failing check.
//!
//! ## Quick start
//!
//! ```rust
//! use blueprint_core::{parse, verify, Kind};
//!
//! let value = parse(r#"{"age": 30, "tags": ["a", "b"]}"#).unwrap();
//! assert_eq!(value.kind(), Kind::Object);
//!
//! let schema = r#"{"constraints":[{"MIN_VALUE":5}]}"#;
//! assert!(verify(schema, "7").is_ok());
//!
//! let err = verify(schema, "3").unwrap_err();
//! assert!(err.to_string().contains("3 < 5"));
//! ```
//!
//! ## Modules
//!
//! - [`token`] — token kinds produced by the lexer
//! - [`lexer`] — single-pass tokenizer over the input text
//! - [`value`] — the `Value` tree and its compact rendering
//! - [`parser`] — recursive-descent parser building a `Value` tree
//! - [`options`] — parse limits shared by every entry point
//! - [`schema`] — co-traversal of schema and data trees
//! - [`constraints`] — the registry of named checks
//! - [`error`] — error types for every stage

pub mod constraints;
pub mod error;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod schema;
pub mod token;
pub mod value;

pub use constraints::Constraint;
pub use error::{
    DuplicateKey, LexError, ParseError, ValidationError, ValidationErrorKind, VerifyError,
};
pub use lexer::Lexer;
pub use options::ParseOptions;
pub use parser::{parse, parse_with_options};
pub use schema::{verify, verify_values, verify_with_options};
pub use token::{Token, TokenKind};
pub use value::{Kind, Number, Object, Value};
