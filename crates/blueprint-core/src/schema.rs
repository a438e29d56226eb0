//! Schema engine — validates a data tree against a schema tree.
//!
//! A schema node is an object with:
//!
//! - `"constraints"`: an array of constraint-objects such as `{"MIN_VALUE": 5}`,
//!   applied to the data node as a whole, in list order.
//! - `"data"` (array and object data only): for arrays, the schema every
//!   element is checked against; for objects, a mapping from property name to
//!   that property's schema.
//!
//! ```json
//! {
//!   "constraints": [{"MIN_LENGTH": 1}],
//!   "data": {"constraints": [{"MIN_VALUE": 0}]}
//! }
//! ```
//!
//! The walk branches on the *data* node's kind and stops at the first failure.
//!
//! # Required properties
//!
//! A property schema whose constraints contain `{"REQUIRED": true}` marks that
//! key as required on the enclosing object. Required keys are checked after the
//! object's own constraints and before any present property is visited.
//! Property schemas for absent, non-required keys are never looked at.

use std::fmt::Write as _;

use crate::constraints::Constraint;
use crate::error::{ValidationError, ValidationErrorKind, ValidationResult, VerifyError};
use crate::options::ParseOptions;
use crate::parser::parse_with_options;
use crate::value::{Kind, Object, Value};

const CONSTRAINTS: &str = "constraints";
const DATA: &str = "data";

/// Parse both documents and validate `data_text` against `schema_text`.
pub fn verify(schema_text: &str, data_text: &str) -> Result<(), VerifyError> {
    verify_with_options(schema_text, data_text, &ParseOptions::default())
}

/// [`verify`] with parse limits applied to both documents.
pub fn verify_with_options(
    schema_text: &str,
    data_text: &str,
    options: &ParseOptions,
) -> Result<(), VerifyError> {
    tracing::debug!(
        schema_bytes = schema_text.len(),
        data_bytes = data_text.len(),
        "verifying document"
    );

    let schema = parse_with_options(schema_text, options).map_err(VerifyError::InvalidSchema)?;
    let data = parse_with_options(data_text, options).map_err(VerifyError::InvalidData)?;

    verify_values(&schema, &data)?;
    Ok(())
}

/// Validate an already-parsed data tree against an already-parsed schema tree.
pub fn verify_values(schema: &Value, data: &Value) -> ValidationResult<()> {
    let mut walker = Walker { path: Vec::new() };
    walker.visit(schema, data).inspect_err(|e| {
        tracing::debug!(path = %e.path, error = %e.kind, "validation failed");
    })
}

enum Segment<'a> {
    Index(usize),
    Key(&'a str),
}

/// Co-traversal state: the data path from the root to the current node.
struct Walker<'a> {
    path: Vec<Segment<'a>>,
}

impl<'a> Walker<'a> {
    fn visit(&mut self, schema: &'a Value, data: &'a Value) -> ValidationResult<()> {
        let node = schema.as_object().ok_or_else(|| {
            self.error(ValidationErrorKind::SchemaNotObject {
                found: schema.kind(),
            })
        })?;
        self.visit_node(node, data)
    }

    fn visit_node(&mut self, node: &'a Object, data: &'a Value) -> ValidationResult<()> {
        let constraints = self.field(node, CONSTRAINTS, Kind::Array, Value::as_array)?;

        match data {
            Value::Array(items) => {
                let element_schema = self.field(node, DATA, Kind::Object, Value::as_object)?;
                self.apply(constraints, data)?;

                for (i, item) in items.iter().enumerate() {
                    self.path.push(Segment::Index(i));
                    self.visit_node(element_schema, item)?;
                    self.path.pop();
                }
                Ok(())
            }
            Value::Object(properties) => {
                let property_schemas = self.field(node, DATA, Kind::Object, Value::as_object)?;
                self.apply(constraints, data)?;
                self.check_required(property_schemas, properties)?;

                for (key, value) in properties {
                    self.path.push(Segment::Key(key));
                    let property_schema = property_schemas.get(key).ok_or_else(|| {
                        self.error(ValidationErrorKind::UnknownProperty { key: key.clone() })
                    })?;
                    self.visit(property_schema, value)?;
                    self.path.pop();
                }
                Ok(())
            }
            Value::Null | Value::Boolean(_) | Value::Number(_) | Value::String(_) => {
                self.apply(constraints, data)
            }
        }
    }

    /// Run every constraint in `constraints` against `data`, in order.
    fn apply(&self, constraints: &[Value], data: &Value) -> ValidationResult<()> {
        for (index, entry) in constraints.iter().enumerate() {
            let entry = entry.as_object().ok_or_else(|| {
                self.error(ValidationErrorKind::ConstraintNotObject {
                    index,
                    found: entry.kind(),
                })
            })?;

            for (name, param) in entry {
                let constraint: Constraint = name.parse().map_err(|kind| self.error(kind))?;
                tracing::trace!(%constraint, path = %self.path(), "applying constraint");
                constraint
                    .check(data, param)
                    .map_err(|kind| self.error(kind))?;
            }
        }
        Ok(())
    }

    fn check_required(&self, property_schemas: &Object, properties: &Object) -> ValidationResult<()> {
        for (key, property_schema) in property_schemas {
            if !properties.contains_key(key) && self.is_required(property_schema)? {
                return Err(self.error(ValidationErrorKind::MissingRequired { key: key.clone() }));
            }
        }
        Ok(())
    }

    /// Whether a property schema carries `{"REQUIRED": true}`.
    fn is_required(&self, property_schema: &Value) -> ValidationResult<bool> {
        let Some(entries) = property_schema.get(CONSTRAINTS).and_then(Value::as_array) else {
            return Ok(false);
        };

        match entries
            .iter()
            .find_map(|entry| entry.get(Constraint::Required.name()))
        {
            None => Ok(false),
            Some(param) => param.as_bool().ok_or_else(|| {
                self.error(ValidationErrorKind::InvalidParameter {
                    constraint: Constraint::Required,
                    expected: "a boolean",
                    found: param.render(),
                })
            }),
        }
    }

    /// Look up a schema field and unwrap it as the `expected` kind.
    fn field<T: ?Sized>(
        &self,
        node: &'a Object,
        name: &'static str,
        expected: Kind,
        extract: fn(&'a Value) -> Option<&'a T>,
    ) -> ValidationResult<&'a T> {
        let value = node
            .get(name)
            .ok_or_else(|| self.error(ValidationErrorKind::MissingField { field: name }))?;

        extract(value).ok_or_else(|| {
            self.error(ValidationErrorKind::WrongFieldType {
                field: name,
                expected,
                found: value.kind(),
            })
        })
    }

    fn error(&self, kind: ValidationErrorKind) -> ValidationError {
        ValidationError {
            path: self.path(),
            kind,
        }
    }

    fn path(&self) -> String {
        let mut path = String::from("$");
        for segment in &self.path {
            let _ = match segment {
                Segment::Index(i) => write!(path, "[{i}]"),
                Segment::Key(key) => write!(path, ".{key}"),
            };
        }
        path
    }
}
