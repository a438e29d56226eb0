//! The fixed registry of named constraint checks.
//!
//! A schema refers to a check by name (`"MIN_VALUE"`, `"ENUM"`, ...) and
//! supplies its parameter as the value of that key. Unknown names are not
//! skipped: [`Constraint::from_name`] returns `None` and the schema engine
//! fails the whole validation.
//!
//! | Name         | Applies to     | Parameter                 |
//! |--------------|----------------|---------------------------|
//! | `MIN_VALUE`  | number         | number                    |
//! | `MAX_VALUE`  | number         | number                    |
//! | `MIN_LENGTH` | array, string  | non-negative integer      |
//! | `MAX_LENGTH` | array, string  | non-negative integer      |
//! | `ENUM`       | any            | array of literals         |
//! | `VALUES`     | number, array  | array of literals         |
//! | `REQUIRED`   | any            | boolean                   |

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationErrorKind;
use crate::value::{Number, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    MinValue,
    MaxValue,
    MinLength,
    MaxLength,
    Enum,
    Values,
    /// Evaluated by the parent object before recursing; see
    /// [`crate::schema`]. Applied to a value that exists it always passes.
    Required,
}

impl Constraint {
    pub const ALL: [Constraint; 7] = [
        Constraint::MinValue,
        Constraint::MaxValue,
        Constraint::MinLength,
        Constraint::MaxLength,
        Constraint::Enum,
        Constraint::Values,
        Constraint::Required,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Constraint::MinValue => "MIN_VALUE",
            Constraint::MaxValue => "MAX_VALUE",
            Constraint::MinLength => "MIN_LENGTH",
            Constraint::MaxLength => "MAX_LENGTH",
            Constraint::Enum => "ENUM",
            Constraint::Values => "VALUES",
            Constraint::Required => "REQUIRED",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Apply this check to `data` with the schema-supplied `param`.
    pub fn check(self, data: &Value, param: &Value) -> Result<(), ValidationErrorKind> {
        match self {
            Constraint::MinValue => {
                let limit = self.number_param(param)?;
                let value = self.number_data(data)?;
                if value.value() < limit.value() {
                    return Err(ValidationErrorKind::BelowMinimum {
                        value: value.to_string(),
                        limit: limit.to_string(),
                    });
                }
                Ok(())
            }
            Constraint::MaxValue => {
                let limit = self.number_param(param)?;
                let value = self.number_data(data)?;
                if value.value() > limit.value() {
                    return Err(ValidationErrorKind::AboveMaximum {
                        value: value.to_string(),
                        limit: limit.to_string(),
                    });
                }
                Ok(())
            }
            Constraint::MinLength => {
                let limit = self.length_param(param)?;
                let length = self.length_of(data)?;
                if (length as u64) < limit {
                    return Err(ValidationErrorKind::TooShort { length, limit });
                }
                Ok(())
            }
            Constraint::MaxLength => {
                let limit = self.length_param(param)?;
                let length = self.length_of(data)?;
                if (length as u64) > limit {
                    return Err(ValidationErrorKind::TooLong { length, limit });
                }
                Ok(())
            }
            Constraint::Enum => {
                let allowed = self.array_param(param)?;
                let rendered = data.render();
                if allowed.iter().any(|literal| literal.render() == rendered) {
                    return Ok(());
                }
                Err(ValidationErrorKind::NotInEnum {
                    value: rendered,
                    allowed: param.render(),
                })
            }
            Constraint::Values => self.check_values(data, param),
            Constraint::Required => {
                if param.is_boolean() {
                    Ok(())
                } else {
                    Err(self.invalid_param("a boolean", param))
                }
            }
        }
    }

    /// Numbers must equal one of the listed numbers; arrays must contain only
    /// elements whose rendering matches a listed literal.
    fn check_values(self, data: &Value, param: &Value) -> Result<(), ValidationErrorKind> {
        let allowed = self.array_param(param)?;
        let not_in_values = |value: String| ValidationErrorKind::NotInValues {
            value,
            allowed: param.render(),
        };

        match data {
            Value::Number(n) => {
                if allowed.iter().filter_map(Value::as_f64).any(|a| a == n.value()) {
                    Ok(())
                } else {
                    Err(not_in_values(n.to_string()))
                }
            }
            Value::Array(items) => {
                let rendered: Vec<String> = allowed.iter().map(Value::render).collect();
                for item in items {
                    let item = item.render();
                    if !rendered.contains(&item) {
                        return Err(not_in_values(item));
                    }
                }
                Ok(())
            }
            Value::Null | Value::Boolean(_) | Value::String(_) | Value::Object(_) => {
                Err(ValidationErrorKind::TypeMismatch {
                    constraint: self,
                    found: data.kind(),
                })
            }
        }
    }

    fn number_data(self, data: &Value) -> Result<Number, ValidationErrorKind> {
        data.as_number()
            .copied()
            .ok_or(ValidationErrorKind::TypeMismatch {
                constraint: self,
                found: data.kind(),
            })
    }

    /// Character count for strings, element count for arrays.
    fn length_of(self, data: &Value) -> Result<usize, ValidationErrorKind> {
        match data {
            Value::String(s) => Ok(s.chars().count()),
            Value::Array(items) => Ok(items.len()),
            _ => Err(ValidationErrorKind::TypeMismatch {
                constraint: self,
                found: data.kind(),
            }),
        }
    }

    fn number_param(self, param: &Value) -> Result<Number, ValidationErrorKind> {
        param
            .as_number()
            .copied()
            .ok_or_else(|| self.invalid_param("a number", param))
    }

    fn length_param(self, param: &Value) -> Result<u64, ValidationErrorKind> {
        match param.as_f64() {
            Some(n) if n >= 0.0 && n.fract() == 0.0 => Ok(n as u64),
            _ => Err(self.invalid_param("a non-negative integer", param)),
        }
    }

    fn array_param(self, param: &Value) -> Result<&[Value], ValidationErrorKind> {
        param
            .as_array()
            .ok_or_else(|| self.invalid_param("an array", param))
    }

    fn invalid_param(self, expected: &'static str, param: &Value) -> ValidationErrorKind {
        ValidationErrorKind::InvalidParameter {
            constraint: self,
            expected,
            found: param.render(),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Constraint {
    type Err = ValidationErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ValidationErrorKind::UnknownConstraint {
            name: s.to_string(),
        })
    }
}
