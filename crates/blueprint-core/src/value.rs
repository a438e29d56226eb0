//! The `Value` tree built by the parser.
//!
//! Every node is owned by exactly one parent (an array slot or an object
//! entry); the root is owned by the caller. Rendering through `Display`
//! produces compact JSON and is stable: parsing a rendered tree and rendering
//! it again yields the same text.

use std::collections::btree_map::{self, Entry};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::DuplicateKey;

/// Symbolic type tag of a [`Value`], used by the schema engine for dispatch
/// and in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A JSON number.
///
/// The `fractional` flag records whether the source literal contained `.`,
/// `e`, or `E`. It is part of the number's identity: `1` and `1.0` hold the
/// same `f64` but render differently and compare unequal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number {
    value: f64,
    fractional: bool,
}

impl Number {
    pub fn new(value: f64, fractional: bool) -> Self {
        Self { value, fractional }
    }

    /// Convert a number literal, enforcing the strict JSON number grammar.
    ///
    /// Returns `None` for literals the lexer lets through but JSON forbids
    /// (`-`, `1.`, `1e`, `01`, ...) and for literals that overflow to infinity.
    pub fn parse(literal: &str) -> Option<Self> {
        if !is_json_number(literal) {
            return None;
        }
        let value: f64 = literal.parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        Some(Self {
            value,
            fractional: literal.contains(['.', 'e', 'E']),
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_fractional(&self) -> bool {
        self.fractional
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Self::new(n as f64, false)
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Self::new(f, true)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fractional {
            // Debug output is the shortest round-trip form and always keeps a
            // `.` or an exponent, so the flag survives re-parsing.
            write!(f, "{:?}", self.value)
        } else {
            write!(f, "{:.0}", self.value)
        }
    }
}

/// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
fn is_json_number(literal: &str) -> bool {
    let bytes = literal.as_bytes();
    let mut i = usize::from(bytes.first() == Some(&b'-'));

    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => i += 1 + count_digits(&bytes[i + 1..]),
        _ => return false,
    }

    if bytes.get(i) == Some(&b'.') {
        let digits = count_digits(&bytes[i + 1..]);
        if digits == 0 {
            return false;
        }
        i += 1 + digits;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let digits = count_digits(&bytes[i..]);
        if digits == 0 {
            return false;
        }
        i += digits;
    }

    i == bytes.len()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// A JSON object with unique keys.
///
/// Keys iterate and render in sorted order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    entries: BTreeMap<String, Value>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new entry. A key that is already present is rejected and the
    /// existing entry is left untouched.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Result<(), DuplicateKey> {
        match self.entries.entry(key.into()) {
            Entry::Occupied(entry) => Err(DuplicateKey(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(value);
                Ok(())
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A parsed JSON document.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Number(Number),
    /// Raw string content, without the surrounding quotes.
    String(String),
    Array(Vec<Value>),
    Object(Object),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Boolean(_) => Kind::Boolean,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    /// Compact JSON text for this tree.
    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::value)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_bool_mut(&mut self) -> Option<&mut bool> {
        match self {
            Value::Boolean(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_number_mut(&mut self) -> Option<&mut Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_string_mut(&mut self) -> Option<&mut String> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Look up a property if this is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|obj| obj.get(key))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "\"{s}\""),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(obj) => {
                f.write_str("{")?;
                for (i, (key, value)) in obj.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "\"{key}\":{value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(f.into())
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}
