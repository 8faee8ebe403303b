//! Untyped document model.
//!
//! Package metadata arrives as external, loosely-typed data. [`Value`] is the
//! tagged union every loader converts into, and [`ValueKind`] is the runtime
//! tag schemas check against.

use std::collections::BTreeMap;
use std::fmt;

/// String-keyed mapping node of a [`Value`] tree.
pub type Mapping = BTreeMap<String, Value>;

/// A node of a parsed metadata document.
///
/// # Examples
///
/// ```
/// use rayforge_package_core::{Mapping, Value, ValueKind};
///
/// let mut author = Mapping::new();
/// author.insert("name".into(), Value::from("Ada"));
/// let doc = Value::Mapping(author);
///
/// assert_eq!(doc.kind(), ValueKind::Mapping);
/// assert_eq!(doc.get("name").and_then(Value::as_str), Some("Ada"));
/// assert!(doc.get("email").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Explicit null or an empty YAML node.
    #[default]
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Integer scalar that fits in `i64`.
    Integer(i64),
    /// Any other numeric scalar.
    Float(f64),
    /// String scalar.
    String(String),
    /// Ordered list of values.
    Sequence(Vec<Value>),
    /// Nested mapping.
    Mapping(Mapping),
}

impl Value {
    /// Returns the runtime type tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Mapping(_) => ValueKind::Mapping,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up `key` when this value is a mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|m| m.get(key))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<Mapping> for Value {
    fn from(value: Mapping) -> Self {
        Self::Mapping(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::Sequence(value)
    }
}

/// Runtime type tag of a [`Value`].
///
/// The `Display` form is the name used in type-mismatch diagnostics.
///
/// ```
/// use rayforge_package_core::ValueKind;
///
/// assert_eq!(ValueKind::Mapping.to_string(), "mapping");
/// assert_eq!(ValueKind::String.to_string(), "string");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    Float,
    String,
    Sequence,
    Mapping,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
