//! Dynamically typed values for heterogeneous records.
//!
//! Collections are generic over their value type, so most callers never need
//! this module. [`Value`] exists for nested collections whose records mix
//! field types, e.g. `{"name": "Alice", "age": 30}`, and is the payload of a
//! [`Record`].

use std::cmp::Ordering;
use std::fmt;

use crate::errors::CollectionError;
use crate::key::{AsKey, Key};
use crate::map::OrderedMap;

/// A record: an ordered map of field name to [`Value`].
pub type Record = OrderedMap<Value>;

/// Values that can be stored in a [`Record`].
///
/// # Value Types
///
/// ## Leaf Values
/// - [`Value::Null`] - Represents null/empty values
/// - [`Value::Bool`] - Boolean values (true/false)
/// - [`Value::Int`] - 64-bit signed integers
/// - [`Value::Text`] - UTF-8 text strings
///
/// ## Branch Values
/// - [`Value::List`] - Plain ordered list of values
/// - [`Value::Map`] - Nested record
///
/// # Comparisons
///
/// Equality is strict: the type and the payload must both match, so
/// `Int(1)` never equals `Text("1")`. Ordering is only defined between scalars
/// of the same type; comparing anything else yields `None`, which makes every
/// `<`/`>` test false.
///
/// ```
/// # use collectica::Value;
/// let age = Value::Int(42);
/// let name = Value::Text("Alice".to_string());
///
/// assert!(age == 42);
/// assert!(name == "Alice");
/// assert!(!(age == "42"));
///
/// assert!(Value::Int(1) < Value::Int(2));
/// assert_eq!(Value::Int(1).partial_cmp(&Value::Text("2".into())), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Value {
    // Leaf values
    /// Null/empty value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Text string value
    Text(String),

    // Branch values
    /// Ordered list of values
    List(Vec<Value>),
    /// Nested record
    Map(OrderedMap<Value>),
}

impl Value {
    /// Returns true if this is a leaf value
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Bool(_) | Value::Int(_) | Value::Text(_)
        )
    }

    /// Returns true if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Attempts to convert to a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to convert to an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to convert to a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to convert to a list
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Attempts to convert to a nested record
    pub fn as_map(&self) -> Option<&Record> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Number of leaves below this value; a scalar counts as one
    pub fn leaf_count(&self) -> usize {
        match self {
            Value::List(items) => items.iter().map(Value::leaf_count).sum(),
            Value::Map(map) => map.values().map(Value::leaf_count).sum(),
            _ => 1,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Bool(a), Value::Bool(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {item}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl AsKey for Value {
    fn to_key(&self) -> Result<Key, CollectionError> {
        match self {
            Value::Int(n) => Ok(Key::Int(*n)),
            Value::Text(s) => Ok(Key::Str(s.clone())),
            other => Err(CollectionError::TypeMismatch {
                expected: "int or text",
                actual: other.type_name().to_string(),
            }),
        }
    }
}

// Convenient From implementations for common types
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Map(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl TryFrom<&Value> for i64 {
    type Error = CollectionError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value.as_int().ok_or_else(|| CollectionError::TypeMismatch {
            expected: "int",
            actual: value.type_name().to_string(),
        })
    }
}

impl TryFrom<&Value> for String {
    type Error = CollectionError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .as_text()
            .map(str::to_string)
            .ok_or_else(|| CollectionError::TypeMismatch {
                expected: "text",
                actual: value.type_name().to_string(),
            })
    }
}

// PartialEq implementations for comparing Value with primitives
impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_text() == Some(*other)
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        self.as_text() == Some(other.as_str())
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self.as_int() == Some(*other)
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        self.as_int() == Some(*other as i64)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

// Reverse implementations for symmetry
impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}
