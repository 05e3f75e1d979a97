//! Keys addressing entries in ordered maps and collections.
//!
//! A [`Key`] is either a signed integer or a string. Integer keys are what
//! sequential collections use (`0..n-1`); associative collections mix both
//! freely.

use std::cmp::Ordering;
use std::fmt;

use crate::errors::CollectionError;

/// The key of a single entry.
///
/// Keys have a total order used by `sort_keys`: every integer key sorts
/// before every string key, integers compare numerically and strings
/// lexicographically.
///
/// ```
/// use collectica::Key;
///
/// assert!(Key::from(10) < Key::from("a"));
/// assert!(Key::from(2) < Key::from(10));
/// assert_eq!(Key::from("name").to_string(), "name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// Integer key
    Int(i64),
    /// String key
    Str(String),
}

impl Key {
    /// Returns the integer if this is an integer key
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(n) => Some(*n),
            Key::Str(_) => None,
        }
    }

    /// Returns the string if this is a string key
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            Key::Int(_) => None,
        }
    }

    /// Returns true for integer keys
    pub fn is_int(&self) -> bool {
        matches!(self, Key::Int(_))
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Key::Int(a), Key::Int(b)) => a.cmp(b),
            (Key::Str(a), Key::Str(b)) => a.cmp(b),
            (Key::Int(_), Key::Str(_)) => Ordering::Less,
            (Key::Str(_), Key::Int(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{n}"),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl From<i32> for Key {
    fn from(n: i32) -> Self {
        Key::Int(n as i64)
    }
}

impl From<u32> for Key {
    fn from(n: u32) -> Self {
        Key::Int(n as i64)
    }
}

impl From<usize> for Key {
    fn from(n: usize) -> Self {
        Key::Int(n as i64)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::Str(s.clone())
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

impl PartialEq<i64> for Key {
    fn eq(&self, other: &i64) -> bool {
        self.as_int() == Some(*other)
    }
}

impl PartialEq<&str> for Key {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

/// Values that can be turned into a [`Key`].
///
/// Used by operations that promote values to keys (`flip`, `count_by`,
/// `pluck_keyed`, `group_by_field`). Conversion fails with
/// [`CollectionError::TypeMismatch`] for values that are neither integers nor
/// strings.
pub trait AsKey {
    fn to_key(&self) -> Result<Key, CollectionError>;
}

impl AsKey for Key {
    fn to_key(&self) -> Result<Key, CollectionError> {
        Ok(self.clone())
    }
}

impl AsKey for i64 {
    fn to_key(&self) -> Result<Key, CollectionError> {
        Ok(Key::Int(*self))
    }
}

impl AsKey for i32 {
    fn to_key(&self) -> Result<Key, CollectionError> {
        Ok(Key::Int(*self as i64))
    }
}

impl AsKey for usize {
    fn to_key(&self) -> Result<Key, CollectionError> {
        Ok(Key::Int(*self as i64))
    }
}

impl AsKey for String {
    fn to_key(&self) -> Result<Key, CollectionError> {
        Ok(Key::Str(self.clone()))
    }
}

impl AsKey for &str {
    fn to_key(&self) -> Result<Key, CollectionError> {
        Ok(Key::Str((*self).to_string()))
    }
}
