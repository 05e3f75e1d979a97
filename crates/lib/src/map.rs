//! Insertion-ordered map from [`Key`] to values.
//!
//! [`OrderedMap`] is the storage every eager collection is built on. Keys are
//! unique, iteration follows insertion order, and updating an existing key
//! keeps its position.
//!
//! # Complexity
//!
//! - `get`, `set`, `contains`: O(1) average
//! - `first`, `last`: O(1)
//! - `remove`: O(n), the remaining entries keep their order
//! - `first_where`, `last_where`: O(n) scans (`last_where` scans from the back)

use std::ops::Range;

use indexmap::IndexMap;

use crate::key::Key;

/// Insertion-ordered map with unique [`Key`]s.
///
/// # Examples
///
/// ```
/// use collectica::{Key, OrderedMap};
///
/// let mut map = OrderedMap::new();
/// map.set("name", "Alice");
/// map.set(7, "seven");
/// map.set("name", "Bob"); // keeps its position
///
/// assert_eq!(map.get("name"), Some(&"Bob"));
/// assert_eq!(map.keys().cloned().collect::<Vec<_>>(), vec![Key::from("name"), Key::from(7)]);
/// assert_eq!(map.get("missing"), None);
/// ```
#[derive(Debug, Clone)]
pub struct OrderedMap<V> {
    entries: IndexMap<Key, V>,
}

impl<V> OrderedMap<V> {
    /// Creates a new empty map
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Creates an empty map with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Builds a map keyed `0..n-1` from a sequence of values
    pub fn from_values(values: impl IntoIterator<Item = V>) -> Self {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| (Key::from(i), v))
            .collect()
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Gets a value by key.
    ///
    /// `None` always means the key is absent, never a stored default.
    pub fn get(&self, key: impl Into<Key>) -> Option<&V> {
        self.entries.get(&key.into())
    }

    /// Gets a mutable reference to a value by key
    pub fn get_mut(&mut self, key: impl Into<Key>) -> Option<&mut V> {
        self.entries.get_mut(&key.into())
    }

    /// Sets a value, returning the previous value if the key existed.
    ///
    /// Existing keys keep their position; new keys are appended.
    pub fn set(&mut self, key: impl Into<Key>, value: V) -> Option<V> {
        self.entries.insert(key.into(), value)
    }

    /// Removes a key, preserving the order of the remaining entries
    pub fn remove(&mut self, key: impl Into<Key>) -> Option<V> {
        self.entries.shift_remove(&key.into())
    }

    /// Returns true if the key is present
    pub fn contains(&self, key: impl Into<Key>) -> bool {
        self.entries.contains_key(&key.into())
    }

    /// Returns the insertion-order position of a key
    pub fn position(&self, key: impl Into<Key>) -> Option<usize> {
        self.entries.get_index_of(&key.into())
    }

    /// Returns the entry at an insertion-order position
    pub fn get_index(&self, index: usize) -> Option<(&Key, &V)> {
        self.entries.get_index(index)
    }

    /// Iterator over keys in insertion order
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &Key> + ExactSizeIterator {
        self.entries.keys()
    }

    /// Iterator over values in insertion order
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.entries.values()
    }

    /// Mutable iterator over values in insertion order
    pub fn values_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut V> + ExactSizeIterator {
        self.entries.values_mut()
    }

    /// Iterator over entries in insertion order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&Key, &V)> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Mutable iterator over entries in insertion order
    pub fn iter_mut(
        &mut self,
    ) -> impl DoubleEndedIterator<Item = (&Key, &mut V)> + ExactSizeIterator {
        self.entries.iter_mut()
    }

    /// Consumes the map, yielding its values in order
    pub fn into_values(self) -> impl DoubleEndedIterator<Item = V> + ExactSizeIterator {
        self.entries.into_values()
    }

    /// First entry in insertion order
    pub fn first(&self) -> Option<(&Key, &V)> {
        self.entries.first()
    }

    /// Last entry in insertion order
    pub fn last(&self) -> Option<(&Key, &V)> {
        self.entries.last()
    }

    /// First entry matching the predicate
    pub fn first_where(&self, mut predicate: impl FnMut(&V, &Key) -> bool) -> Option<(&Key, &V)> {
        self.entries.iter().find(|(k, v)| predicate(v, k))
    }

    /// Last entry matching the predicate, scanning from the back
    pub fn last_where(&self, mut predicate: impl FnMut(&V, &Key) -> bool) -> Option<(&Key, &V)> {
        self.entries.iter().rev().find(|(k, v)| predicate(v, k))
    }

    /// The integer key `push` would use: one past the greatest integer key, or 0
    pub fn next_int_key(&self) -> i64 {
        self.entries
            .keys()
            .filter_map(Key::as_int)
            .max()
            .map_or(0, |max| max.saturating_add(1).max(0))
    }

    /// Appends a value under the next integer key and returns that key
    pub fn push(&mut self, value: V) -> Key {
        let key = Key::Int(self.next_int_key());
        self.entries.insert(key.clone(), value);
        key
    }

    /// Removes and returns the last entry
    pub fn pop(&mut self) -> Option<(Key, V)> {
        self.entries.pop()
    }

    /// Removes and returns the first entry
    pub fn shift(&mut self) -> Option<(Key, V)> {
        self.entries.shift_remove_index(0)
    }

    /// Keeps only the entries matching the predicate, in order
    pub fn retain(&mut self, mut predicate: impl FnMut(&Key, &mut V) -> bool) {
        self.entries.retain(|k, v| predicate(k, v));
    }

    /// Returns a copy keyed `0..n-1` in the current order, dropping all original keys
    pub fn reindexed(self) -> Self {
        Self::from_values(self.entries.into_values())
    }

    /// Renumbers all keys to `0..n-1` in place
    pub fn reindex(&mut self) {
        let entries = std::mem::take(&mut self.entries);
        *self = Self::from_values(entries.into_values());
    }

    /// Renumbers integer keys to `0..` in order, keeping string keys untouched
    pub fn renumber_int_keys(self) -> Self {
        Self::from_entries_renumbered(self.entries)
    }

    /// Builds a map from entries, numbering integer keys `0..` in order.
    ///
    /// The incoming integer keys are placeholders only, so they never collide;
    /// string keys are kept (a repeated string key overwrites, last write wins).
    pub fn from_entries_renumbered(entries: impl IntoIterator<Item = (Key, V)>) -> Self {
        let entries = entries.into_iter();
        let mut next = 0i64;
        let mut renumbered = Self::with_capacity(entries.size_hint().0);
        for (key, value) in entries {
            let key = match key {
                Key::Int(_) => {
                    let key = Key::Int(next);
                    next += 1;
                    key
                }
                key @ Key::Str(_) => key,
            };
            renumbered.entries.insert(key, value);
        }
        renumbered
    }

    /// Positions `0..n` ordered by the comparator over entries.
    ///
    /// The sort is stable. The map itself is not touched, so a panicking
    /// comparator leaves it as it was.
    pub fn sorted_positions(
        &self,
        mut compare: impl FnMut((&Key, &V), (&Key, &V)) -> std::cmp::Ordering,
    ) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by(|&a, &b| {
            match (self.entries.get_index(a), self.entries.get_index(b)) {
                (Some(left), Some(right)) => compare(left, right),
                _ => std::cmp::Ordering::Equal,
            }
        });
        order
    }

    /// Rebuilds the map in the order given by `positions`.
    ///
    /// Positions that are out of range or repeated are skipped, and entries
    /// not named keep their relative order at the end.
    pub fn permute(&mut self, positions: &[usize]) {
        let mut slots: Vec<Option<(Key, V)>> =
            std::mem::take(&mut self.entries).into_iter().map(Some).collect();
        let mut rebuilt = IndexMap::with_capacity(slots.len());
        for &position in positions {
            if let Some((key, value)) = slots.get_mut(position).and_then(Option::take) {
                rebuilt.insert(key, value);
            }
        }
        for (key, value) in slots.into_iter().flatten() {
            rebuilt.insert(key, value);
        }
        self.entries = rebuilt;
    }

    /// Resolves an `(offset, length)` pair into a position range over `len` entries.
    ///
    /// A negative offset counts from the end. A missing length runs to the end,
    /// a negative length stops that many entries before the end. The result is
    /// always clamped to `0..len`.
    ///
    /// ```
    /// use collectica::OrderedMap;
    ///
    /// assert_eq!(OrderedMap::<()>::resolve_range(5, 1, Some(2)), 1..3);
    /// assert_eq!(OrderedMap::<()>::resolve_range(5, -2, None), 3..5);
    /// assert_eq!(OrderedMap::<()>::resolve_range(5, 1, Some(-1)), 1..4);
    /// assert_eq!(OrderedMap::<()>::resolve_range(5, 9, None), 5..5);
    /// ```
    pub fn resolve_range(len: usize, offset: isize, length: Option<isize>) -> Range<usize> {
        let len_i = len as isize;
        let start = if offset < 0 {
            (len_i + offset).max(0)
        } else {
            offset.min(len_i)
        };
        let end = match length {
            None => len_i,
            Some(length) if length < 0 => (len_i + length).max(start),
            Some(length) => start.saturating_add(length).min(len_i),
        };
        start as usize..end as usize
    }
}

impl<V: Clone> OrderedMap<V> {
    /// Copies the entries at a position range into a new map, keys preserved
    pub fn slice_positions(&self, range: Range<usize>) -> Self {
        self.entries
            .iter()
            .skip(range.start)
            .take(range.end.saturating_sub(range.start))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

// Equality is order-sensitive: two maps are equal only if they hold the same
// entries in the same order.
impl<V: PartialEq> PartialEq for OrderedMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|(a, b)| a == b)
    }
}

impl<V: Eq> Eq for OrderedMap<V> {}

impl<K: Into<Key>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = OrderedMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<Key>, V> Extend<(K, V)> for OrderedMap<V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.entries.insert(key.into(), value);
        }
    }
}

impl<K: Into<Key>, V, const N: usize> From<[(K, V); N]> for OrderedMap<V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = (Key, V);
    type IntoIter = indexmap::map::IntoIter<Key, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a OrderedMap<V> {
    type Item = (&'a Key, &'a V);
    type IntoIter = indexmap::map::Iter<'a, Key, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// Serialized as a sequence of [key, value] pairs so that insertion order and
// integer keys survive formats like JSON whose objects only have string keys.
impl<V: serde::Serialize> serde::Serialize for OrderedMap<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;

        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for entry in &self.entries {
            seq.serialize_element(&entry)?;
        }
        seq.end()
    }
}

impl<'de, V: serde::Deserialize<'de>> serde::Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{SeqAccess, Visitor};
        use std::fmt;
        use std::marker::PhantomData;

        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V: serde::Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence of [key, value] pairs")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut map = OrderedMap::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some((key, value)) = seq.next_element::<(Key, V)>()? {
                    map.entries.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_seq(OrderedMapVisitor(PhantomData))
    }
}
