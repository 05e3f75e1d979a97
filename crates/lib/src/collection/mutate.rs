//! In-place mutations.
//!
//! Every operation here builds its complete result first and only then swaps
//! it into the collection, so a panicking comparator or mapper leaves the
//! collection untouched.

use std::cmp::Ordering;

use tracing::trace;

use super::{Collection, Keying};
use crate::contracts::SortOrder;
use crate::key::Key;
use crate::map::OrderedMap;

impl<V, P: Keying> Collection<V, P> {
    /// Stable sort by value with a comparator.
    ///
    /// A comparator that is not a strict weak ordering yields an unspecified
    /// order, not a panic.
    pub fn sort_by(&mut self, mut compare: impl FnMut(&V, &V) -> Ordering) -> &mut Self {
        trace!(variant = P::NAME, len = self.count(), "sorting by value");
        let order = self.items.sorted_positions(|(_, a), (_, b)| compare(a, b));
        self.reorder(&order);
        self
    }

    /// Stable sort by key with a comparator
    pub fn sort_keys_by(&mut self, mut compare: impl FnMut(&Key, &Key) -> Ordering) -> &mut Self {
        trace!(variant = P::NAME, len = self.count(), "sorting by key");
        let order = self.items.sorted_positions(|(a, _), (b, _)| compare(a, b));
        self.reorder(&order);
        self
    }

    /// Stable sort by key in the given direction
    pub fn sort_keys(&mut self, order: SortOrder) -> &mut Self {
        self.sort_keys_by(|a, b| order.apply(a.cmp(b)))
    }

    pub(super) fn reorder(&mut self, positions: &[usize]) {
        let mut items = std::mem::take(&mut self.items);
        items.permute(positions);
        self.replace(items);
    }

    /// Replaces every value with the mapper's result
    pub fn transform(&mut self, mut mapper: impl FnMut(&V, &Key) -> V) -> &mut Self {
        let mapped: Vec<V> = self.items.iter().map(|(k, v)| mapper(v, k)).collect();
        for (slot, value) in self.items.values_mut().zip(mapped) {
            *slot = value;
        }
        self
    }

    /// Appends a value under the next integer key
    pub fn push(&mut self, value: V) -> &mut Self {
        self.items.push(value);
        self
    }

    /// Removes and returns the last value
    pub fn pop(&mut self) -> Option<V> {
        self.items.pop().map(|(_, v)| v)
    }

    /// Removes and returns the first value; integer keys are renumbered
    pub fn shift(&mut self) -> Option<V> {
        let (_, value) = self.items.shift()?;
        let items = std::mem::take(&mut self.items).renumber_int_keys();
        self.replace(items);
        Some(value)
    }

    /// Prepends a value; integer keys are renumbered so it takes key 0
    pub fn unshift(&mut self, value: V) -> &mut Self {
        let existing = std::mem::take(&mut self.items);
        let items =
            OrderedMap::from_entries_renumbered(std::iter::once((Key::Int(0), value)).chain(existing));
        self.replace(items);
        self
    }

    /// Sets the value at `key` (offset-set).
    ///
    /// Existing keys are updated in place. A new key is appended; sequential
    /// collections then renumber, so the value lands at the end.
    pub fn set(&mut self, key: impl Into<Key>, value: V) -> &mut Self {
        let key = key.into();
        let appended = !self.items.contains(&key);
        self.items.set(key, value);
        if appended {
            let items = std::mem::take(&mut self.items);
            self.replace(items);
        }
        self
    }

    /// Removes a key and returns its value
    pub fn remove(&mut self, key: impl Into<Key>) -> Option<V> {
        let removed = self.items.remove(key)?;
        let items = std::mem::take(&mut self.items);
        self.replace(items);
        Some(removed)
    }

    /// Removes a slice of entries, inserting `replacement` in its place, and
    /// returns the removed entries.
    ///
    /// A negative `offset` counts from the end; `length` follows
    /// [`OrderedMap::resolve_range`]. Integer keys of the remaining
    /// collection are renumbered, string keys kept.
    ///
    /// ```
    /// use collectica::Sequential;
    ///
    /// let mut letters = Sequential::from_values(["a", "b", "c", "d"]);
    /// let removed = letters.splice(1, Some(2), ["x"]);
    ///
    /// assert_eq!(removed.to_vec(), vec!["b", "c"]);
    /// assert_eq!(letters.to_vec(), vec!["a", "x", "d"]);
    /// ```
    pub fn splice(
        &mut self,
        offset: isize,
        length: Option<isize>,
        replacement: impl IntoIterator<Item = V>,
    ) -> Self {
        let range = OrderedMap::<V>::resolve_range(self.count(), offset, length);
        // Caller code runs here, before the items are taken.
        let mut replacement: Option<Vec<V>> = Some(replacement.into_iter().collect());

        let mut kept = Vec::with_capacity(self.count());
        let mut removed = OrderedMap::with_capacity(range.len());
        for (position, (key, value)) in std::mem::take(&mut self.items).into_iter().enumerate() {
            if position == range.start {
                if let Some(values) = replacement.take() {
                    kept.extend(values.into_iter().map(|v| (Key::Int(0), v)));
                }
            }
            if range.contains(&position) {
                removed.set(key, value);
            } else {
                kept.push((key, value));
            }
        }
        if let Some(values) = replacement {
            kept.extend(values.into_iter().map(|v| (Key::Int(0), v)));
        }
        self.replace(OrderedMap::from_entries_renumbered(kept));
        Self::from_map(removed)
    }
}

impl<V: Ord, P: Keying> Collection<V, P> {
    /// Stable sort by value in the given direction
    pub fn sort(&mut self, order: SortOrder) -> &mut Self {
        self.sort_by(|a, b| order.apply(a.cmp(b)))
    }
}
