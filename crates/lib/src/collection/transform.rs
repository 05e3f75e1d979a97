//! Non-mutating transformations returning new collections.

use tracing::debug;

use super::{Associative, Collection, Indexed, Keying, Nested};
use crate::errors::CollectionError;
use crate::key::{AsKey, Key};
use crate::map::OrderedMap;

impl<V, P: Keying> Collection<V, P> {
    /// Maps every value, keeping the key structure
    pub fn map<U>(&self, mut mapper: impl FnMut(&V, &Key) -> U) -> Collection<U, P> {
        let items: OrderedMap<U> = self
            .items
            .iter()
            .map(|(k, v)| (k.clone(), mapper(v, k)))
            .collect();
        Collection::from_settled(items)
    }

    /// Combines a list of keys with a list of values.
    ///
    /// Both sides must have the same length.
    ///
    /// ```
    /// use collectica::{Associative, Key};
    ///
    /// let ages = Associative::combine(["ann", "bob"], [31, 42]).unwrap();
    /// assert_eq!(ages.get("bob"), Some(&42));
    ///
    /// assert!(Associative::<i32>::combine(["ann"], [1, 2]).is_err());
    /// ```
    pub fn combine<K: Into<Key>>(
        keys: impl IntoIterator<Item = K>,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Self, CollectionError> {
        let keys: Vec<Key> = keys.into_iter().map(Into::into).collect();
        let values: Vec<V> = values.into_iter().collect();
        if keys.len() != values.len() {
            return Err(CollectionError::SizeMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        Ok(Self::from_map(keys.into_iter().zip(values).collect()))
    }
}

impl<V: Clone, P: Keying> Collection<V, P> {
    /// Keeps the entries matching the predicate.
    ///
    /// Sequential collections renumber the result; associative ones keep
    /// every retained key with its original value.
    pub fn filter(&self, mut predicate: impl FnMut(&V, &Key) -> bool) -> Self {
        self.select(|k, v| predicate(v, k))
    }

    /// Drops the entries matching the predicate
    pub fn reject(&self, mut predicate: impl FnMut(&V, &Key) -> bool) -> Self {
        self.select(|k, v| !predicate(v, k))
    }

    pub(crate) fn select(&self, mut keep: impl FnMut(&Key, &V) -> bool) -> Self {
        let items: OrderedMap<V> = self
            .items
            .iter()
            .filter(|(k, v)| keep(k, v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self::from_map(items)
    }

    /// Re-keys every entry.
    ///
    /// When two entries map to the same key the one processed last wins; the
    /// key keeps the position where it first appeared.
    pub fn map_keys<K: Into<Key>>(&self, mut mapper: impl FnMut(&V, &Key) -> K) -> Associative<V> {
        self.map_with_keys(|v, k| (mapper(v, k), v.clone()))
    }

    /// Maps every entry to a new `(key, value)` pair, last write wins on collisions
    pub fn map_with_keys<K: Into<Key>, U>(
        &self,
        mut mapper: impl FnMut(&V, &Key) -> (K, U),
    ) -> Associative<U> {
        let mut items = OrderedMap::with_capacity(self.count());
        for (key, value) in self.items.iter() {
            let (new_key, new_value) = mapper(value, key);
            let new_key: Key = new_key.into();
            if items.set(new_key.clone(), new_value).is_some() {
                debug!(key = %new_key, "key collision while re-keying, last write wins");
            }
        }
        Collection::from_settled(items)
    }

    /// Splits into `(passed, failed)` by the predicate
    pub fn partition(&self, mut predicate: impl FnMut(&V, &Key) -> bool) -> (Self, Self) {
        let mut passed = OrderedMap::new();
        let mut failed = OrderedMap::new();
        for (key, value) in self.items.iter() {
            let target = if predicate(value, key) {
                &mut passed
            } else {
                &mut failed
            };
            target.set(key.clone(), value.clone());
        }
        (Self::from_map(passed), Self::from_map(failed))
    }

    /// Slice by position; negative `offset`/`length` count from the end
    pub fn slice(&self, offset: isize, length: Option<isize>) -> Self {
        let range = OrderedMap::<V>::resolve_range(self.count(), offset, length);
        Self::from_map(self.items.slice_positions(range))
    }

    /// First `n` entries, or the last `-n` entries when `n` is negative
    pub fn take(&self, n: isize) -> Self {
        if n < 0 {
            self.slice(n, None)
        } else {
            self.slice(0, Some(n))
        }
    }

    /// Everything after the first `n` entries
    pub fn skip(&self, n: usize) -> Self {
        self.slice(n.min(isize::MAX as usize) as isize, None)
    }

    /// Splits into consecutive chunks of `size` entries (the last may be shorter)
    pub fn chunk(&self, size: usize) -> Result<Nested<V, Indexed>, CollectionError> {
        if size == 0 {
            return Err(CollectionError::InvalidSize {
                operation: "chunk",
                size,
            });
        }
        let chunks = (0..self.count())
            .step_by(size)
            .map(|start| P::settle(self.items.slice_positions(start..start + size)));
        Ok(Collection::from_values(chunks))
    }

    /// Splits into `groups` groups as evenly as possible, earlier groups larger.
    ///
    /// Never produces empty groups: asking for more groups than entries yields
    /// one group per entry.
    pub fn split(&self, groups: usize) -> Result<Nested<V, Indexed>, CollectionError> {
        if groups == 0 {
            return Err(CollectionError::InvalidSize {
                operation: "split",
                size: groups,
            });
        }
        let len = self.count();
        let groups = groups.min(len);
        let mut parts = Vec::with_capacity(groups);
        let mut start = 0;
        for i in 0..groups {
            let size = len / groups + usize::from(i < len % groups);
            parts.push(P::settle(self.items.slice_positions(start..start + size)));
            start += size;
        }
        Ok(Collection::from_values(parts))
    }

    /// Pads with `value` up to `|size|` entries: on the right for positive
    /// sizes, on the left for negative ones.
    ///
    /// Integer keys are renumbered; string keys are kept.
    pub fn pad(&self, size: isize, value: V) -> Self {
        let target = size.unsigned_abs();
        if target <= self.count() {
            return self.clone();
        }
        let filler = std::iter::repeat_n(value, target - self.count()).map(|v| (Key::Int(0), v));
        let existing = self.items.iter().map(|(k, v)| (k.clone(), v.clone()));
        let items = if size < 0 {
            OrderedMap::from_entries_renumbered(filler.chain(existing))
        } else {
            OrderedMap::from_entries_renumbered(existing.chain(filler))
        };
        Self::from_map(items)
    }

    /// Entries in reverse order
    pub fn reverse(&self) -> Self {
        let items: OrderedMap<V> = self
            .items
            .iter()
            .rev()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self::from_map(items)
    }

    /// Only the entries whose key is listed
    pub fn only<K: Into<Key>>(&self, keys: impl IntoIterator<Item = K>) -> Self {
        let keys: Vec<Key> = keys.into_iter().map(Into::into).collect();
        self.select(|k, _| keys.contains(k))
    }

    /// Every entry except those whose key is listed
    pub fn except<K: Into<Key>>(&self, keys: impl IntoIterator<Item = K>) -> Self {
        let keys: Vec<Key> = keys.into_iter().map(Into::into).collect();
        self.select(|k, _| !keys.contains(k))
    }

    /// Groups consecutive values, starting a new group whenever
    /// `starts_group(previous, current)` returns true.
    ///
    /// Original keys are discarded: each group is keyed `0..`.
    ///
    /// ```
    /// use collectica::Sequential;
    ///
    /// let runs = Sequential::from_values([1, 2, 3, 7, 8]).group_by(|prev, curr| curr - prev > 1);
    /// let runs: Vec<Vec<i32>> = runs.iter().map(|(_, g)| g.values().copied().collect()).collect();
    /// assert_eq!(runs, vec![vec![1, 2, 3], vec![7, 8]]);
    /// ```
    pub fn group_by(&self, mut starts_group: impl FnMut(&V, &V) -> bool) -> Nested<V, Indexed> {
        let mut groups: Vec<OrderedMap<V>> = Vec::new();
        let mut previous: Option<&V> = None;
        for value in self.items.values() {
            let opens = match previous {
                Some(prev) => starts_group(prev, value),
                None => true,
            };
            if opens {
                groups.push(OrderedMap::new());
            }
            if let Some(group) = groups.last_mut() {
                group.push(value.clone());
            }
            previous = Some(value);
        }
        Collection::from_values(groups)
    }

    /// Merges other collections into a copy of this one.
    ///
    /// Sequential collections concatenate and renumber. Associative
    /// collections overwrite per key: a later collection's value replaces an
    /// earlier one, at the position where the key first appeared.
    pub fn merge<'a>(&self, others: impl IntoIterator<Item = &'a Self>) -> Self
    where
        V: 'a,
    {
        let mut items = self.items.clone();
        for other in others {
            P::merge(&mut items, other.items.clone());
        }
        Self::from_map(items)
    }
}

impl<V: Clone + PartialEq, P: Keying> Collection<V, P> {
    /// Keeps the first occurrence of every value
    pub fn unique(&self) -> Self {
        let mut seen: Vec<&V> = Vec::new();
        let items: OrderedMap<V> = self
            .items
            .iter()
            .filter(|(_, v)| {
                if seen.contains(v) {
                    false
                } else {
                    seen.push(*v);
                    true
                }
            })
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self::from_map(items)
    }
}

impl<V: AsKey, P: Keying> Collection<V, P> {
    /// Swaps keys and values.
    ///
    /// Values must be usable as keys. Duplicate values collapse, last write
    /// wins.
    pub fn flip(&self) -> Result<Associative<Key>, CollectionError> {
        let mut items = OrderedMap::with_capacity(self.count());
        for (key, value) in self.items.iter() {
            items.set(value.to_key()?, key.clone());
        }
        Ok(Collection::from_settled(items))
    }
}
