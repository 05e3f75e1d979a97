//! Set algebra between collections: difference, intersection and union.
//!
//! Difference and intersection come in four flavours, each with default
//! equality or caller comparators:
//!
//! | compares | default | with comparators |
//! |---|---|---|
//! | values | `difference` | `difference_using` |
//! | keys | `difference_keys` | `difference_keys_using` |
//! | keys and values | `difference_assoc` | `difference_assoc_using_values`, `difference_assoc_using_keys`, `difference_assoc_using` |
//!
//! (and the same for `intersect*`). Default equality is strict `PartialEq`:
//! type and value must both match. Results keep this collection's order and
//! original values, then settle under its key policy, so a sequential result
//! is renumbered.

use std::cmp::Ordering;

use super::{Collection, Keying};
use crate::contracts::equal_by;
use crate::key::Key;

impl<V: Clone, P: Keying> Collection<V, P> {
    /// Keeps entries of `self` whose presence in `other` (per `matches`) equals `keep_found`
    fn retain_against<Q: Keying>(
        &self,
        other: &Collection<V, Q>,
        keep_found: bool,
        mut matches: impl FnMut((&Key, &V), (&Key, &V)) -> bool,
    ) -> Self {
        self.select(|k, v| other.items.iter().any(|entry| matches((k, v), entry)) == keep_found)
    }

    /// Entries whose value satisfies no comparator match in `other`
    pub fn difference_using<Q: Keying>(
        &self,
        other: &Collection<V, Q>,
        compare: impl FnMut(&V, &V) -> Ordering,
    ) -> Self {
        let mut eq = equal_by(compare);
        self.retain_against(other, false, |(_, a), (_, b)| eq(a, b))
    }

    /// Entries whose key is absent from `other`
    pub fn difference_keys<Q: Keying>(&self, other: &Collection<V, Q>) -> Self {
        self.select(|k, _| !other.contains_key(k))
    }

    /// Entries whose key matches no key of `other` under the comparator
    pub fn difference_keys_using<Q: Keying>(
        &self,
        other: &Collection<V, Q>,
        compare: impl FnMut(&Key, &Key) -> Ordering,
    ) -> Self {
        let mut eq = equal_by(compare);
        self.retain_against(other, false, |(a, _), (b, _)| eq(a, b))
    }

    /// Entries with no same-key entry in `other` whose value matches under the comparator
    pub fn difference_assoc_using_values<Q: Keying>(
        &self,
        other: &Collection<V, Q>,
        compare: impl FnMut(&V, &V) -> Ordering,
    ) -> Self {
        let mut eq = equal_by(compare);
        self.select(|k, v| !other.get(k).is_some_and(|b| eq(v, b)))
    }

    /// Entries with no entry in `other` matching both key (comparator) and value (comparator)
    pub fn difference_assoc_using<Q: Keying>(
        &self,
        other: &Collection<V, Q>,
        value_compare: impl FnMut(&V, &V) -> Ordering,
        key_compare: impl FnMut(&Key, &Key) -> Ordering,
    ) -> Self {
        let mut value_eq = equal_by(value_compare);
        let mut key_eq = equal_by(key_compare);
        self.retain_against(other, false, |(ka, a), (kb, b)| {
            key_eq(ka, kb) && value_eq(a, b)
        })
    }

    /// Entries whose value matches some value of `other` under the comparator
    pub fn intersect_using<Q: Keying>(
        &self,
        other: &Collection<V, Q>,
        compare: impl FnMut(&V, &V) -> Ordering,
    ) -> Self {
        let mut eq = equal_by(compare);
        self.retain_against(other, true, |(_, a), (_, b)| eq(a, b))
    }

    /// Entries whose key is present in `other`
    pub fn intersect_keys<Q: Keying>(&self, other: &Collection<V, Q>) -> Self {
        self.select(|k, _| other.contains_key(k))
    }

    /// Entries whose key matches some key of `other` under the comparator
    pub fn intersect_keys_using<Q: Keying>(
        &self,
        other: &Collection<V, Q>,
        compare: impl FnMut(&Key, &Key) -> Ordering,
    ) -> Self {
        let mut eq = equal_by(compare);
        self.retain_against(other, true, |(a, _), (b, _)| eq(a, b))
    }

    /// Entries whose same-key entry in `other` has a matching value under the comparator
    pub fn intersect_assoc_using_values<Q: Keying>(
        &self,
        other: &Collection<V, Q>,
        compare: impl FnMut(&V, &V) -> Ordering,
    ) -> Self {
        let mut eq = equal_by(compare);
        self.select(|k, v| other.get(k).is_some_and(|b| eq(v, b)))
    }

    /// Entries matched in `other` on both key (comparator) and value (comparator)
    pub fn intersect_assoc_using<Q: Keying>(
        &self,
        other: &Collection<V, Q>,
        value_compare: impl FnMut(&V, &V) -> Ordering,
        key_compare: impl FnMut(&Key, &Key) -> Ordering,
    ) -> Self {
        let mut value_eq = equal_by(value_compare);
        let mut key_eq = equal_by(key_compare);
        self.retain_against(other, true, |(ka, a), (kb, b)| {
            key_eq(ka, kb) && value_eq(a, b)
        })
    }

    /// This collection plus the entries of `other` whose key it lacks.
    ///
    /// Keys already present are never overwritten.
    pub fn union_keys<Q: Keying>(&self, other: &Collection<V, Q>) -> Self {
        let mut items = self.items.clone();
        for (key, value) in other.items.iter() {
            if !items.contains(key) {
                items.set(key.clone(), value.clone());
            }
        }
        Self::from_map(items)
    }
}

impl<V: Clone + PartialEq, P: Keying> Collection<V, P> {
    /// Entries whose value does not occur in `other`.
    ///
    /// ```
    /// use collectica::Sequential;
    ///
    /// let rest = Sequential::from_values([1, 2, 3, 4, 5])
    ///     .difference(&Sequential::from_values([2, 3]));
    /// assert_eq!(rest.to_vec(), vec![1, 4, 5]);
    /// ```
    pub fn difference<Q: Keying>(&self, other: &Collection<V, Q>) -> Self {
        self.retain_against(other, false, |(_, a), (_, b)| a == b)
    }

    /// Entries with no entry in `other` of the same key and value
    pub fn difference_assoc<Q: Keying>(&self, other: &Collection<V, Q>) -> Self {
        self.select(|k, v| other.get(k) != Some(v))
    }

    /// Entries with no entry in `other` of equal value and comparator-matching key
    pub fn difference_assoc_using_keys<Q: Keying>(
        &self,
        other: &Collection<V, Q>,
        compare: impl FnMut(&Key, &Key) -> Ordering,
    ) -> Self {
        let mut key_eq = equal_by(compare);
        self.retain_against(other, false, |(ka, a), (kb, b)| a == b && key_eq(ka, kb))
    }

    /// Entries whose value occurs in `other`
    pub fn intersect<Q: Keying>(&self, other: &Collection<V, Q>) -> Self {
        self.retain_against(other, true, |(_, a), (_, b)| a == b)
    }

    /// Entries present in `other` with the same key and value
    pub fn intersect_assoc<Q: Keying>(&self, other: &Collection<V, Q>) -> Self {
        self.select(|k, v| other.get(k) == Some(v))
    }

    /// Entries matched in `other` by equal value and comparator-matching key
    pub fn intersect_assoc_using_keys<Q: Keying>(
        &self,
        other: &Collection<V, Q>,
        compare: impl FnMut(&Key, &Key) -> Ordering,
    ) -> Self {
        let mut key_eq = equal_by(compare);
        self.retain_against(other, true, |(ka, a), (kb, b)| a == b && key_eq(ka, kb))
    }

    /// This collection plus the values of `other` it does not already hold.
    ///
    /// A value from `other` keeps its key when that key is free and is
    /// appended under the next integer key otherwise.
    pub fn union<Q: Keying>(&self, other: &Collection<V, Q>) -> Self {
        let mut items = self.items.clone();
        for (key, value) in other.items.iter() {
            if items.values().any(|v| v == value) {
                continue;
            }
            if items.contains(key) {
                items.push(value.clone());
            } else {
                items.set(key.clone(), value.clone());
            }
        }
        Self::from_map(items)
    }
}
