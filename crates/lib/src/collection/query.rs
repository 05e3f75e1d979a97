//! Read-only queries: lookups, searches, aggregates and traversal.

use std::fmt::Display;

use super::{Associative, Collection, Keying, Sequential};
use crate::budget::Budget;
use crate::errors::CollectionError;
use crate::key::{AsKey, Key};
use crate::map::OrderedMap;

impl<V, P: Keying> Collection<V, P> {
    /// Gets a value by key; `None` means the key is absent
    pub fn get(&self, key: impl Into<Key>) -> Option<&V> {
        self.items.get(key)
    }

    /// Returns true if the key is present
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.items.contains(key)
    }

    /// Returns true if any entry matches the predicate
    pub fn contains_where(&self, mut predicate: impl FnMut(&V, &Key) -> bool) -> bool {
        self.items.iter().any(|(k, v)| predicate(v, k))
    }

    /// Key of the first entry matching the predicate.
    ///
    /// `None` is the "not found" sentinel; a miss is an expected outcome, not
    /// an error.
    pub fn search_where(&self, predicate: impl FnMut(&V, &Key) -> bool) -> Option<Key> {
        self.items.first_where(predicate).map(|(k, _)| k.clone())
    }

    /// First value in order
    pub fn first(&self) -> Option<&V> {
        self.items.first().map(|(_, v)| v)
    }

    /// First value matching the predicate
    pub fn first_where(&self, predicate: impl FnMut(&V, &Key) -> bool) -> Option<&V> {
        self.items.first_where(predicate).map(|(_, v)| v)
    }

    /// First entry in order
    pub fn first_entry(&self) -> Option<(&Key, &V)> {
        self.items.first()
    }

    /// Last value in order
    pub fn last(&self) -> Option<&V> {
        self.items.last().map(|(_, v)| v)
    }

    /// Last value matching the predicate
    pub fn last_where(&self, predicate: impl FnMut(&V, &Key) -> bool) -> Option<&V> {
        self.items.last_where(predicate).map(|(_, v)| v)
    }

    /// Last entry in order
    pub fn last_entry(&self) -> Option<(&Key, &V)> {
        self.items.last()
    }

    /// Returns true if every entry matches (vacuously true when empty)
    pub fn every(&self, mut predicate: impl FnMut(&V, &Key) -> bool) -> bool {
        self.items.iter().all(|(k, v)| predicate(v, k))
    }

    /// Returns true if at least one entry matches
    pub fn some(&self, predicate: impl FnMut(&V, &Key) -> bool) -> bool {
        self.contains_where(predicate)
    }

    /// Keys in order, as a sequential collection
    pub fn keys(&self) -> Sequential<Key> {
        Collection::from_values(self.items.keys().cloned())
    }

    /// Strict left fold over insertion order
    pub fn reduce<A>(&self, initial: A, mut reducer: impl FnMut(A, &V, &Key) -> A) -> A {
        self.items
            .iter()
            .fold(initial, |acc, (k, v)| reducer(acc, v, k))
    }

    /// Arithmetic mean of a numeric projection, `None` when empty
    pub fn average_by(&self, mut project: impl FnMut(&V) -> f64) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let total: f64 = self.items.values().map(&mut project).sum();
        Some(total / self.count() as f64)
    }

    /// Counts entries per key produced by the mapper
    pub fn count_by_with<K: Into<Key>>(
        &self,
        mut mapper: impl FnMut(&V, &Key) -> K,
    ) -> Associative<usize> {
        let mut counts: OrderedMap<usize> = OrderedMap::new();
        for (key, value) in self.items.iter() {
            let bucket: Key = mapper(value, key).into();
            match counts.get_mut(&bucket) {
                Some(count) => *count += 1,
                None => {
                    counts.set(bucket, 1);
                }
            }
        }
        Collection::from_settled(counts)
    }

    /// Calls `f` for each entry until it returns false.
    ///
    /// Returns true if every entry was visited.
    pub fn each(&self, f: impl FnMut(&V, &Key) -> bool) -> bool {
        self.each_within(&Budget::new(), f)
    }

    /// Calls `f` for each entry until it returns false or the budget runs out.
    ///
    /// Exceeding the item ceiling or the time limit stops the traversal early
    /// and returns false; it is not an error.
    pub fn each_within(&self, budget: &Budget, mut f: impl FnMut(&V, &Key) -> bool) -> bool {
        budget.drive(self.items.iter(), |(k, v)| f(v, k))
    }
}

impl<V: PartialEq, P: Keying> Collection<V, P> {
    /// Returns true if a value strictly equal to `value` is present
    pub fn contains(&self, value: &V) -> bool {
        self.items.values().any(|v| v == value)
    }

    /// Key of the first value strictly equal to `value`
    pub fn search(&self, value: &V) -> Option<Key> {
        self.search_where(|v, _| v == value)
    }
}

impl<V: Clone, P: Keying> Collection<V, P> {
    /// Values in order, keyed `0..n-1`
    pub fn values(&self) -> Sequential<V> {
        Collection::from_values(self.items.values().cloned())
    }

    /// Sum of all values; an empty collection sums to the type's zero
    pub fn sum(&self) -> V
    where
        V: std::iter::Sum<V>,
    {
        self.items.values().cloned().sum()
    }

    /// Arithmetic mean of the values, `None` when empty
    pub fn average(&self) -> Option<f64>
    where
        V: Into<f64>,
    {
        self.average_by(|v| v.clone().into())
    }
}

impl<V: Ord, P: Keying> Collection<V, P> {
    /// Smallest value (the first one among equals)
    pub fn min(&self) -> Option<&V> {
        self.items.values().min()
    }

    /// Largest value (the last one among equals)
    pub fn max(&self) -> Option<&V> {
        self.items.values().max()
    }
}

impl<V: AsKey, P: Keying> Collection<V, P> {
    /// Counts occurrences of each value.
    ///
    /// Values must be usable as keys (integers or strings); anything else is a
    /// [`CollectionError::TypeMismatch`] naming the offending type.
    pub fn count_by(&self) -> Result<Associative<usize>, CollectionError> {
        let mut counts: OrderedMap<usize> = OrderedMap::new();
        for value in self.items.values() {
            let bucket = value.to_key()?;
            match counts.get_mut(&bucket) {
                Some(count) => *count += 1,
                None => {
                    counts.set(bucket, 1);
                }
            }
        }
        Ok(Collection::from_settled(counts))
    }
}

impl<V: Display, P: Keying> Collection<V, P> {
    /// Joins the values with `glue`
    pub fn implode(&self, glue: &str) -> String {
        let mut out = String::new();
        for (i, value) in self.items.values().enumerate() {
            if i > 0 {
                out.push_str(glue);
            }
            out.push_str(&value.to_string());
        }
        out
    }

    /// Joins the values with `glue`, using `final_glue` before the last one.
    ///
    /// ```
    /// use collectica::Sequential;
    ///
    /// let names = Sequential::from_values(["Ann", "Bob", "Cid"]);
    /// assert_eq!(names.join(", ", Some(" and ")), "Ann, Bob and Cid");
    /// assert_eq!(Sequential::from_values(["Ann", "Bob"]).join(", ", Some(" and ")), "Ann and Bob");
    /// assert_eq!(Sequential::from_values(["Ann"]).join(", ", Some(" and ")), "Ann");
    /// ```
    pub fn join(&self, glue: &str, final_glue: Option<&str>) -> String {
        let Some(final_glue) = final_glue else {
            return self.implode(glue);
        };
        let count = self.count();
        let mut out = String::new();
        for (i, value) in self.items.values().enumerate() {
            if i > 0 {
                out.push_str(if i == count - 1 { final_glue } else { glue });
            }
            out.push_str(&value.to_string());
        }
        out
    }
}
