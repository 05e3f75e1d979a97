//! Lazy collections over a restartable factory.
//!
//! A [`Lazy`] holds a factory producing a fresh [`Sequence`] of `(key, value)`
//! entries. Nothing is cached: every terminal operation calls
//! [`Lazy::storage`], which re-invokes the factory, and composing operations
//! (see the `pipeline` module) only wrap the factory in another one. Work happens
//! when, and only as far as, a terminal operation pulls entries.
//!
//! Lazy collections are single-threaded. Cloning one shares its factory.
//!
//! Duplicate keys are allowed in a sequence. They collapse only when the
//! sequence is materialised with [`Lazy::all`] (last write wins) or one of the
//! `to_*` conversions.

use std::fmt::{self, Display};
use std::iter::Sum;
use std::rc::Rc;

use tracing::trace;

use crate::budget::Budget;
use crate::collection::{Associative, Collection, Keying, Sequential};
use crate::key::Key;
use crate::map::OrderedMap;

mod pipeline;

/// One traversal of a lazy collection: `(key, value)` entries in production order.
pub type Sequence<V> = Box<dyn Iterator<Item = (Key, V)>>;

/// A lazily evaluated collection.
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use collectica::Lazy;
///
/// let runs = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&runs);
/// let squares = Lazy::sequence(move || {
///     counter.set(counter.get() + 1);
///     (1..=4).map(|n| n * n)
/// })
/// .filter(|v, _| v % 2 == 0);
///
/// assert_eq!(runs.get(), 0);
/// assert_eq!(squares.to_sequential().to_vec(), vec![4, 16]);
/// assert_eq!(squares.count(), 2);
/// assert_eq!(runs.get(), 2);
/// ```
pub struct Lazy<V> {
    factory: Rc<dyn Fn() -> Sequence<V>>,
}

impl<V> Clone for Lazy<V> {
    fn clone(&self) -> Self {
        Self {
            factory: Rc::clone(&self.factory),
        }
    }
}

impl<V> fmt::Debug for Lazy<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lazy").finish_non_exhaustive()
    }
}

impl<V: 'static> Lazy<V> {
    /// Builds a lazy collection from a factory producing `(key, value)` entries
    pub fn new<F, I, K>(factory: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: IntoIterator<Item = (K, V)>,
        I::IntoIter: 'static,
        K: Into<Key> + 'static,
    {
        Self::from_factory(move || Box::new(factory().into_iter().map(|(k, v)| (k.into(), v))))
    }

    /// Builds a lazy collection from a factory producing bare values, keyed `0..`
    pub fn sequence<F, I>(factory: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: IntoIterator<Item = V>,
        I::IntoIter: 'static,
    {
        Self::from_factory(move || {
            Box::new(
                factory()
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (Key::from(i), v)),
            )
        })
    }

    /// A lazy view over a snapshot of an eager collection
    pub fn from_collection<P: Keying>(collection: &Collection<V, P>) -> Self
    where
        V: Clone,
    {
        let snapshot = collection.all();
        Self::from_factory(move || Box::new(snapshot.clone().into_iter()))
    }

    /// A lazy collection that never yields anything
    pub fn empty() -> Self {
        Self::from_factory(|| Box::new(std::iter::empty()))
    }

    pub(crate) fn from_factory(factory: impl Fn() -> Sequence<V> + 'static) -> Self {
        Self {
            factory: Rc::new(factory),
        }
    }

    /// A fresh traversal, invoking the factory again
    pub fn storage(&self) -> Sequence<V> {
        trace!("invoking lazy factory");
        (self.factory)()
    }

    /// Same as [`Lazy::storage`]
    pub fn iter(&self) -> Sequence<V> {
        self.storage()
    }

    /// Number of entries produced by one traversal
    pub fn count(&self) -> usize {
        self.storage().count()
    }

    /// Returns true if a traversal produces nothing
    pub fn is_empty(&self) -> bool {
        self.storage().next().is_none()
    }

    /// First value produced
    pub fn first(&self) -> Option<V> {
        self.storage().next().map(|(_, v)| v)
    }

    /// First value matching the predicate; production stops at the match
    pub fn first_where(&self, mut predicate: impl FnMut(&V, &Key) -> bool) -> Option<V> {
        self.storage().find(|(k, v)| predicate(v, k)).map(|(_, v)| v)
    }

    /// Last value produced
    pub fn last(&self) -> Option<V> {
        self.storage().last().map(|(_, v)| v)
    }

    /// Last value matching the predicate
    pub fn last_where(&self, mut predicate: impl FnMut(&V, &Key) -> bool) -> Option<V> {
        self.storage()
            .filter(|(k, v)| predicate(v, k))
            .last()
            .map(|(_, v)| v)
    }

    /// Value stored under `key`.
    ///
    /// With duplicate keys the last one wins, matching [`Lazy::all`].
    pub fn get(&self, key: impl Into<Key>) -> Option<V> {
        let key = key.into();
        self.storage()
            .filter(|(k, _)| *k == key)
            .last()
            .map(|(_, v)| v)
    }

    /// Returns true if `key` is produced
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        let key = key.into();
        self.storage().any(|(k, _)| k == key)
    }

    /// Returns true if any entry matches the predicate
    pub fn contains_where(&self, mut predicate: impl FnMut(&V, &Key) -> bool) -> bool {
        self.storage().any(|(k, v)| predicate(&v, &k))
    }

    /// Key of the first entry matching the predicate
    pub fn search_where(&self, mut predicate: impl FnMut(&V, &Key) -> bool) -> Option<Key> {
        self.storage().find(|(k, v)| predicate(v, k)).map(|(k, _)| k)
    }

    /// Returns true if every entry matches (vacuously true when empty)
    pub fn every(&self, mut predicate: impl FnMut(&V, &Key) -> bool) -> bool {
        self.storage().all(|(k, v)| predicate(&v, &k))
    }

    /// Returns true if at least one entry matches
    pub fn some(&self, predicate: impl FnMut(&V, &Key) -> bool) -> bool {
        self.contains_where(predicate)
    }

    /// Strict left fold over production order
    pub fn reduce<A>(&self, initial: A, mut reducer: impl FnMut(A, &V, &Key) -> A) -> A {
        self.storage()
            .fold(initial, |acc, (k, v)| reducer(acc, &v, &k))
    }

    /// Sum of all values
    pub fn sum(&self) -> V
    where
        V: Sum<V>,
    {
        self.storage().map(|(_, v)| v).sum()
    }

    /// Smallest value (the first one among equals)
    pub fn min(&self) -> Option<V>
    where
        V: Ord,
    {
        self.storage().map(|(_, v)| v).min()
    }

    /// Largest value (the last one among equals)
    pub fn max(&self) -> Option<V>
    where
        V: Ord,
    {
        self.storage().map(|(_, v)| v).max()
    }

    /// Calls `f` for each entry until it returns false.
    ///
    /// Stopping early also stops production.
    pub fn each(&self, f: impl FnMut(&V, &Key) -> bool) -> bool {
        self.each_within(&Budget::new(), f)
    }

    /// Calls `f` for each entry until it returns false or the budget runs out
    pub fn each_within(&self, budget: &Budget, mut f: impl FnMut(&V, &Key) -> bool) -> bool {
        budget.drive(self.storage(), |(k, v)| f(&v, &k))
    }

    /// Materialises one traversal into an ordered map.
    ///
    /// A key produced twice keeps its first position and its last value.
    pub fn all(&self) -> OrderedMap<V> {
        self.storage().collect()
    }

    /// Materialises into a sequential collection.
    ///
    /// Keys are dropped before collecting, so repeated keys lose no values.
    pub fn to_sequential(&self) -> Sequential<V> {
        Collection::from_values(self.storage().map(|(_, value)| value))
    }

    /// Materialises into an associative collection, keys kept
    pub fn to_associative(&self) -> Associative<V> {
        Collection::from_map(self.all())
    }
}

impl<V: PartialEq + 'static> Lazy<V> {
    /// Returns true if a value strictly equal to `value` is produced
    pub fn contains(&self, value: &V) -> bool {
        self.storage().any(|(_, v)| &v == value)
    }

    /// Key of the first value strictly equal to `value`
    pub fn search(&self, value: &V) -> Option<Key> {
        self.search_where(|v, _| v == value)
    }
}

impl<V: Display + 'static> Lazy<V> {
    /// Joins the values with `glue`
    pub fn implode(&self, glue: &str) -> String {
        let mut out = String::new();
        for (i, (_, value)) in self.storage().enumerate() {
            if i > 0 {
                out.push_str(glue);
            }
            out.push_str(&value.to_string());
        }
        out
    }
}

impl<V: Clone + 'static, P: Keying> From<&Collection<V, P>> for Lazy<V> {
    fn from(collection: &Collection<V, P>) -> Self {
        Self::from_collection(collection)
    }
}
