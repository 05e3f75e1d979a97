//! Eager collections over an [`OrderedMap`].
//!
//! A [`Collection`] owns a fully materialised [`OrderedMap`] and exposes the
//! shared pipeline operations. How keys behave is decided by its key policy
//! ([`Keying`]):
//!
//! - [`Indexed`] (the [`Sequential`] variant): keys are always `0..n-1`. Every
//!   structural change (filter, merge, sort, splice, ...) renumbers.
//! - [`Keyed`] (the [`Associative`] variant): keys are caller-assigned and
//!   preserved. Merging overwrites per key, last write wins.
//!
//! [`Nested`] collections hold records (ordered maps) as values and add
//! record-aware operations (see the `nested` module).
//!
//! Non-mutating operations return new collections. Mutating operations
//! (`sort*`, `shuffle`, `transform`, `push`, `pop`, `shift`, `unshift`, `set`,
//! `remove`, `splice`) work in place and return `&mut Self` for chaining. They
//! compute their result completely before replacing the backing map, so a
//! panicking callback leaves the collection as it was.

use std::fmt::Debug;
use std::marker::PhantomData;

use crate::key::Key;
use crate::map::OrderedMap;

mod mutate;
mod nested;
mod query;
mod random;
mod set_ops;
mod transform;

/// Key policy of a collection.
///
/// The policy is the single point where the sequential and associative
/// variants differ: every operation builds its result map and hands it to
/// [`Keying::settle`], and `merge` defers to [`Keying::merge`].
pub trait Keying: Debug + Clone + Copy + Default + PartialEq + Eq + 'static {
    /// Variant name used in log output
    const NAME: &'static str;

    /// Brings a freshly built map into the shape this policy guarantees
    fn settle<V>(items: OrderedMap<V>) -> OrderedMap<V>;

    /// Builds a map from raw entries, which may repeat keys
    fn gather<K: Into<Key>, V>(entries: impl IntoIterator<Item = (K, V)>) -> OrderedMap<V>;

    /// Folds `incoming` into `target`
    fn merge<V>(target: &mut OrderedMap<V>, incoming: OrderedMap<V>);
}

/// Sequential key policy: contiguous integer keys starting at 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Indexed;

impl Keying for Indexed {
    const NAME: &'static str = "sequential";

    fn settle<V>(items: OrderedMap<V>) -> OrderedMap<V> {
        let contiguous = items
            .keys()
            .enumerate()
            .all(|(i, key)| key.as_int() == Some(i as i64));
        if contiguous { items } else { items.reindexed() }
    }

    fn gather<K: Into<Key>, V>(entries: impl IntoIterator<Item = (K, V)>) -> OrderedMap<V> {
        OrderedMap::from_values(entries.into_iter().map(|(_, value)| value))
    }

    fn merge<V>(target: &mut OrderedMap<V>, incoming: OrderedMap<V>) {
        for value in incoming.into_values() {
            target.push(value);
        }
    }
}

/// Associative key policy: caller-assigned keys, never renumbered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keyed;

impl Keying for Keyed {
    const NAME: &'static str = "associative";

    fn settle<V>(items: OrderedMap<V>) -> OrderedMap<V> {
        items
    }

    fn gather<K: Into<Key>, V>(entries: impl IntoIterator<Item = (K, V)>) -> OrderedMap<V> {
        entries.into_iter().collect()
    }

    fn merge<V>(target: &mut OrderedMap<V>, incoming: OrderedMap<V>) {
        for (key, value) in incoming {
            target.set(key, value);
        }
    }
}

/// An eager, fully materialised collection.
///
/// # Examples
///
/// ```
/// use collectica::{Associative, Key, Sequential};
///
/// let evens = Sequential::from_values([1, 2, 3, 4]).filter(|v, _| v % 2 == 0);
/// assert_eq!(evens.keys().to_vec(), vec![Key::from(0), Key::from(1)]);
///
/// let prices = Associative::new(|| [("apple", 3), ("pear", 5), ("plum", 2)]);
/// let cheap = prices.filter(|v, _| *v < 4);
/// assert_eq!(cheap.keys().to_vec(), vec![Key::from("apple"), Key::from("plum")]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<V, P: Keying = Keyed> {
    items: OrderedMap<V>,
    policy: PhantomData<P>,
}

/// Collection with contiguous integer keys `0..n-1`.
pub type Sequential<V> = Collection<V, Indexed>;

/// Collection with caller-assigned, preserved keys.
pub type Associative<V> = Collection<V, Keyed>;

/// Collection whose values are records.
pub type Nested<T, P = Keyed> = Collection<OrderedMap<T>, P>;

impl<V, P: Keying> Collection<V, P> {
    /// Builds a collection from a factory producing `(key, value)` entries.
    ///
    /// In an associative collection later duplicate keys overwrite earlier
    /// ones. A sequential collection drops the factory's keys and keeps every
    /// value in order.
    pub fn new<F, I, K>(factory: F) -> Self
    where
        F: FnOnce() -> I,
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
    {
        Self::from_map(P::gather(factory()))
    }

    /// Builds a collection from a factory producing bare values, keyed `0..`
    pub fn sequence<F, I>(factory: F) -> Self
    where
        F: FnOnce() -> I,
        I: IntoIterator<Item = V>,
    {
        Self::from_values(factory())
    }

    /// Builds a collection from values, keyed `0..`
    pub fn from_values(values: impl IntoIterator<Item = V>) -> Self {
        Self::from_settled(OrderedMap::from_values(values))
    }

    /// Wraps an existing map, applying the key policy
    pub fn from_map(items: OrderedMap<V>) -> Self {
        Self::from_settled(P::settle(items))
    }

    /// An empty collection
    pub fn empty() -> Self {
        Self::from_settled(OrderedMap::new())
    }

    /// Wraps a map that already satisfies the key policy
    pub(crate) fn from_settled(items: OrderedMap<V>) -> Self {
        Self {
            items,
            policy: PhantomData,
        }
    }

    /// Replaces the backing map, applying the key policy
    pub(crate) fn replace(&mut self, items: OrderedMap<V>) {
        self.items = P::settle(items);
    }

    /// Borrow the backing map
    pub fn as_map(&self) -> &OrderedMap<V> {
        &self.items
    }

    /// Consume the collection, returning the backing map
    pub fn into_map(self) -> OrderedMap<V> {
        self.items
    }

    /// Number of entries
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no entries
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterator over entries in order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&Key, &V)> + ExactSizeIterator {
        self.items.iter()
    }

    /// Drops the keys, renumbering `0..n-1`
    pub fn into_sequential(self) -> Sequential<V> {
        Collection::from_map(self.items)
    }

    /// Keeps the current keys under the associative policy
    pub fn into_associative(self) -> Associative<V> {
        Collection::from_settled(self.items)
    }

    /// Name of the key policy, as used in logs
    pub fn variant(&self) -> &'static str {
        P::NAME
    }
}

impl<V: Clone, P: Keying> Collection<V, P> {
    /// Copy of the backing map.
    ///
    /// Without intervening mutation, repeated calls return equal maps.
    pub fn all(&self) -> OrderedMap<V> {
        self.items.clone()
    }

    /// Values in order as a plain vector
    pub fn to_vec(&self) -> Vec<V> {
        self.items.values().cloned().collect()
    }

    /// Ordered key-value structure for serialization
    pub fn to_serializable(&self) -> OrderedMap<V> {
        self.all()
    }

    /// Rebuilds a collection from the output of [`Collection::to_serializable`]
    pub fn from_serializable(items: OrderedMap<V>) -> Self {
        Self::from_map(items)
    }
}

impl<V: serde::Serialize, P: Keying> Collection<V, P> {
    /// Encodes the collection as JSON: a list of `[key, value]` pairs
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(&self.items)?)
    }
}

impl<V: serde::de::DeserializeOwned, P: Keying> Collection<V, P> {
    /// Decodes a collection from the output of [`Collection::to_json`]
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let items: OrderedMap<V> = serde_json::from_str(json)?;
        Ok(Self::from_map(items))
    }
}

impl<V, P: Keying> Default for Collection<V, P> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K: Into<Key>, V, P: Keying> FromIterator<(K, V)> for Collection<V, P> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_map(P::gather(iter))
    }
}

impl<V, P: Keying> IntoIterator for Collection<V, P> {
    type Item = (Key, V);
    type IntoIter = <OrderedMap<V> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, V, P: Keying> IntoIterator for &'a Collection<V, P> {
    type Item = (&'a Key, &'a V);
    type IntoIter = <&'a OrderedMap<V> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        (&self.items).into_iter()
    }
}

impl<V: serde::Serialize, P: Keying> serde::Serialize for Collection<V, P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.items, serializer)
    }
}

impl<'de, V: serde::Deserialize<'de>, P: Keying> serde::Deserialize<'de> for Collection<V, P> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <OrderedMap<V> as serde::Deserialize<'de>>::deserialize(deserializer).map(Self::from_map)
    }
}
