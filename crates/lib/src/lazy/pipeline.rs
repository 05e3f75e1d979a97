//! Composing operations on [`Lazy`].
//!
//! Each operation returns a new [`Lazy`] whose factory wraps the source's
//! factory. Nothing runs until a terminal operation pulls entries, and every
//! traversal starts from scratch. Callbacks are `Fn` because they may run once
//! per traversal.

use std::rc::Rc;

use super::{Lazy, Sequence};
use crate::errors::CollectionError;
use crate::key::Key;
use crate::map::OrderedMap;

impl<V: 'static> Lazy<V> {
    /// Keeps the entries matching the predicate, keys unchanged
    pub fn filter(&self, predicate: impl Fn(&V, &Key) -> bool + 'static) -> Self {
        let source = self.clone();
        let predicate = Rc::new(predicate);
        Self::from_factory(move || {
            let predicate = Rc::clone(&predicate);
            Box::new(source.storage().filter(move |(k, v)| predicate(v, k)))
        })
    }

    /// Drops the entries matching the predicate
    pub fn reject(&self, predicate: impl Fn(&V, &Key) -> bool + 'static) -> Self {
        self.filter(move |v, k| !predicate(v, k))
    }

    /// Maps every value, keys unchanged
    pub fn map<U: 'static>(&self, mapper: impl Fn(&V, &Key) -> U + 'static) -> Lazy<U> {
        let source = self.clone();
        let mapper = Rc::new(mapper);
        Lazy::from_factory(move || {
            let mapper = Rc::clone(&mapper);
            Box::new(source.storage().map(move |(k, v)| {
                let mapped = mapper(&v, &k);
                (k, mapped)
            }))
        })
    }

    /// Re-keys every entry; collisions resolve when materialised
    pub fn map_keys<K: Into<Key> + 'static>(&self, mapper: impl Fn(&V, &Key) -> K + 'static) -> Self {
        let source = self.clone();
        let mapper = Rc::new(mapper);
        Self::from_factory(move || {
            let mapper = Rc::clone(&mapper);
            Box::new(
                source
                    .storage()
                    .map(move |(k, v)| (mapper(&v, &k).into(), v)),
            )
        })
    }

    /// Skips the first `n` entries
    pub fn skip(&self, n: usize) -> Self {
        let source = self.clone();
        Self::from_factory(move || Box::new(source.storage().skip(n)))
    }

    /// Skips entries while the predicate holds, then yields the rest
    pub fn skip_while(&self, predicate: impl Fn(&V, &Key) -> bool + 'static) -> Self {
        let source = self.clone();
        let predicate = Rc::new(predicate);
        Self::from_factory(move || {
            let predicate = Rc::clone(&predicate);
            Box::new(source.storage().skip_while(move |(k, v)| predicate(v, k)))
        })
    }

    /// Skips entries until the predicate first holds, then yields the rest
    pub fn skip_until(&self, predicate: impl Fn(&V, &Key) -> bool + 'static) -> Self {
        self.skip_while(move |v, k| !predicate(v, k))
    }

    /// Yields at most `n` entries; production stops after the last one
    pub fn take(&self, n: usize) -> Self {
        let source = self.clone();
        Self::from_factory(move || Box::new(source.storage().take(n)))
    }

    /// Yields entries while the predicate holds.
    ///
    /// The source is not pulled past the first failing entry.
    pub fn take_while(&self, predicate: impl Fn(&V, &Key) -> bool + 'static) -> Self {
        let source = self.clone();
        let predicate = Rc::new(predicate);
        Self::from_factory(move || {
            let predicate = Rc::clone(&predicate);
            Box::new(source.storage().take_while(move |(k, v)| predicate(v, k)))
        })
    }

    /// Yields entries until the predicate first holds, without pulling further
    pub fn take_until(&self, predicate: impl Fn(&V, &Key) -> bool + 'static) -> Self {
        self.take_while(move |v, k| !predicate(v, k))
    }

    /// Groups consecutive entries into maps of `size` entries, keyed `0..`.
    ///
    /// Each chunk keeps its entries' original keys. Only the entries of the
    /// chunk being built are held in memory.
    pub fn chunk(&self, size: usize) -> Result<Lazy<OrderedMap<V>>, CollectionError> {
        if size == 0 {
            return Err(CollectionError::InvalidSize {
                operation: "chunk",
                size,
            });
        }
        let source = self.clone();
        Ok(Lazy::from_factory(move || {
            let mut entries = source.storage();
            let chunks = std::iter::from_fn(move || {
                let chunk: OrderedMap<V> = entries.by_ref().take(size).collect();
                (!chunk.is_empty()).then_some(chunk)
            });
            Box::new(chunks.enumerate().map(|(i, chunk)| (Key::from(i), chunk)))
        }))
    }

    /// The keys as values, keyed `0..`
    pub fn keys(&self) -> Lazy<Key> {
        let source = self.clone();
        Lazy::from_factory(move || {
            Box::new(
                source
                    .storage()
                    .enumerate()
                    .map(|(i, (k, _))| (Key::from(i), k)),
            )
        })
    }

    /// The values, re-keyed `0..`
    pub fn values(&self) -> Self {
        let source = self.clone();
        Self::from_factory(move || {
            Box::new(
                source
                    .storage()
                    .enumerate()
                    .map(|(i, (_, v))| (Key::from(i), v)),
            )
        })
    }

    /// Appends other lazy collections after this one.
    ///
    /// This collection is streamed; each other collection is materialised
    /// with [`Lazy::all`] when the traversal reaches it, so its duplicate keys
    /// collapse first.
    pub fn merge<'a>(&self, others: impl IntoIterator<Item = &'a Lazy<V>>) -> Self {
        let source = self.clone();
        let others: Vec<Lazy<V>> = others.into_iter().cloned().collect();
        Self::from_factory(move || {
            let tail = others.clone().into_iter().flat_map(|other| other.all());
            Box::new(source.storage().chain(tail)) as Sequence<V>
        })
    }
}

impl<V: Clone + PartialEq + 'static> Lazy<V> {
    /// Keeps the first occurrence of every value
    pub fn unique(&self) -> Self {
        let source = self.clone();
        Self::from_factory(move || {
            let mut seen: Vec<V> = Vec::new();
            Box::new(source.storage().filter(move |(_, v)| {
                if seen.contains(v) {
                    false
                } else {
                    seen.push(v.clone());
                    true
                }
            }))
        })
    }
}
