//! Random sampling and shuffling.
//!
//! Every operation has a `*_with` form taking the random number generator, so
//! tests can seed it; the plain forms use `rand::thread_rng()`.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use super::{Collection, Keying};
use crate::errors::CollectionError;

impl<V, P: Keying> Collection<V, P> {
    /// A uniformly chosen value.
    ///
    /// Fails with [`CollectionError::EmptyCollection`] when there is nothing
    /// to choose from.
    pub fn random(&self) -> Result<&V, CollectionError> {
        self.random_with(&mut rand::thread_rng())
    }

    /// [`Collection::random`] with a caller-supplied generator
    pub fn random_with<R: Rng>(&self, rng: &mut R) -> Result<&V, CollectionError> {
        if self.is_empty() {
            return Err(CollectionError::EmptyCollection {
                operation: "sample",
            });
        }
        let position = rng.gen_range(0..self.count());
        self.items
            .get_index(position)
            .map(|(_, v)| v)
            .ok_or(CollectionError::EmptyCollection {
                operation: "sample",
            })
    }

    /// Shuffles the entries in place.
    ///
    /// Associative collections keep each value's key; sequential collections
    /// renumber.
    pub fn shuffle(&mut self) -> &mut Self {
        self.shuffle_with(&mut rand::thread_rng())
    }

    /// [`Collection::shuffle`] with a caller-supplied generator
    pub fn shuffle_with<R: Rng>(&mut self, rng: &mut R) -> &mut Self {
        let mut order: Vec<usize> = (0..self.count()).collect();
        order.shuffle(rng);
        let mut items = std::mem::take(&mut self.items);
        items.permute(&order);
        self.replace(items);
        self
    }
}

impl<V: Clone, P: Keying> Collection<V, P> {
    /// `n` distinct entries chosen uniformly, in their original relative order.
    ///
    /// Asking for more entries than exist returns all of them rather than
    /// failing. `n == 0` is an invalid size and an empty collection cannot be
    /// sampled at all.
    ///
    /// ```
    /// use collectica::Sequential;
    ///
    /// let three = Sequential::from_values([1, 2, 3]);
    /// assert_eq!(three.random_many(1000).unwrap().to_vec(), vec![1, 2, 3]);
    ///
    /// assert!(Sequential::<i32>::empty().random_many(1).is_err());
    /// ```
    pub fn random_many(&self, n: usize) -> Result<Self, CollectionError> {
        self.random_many_with(&mut rand::thread_rng(), n)
    }

    /// [`Collection::random_many`] with a caller-supplied generator
    pub fn random_many_with<R: Rng>(
        &self,
        rng: &mut R,
        n: usize,
    ) -> Result<Self, CollectionError> {
        if n == 0 {
            return Err(CollectionError::InvalidSize {
                operation: "sample",
                size: n,
            });
        }
        if self.is_empty() {
            return Err(CollectionError::EmptyCollection {
                operation: "sample",
            });
        }
        let available = self.count();
        let amount = if n > available {
            debug!(requested = n, available, "clamping sample size to collection size");
            available
        } else {
            n
        };

        let mut positions = rand::seq::index::sample(rng, available, amount).into_vec();
        positions.sort_unstable();
        let items = positions
            .into_iter()
            .filter_map(|position| self.items.get_index(position))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(Self::from_map(items))
    }
}
