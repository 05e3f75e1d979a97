//!
//! Collectica: typed, composable collections over ordered key-value sequences.
//!
//! ## Core Concepts
//!
//! * **Keys (`key::Key`)**: Every entry is addressed by an integer or a string key.
//! * **Ordered maps (`map::OrderedMap`)**: Insertion-ordered storage with unique keys, the
//!   foundation every collection is built on.
//! * **Eager collections (`collection::Collection`)**: Fully materialised collections
//!   parameterised by a key policy:
//!     * **Sequential (`collection::Sequential`)**: Keys are always `0..n-1`, renumbered after
//!       every structural change.
//!     * **Associative (`collection::Associative`)**: Caller-assigned keys preserved through
//!       filtering, mapping and slicing.
//!     * **Nested (`collection::Nested`)**: Values are themselves ordered maps (records), with
//!       record-aware operations such as `pluck` and `where_`.
//! * **Lazy collections (`lazy::Lazy`)**: Pipelines over a restartable factory. Nothing is
//!   cached: every traversal re-invokes the factory and recomputes the composed stages.
//! * **Contracts (`contracts`)**: Predicates, mappers, reducers and comparators are plain
//!   closures; `SortOrder` and `Operator` describe sort direction and field comparisons.

pub mod budget;
pub mod clock;
pub mod collection;
pub mod contracts;
pub mod errors;
pub mod key;
pub mod lazy;
pub mod map;
pub mod value;

pub use budget::Budget;
pub use clock::{Clock, SystemClock};
pub use collection::{Associative, Collection, Indexed, Keyed, Keying, Nested, Sequential};
pub use contracts::{Operator, SortOrder};
pub use errors::CollectionError;
pub use key::{AsKey, Key};
pub use lazy::Lazy;
pub use map::OrderedMap;
pub use value::{Record, Value};

#[cfg(any(test, feature = "testing"))]
pub use clock::FixedClock;

/// Result type used throughout the Collectica library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Collectica library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured collection errors from the collection operations
    #[error(transparent)]
    Collection(CollectionError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Collection(_) => "collection",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error is a precondition violation (empty input, bad size, length mismatch).
    pub fn is_precondition_error(&self) -> bool {
        match self {
            Error::Collection(err) => err.is_precondition_error(),
            _ => false,
        }
    }

    /// Check if this error is type-related.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Collection(err) => err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error was caused by an empty collection.
    pub fn is_empty_error(&self) -> bool {
        match self {
            Error::Collection(err) => err.is_empty_error(),
            _ => false,
        }
    }

    /// Check if this error is a serialization failure.
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, Error::Serialize(_))
    }
}
