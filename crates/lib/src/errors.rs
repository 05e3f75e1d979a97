//! Error types for collection operations.
//!
//! This module defines the structured errors raised when a collection operation
//! is called with arguments it cannot honour: sampling from an empty collection,
//! non-positive chunk sizes, mismatched key/value lengths, or values that cannot
//! serve as keys.
//!
//! Not-found outcomes (`get`, `search`, `first_where`) are not errors; they are
//! reported through `Option`.

use thiserror::Error;

/// Structured error types for collection operations.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// The operation needs at least one element but the collection is empty
    #[error("cannot {operation} from an empty collection")]
    EmptyCollection { operation: &'static str },

    /// A size or count argument is outside the accepted range
    #[error("invalid size for {operation}: {size} (must be at least 1)")]
    InvalidSize { operation: &'static str, size: usize },

    /// Keys and values passed to `combine` have different lengths
    #[error("cannot combine {keys} keys with {values} values")]
    SizeMismatch { keys: usize, values: usize },

    /// A value could not be used where a string or integer was required
    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: String,
    },
}

impl CollectionError {
    /// Check if this error was caused by an empty collection
    pub fn is_empty_error(&self) -> bool {
        matches!(self, CollectionError::EmptyCollection { .. })
    }

    /// Check if this error is a precondition violation on the call's arguments
    pub fn is_precondition_error(&self) -> bool {
        matches!(
            self,
            CollectionError::EmptyCollection { .. }
                | CollectionError::InvalidSize { .. }
                | CollectionError::SizeMismatch { .. }
        )
    }

    /// Check if this error is related to type mismatches
    pub fn is_type_error(&self) -> bool {
        matches!(self, CollectionError::TypeMismatch { .. })
    }

    /// Get the operation name if this error names one
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            CollectionError::EmptyCollection { operation }
            | CollectionError::InvalidSize { operation, .. } => Some(operation),
            _ => None,
        }
    }
}

// Conversion from CollectionError to the main Error type
impl From<CollectionError> for crate::Error {
    fn from(err: CollectionError) -> Self {
        crate::Error::Collection(err)
    }
}
