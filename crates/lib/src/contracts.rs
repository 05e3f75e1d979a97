//! Shapes of the caller-supplied functions consumed by collection operations.
//!
//! Predicates, mappers and reducers are plain closures taking the value first
//! and the key second:
//!
//! - predicate: `FnMut(&V, &Key) -> bool`
//! - value mapper: `FnMut(&V, &Key) -> U`
//! - key mapper: `FnMut(&V, &Key) -> Key`
//! - reducer: `FnMut(A, &V, &Key) -> A`
//!
//! Comparators return [`Ordering`] and must describe a strict weak ordering. A
//! comparator that violates that contract produces an unspecified order, never
//! a panic. Comparators written against the `-1 / 0 / 1` convention can be
//! adapted with [`ordering_from_int`].

use std::cmp::Ordering;

/// Sort direction for the `sort*` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Applies the direction to an ascending ordering
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Comparison operators understood by `where_` on nested collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl Operator {
    /// Evaluates `left <op> right`.
    ///
    /// Pairs without an ordering (`partial_cmp` returns `None`) only satisfy
    /// [`Operator::NotEqual`].
    ///
    /// ```
    /// use collectica::{Operator, Value};
    ///
    /// assert!(Operator::Less.evaluate(&1, &2));
    /// assert!(Operator::GreaterOrEqual.evaluate(&2, &2));
    /// assert!(!Operator::Less.evaluate(&Value::Int(1), &Value::from("2")));
    /// assert!(Operator::NotEqual.evaluate(&Value::Int(1), &Value::from("1")));
    /// ```
    pub fn evaluate<T: PartialOrd + ?Sized>(self, left: &T, right: &T) -> bool {
        match self {
            Operator::Equal => left == right,
            Operator::NotEqual => left != right,
            Operator::Less => left < right,
            Operator::LessOrEqual => left <= right,
            Operator::Greater => left > right,
            Operator::GreaterOrEqual => left >= right,
        }
    }

    /// The symbol conventionally used for this operator
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::Less => "<",
            Operator::LessOrEqual => "<=",
            Operator::Greater => ">",
            Operator::GreaterOrEqual => ">=",
        }
    }
}

/// Converts a `-1 / 0 / 1` style comparison result into an [`Ordering`].
///
/// Any negative value is `Less` and any positive value is `Greater`.
pub fn ordering_from_int(result: i64) -> Ordering {
    result.cmp(&0)
}

/// Converts an [`Ordering`] comparator into a strict equality test
pub(crate) fn equal_by<T: ?Sized>(
    mut compare: impl FnMut(&T, &T) -> Ordering,
) -> impl FnMut(&T, &T) -> bool {
    move |a, b| compare(a, b) == Ordering::Equal
}
