//! Record-aware operations for collections whose values are ordered maps.
//!
//! A record "has" a field when the field key is present in it. Records that
//! lack the field a query names are never matched by `where_*`, are skipped by
//! `pluck`, and sort last in `sort_by_field`.

use std::cmp::Ordering;

use super::{Associative, Collection, Keying};
use crate::contracts::{Operator, SortOrder};
use crate::errors::CollectionError;
use crate::key::{AsKey, Key};
use crate::map::OrderedMap;

fn satisfies<T: PartialOrd>(record: &OrderedMap<T>, field: &Key, operator: Operator, operand: &T) -> bool {
    record
        .get(field)
        .is_some_and(|value| operator.evaluate(value, operand))
}

impl<T, P: Keying> Collection<OrderedMap<T>, P> {
    /// Total number of fields across all records
    pub fn count_deep(&self) -> usize {
        self.items.values().map(OrderedMap::len).sum()
    }
}

impl<T: Clone, P: Keying> Collection<OrderedMap<T>, P> {
    /// The value of `field` from every record that has it.
    ///
    /// ```
    /// use collectica::{OrderedMap, Sequential, Value};
    ///
    /// let people = Sequential::from_values([
    ///     OrderedMap::from([("name", Value::from("Ann")), ("age", Value::from(31))]),
    ///     OrderedMap::from([("name", Value::from("Bob"))]),
    /// ]);
    /// assert_eq!(people.pluck("age").to_vec(), vec![Value::from(31)]);
    /// ```
    pub fn pluck(&self, field: impl Into<Key>) -> Collection<T, P> {
        let field = field.into();
        let items: OrderedMap<T> = self
            .items
            .iter()
            .filter_map(|(key, record)| record.get(&field).map(|value| (key.clone(), value.clone())))
            .collect();
        Collection::from_map(items)
    }

    /// Stable sort of the records by one field.
    ///
    /// Values of the field are grouped by which of them compare with each
    /// other, and the largest group (the earliest one on a tie) is sorted.
    /// Records lacking the field, or holding a value outside that group, keep
    /// their relative order after the others in either direction.
    pub fn sort_by_field(&mut self, field: impl Into<Key>, order: SortOrder) -> &mut Self
    where
        T: PartialOrd,
    {
        let field = field.into();
        let mut groups: Vec<(&T, usize)> = Vec::new();
        for value in self.items.values().filter_map(|record| record.get(&field)) {
            if value.partial_cmp(value).is_none() {
                continue;
            }
            match groups.iter_mut().find(|(first, _)| value.partial_cmp(*first).is_some()) {
                Some((_, size)) => *size += 1,
                None => groups.push((value, 1)),
            }
        }
        let reference = groups
            .iter()
            .rev()
            .max_by_key(|(_, size)| *size)
            .map(|(first, _)| *first);
        let ranked: &dyn for<'r> Fn(&'r OrderedMap<T>) -> Option<&'r T> = &|record: &OrderedMap<T>| {
            record
                .get(&field)
                .filter(|value| reference.is_some_and(|r| (*value).partial_cmp(r).is_some()))
        };

        let positions = self.items.sorted_positions(|(_, a), (_, b)| match (ranked(a), ranked(b)) {
            (Some(left), Some(right)) => order.apply(left.partial_cmp(right).unwrap_or(Ordering::Equal)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        self.reorder(&positions);
        self
    }
}

impl<T: Clone + AsKey, P: Keying> Collection<OrderedMap<T>, P> {
    /// Values of `value_field` keyed by each record's `key_field`.
    ///
    /// Records lacking either field are skipped; duplicate keys keep the last
    /// record's value. A key field holding something that cannot be a key is
    /// a [`CollectionError::TypeMismatch`].
    pub fn pluck_keyed(
        &self,
        value_field: impl Into<Key>,
        key_field: impl Into<Key>,
    ) -> Result<Associative<T>, CollectionError> {
        let value_field = value_field.into();
        let key_field = key_field.into();
        let mut items = OrderedMap::new();
        for record in self.items.values() {
            if let (Some(value), Some(key)) = (record.get(&value_field), record.get(&key_field)) {
                items.set(key.to_key()?, value.clone());
            }
        }
        Ok(Collection::from_settled(items))
    }

    /// Groups records by the value of `field`.
    ///
    /// Each group keeps its records under their original keys. Groups appear
    /// in order of first occurrence; records lacking the field are left out.
    pub fn group_by_field(
        &self,
        field: impl Into<Key>,
    ) -> Result<Associative<OrderedMap<OrderedMap<T>>>, CollectionError> {
        let field = field.into();
        let mut groups: OrderedMap<OrderedMap<OrderedMap<T>>> = OrderedMap::new();
        for (key, record) in self.items.iter() {
            let Some(value) = record.get(&field) else {
                continue;
            };
            let bucket = value.to_key()?;
            match groups.get_mut(&bucket) {
                Some(group) => {
                    group.set(key.clone(), record.clone());
                }
                None => {
                    let mut group = OrderedMap::new();
                    group.set(key.clone(), record.clone());
                    groups.set(bucket, group);
                }
            }
        }
        Ok(Collection::from_settled(groups))
    }
}

impl<T: Clone + PartialOrd, P: Keying> Collection<OrderedMap<T>, P> {
    /// Records whose `field` compares to `operand` under `operator`.
    ///
    /// ```
    /// use collectica::{Operator, OrderedMap, Sequential, Value};
    ///
    /// let stock = Sequential::from_values([
    ///     OrderedMap::from([("qty", Value::from(3))]),
    ///     OrderedMap::from([("qty", Value::from(12))]),
    ///     OrderedMap::from([("qty", Value::from("many"))]),
    /// ]);
    /// let low = stock.where_("qty", Operator::Less, &Value::from(10));
    /// assert_eq!(low.count(), 1);
    /// ```
    pub fn where_(&self, field: impl Into<Key>, operator: Operator, operand: &T) -> Self {
        let field = field.into();
        self.select(|_, record| satisfies(record, &field, operator, operand))
    }

    /// Records whose `field` lies in `low..=high`
    pub fn where_between(&self, field: impl Into<Key>, low: &T, high: &T) -> Self {
        let field = field.into();
        self.select(|_, record| {
            satisfies(record, &field, Operator::GreaterOrEqual, low)
                && satisfies(record, &field, Operator::LessOrEqual, high)
        })
    }

    /// Records whose `field` lies below `low` or above `high`
    pub fn where_not_between(&self, field: impl Into<Key>, low: &T, high: &T) -> Self {
        let field = field.into();
        self.select(|_, record| {
            satisfies(record, &field, Operator::Less, low)
                || satisfies(record, &field, Operator::Greater, high)
        })
    }

    /// Records whose `field` equals one of `candidates`
    pub fn where_in(&self, field: impl Into<Key>, candidates: &[T]) -> Self {
        let field = field.into();
        self.select(|_, record| {
            candidates
                .iter()
                .any(|candidate| satisfies(record, &field, Operator::Equal, candidate))
        })
    }

    /// Records that have `field` and whose value equals none of `candidates`
    pub fn where_not_in(&self, field: impl Into<Key>, candidates: &[T]) -> Self {
        let field = field.into();
        self.select(|_, record| {
            record.contains(&field)
                && candidates
                    .iter()
                    .all(|candidate| satisfies(record, &field, Operator::NotEqual, candidate))
        })
    }
}
