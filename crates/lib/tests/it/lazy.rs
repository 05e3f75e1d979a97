//! Tests for lazy pipelines.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use collectica::{Budget, FixedClock, Key, Lazy, Sequential};

use crate::helpers::{assert_contiguous, str_keys};

/// A lazy sequence over `values` that counts factory invocations
fn counted(values: Vec<i64>) -> (Lazy<i64>, Rc<Cell<usize>>) {
    let runs = Rc::new(Cell::new(0));
    let counter = Rc::clone(&runs);
    let lazy = Lazy::sequence(move || {
        counter.set(counter.get() + 1);
        values.clone()
    });
    (lazy, runs)
}

#[test]
fn test_factory_runs_once_per_traversal() {
    let (lazy, runs) = counted(vec![1, 2, 3]);

    assert_eq!(lazy.count(), 3);
    assert_eq!(lazy.count(), 3);
    assert_eq!(runs.get(), 2);

    let doubled = lazy.map(|v, _| v * 2);
    assert_eq!(runs.get(), 2);
    assert_eq!(doubled.sum(), 12);
    assert_eq!(runs.get(), 3);
}

#[test]
fn test_search_and_every_reevaluate() {
    let (lazy, runs) = counted(vec![4, 8, 15]);
    assert_eq!(lazy.search(&8), Some(Key::from(1)));
    assert_eq!(lazy.search(&16), None);
    assert!(!lazy.every(|v, _| v % 2 == 0));
    assert!(lazy.contains(&15));
    assert_eq!(runs.get(), 4);
}

#[test]
fn test_source_changes_are_observed() {
    let source = Rc::new(Cell::new(1));
    let shared = Rc::clone(&source);
    let lazy = Lazy::sequence(move || 0..shared.get());

    assert_eq!(lazy.count(), 1);
    source.set(5);
    assert_eq!(lazy.count(), 5);
}

#[test]
fn test_take_until_short_circuits() {
    let pulled = Rc::new(Cell::new(0));
    let counter = Rc::clone(&pulled);
    let naturals = Lazy::sequence(move || {
        let counter = Rc::clone(&counter);
        (0_i64..).inspect(move |_| counter.set(counter.get() + 1))
    });

    let head = naturals.take_until(|v, _| *v >= 3).to_sequential();
    assert_eq!(head.to_vec(), vec![0, 1, 2]);
    assert_eq!(pulled.get(), 4);

    pulled.set(0);
    assert_eq!(naturals.first_where(|v, _| *v == 10), Some(10));
    assert_eq!(pulled.get(), 11);
}

#[test]
fn test_take_while_and_skip_while_complement() {
    let lazy = Lazy::sequence(|| vec![2, 4, 6, 7, 8, 10]);
    let even = |v: &i64, _: &Key| v % 2 == 0;

    let mut rejoined = lazy.take_while(even).to_sequential().to_vec();
    rejoined.extend(lazy.skip_while(even).to_sequential().to_vec());
    assert_eq!(rejoined, lazy.to_sequential().to_vec());
}

#[test]
fn test_filter_keeps_keys_until_materialised() {
    let lazy = Lazy::sequence(|| 1..=6).filter(|v, _| v % 3 == 0);
    assert_eq!(lazy.storage().map(|(k, _)| k).collect::<Vec<_>>(), vec![
        Key::from(2),
        Key::from(5)
    ]);

    let list = lazy.to_sequential();
    assert_contiguous(&list);
    assert_eq!(list.to_vec(), vec![3, 6]);
    assert_eq!(lazy.reject(|v, _| *v == 3).first(), Some(6));
}

#[test]
fn test_duplicate_keys_collapse_on_all() {
    let lazy = Lazy::new(|| vec![("k", 1), ("j", 2), ("k", 3)]);
    assert_eq!(lazy.count(), 3);

    let assoc = lazy.to_associative();
    assert_eq!(assoc.count(), 2);
    assert_eq!(assoc.get("k"), Some(&3));
    assert_eq!(assoc.keys().to_vec(), str_keys(&["k", "j"]));
}

#[test]
fn test_merge_lazy_collections() {
    let first = Lazy::sequence(|| vec![1, 2]);
    let second = Lazy::sequence(|| vec![3]);

    // Both sequences produce key 0; only the keyed map collapses it.
    let merged = first.merge([&second]);
    assert_eq!(merged.count(), 3);
    assert_eq!(merged.to_sequential().to_vec(), vec![1, 2, 3]);
    assert_eq!(merged.values().to_sequential().to_vec(), vec![1, 2, 3]);
    assert_eq!(merged.all().get(0), Some(&3));
    assert_eq!(merged.to_associative().to_vec(), vec![3, 2]);
}

#[test]
fn test_from_eager_and_back() {
    let eager = Sequential::from_values([5, 1, 4]);
    let lazy = Lazy::from(&eager);
    assert_eq!(lazy.max(), Some(5));
    assert_eq!(lazy.min(), Some(1));
    assert_eq!(lazy.to_sequential(), eager);
    assert_eq!(lazy.reduce(0, |acc, v, _| acc + v), 10);
    assert_eq!(lazy.implode(","), "5,1,4");
}

#[test]
fn test_chunk_and_keys() {
    let lazy = Lazy::new(|| [("a", 1), ("b", 2), ("c", 3)]);
    let chunks = lazy.chunk(2).unwrap().to_sequential();
    assert_eq!(chunks.count(), 2);
    assert_eq!(chunks.count_deep(), 3);
    assert_eq!(chunks.get(1).and_then(|c| c.get("c")), Some(&3));

    assert_eq!(lazy.keys().to_sequential().to_vec(), str_keys(&["a", "b", "c"]));
    assert!(lazy.chunk(0).unwrap_err().is_precondition_error());
}

#[test]
fn test_each_within_limits() {
    let (lazy, _) = counted((1..=100).collect());

    let mut seen = 0;
    assert!(!lazy.each_within(&Budget::new().max_items(10), |_, _| {
        seen += 1;
        true
    }));
    assert_eq!(seen, 10);

    let budget = Budget::new()
        .max_duration(Duration::from_millis(5))
        .with_clock(Arc::new(FixedClock::default().with_step(1)));
    let mut timed = 0;
    assert!(!lazy.each_within(&budget, |_, _| {
        timed += 1;
        true
    }));
    assert_eq!(timed, 5);
}

#[test]
fn test_unique_and_map_keys() {
    let lazy = Lazy::sequence(|| vec!["a", "b", "a", "c", "b"]);
    assert_eq!(lazy.unique().to_sequential().to_vec(), vec!["a", "b", "c"]);

    let by_value = lazy.map_keys(|v, _| *v);
    assert_eq!(by_value.to_associative().keys().to_vec(), str_keys(&["a", "b", "c"]));
    assert_eq!(by_value.get("b"), Some("b"));
    assert_eq!(lazy.skip(1).take(2).last(), Some("a"));
}
