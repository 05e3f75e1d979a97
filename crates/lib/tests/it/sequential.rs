//! Tests for collections with contiguous integer keys.

use std::sync::Arc;
use std::time::Duration;

use collectica::{Budget, FixedClock, Key, Sequential, SortOrder, contracts::ordering_from_int};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::helpers::{assert_contiguous, ints, keys_of};

#[test]
fn test_structural_operations_keep_keys_contiguous() {
    let numbers = ints([5, 3, 8, 1, 9, 2]);

    assert_contiguous(&numbers.filter(|v, _| v % 2 == 1));
    assert_contiguous(&numbers.reject(|v, _| *v > 4));
    assert_contiguous(&numbers.slice(2, Some(3)));
    assert_contiguous(&numbers.reverse());
    assert_contiguous(&numbers.unique());
    assert_contiguous(&numbers.merge([&ints([7, 7])]));
    assert_contiguous(&numbers.except([0, 2]));

    let (passed, failed) = numbers.partition(|v, _| *v > 4);
    assert_contiguous(&passed);
    assert_contiguous(&failed);

    let mut sorted = numbers.clone();
    sorted.sort(SortOrder::Ascending);
    assert_contiguous(&sorted);
    assert_eq!(sorted.to_vec(), vec![1, 2, 3, 5, 8, 9]);
}

#[test]
fn test_filter_example() {
    let evens = ints([1, 2, 3, 4]).filter(|v, _| v % 2 == 0);
    assert_eq!(evens.to_vec(), vec![2, 4]);
    assert_eq!(keys_of(&evens), vec![Key::from(0), Key::from(1)]);
}

#[test]
fn test_merge_concatenates() {
    let merged = ints([1, 2]).merge([&ints([3]), &ints([4, 5])]);
    assert_eq!(merged.to_vec(), vec![1, 2, 3, 4, 5]);
    assert_contiguous(&merged);
}

#[test]
fn test_all_is_idempotent() {
    let numbers = ints([4, 2, 7]);
    assert_eq!(numbers.all(), numbers.all());
    assert_eq!(numbers.all().len(), numbers.count());
}

#[test]
fn test_group_by_runs() {
    let runs = ints([1, 2, 3, 4, 13, 22, 27, 28, 29]).group_by(|prev, curr| curr - prev > 1);
    let groups: Vec<Vec<i64>> = runs
        .iter()
        .map(|(_, group)| group.values().copied().collect())
        .collect();
    assert_eq!(groups, vec![vec![1, 2, 3, 4], vec![13], vec![22], vec![27, 28, 29]]);
    assert_contiguous(&runs);

    assert!(ints([]).group_by(|_, _| true).is_empty());
}

#[test]
fn test_sort_is_stable() {
    let mut words = Sequential::from_values(["pear", "fig", "plum", "kiwi", "apple"]);
    words.sort_by(|a, b| a.len().cmp(&b.len()));
    assert_eq!(words.to_vec(), vec!["fig", "pear", "plum", "kiwi", "apple"]);

    words.sort_by(|a, b| ordering_from_int(b.len() as i64 - a.len() as i64));
    assert_eq!(words.to_vec(), vec!["apple", "pear", "plum", "kiwi", "fig"]);
}

#[test]
fn test_sort_descending_and_keys() {
    let mut numbers = ints([2, 9, 4]);
    numbers.sort(SortOrder::Descending);
    assert_eq!(numbers.to_vec(), vec![9, 4, 2]);
    assert_eq!(numbers.min(), Some(&2));
    assert_eq!(numbers.max(), Some(&9));
    assert_eq!(numbers.sum(), 15);
    assert_eq!(numbers.average_by(|v| *v as f64), Some(5.0));
}

#[test]
fn test_push_pop_shift_unshift() {
    let mut letters = Sequential::from_values(["b", "c"]);
    letters.push("d").unshift("a");
    assert_eq!(letters.to_vec(), vec!["a", "b", "c", "d"]);
    assert_contiguous(&letters);

    assert_eq!(letters.shift(), Some("a"));
    assert_eq!(letters.pop(), Some("d"));
    assert_eq!(letters.get(0), Some(&"b"));
    assert_contiguous(&letters);
}

#[test]
fn test_set_and_remove_renumber() {
    let mut letters = Sequential::from_values(["a", "b", "c"]);
    letters.set(1, "B");
    assert_eq!(letters.to_vec(), vec!["a", "B", "c"]);

    letters.set("extra", "d");
    assert_eq!(letters.to_vec(), vec!["a", "B", "c", "d"]);
    assert_contiguous(&letters);

    assert_eq!(letters.remove(0), Some("a"));
    assert_eq!(letters.get(0), Some(&"B"));
    assert_contiguous(&letters);
}

#[test]
fn test_splice_with_panicking_replacement_leaves_items_untouched() {
    let mut numbers = ints([1, 2, 3, 4]);
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let replacement = (0..2).map(|v| if v == 1 { panic!("replacement failed") } else { v });
        numbers.splice(1, Some(1), replacement);
    }));

    assert!(outcome.is_err());
    assert_eq!(numbers.to_vec(), vec![1, 2, 3, 4]);
    assert_contiguous(&numbers);
}

#[test]
fn test_repeated_source_keys_keep_every_value() {
    let numbers = Sequential::new(|| [("a", 1), ("b", 2), ("a", 3)]);
    assert_eq!(numbers.to_vec(), vec![1, 2, 3]);
    assert_contiguous(&numbers);

    let collected: Sequential<i64> = [("x", 5), ("x", 6)].into_iter().collect();
    assert_eq!(collected.to_vec(), vec![5, 6]);
}

#[test]
fn test_splice_with_negative_offset() {
    let mut numbers = ints([1, 2, 3, 4, 5]);
    let removed = numbers.splice(-2, None, [9]);
    assert_eq!(removed.to_vec(), vec![4, 5]);
    assert_eq!(numbers.to_vec(), vec![1, 2, 3, 9]);
    assert_contiguous(&numbers);
}

#[test]
fn test_take_skip_and_pad() {
    let numbers = ints([1, 2, 3, 4, 5]);
    assert_eq!(numbers.take(2).to_vec(), vec![1, 2]);
    assert_eq!(numbers.take(-2).to_vec(), vec![4, 5]);
    assert_eq!(numbers.skip(3).to_vec(), vec![4, 5]);
    assert_eq!(numbers.skip(10).count(), 0);

    assert_eq!(ints([1, 2]).pad(4, 0).to_vec(), vec![1, 2, 0, 0]);
    assert_eq!(ints([1, 2]).pad(-4, 0).to_vec(), vec![0, 0, 1, 2]);
    assert_eq!(ints([1, 2]).pad(1, 0).to_vec(), vec![1, 2]);
}

#[test]
fn test_chunk_and_split() {
    let numbers = ints([1, 2, 3, 4, 5, 6, 7]);

    let chunks = numbers.chunk(3).unwrap();
    let sizes: Vec<usize> = chunks.iter().map(|(_, c)| c.len()).collect();
    assert_eq!(sizes, vec![3, 3, 1]);
    assert_eq!(chunks.count_deep(), 7);

    let groups = numbers.split(3).unwrap();
    let sizes: Vec<usize> = groups.iter().map(|(_, g)| g.len()).collect();
    assert_eq!(sizes, vec![3, 2, 2]);

    let err = numbers.chunk(0).unwrap_err();
    assert!(err.is_precondition_error());
    assert!(numbers.split(0).is_err());
    assert_eq!(ints([1, 2]).split(5).unwrap().count(), 2);
}

#[test]
fn test_search_and_contains() {
    let numbers = ints([10, 20, 30, 20]);
    assert_eq!(numbers.search(&20), Some(Key::from(1)));
    assert_eq!(numbers.search(&99), None);
    assert!(numbers.contains(&30));
    assert!(!numbers.contains(&31));
    assert_eq!(numbers.search_where(|v, _| *v > 15), Some(Key::from(1)));
    assert_eq!(numbers.last_where(|v, _| *v == 20), Some(&20));
    assert!(numbers.every(|v, _| *v >= 10));
    assert!(numbers.some(|v, _| *v == 30));
}

#[test]
fn test_join_and_implode() {
    let words = Sequential::from_values(["red", "green", "blue"]);
    assert_eq!(words.implode("-"), "red-green-blue");
    assert_eq!(words.join(", ", Some(" or ")), "red, green or blue");
    assert_eq!(words.join(", ", None), "red, green, blue");
    assert_eq!(Sequential::<&str>::empty().join(", ", Some(" and ")), "");
}

#[test]
fn test_count_by_and_flip() {
    let votes = Sequential::from_values(["yes", "no", "yes", "yes"]);
    let tally = votes.count_by().unwrap();
    assert_eq!(tally.get("yes"), Some(&3));
    assert_eq!(tally.get("no"), Some(&1));

    let by_parity = ints([1, 2, 3, 5]).count_by_with(|v, _| if v % 2 == 0 { "even" } else { "odd" });
    assert_eq!(by_parity.get("odd"), Some(&3));

    let flipped = Sequential::from_values(["a", "b"]).flip().unwrap();
    assert_eq!(flipped.get("b"), Some(&Key::from(1)));
}

#[test]
fn test_random_clamps_and_fails_on_empty() {
    let mut rng = StdRng::seed_from_u64(7);
    let numbers = ints([1, 2, 3]);

    let everything = numbers.random_many_with(&mut rng, 10).unwrap();
    assert_eq!(everything.to_vec(), vec![1, 2, 3]);

    let two = numbers.random_many_with(&mut rng, 2).unwrap();
    assert_eq!(two.count(), 2);
    assert!(two.every(|v, _| numbers.contains(v)));
    assert_contiguous(&two);
    let picked = two.to_vec();
    assert!(picked[0] < picked[1], "samples keep original order");

    let one = numbers.random_with(&mut rng).unwrap();
    assert!(numbers.contains(one));

    let empty = ints([]);
    assert!(empty.random().unwrap_err().is_empty_error());
    assert!(empty.random_many(1).unwrap_err().is_empty_error());
    assert!(numbers.random_many(0).unwrap_err().is_precondition_error());
}

#[test]
fn test_shuffle_is_a_permutation() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut numbers = ints([1, 2, 3, 4, 5, 6]);
    numbers.shuffle_with(&mut rng);

    assert_contiguous(&numbers);
    let mut values = numbers.to_vec();
    values.sort();
    assert_eq!(values, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_each_stops_on_false() {
    let numbers = ints([1, 2, 3, 4]);
    let mut seen = Vec::new();
    let completed = numbers.each(|v, _| {
        seen.push(*v);
        *v < 2
    });
    assert!(!completed);
    assert_eq!(seen, vec![1, 2]);

    assert!(numbers.each(|_, _| true));
}

#[test]
fn test_each_within_time_limit() {
    // Every clock read advances 10ms: start at t, then t+10, t+20, ...
    let budget = Budget::new()
        .max_duration(Duration::from_millis(25))
        .with_clock(Arc::new(FixedClock::default().with_step(10)));

    let mut visited = 0;
    let completed = ints([1, 2, 3, 4, 5]).each_within(&budget, |_, _| {
        visited += 1;
        true
    });
    assert!(!completed);
    assert_eq!(visited, 2);
}

#[test]
fn test_each_within_item_limit_on_exact_count() {
    let budget = Budget::new().max_items(3);
    assert!(ints([1, 2, 3]).each_within(&budget, |_, _| true));
    assert!(!ints([1, 2, 3, 4]).each_within(&budget, |_, _| true));
}

#[test]
fn test_transform_in_place() {
    let mut numbers = ints([1, 2, 3]);
    numbers.transform(|v, k| v * 10 + k.as_int().unwrap_or(0));
    assert_eq!(numbers.to_vec(), vec![10, 21, 32]);
}
