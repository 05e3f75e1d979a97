//! Tests for collections with caller-assigned keys.

use collectica::{Associative, Key, Sequential, SortOrder};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::helpers::{keys_of, str_keys};

fn prices() -> Associative<i64> {
    Associative::new(|| [("apple", 3), ("pear", 5), ("plum", 2), ("fig", 8)])
}

#[test]
fn test_filter_preserves_keys_and_values() {
    let cheap = prices().filter(|v, _| *v < 5);
    assert_eq!(keys_of(&cheap), str_keys(&["apple", "plum"]));
    assert_eq!(cheap.get("plum"), Some(&2));
    assert_eq!(cheap.get("pear"), None);
}

#[test]
fn test_key_preservation_example() {
    let sparse = Associative::new(|| [(10, "x"), (20, "y"), (30, "z")]);
    let kept = sparse.filter(|v, _| *v != "y");
    assert_eq!(keys_of(&kept), vec![Key::from(10), Key::from(30)]);
}

#[test]
fn test_merge_last_write_wins() {
    let first = Associative::new(|| [("a", 1), ("b", 2)]);
    let second = Associative::new(|| [("b", 3), ("c", 4)]);

    let merged = first.merge([&second]);
    assert_eq!(keys_of(&merged), str_keys(&["a", "b", "c"]));
    assert_eq!(merged.to_vec(), vec![1, 3, 4]);
}

#[test]
fn test_map_keys_collision_last_write_wins() {
    let words = Sequential::from_values(["apple", "avocado", "banana"]);
    let by_initial = words.map_keys(|v, _| v[..1].to_string());

    assert_eq!(by_initial.count(), 2);
    assert_eq!(by_initial.get("a"), Some(&"avocado"));
    assert_eq!(keys_of(&by_initial), str_keys(&["a", "b"]));
}

#[test]
fn test_map_keeps_keys() {
    let doubled = prices().map(|v, _| v * 2);
    assert_eq!(keys_of(&doubled), keys_of(&prices()));
    assert_eq!(doubled.get("fig"), Some(&16));

    let labelled = prices().map_with_keys(|v, k| (format!("{k}:{v}"), *v));
    assert_eq!(labelled.first_entry(), Some((&Key::from("apple:3"), &3)));
}

#[test]
fn test_only_except_slice() {
    let all = prices();
    assert_eq!(keys_of(&all.only(["fig", "apple", "missing"])), str_keys(&["apple", "fig"]));
    assert_eq!(keys_of(&all.except(["pear"])), str_keys(&["apple", "plum", "fig"]));
    assert_eq!(keys_of(&all.slice(1, Some(2))), str_keys(&["pear", "plum"]));
    assert_eq!(keys_of(&all.take(-1)), str_keys(&["fig"]));
}

#[test]
fn test_sorting_keeps_pairs_together() {
    let mut sorted = prices();
    sorted.sort(SortOrder::Ascending);
    assert_eq!(keys_of(&sorted), str_keys(&["plum", "apple", "pear", "fig"]));

    sorted.sort_keys(SortOrder::Descending);
    assert_eq!(keys_of(&sorted), str_keys(&["plum", "pear", "fig", "apple"]));
    assert_eq!(sorted.get("pear"), Some(&5));

    let mut mixed = Associative::new(|| [(Key::from("b"), 1), (Key::from(2), 2), (Key::from(1), 3)]);
    mixed.sort_keys(SortOrder::Ascending);
    assert_eq!(keys_of(&mixed), vec![Key::from(1), Key::from(2), Key::from("b")]);
}

#[test]
fn test_shift_and_unshift_renumber_only_int_keys() {
    let mut mixed = Associative::new(|| {
        [(Key::from(5), "five"), (Key::from("name"), "named"), (Key::from(9), "nine")]
    });

    mixed.unshift("zero");
    assert_eq!(keys_of(&mixed), vec![
        Key::from(0),
        Key::from(1),
        Key::from("name"),
        Key::from(2)
    ]);

    assert_eq!(mixed.shift(), Some("zero"));
    assert_eq!(keys_of(&mixed), vec![Key::from(0), Key::from("name"), Key::from(1)]);
}

#[test]
fn test_set_push_remove() {
    let mut stock = prices();
    stock.set("kiwi", 1).set("apple", 4);
    assert_eq!(stock.get("apple"), Some(&4));
    assert_eq!(keys_of(&stock).last(), Some(&Key::from("kiwi")));

    stock.push(7);
    assert_eq!(stock.last_entry(), Some((&Key::from(0), &7)));

    assert_eq!(stock.remove("pear"), Some(5));
    assert_eq!(stock.remove("pear"), None);
    assert!(!stock.contains_key("pear"));
}

#[test]
fn test_splice_keeps_string_keys() {
    let mut stock = prices();
    let removed = stock.splice(1, Some(2), [100]);

    assert_eq!(keys_of(&removed), str_keys(&["pear", "plum"]));
    assert_eq!(keys_of(&stock), vec![Key::from("apple"), Key::from(0), Key::from("fig")]);
    assert_eq!(stock.get(0), Some(&100));
}

#[test]
fn test_shuffle_keeps_pairs() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut shuffled = prices();
    shuffled.shuffle_with(&mut rng);

    assert_eq!(shuffled.count(), 4);
    for (key, value) in prices().iter() {
        assert_eq!(shuffled.get(key), Some(value));
    }
}

#[test]
fn test_random_many_keeps_keys() {
    let mut rng = StdRng::seed_from_u64(11);
    let picked = prices().random_many_with(&mut rng, 2).unwrap();
    assert_eq!(picked.count(), 2);
    for (key, value) in picked.iter() {
        assert_eq!(prices().get(key), Some(value));
    }
}

#[test]
fn test_combine_and_values() {
    let ages = Associative::combine(["ann", "bob"], [31, 42]).unwrap();
    assert_eq!(ages.values().to_vec(), vec![31, 42]);
    assert_eq!(ages.keys().to_vec(), str_keys(&["ann", "bob"]));

    let err = Associative::<i32>::combine(["ann"], [1, 2]).unwrap_err();
    assert!(err.is_precondition_error());
}

#[test]
fn test_into_sequential_renumbers() {
    let list = prices().into_sequential();
    assert_eq!(list.to_vec(), vec![3, 5, 2, 8]);
    assert_eq!(list.get(3), Some(&8));
    assert_eq!(list.variant(), "sequential");
    assert_eq!(list.into_associative().variant(), "associative");
}

#[test]
fn test_join_with_final_glue() {
    let names = Associative::new(|| [("x", "Ann"), ("y", "Bob")]);
    assert_eq!(names.join(", ", Some(" & ")), "Ann & Bob");
    assert_eq!(names.implode("/"), "Ann/Bob");
}
