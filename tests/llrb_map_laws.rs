//! Property-based tests for the LLRB map.
//!
//! These tests drive the map through arbitrary operation sequences and hold
//! it against `BTreeMap` as the reference model, verifying the red-black
//! invariants after every single mutation.

use std::collections::BTreeMap;
use std::ops::Bound;

use llrbmap::llrb::LlrbMap;
use llrbmap::llrb::Variant;
use proptest::prelude::*;

// =============================================================================
// Strategies for Generating Test Data
// =============================================================================

/// A single mutation against the map under test.
#[derive(Clone, Debug)]
enum Op {
    Put(u8, i32),
    Delete(u8),
}

/// Strategy for operation sequences over a small key domain, so puts,
/// updates and deletes of the same key interleave frequently.
fn arbitrary_ops(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            (0u8..64, any::<i32>()).prop_map(|(key, value)| Op::Put(key, value)),
            (0u8..64).prop_map(Op::Delete),
        ],
        0..max_len,
    )
}

/// Strategy covering both balancing disciplines.
fn arbitrary_variant() -> impl Strategy<Value = Variant> {
    prop_oneof![Just(Variant::TwoThreeFour), Just(Variant::TwoThree)]
}

// =============================================================================
// Invariant Laws
// =============================================================================

proptest! {
    /// Law: after every insert or delete, all four red-black properties
    /// hold, the length matches the model, and the final entry sequence is
    /// exactly the model's sorted content.
    #[test]
    fn prop_check_passes_after_every_operation(
        variant in arbitrary_variant(),
        ops in arbitrary_ops(100),
    ) {
        let map: LlrbMap<u8, i32> = LlrbMap::with_variant(variant);
        let mut model: BTreeMap<u8, i32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Put(key, value) => {
                    map.put(key, value);
                    model.insert(key, value);
                }
                Op::Delete(key) => {
                    prop_assert_eq!(map.delete(&key), model.remove(&key).is_some());
                }
            }
            prop_assert!(map.check().is_ok());
            prop_assert_eq!(map.len(), model.len());
        }

        let entries: Vec<(u8, i32)> = map.iter().collect();
        let expected: Vec<(u8, i32)> = model.into_iter().collect();
        prop_assert_eq!(entries, expected);
    }
}

// =============================================================================
// Lookup Laws
// =============================================================================

proptest! {
    /// Law: get returns the most recently put value for any present key.
    #[test]
    fn prop_get_returns_most_recent_put(
        ops in arbitrary_ops(80),
        key in 0u8..64,
        first: i32,
        second: i32,
    ) {
        let map: LlrbMap<u8, i32> = LlrbMap::new();
        for op in ops {
            match op {
                Op::Put(k, v) => map.put(k, v),
                Op::Delete(k) => {
                    map.delete(&k);
                }
            }
        }
        map.put(key, first);
        map.put(key, second);
        prop_assert_eq!(map.get(&key), Some(second));
    }

    /// Law: deleting an absent key returns false and changes nothing.
    #[test]
    fn prop_delete_absent_changes_nothing(
        keys in prop::collection::btree_set(0u8..100, 0..30),
        absent in 100u8..200,
    ) {
        let map: LlrbMap<u8, ()> = keys.iter().map(|&key| (key, ())).collect();
        let before = map.len();
        prop_assert!(!map.delete(&absent));
        prop_assert_eq!(map.len(), before);
        prop_assert!(map.check().is_ok());
    }

    /// Law: deleting a present key returns true and shrinks the map by
    /// exactly one.
    #[test]
    fn prop_delete_present_shrinks_by_one(
        keys in prop::collection::btree_set(0u8..100, 1..30),
    ) {
        let map: LlrbMap<u8, ()> = keys.iter().map(|&key| (key, ())).collect();
        let victim = *keys.iter().next().expect("non-empty set");
        let before = map.len();
        prop_assert!(map.delete(&victim));
        prop_assert_eq!(map.len(), before - 1);
        prop_assert_eq!(map.get(&victim), None);
    }
}

// =============================================================================
// Traversal Laws
// =============================================================================

proptest! {
    /// Law: iteration yields every present key exactly once, in strictly
    /// increasing order.
    #[test]
    fn prop_iter_is_strictly_increasing(ops in arbitrary_ops(80)) {
        let map: LlrbMap<u8, i32> = LlrbMap::new();
        for op in ops {
            match op {
                Op::Put(k, v) => map.put(k, v),
                Op::Delete(k) => {
                    map.delete(&k);
                }
            }
        }
        let keys: Vec<u8> = map.iter().map(|(key, _)| key).collect();
        prop_assert_eq!(keys.len(), map.len());
        for window in keys.windows(2) {
            prop_assert!(window[0] < window[1]);
        }
    }

    /// Law: absent concurrent mutation, the safe iterator yields the same
    /// sequence as the fast iterator.
    #[test]
    fn prop_safe_iter_equals_fast_iter(
        keys in prop::collection::btree_set(0u8..100, 0..30),
    ) {
        let map: LlrbMap<u8, ()> = keys.iter().map(|&key| (key, ())).collect();
        let fast: Vec<(u8, ())> = map.iter().collect();
        let safe: Vec<(u8, ())> = map.safe_iter().collect();
        prop_assert_eq!(fast, safe);
    }

    /// Law: a range yields exactly the sorted subsequence within the
    /// inclusive bounds.
    #[test]
    fn prop_range_yields_the_inclusive_subsequence(
        keys in prop::collection::btree_set(0u8..100, 0..30),
        lower in 0u8..100,
        upper in 0u8..100,
    ) {
        let map: LlrbMap<u8, ()> = keys.iter().map(|&key| (key, ())).collect();
        let expected: Vec<u8> = keys
            .iter()
            .copied()
            .filter(|key| lower <= *key && *key <= upper)
            .collect();

        let fast: Vec<u8> = map.range(&lower, &upper).map(|(key, _)| key).collect();
        prop_assert_eq!(&fast, &expected);
        let safe: Vec<u8> = map.safe_range(&lower, &upper).map(|(key, _)| key).collect();
        prop_assert_eq!(&safe, &expected);
    }

    /// Law: the unordered snapshot holds exactly the live entries.
    #[test]
    fn prop_to_hash_map_matches_content(
        ops in arbitrary_ops(80),
    ) {
        let map: LlrbMap<u8, i32> = LlrbMap::new();
        let mut model: BTreeMap<u8, i32> = BTreeMap::new();
        for op in ops {
            match op {
                Op::Put(k, v) => {
                    map.put(k, v);
                    model.insert(k, v);
                }
                Op::Delete(k) => {
                    map.delete(&k);
                    model.remove(&k);
                }
            }
        }
        let snapshot = map.to_hash_map();
        prop_assert_eq!(snapshot.len(), model.len());
        for (key, value) in model {
            prop_assert_eq!(snapshot.get(&key), Some(&value));
        }
    }
}

// =============================================================================
// Nearest-Key Laws
// =============================================================================

proptest! {
    /// Law: the nearest-key family agrees with the model's range queries.
    #[test]
    fn prop_nearest_queries_match_model(
        keys in prop::collection::btree_set(0u8..200, 0..40),
        probe in 0u8..200,
    ) {
        let map: LlrbMap<u8, ()> = keys.iter().map(|&key| (key, ())).collect();

        let bigger = keys
            .range((Bound::Excluded(probe), Bound::Unbounded))
            .next()
            .copied();
        prop_assert_eq!(map.bigger(&probe).map(|(key, _)| key), bigger);

        let smaller = keys.range(..probe).next_back().copied();
        prop_assert_eq!(map.smaller(&probe).map(|(key, _)| key), smaller);

        let equal_or_bigger = keys.range(probe..).next().copied();
        prop_assert_eq!(
            map.equal_or_bigger(&probe).map(|(key, _)| key),
            equal_or_bigger
        );

        let equal_or_smaller = keys.range(..=probe).next_back().copied();
        prop_assert_eq!(
            map.equal_or_smaller(&probe).map(|(key, _)| key),
            equal_or_smaller
        );
    }

    /// Law: min and max agree with the model's endpoints.
    #[test]
    fn prop_min_max_match_model(
        keys in prop::collection::btree_set(0u8..200, 0..40),
    ) {
        let map: LlrbMap<u8, ()> = keys.iter().map(|&key| (key, ())).collect();
        prop_assert_eq!(map.min().map(|(key, _)| key), keys.iter().next().copied());
        prop_assert_eq!(map.max().map(|(key, _)| key), keys.iter().next_back().copied());
    }
}

// =============================================================================
// Comparator Laws
// =============================================================================

proptest! {
    /// Law: a reversed comparator yields exactly the reversed natural
    /// iteration order.
    #[test]
    fn prop_reverse_comparator_reverses_order(
        keys in prop::collection::btree_set(0u8..200, 0..40),
    ) {
        let map: LlrbMap<u8, ()> = LlrbMap::with_comparator(|a, b| b < a);
        for &key in &keys {
            map.put(key, ());
        }
        prop_assert!(map.check().is_ok());

        let got: Vec<u8> = map.iter().map(|(key, _)| key).collect();
        let expected: Vec<u8> = keys.iter().rev().copied().collect();
        prop_assert_eq!(got, expected);
    }
}
