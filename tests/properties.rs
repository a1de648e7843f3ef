//! Property tests for the persistent array operations

use persistent_arrays::{diff, Trie};
use proptest::prelude::*;
use std::collections::BTreeMap;

/// A count and a batch of in-bounds writes
fn writes<T: Arbitrary + Clone + 'static>(
    max_count: usize,
) -> impl Strategy<Value = (usize, Vec<(usize, T)>)> {
    (1..max_count).prop_flat_map(|count| {
        (
            Just(count),
            prop::collection::vec((0..count, any::<T>()), 0..64),
        )
    })
}

fn apply<T: persistent_arrays::Element>(base: &Trie<T>, writes: &[(usize, T)]) -> Trie<T> {
    writes
        .iter()
        .fold(base.clone(), |trie, &(i, v)| trie.set(i, v).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_created_arrays_read_zero(count in 0usize..20_000, probe in any::<prop::sample::Index>()) {
        let trie = Trie::<u16>::create(count).unwrap();
        if count > 0 {
            prop_assert_eq!(trie.get(probe.index(count)).unwrap(), 0);
        }
        prop_assert!(trie.get(count).is_err());
    }

    #[test]
    fn prop_update_isolation((count, batch) in writes::<i32>(5_000), value in any::<i32>()) {
        let t = apply(&Trie::create(count).unwrap(), &batch);
        let i = batch.first().map(|&(i, _)| i).unwrap_or(0);

        let updated = t.set(i, value).unwrap();
        prop_assert_eq!(updated.get(i).unwrap(), value);
        for j in (0..count).filter(|&j| j != i) {
            prop_assert_eq!(updated.get(j).unwrap(), t.get(j).unwrap());
        }
    }

    #[test]
    fn prop_set_leaves_receiver_unchanged((count, batch) in writes::<u8>(3_000)) {
        let t = apply(&Trie::create(count).unwrap(), &batch);
        let before = t.to_vec();
        for &(i, v) in &batch {
            let _ = t.set(i, v.wrapping_add(1)).unwrap();
        }
        prop_assert_eq!(t.to_vec(), before);
    }

    #[test]
    fn prop_identical_write_is_equal((count, batch) in writes::<u16>(3_000)) {
        let t = apply(&Trie::create(count).unwrap(), &batch);
        for &(i, _) in &batch {
            let same = t.set(i, t.get(i).unwrap()).unwrap();
            prop_assert_eq!(&same, &t);
            prop_assert_eq!(same.hash_code(), t.hash_code());
        }
    }

    #[test]
    fn prop_diff_is_complete(
        (count, first) in writes::<u8>(4_000),
        second in prop::collection::vec((any::<prop::sample::Index>(), any::<u8>()), 0..64),
    ) {
        let base = Trie::create(count).unwrap();
        let t1 = apply(&base, &first);
        let second: Vec<(usize, u8)> = second.iter().map(|(i, v)| (i.index(count), *v)).collect();
        let t2 = apply(&t1, &second);

        let mut reported = BTreeMap::new();
        diff(&t1, &t2, |i, old, new| {
            reported.insert(i, (old, new));
        }).unwrap();

        let expected: BTreeMap<usize, (u8, u8)> = (0..count)
            .filter_map(|i| {
                let (a, b) = (t1.get(i).unwrap(), t2.get(i).unwrap());
                (a != b).then_some((i, (a, b)))
            })
            .collect();
        prop_assert_eq!(reported, expected);
    }

    #[test]
    fn prop_transient_matches_persistent((count, batch) in writes::<i64>(10_000)) {
        let base = Trie::create(count).unwrap();
        let expected = apply(&base, &batch);

        let mut transient = base.transient();
        for &(i, v) in &batch {
            transient.set(i, v).unwrap();
        }
        let frozen = transient.freeze().unwrap();

        prop_assert_eq!(&frozen, &expected);
        prop_assert_eq!(frozen.to_vec(), expected.to_vec());
    }

    #[test]
    fn prop_equality_agrees_with_elements(
        (count, a) in writes::<u8>(1_000),
        b in prop::collection::vec((any::<prop::sample::Index>(), any::<u8>()), 0..8),
    ) {
        let base = Trie::create(count).unwrap();
        let t1 = apply(&base, &a);
        let b: Vec<(usize, u8)> = b.iter().map(|(i, v)| (i.index(count), *v)).collect();
        let t2 = apply(&base, &b);

        prop_assert_eq!(t1 == t2, t1.to_vec() == t2.to_vec());
        if t1 == t2 {
            prop_assert_eq!(t1.hash_code(), t2.hash_code());
        }
    }

    #[test]
    fn prop_wire_form_matches_elements((count, batch) in writes::<u16>(2_000)) {
        let t = apply(&Trie::create(count).unwrap(), &batch);
        let expected: Vec<u8> = t.iter().flat_map(|v| v.to_be_bytes()).collect();
        prop_assert_eq!(&t.to_bytes()[..], &expected[..]);
    }
}
