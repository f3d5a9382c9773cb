use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

fn multiset(data: &[i32]) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    for &value in data {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// Mostly small alphabets so that repeats and bucket collisions are common.
fn data_strategy() -> impl Strategy<Value = Vec<i32>> {
    prop_oneof![
        prop::collection::vec(any::<i32>(), 0..300),
        prop::collection::vec(-16..16_i32, 0..300),
        prop::collection::vec((0..8_i32).prop_map(|k| k * 256), 0..300),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_output_is_sorted_permutation(data in data_strategy()) {
        for &algo in all_algorithms() {
            let mut sorted = data.clone();
            let mut ctx = SortContext::default();
            sort_with_ctx(algo, &mut sorted, &mut ctx);

            prop_assert!(sorted.is_sorted(), "algorithm={}", algorithm_name(algo));
            prop_assert_eq!(multiset(&sorted), multiset(&data));
            prop_assert_eq!(ctx.stats().len, data.len());
        }
    }

    #[test]
    fn prop_sorting_twice_changes_nothing(data in data_strategy()) {
        let mut once = data;
        sort(&mut once);
        let mut twice = once.clone();
        sort(&mut twice);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn prop_sort_range_matches_std_on_subslice(
        data in prop::collection::vec(-64..64_i32, 0..200),
        a in 0..200_usize,
        b in 0..200_usize,
    ) {
        let mut actual = data.clone();
        let result = sort_range(&mut actual, a..b);
        if a <= b && b <= data.len() {
            prop_assert_eq!(result, Ok(()));
            let mut expected = data;
            expected[a..b].sort_unstable();
            prop_assert_eq!(actual, expected);
        } else {
            prop_assert!(result.is_err());
            prop_assert_eq!(actual, data);
        }
    }

    #[test]
    fn prop_trees_stay_balanced(data in data_strategy()) {
        let mut ctx = SortContext::default();
        ctx.buckets.reset(data.len());
        for &value in &data {
            ctx.keys.insert_or_increment(&mut ctx.buckets, value);
            ctx.keys.assert_valid();
            ctx.buckets.assert_valid(&ctx.keys);
        }
        prop_assert_eq!(ctx.keys.distinct(), multiset(&data).len());
    }
}
