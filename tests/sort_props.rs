//! Property tests for the merge step and the full pipeline

use proptest::prelude::*;
use treesort::{merge_runs, Value};

use test_helpers::{run_sort, sorted_values};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn merge_of_sorted_runs_is_the_sorted_union(
        mut left in proptest::collection::vec(-1i32..256, 0..80),
        mut right in proptest::collection::vec(-1i32..256, 0..80),
    ) {
        left.sort_unstable();
        right.sort_unstable();

        let merged = merge_runs(&left, &right);

        let mut expected: Vec<Value> = left.iter().chain(right.iter()).copied().collect();
        expected.sort_unstable();
        prop_assert_eq!(merged, expected);
    }

    #[test]
    fn pipeline_output_is_the_sorted_permutation(
        input in proptest::collection::vec(any::<u8>(), 0..160),
        world_size in prop_oneof![Just(1usize), Just(3), Just(7), Just(15)],
    ) {
        let result = run_sort(world_size, &input);
        let expected = sorted_values(&input);
        prop_assert_eq!(result.sorted(), expected.as_slice());
        prop_assert_eq!(result.unsorted().len(), input.len());
    }
}
