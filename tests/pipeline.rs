//! End-to-end pipeline scenarios

use treesort::{SortConfig, SortError, SENTINEL};

use test_helpers::{emit_to_string, run_sort, sorted_values};

#[test]
fn test_single_process_sorts_locally() {
    let result = run_sort(1, &[5, 3, 9, 1]);
    assert_eq!(result.unsorted(), &[5, 3, 9, 1]);
    assert_eq!(result.sorted(), &[1, 3, 5, 9]);
    assert_eq!(emit_to_string(&result, false), "1\n3\n5\n9\n");
}

#[test]
fn test_seven_processes_with_an_even_split() {
    // 8 values over 4 leaves: two per leaf, no padding.
    let result = run_sort(7, &[5, 3, 9, 1, 8, 2, 7, 4]);
    assert_eq!(result.unsorted(), &[5, 3, 9, 1, 8, 2, 7, 4]);
    assert_eq!(result.sorted(), &[1, 2, 3, 4, 5, 7, 8, 9]);
}

#[test]
fn test_echo_line_precedes_sorted_output() {
    let result = run_sort(7, &[5, 3, 9, 1, 8, 2, 7, 4]);
    let output = emit_to_string(&result, true);
    assert_eq!(output, "5 3 9 1 8 2 7 4\n1\n2\n3\n4\n5\n7\n8\n9\n");
}

#[test]
fn test_padding_never_leaks_into_output() {
    // 6 values over 4 leaves: two sentinels padded before the scatter.
    let result = run_sort(7, &[9, 8, 7, 3, 2, 1]);
    assert_eq!(result.sorted(), &[1, 2, 3, 7, 8, 9]);
    assert!(!result.sorted().contains(&SENTINEL));
    assert!(!emit_to_string(&result, true).contains("-1"));
}

#[test]
fn test_empty_input_emits_nothing() {
    let result = run_sort(7, &[]);
    assert!(result.unsorted().is_empty());
    assert!(result.sorted().is_empty());
    assert_eq!(emit_to_string(&result, true), "");
}

#[test]
fn test_duplicates_survive_the_tournament() {
    let result = run_sort(7, &[4, 4, 4, 1, 1, 9, 9, 0]);
    assert_eq!(result.sorted(), &[0, 1, 1, 4, 4, 4, 9, 9]);
}

#[test]
fn test_extreme_byte_values_sort_correctly() {
    let result = run_sort(7, &[255, 0, 128, 0, 255, 1]);
    assert_eq!(result.sorted(), &[0, 0, 1, 128, 255, 255]);
}

#[test]
fn test_even_or_zero_world_sizes_are_rejected() {
    assert!(matches!(
        SortConfig::with_world_size(4),
        Err(SortError::InvalidWorldSize(4))
    ));
    assert!(matches!(
        SortConfig::with_world_size(0),
        Err(SortError::InvalidWorldSize(0))
    ));
}

#[test]
fn test_wider_trees_still_sort() {
    // world = 9 puts internal rank 3 under internal rank 1, so a merger
    // receives one run from a merger and one from a leaf.
    for world_size in [3, 5, 9, 15, 31] {
        let input: Vec<u8> = (0..100).rev().collect();
        let result = run_sort(world_size, &input);
        assert_eq!(result.sorted(), sorted_values(&input).as_slice());
    }
}

#[test]
fn test_input_shorter_than_the_leaf_count() {
    // 2 values over 4 leaves: two of the leaves receive only padding.
    let result = run_sort(7, &[9, 4]);
    assert_eq!(result.sorted(), &[4, 9]);
}
