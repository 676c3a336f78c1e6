//! Two-way merge of sorted runs

use crate::dataset::Value;

/// Merge two ascending runs into one, preserving duplicates.
///
/// Ties take the left run's element first, so the result is deterministic
/// for any interleaving of equal values.
pub fn merge_runs(left: &[Value], right: &[Value]) -> Vec<Value> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut l = 0;
    let mut r = 0;

    while l < left.len() && r < right.len() {
        if left[l] <= right[r] {
            merged.push(left[l]);
            l += 1;
        } else {
            merged.push(right[r]);
            r += 1;
        }
    }
    merged.extend_from_slice(&left[l..]);
    merged.extend_from_slice(&right[r..]);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(&[], &[], &[]; "both empty")]
    #[test_case(&[1, 3], &[], &[1, 3]; "right empty")]
    #[test_case(&[], &[2], &[2]; "left empty")]
    #[test_case(&[1, 3, 5, 9], &[2, 4, 7, 8], &[1, 2, 3, 4, 5, 7, 8, 9]; "interleaved")]
    #[test_case(&[4, 5, 6], &[1, 2, 3], &[1, 2, 3, 4, 5, 6]; "disjoint runs")]
    #[test_case(&[1, 1, 2], &[1, 2, 2], &[1, 1, 1, 2, 2, 2]; "duplicates kept")]
    #[test_case(&[-1, -1], &[0, 255], &[-1, -1, 0, 255]; "sentinels sort first")]
    fn test_merge_runs(left: &[Value], right: &[Value], expected: &[Value]) {
        assert_eq!(merge_runs(left, right), expected);
    }

    #[test]
    fn test_merge_is_the_multiset_union() {
        let left = [1, 4, 4, 6];
        let right = [0, 4, 9];
        let merged = merge_runs(&left, &right);

        let mut expected: Vec<Value> = left.iter().chain(right.iter()).copied().collect();
        expected.sort_unstable();
        assert_eq!(merged, expected);
    }
}
