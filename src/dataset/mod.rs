//! Dataset values, sentinel padding, and partitioning
//!
//! Input bytes widen losslessly into [`Value`]s. Right-padding with
//! [`SENTINEL`] makes the dataset length divisible by the receiver count;
//! sentinels compare below every real value, so they cluster at the front
//! of merged runs and are stripped before anything user-visible.

/// Element type carried through the pipeline: the input's 0..=255 range
/// plus the padding sentinel.
pub type Value = i32;

/// Padding marker. Never a valid data value and never emitted.
pub const SENTINEL: Value = -1;

/// Widen raw input bytes into pipeline values.
pub fn from_bytes(bytes: &[u8]) -> Vec<Value> {
    bytes.iter().map(|&b| Value::from(b)).collect()
}

/// Sentinels required to make `len` divisible by `receivers`:
/// `(receivers - len % receivers) % receivers`, zero when already even.
pub fn padding_needed(len: usize, receivers: usize) -> usize {
    debug_assert!(receivers > 0, "padding needs at least one receiver");
    (receivers - len % receivers) % receivers
}

/// Right-pad with sentinels until the length divides `receivers`.
pub fn pad_with_sentinels(values: &mut Vec<Value>, receivers: usize) {
    let target = values.len() + padding_needed(values.len(), receivers);
    values.resize(target, SENTINEL);
}

/// Split into `parts` contiguous equal-length slices in rank order.
///
/// The length must already divide evenly (pad first). A zero-length
/// dataset still yields `parts` empty slices so every receiver gets its
/// message.
pub fn partition(values: &[Value], parts: usize) -> Vec<&[Value]> {
    debug_assert!(parts > 0, "partitioning needs at least one part");
    debug_assert_eq!(values.len() % parts, 0, "partition requires a padded dataset");

    let chunk = values.len() / parts;
    if chunk == 0 {
        return vec![&values[..0]; parts];
    }
    values.chunks_exact(chunk).collect()
}

/// Copy with every sentinel removed.
pub fn strip_sentinels(values: &[Value]) -> Vec<Value> {
    values.iter().copied().filter(|&v| v != SENTINEL).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_formula() {
        assert_eq!(padding_needed(8, 4), 0);
        assert_eq!(padding_needed(6, 4), 2);
        assert_eq!(padding_needed(1, 4), 3);
        assert_eq!(padding_needed(0, 4), 0);
        assert_eq!(padding_needed(5, 1), 0);
    }

    #[test]
    fn test_pad_then_partition_in_rank_order() {
        let mut values = vec![5, 3, 9, 1, 8, 2];
        pad_with_sentinels(&mut values, 4);
        assert_eq!(values.len(), 8);
        assert_eq!(&values[6..], &[SENTINEL, SENTINEL]);

        let parts = partition(&values, 4);
        assert_eq!(
            parts,
            vec![&[5, 3][..], &[9, 1][..], &[8, 2][..], &[SENTINEL, SENTINEL][..]]
        );
    }

    #[test]
    fn test_partition_of_empty_dataset() {
        let values: Vec<Value> = Vec::new();
        let parts = partition(&values, 4);
        assert_eq!(parts.len(), 4);
        assert!(parts.iter().all(|p| p.is_empty()));
    }

    #[test]
    fn test_already_even_length_gains_no_padding() {
        let mut values = vec![1, 2, 3, 4];
        pad_with_sentinels(&mut values, 4);
        assert_eq!(values, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_byte_widening_keeps_high_values() {
        assert_eq!(from_bytes(&[0, 127, 255]), vec![0, 127, 255]);
    }

    #[test]
    fn test_strip_sentinels() {
        assert_eq!(strip_sentinels(&[SENTINEL, 1, SENTINEL, 3]), vec![1, 3]);
        assert!(strip_sentinels(&[SENTINEL; 4]).is_empty());
        assert_eq!(strip_sentinels(&[]), Vec::<Value>::new());
    }
}
