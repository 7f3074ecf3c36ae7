//! Shared value tables
//!
//! Channels of one kind share a flat value pool within a single encode pass.
//! A channel stores only `(count, offset)`, so repeated value runs across
//! joints collapse onto the same pool slice.

/// Return the offset of `sequence` inside `pool`, appending it if absent
///
/// The scan keeps a matched-so-far counter that drops back to zero on any
/// mismatch, and the mismatching element is not retried as a new start. It
/// can miss a match that straddles a failed partial match and append a
/// duplicate instead. Existing files were written with exactly this search,
/// so the chosen offsets must not change.
pub fn find_or_insert<T: Copy + PartialEq>(pool: &mut Vec<T>, sequence: &[T]) -> usize {
    if !sequence.is_empty() {
        let mut matched = 0;
        for (i, value) in pool.iter().enumerate() {
            if *value != sequence[matched] {
                matched = 0;
                continue;
            }
            matched += 1;
            if matched == sequence.len() {
                return i + 1 - matched;
            }
        }
    }

    let start = pool.len();
    pool.extend_from_slice(sequence);
    start
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence_wins() {
        let mut pool = vec![1, 2, 3, 2, 3];
        assert_eq!(find_or_insert(&mut pool, &[2, 3]), 1);
        assert_eq!(pool.len(), 5);
    }

    #[test]
    fn test_append_when_absent() {
        let mut pool = vec![1.0f32, 2.0];
        assert_eq!(find_or_insert(&mut pool, &[3.0, 4.0]), 2);
        assert_eq!(pool, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_idempotent() {
        let mut pool: Vec<i16> = vec![5, 6];
        let first = find_or_insert(&mut pool, &[7, 8, 9]);
        let len = pool.len();
        let second = find_or_insert(&mut pool, &[7, 8, 9]);
        assert_eq!(first, second);
        assert_eq!(pool.len(), len);
    }

    #[test]
    fn test_empty_pool() {
        let mut pool: Vec<f32> = Vec::new();
        assert_eq!(find_or_insert(&mut pool, &[1.5]), 0);
        assert_eq!(find_or_insert(&mut pool, &[1.5]), 0);
        assert_eq!(pool, vec![1.5]);
    }

    #[test]
    fn test_match_at_pool_end() {
        let mut pool = vec![0, 0, 4, 5];
        assert_eq!(find_or_insert(&mut pool, &[4, 5]), 2);
    }

    #[test]
    fn test_partial_match_at_end_appends_whole_sequence() {
        let mut pool = vec![1, 2];
        assert_eq!(find_or_insert(&mut pool, &[2, 3]), 2);
        assert_eq!(pool, vec![1, 2, 2, 3]);
    }

    #[test]
    fn test_no_backtracking_after_failed_partial_match() {
        // [1, 1, 2] is present at index 1, but the scan matches "1, 1" at 0,
        // fails on the second 1 and resets without retrying it
        let mut pool = vec![1, 1, 1, 2];
        assert_eq!(find_or_insert(&mut pool, &[1, 1, 2]), 4);
        assert_eq!(pool, vec![1, 1, 1, 2, 1, 1, 2]);
    }

    #[test]
    fn test_exact_float_equality() {
        let mut pool = vec![1.0f32 + f32::EPSILON];
        assert_eq!(find_or_insert(&mut pool, &[1.0f32]), 1);
    }

    #[test]
    fn test_empty_sequence() {
        let mut pool = vec![1, 2];
        assert_eq!(find_or_insert(&mut pool, &[]), 2);
        assert_eq!(pool.len(), 2);
    }
}
