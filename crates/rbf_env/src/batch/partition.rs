//! Work partitioning and per-index seed derivation for batch generation.
use std::ops::Range;

use crate::error::{Error, Result};

/// Seed for environment `index` of a batch: exactly `base_seed + index`.
///
/// Overflowing `u64` is reported as [`Error::SeedOverflow`] rather than wrapping, so two
/// indices never silently share a seed.
pub fn seed_for_index(base_seed: u64, index: usize) -> Result<u64> {
    u64::try_from(index)
        .ok()
        .and_then(|i| base_seed.checked_add(i))
        .ok_or(Error::SeedOverflow { base_seed, index })
}

/// Chunk length used to split `count` items over `workers`: `ceil(count / workers)`, at least 1.
pub fn chunk_size(count: usize, workers: usize) -> usize {
    count.div_ceil(workers.max(1)).max(1)
}

/// Splits `[0, count)` into contiguous, non-empty ranges of [`chunk_size`] items; the last range
/// may be shorter. Yields at most `workers` ranges.
pub fn partition(count: usize, workers: usize) -> Vec<Range<usize>> {
    let chunk = chunk_size(count, workers);
    (0..count)
        .step_by(chunk)
        .map(|start| start..(start + chunk).min(count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_base_plus_index() {
        assert_eq!(seed_for_index(1337, 0).unwrap(), 1337);
        assert_eq!(seed_for_index(1337, 99).unwrap(), 1436);
        assert_eq!(seed_for_index(u64::MAX - 1, 1).unwrap(), u64::MAX);
    }

    #[test]
    fn seed_overflow_is_an_error() {
        let err = seed_for_index(u64::MAX, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::SeedOverflow {
                base_seed: u64::MAX,
                index: 1
            }
        ));
    }

    #[test]
    fn partition_covers_range_without_overlap() {
        let parts = partition(100, 8);
        assert_eq!(chunk_size(100, 8), 13);
        assert_eq!(parts.len(), 8);
        assert_eq!(parts[0], 0..13);
        assert_eq!(parts[7], 91..100);

        let mut next = 0;
        for r in &parts {
            assert_eq!(r.start, next);
            assert!(!r.is_empty());
            next = r.end;
        }
        assert_eq!(next, 100);
    }

    #[test]
    fn partition_uses_fewer_chunks_when_workers_exceed_items() {
        let parts = partition(3, 16);
        assert_eq!(parts, vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn partition_can_leave_workers_idle() {
        // ceil(10 / 4) = 3 -> chunks of 3, 3, 3, 1.
        assert_eq!(partition(10, 4), vec![0..3, 3..6, 6..9, 9..10]);
        // ceil(9 / 6) = 2 -> only five chunks for six workers.
        assert_eq!(partition(9, 6).len(), 5);
    }

    #[test]
    fn partition_edge_cases() {
        assert!(partition(0, 4).is_empty());
        assert_eq!(partition(5, 1), vec![0..5]);
        assert_eq!(partition(5, 0), vec![0..5]);
    }
}
