mod algorithms;
mod error;
mod tree;

#[cfg(test)]
mod proptests;

use std::ops::{Bound, RangeBounds};

pub use error::SortError;
use tree::{BucketIndex, KeyTree};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SortAlgorithm {
    /// Key tree plus bucket index; repeats are found in the bucket.
    HashedTreeSort,
    /// Key tree only; every element descends it.
    TreeSort,
}

pub const ALL_ALGORITHMS: [SortAlgorithm; 2] =
    [SortAlgorithm::HashedTreeSort, SortAlgorithm::TreeSort];

pub fn all_algorithms() -> &'static [SortAlgorithm] {
    &ALL_ALGORITHMS
}

pub fn algorithm_name(algo: SortAlgorithm) -> &'static str {
    match algo {
        SortAlgorithm::HashedTreeSort => "hashed_tree_sort",
        SortAlgorithm::TreeSort => "tree_sort",
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TunedParams {
    /// Ranges shorter than this are already sorted.
    pub min_sort_len: usize,
    /// Lower bound on the bucket table size.
    pub min_bucket_capacity: usize,
}

pub const TUNED_PARAMS: TunedParams = TunedParams {
    min_sort_len: 2,
    min_bucket_capacity: 1,
};

/// Counters from the most recent sort run with a [`SortContext`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SortStats {
    pub len: usize,
    pub distinct: usize,
    /// Bucket table size; `0` when no bucket index was built.
    pub bucket_capacity: usize,
    /// Key comparisons made while descending the key tree and the buckets.
    pub comparisons: u64,
    /// Elements recognized as repeats by a bucket lookup.
    pub bucket_hits: u64,
}

impl SortStats {
    pub fn comparisons_per_element(&self) -> f64 {
        if self.len == 0 {
            0.0
        } else {
            self.comparisons as f64 / self.len as f64
        }
    }
}

/// Per-call trees and counters.
///
/// Every sort starts by emptying the trees, so a context only carries
/// allocations from one call to the next. The trees are reachable only
/// through the sort entry points:
///
/// ```compile_fail
/// use tree_sort::tree::KeyTree;
/// ```
#[derive(Clone, Debug, Default)]
pub struct SortContext {
    pub(crate) keys: KeyTree,
    pub(crate) buckets: BucketIndex,
    pub(crate) stats: SortStats,
}

impl SortContext {
    pub fn stats(&self) -> SortStats {
        self.stats
    }
}

/// Sorts `data` ascending with the hashed tree sort.
pub fn sort(data: &mut [i32]) {
    let mut ctx = SortContext::default();
    sort_with_ctx(SortAlgorithm::HashedTreeSort, data, &mut ctx);
}

/// Sorts the half-open `range` of `data` ascending with the hashed tree sort.
///
/// The range is validated before anything is written.
pub fn sort_range<R: RangeBounds<usize>>(data: &mut [i32], range: R) -> Result<(), SortError> {
    let mut ctx = SortContext::default();
    sort_range_with_ctx(SortAlgorithm::HashedTreeSort, data, range, &mut ctx)
}

pub fn sort_with_ctx(algo: SortAlgorithm, data: &mut [i32], ctx: &mut SortContext) {
    match algo {
        SortAlgorithm::HashedTreeSort => algorithms::hashed_tree_sort::sort(data, ctx),
        SortAlgorithm::TreeSort => algorithms::tree_sort::sort(data, ctx),
    }
}

pub fn sort_range_with_ctx<R: RangeBounds<usize>>(
    algo: SortAlgorithm,
    data: &mut [i32],
    range: R,
    ctx: &mut SortContext,
) -> Result<(), SortError> {
    let (start, end) = normalize_range(range, data.len())?;
    sort_with_ctx(algo, &mut data[start..end], ctx);
    Ok(())
}

fn normalize_range<R: RangeBounds<usize>>(
    range: R,
    len: usize,
) -> Result<(usize, usize), SortError> {
    let start = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => start.checked_add(1).ok_or(SortError::RangeOverflow)?,
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&end) => end.checked_add(1).ok_or(SortError::RangeOverflow)?,
        Bound::Excluded(&end) => end,
        Bound::Unbounded => len,
    };

    if start > end || end > len {
        return Err(SortError::InvalidRange { start, end, len });
    }

    Ok((start, end))
}
