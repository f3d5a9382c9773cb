use tracing::{debug, trace};

use crate::{SortContext, SortStats, TUNED_PARAMS};

/// Counting tree sort with hash-accelerated duplicate detection.
///
/// Build phase feeds every element through the bucket index into the key
/// tree; emit phase walks the key tree in order and expands the counts back
/// over `data`.
pub fn sort(data: &mut [i32], ctx: &mut SortContext) {
    let len = data.len();
    if len < TUNED_PARAMS.min_sort_len {
        ctx.stats = SortStats {
            len,
            ..SortStats::default()
        };
        trace!(len, "range too short, nothing to sort");
        return;
    }

    let SortContext {
        keys,
        buckets,
        stats,
    } = ctx;
    keys.clear();
    buckets.reset(len);

    let Some((&first, rest)) = data.split_first() else {
        return;
    };
    let root = keys.seed(first);
    buckets.insert(first, root);
    for &value in rest {
        keys.insert_or_increment(buckets, value);
    }

    let written = keys.emit(data);
    debug_assert_eq!(written, len);

    *stats = SortStats {
        len,
        distinct: keys.distinct(),
        bucket_capacity: buckets.capacity(),
        comparisons: keys.comparisons() + buckets.comparisons(),
        bucket_hits: buckets.hits(),
    };
    debug!(
        len,
        distinct = stats.distinct,
        capacity = stats.bucket_capacity,
        comparisons = stats.comparisons,
        hits = stats.bucket_hits,
        "hashed tree sort finished"
    );
}
