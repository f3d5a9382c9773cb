use tracing::{debug, trace};

use crate::{SortContext, SortStats, TUNED_PARAMS};

/// Counting tree sort without the hash layer: every element descends the
/// key tree. Kept as the cross-check and comparison baseline.
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

    let keys = &mut ctx.keys;
    keys.clear();
    for &value in data.iter() {
        keys.insert_or_increment_by_descent(value);
    }

    let written = keys.emit(data);
    debug_assert_eq!(written, len);

    ctx.stats = SortStats {
        len,
        distinct: keys.distinct(),
        bucket_capacity: 0,
        comparisons: keys.comparisons(),
        bucket_hits: 0,
    };
    debug!(
        len,
        distinct = ctx.stats.distinct,
        comparisons = ctx.stats.comparisons,
        "tree sort finished"
    );
}
