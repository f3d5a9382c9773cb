/// A caller-supplied range that does not describe a sub-slice.
///
/// Returned before the slice is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortError {
    /// The half-open range `start..end` is reversed or runs past the slice.
    #[error("invalid range {start}..{end} for slice of length {len}")]
    InvalidRange {
        /// Inclusive start index.
        start: usize,
        /// Exclusive end index.
        end: usize,
        /// Length of the slice being sorted.
        len: usize,
    },

    /// A bound cannot be expressed as a half-open `usize` range.
    #[error("range bound overflows usize")]
    RangeOverflow,
}
