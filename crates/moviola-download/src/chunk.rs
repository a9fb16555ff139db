//! Fixed-size partitioning of ordered work.

/// A contiguous run of values with the index of its first element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk<T> {
    pub start_index: usize,
    pub values: Vec<T>,
}

/// Splits `values` into `ceil(len / size)` ordered chunks.
///
/// Every chunk holds `size` values except possibly the last, which holds the
/// remainder.
///
/// # Panics
///
/// Panics if `size` is zero.
pub fn split_in_chunks<T: Clone>(values: &[T], size: usize) -> Vec<Chunk<T>> {
    assert!(size > 0, "chunk size must be non-zero");

    values
        .chunks(size)
        .enumerate()
        .map(|(chunk_index, slice)| Chunk {
            start_index: chunk_index * size,
            values: slice.to_vec(),
        })
        .collect()
}
