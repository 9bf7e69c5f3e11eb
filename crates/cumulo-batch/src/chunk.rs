//! Fixed-size partitioning of work lists.

/// Partitions `items` into chunks of at most `chunk_size` elements.
///
/// Produces `ceil(len / chunk_size)` chunks whose concatenation equals the
/// input, with order preserved within and across chunks. The final chunk
/// may be shorter than `chunk_size`. Used to respect provider batch
/// limits (e.g. a batch delete capped at 1000 keys).
///
/// # Panics
///
/// Panics if `chunk_size` is zero.
pub fn chunked<T: Clone>(items: &[T], chunk_size: usize) -> Vec<Vec<T>> {
    assert!(chunk_size > 0, "chunk size must be positive");

    items.chunks(chunk_size).map(<[T]>::to_vec).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_count_is_ceiling() {
        let items: Vec<u32> = (0..2500).collect();
        let chunks = chunked(&items, 1000);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 1000);
        assert_eq!(chunks[1].len(), 1000);
        assert_eq!(chunks[2].len(), 500);
    }

    #[test]
    fn test_chunks_preserve_order() {
        let items: Vec<u32> = (0..907).collect();
        let chunks = chunked(&items, 100);

        let flattened: Vec<u32> = chunks.into_iter().flatten().collect();
        assert_eq!(flattened, items);
    }

    #[test]
    fn test_exact_multiple() {
        let items = vec!["a", "b", "c", "d"];
        let chunks = chunked(&items, 2);

        assert_eq!(chunks, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_empty_input() {
        let items: Vec<u32> = Vec::new();
        assert!(chunked(&items, 10).is_empty());
    }

    #[test]
    #[should_panic(expected = "chunk size must be positive")]
    fn test_zero_chunk_size_panics() {
        chunked(&[1, 2, 3], 0);
    }
}
