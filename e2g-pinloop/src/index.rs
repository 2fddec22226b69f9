//! Coordinate-to-rank mapping over a sorted locus array.

/// First index in `sorted` whose value is not less than `query` (the
/// leftmost insertion point). Returns `sorted.len()` when every value is
/// smaller than the query. The slice MUST be sorted ascending; ordering is
/// guaranteed by [`e2g_core::models::ChromosomeGroup::partition`].
pub fn lower_bound<T: PartialOrd>(sorted: &[T], query: &T) -> usize {
    sorted.partition_point(|v| v < query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case(99, 0)]
    #[case(100, 0)]
    #[case(101, 1)]
    #[case(500, 1)]
    #[case(899, 2)]
    #[case(900, 2)]
    #[case(901, 3)]
    fn test_lower_bound(#[case] query: u64, #[case] expected: usize) {
        let tss = vec![100u64, 500, 900];
        assert_eq!(lower_bound(&tss, &query), expected);
    }

    #[rstest]
    fn test_lower_bound_empty() {
        let empty: Vec<u64> = Vec::new();
        assert_eq!(lower_bound(&empty, &42), 0);
    }

    #[rstest]
    fn test_lower_bound_duplicates_returns_leftmost() {
        let values = vec![10u64, 20, 20, 20, 30];
        assert_eq!(lower_bound(&values, &20), 1);
    }

    #[rstest]
    fn test_lower_bound_on_float_centers() {
        // a .5 center must sit strictly between its integer neighbors
        let centers = vec![50.0, 200.5, 600.0];
        assert_eq!(lower_bound(&centers, &200.0), 1);
        assert_eq!(lower_bound(&centers, &201.0), 2);
    }
}
