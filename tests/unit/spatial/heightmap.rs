//! Tests for height map validation and normalization

#[cfg(test)]
mod tests {
    use ndarray::array;
    use unbuild::SolveError;
    use unbuild::spatial::HeightMap;
    use unbuild::spatial::heightmap::{check_size, normalize_height};

    // Tests a well-formed matrix is accepted with its shape intact
    // Verified by swapping rows and columns in the constructor
    #[test]
    fn test_from_rows_shape() {
        let map = HeightMap::from_rows(&[vec![1, 2, 0], vec![0, 3, 4]]).unwrap();
        assert_eq!(map.rows(), 2);
        assert_eq!(map.cols(), 3);
        assert_eq!(map.get(1, 2), Some(4));
        assert_eq!(map.get(2, 0), None);
        assert_eq!(map.occupied(), 4);
    }

    // Tests ragged rows are rejected as malformed
    // Verified by removing the per-row length check
    #[test]
    fn test_ragged_rows_rejected() {
        let result = HeightMap::from_rows(&[vec![1, 2], vec![1]]);
        assert!(matches!(result, Err(SolveError::MalformedGrid { .. })));
    }

    // Tests an empty grid is rejected
    // Verified by accepting zero-sized dimensions
    #[test]
    fn test_empty_grid_rejected() {
        let no_rows: Vec<Vec<u8>> = Vec::new();
        assert!(matches!(
            HeightMap::from_rows(&no_rows),
            Err(SolveError::MalformedGrid { .. })
        ));
        assert!(matches!(
            HeightMap::from_rows(&[Vec::<u8>::new()]),
            Err(SolveError::MalformedGrid { .. })
        ));
    }

    // Tests out-of-range heights are reported with their position
    // Verified by widening the accepted range to 0..=7
    #[test]
    fn test_invalid_height_position() {
        let result = HeightMap::from_rows(&[vec![1_i64, 2], vec![7, 0]]);
        match result {
            Err(SolveError::InvalidHeight { row, col, value }) => {
                assert_eq!((row, col, value), (1, 0, 7));
            }
            _ => unreachable!("Expected InvalidHeight error type"),
        }

        let negative = HeightMap::from_rows(&[vec![-1_i64]]);
        assert!(matches!(
            negative,
            Err(SolveError::InvalidHeight { value: -1, .. })
        ));
    }

    // Tests matrices are validated the same way as row vectors
    // Verified by skipping the value scan in from_array
    #[test]
    fn test_from_array_validation() {
        assert!(HeightMap::from_array(array![[1_u8, 6], [5, 0]]).is_ok());
        assert!(matches!(
            HeightMap::from_array(array![[1_u8, 9]]),
            Err(SolveError::InvalidHeight { row: 0, col: 1, .. })
        ));
    }

    // Tests the aliases 5 and 6 fold onto 1 and nothing else changes
    // Verified by folding only 6
    #[test]
    fn test_normalized_aliases() {
        let map = HeightMap::from_rows(&[vec![5_u8, 6, 1, 4, 0]]).unwrap();
        assert_eq!(map.normalized().to_rows(), vec![vec![1, 1, 1, 4, 0]]);
        assert_eq!(normalize_height(3), 3);
        assert_eq!(normalize_height(0), 0);
    }

    // Tests the size limit rejects overflowing and oversized shapes
    // Verified by multiplying without an overflow check
    #[test]
    fn test_check_size() {
        assert!(check_size(0, 0).is_ok());
        assert!(check_size(4096, 4096).is_ok());
        assert!(matches!(
            check_size(4096, 4097),
            Err(SolveError::GridTooLarge { rows: 4096, cols: 4097, .. })
        ));
        assert!(matches!(
            check_size(usize::MAX, 2),
            Err(SolveError::GridTooLarge { .. })
        ));
    }
}
