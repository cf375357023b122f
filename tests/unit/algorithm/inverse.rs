//! Tests for reconstruction from stored means

#[cfg(test)]
mod tests {
    use bigpixels::algorithm::inverse::inverse_progressive;
    use bigpixels::{BigPixelsError, Grid, Transformed, forward, inverse};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn record(height: usize, width: usize, levels: Vec<Vec<f64>>) -> Transformed {
        Transformed {
            height,
            width,
            values_by_level: levels,
        }
    }

    fn two_by_two() -> Transformed {
        record(2, 2, vec![vec![2.5], vec![-1.5, 0.5, -0.5]])
    }

    fn malformed_level(result: Result<Grid, BigPixelsError>) -> usize {
        match result {
            Err(BigPixelsError::MalformedCoefficients { level, .. }) => level,
            other => panic!("expected malformed coefficients, got {other:?}"),
        }
    }

    // Tests the withheld bottom-right mean is recovered from its siblings
    // Verified by treating the withheld mean as zero
    #[test]
    fn test_two_by_two_reconstruction() {
        let grid = inverse(&two_by_two()).unwrap();

        assert_eq!(grid.to_rows(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    // Tests a wide pair recovers its right strip
    // Verified by recovering the left strip instead
    #[test]
    fn test_one_by_two_reconstruction() {
        let grid = inverse(&record(1, 2, vec![vec![5.0], vec![-1.0]])).unwrap();

        assert_eq!(grid.to_rows(), vec![vec![4.0, 6.0]]);
    }

    // Tests round trips over many shapes within floating point noise
    // Verified by reading levels in reverse order
    #[test]
    fn test_round_trip_random_grids() {
        let shapes = [
            (1, 1),
            (1, 2),
            (2, 1),
            (3, 3),
            (1, 50),
            (50, 1),
            (7, 2),
            (16, 16),
            (13, 29),
            (33, 8),
            (64, 48),
        ];
        let mut rng = StdRng::seed_from_u64(2024);

        for (height, width) in shapes {
            let rows: Vec<Vec<f64>> = (0..height)
                .map(|_| (0..width).map(|_| rng.random_range(-500.0..500.0)).collect())
                .collect();
            let original = Grid::from_rows(&rows).unwrap();

            let transformed = forward(&mut original.clone()).unwrap();
            let restored = inverse(&transformed).unwrap();

            let error = original.max_abs_difference(&restored).unwrap();
            assert!(error < 1e-9, "{height}x{width} round trip error {error}");
        }
    }

    // Tests integer luminance survives a round trip
    // Verified by truncating means to whole numbers
    #[test]
    fn test_round_trip_luminance() {
        let rows: Vec<Vec<u8>> = (0..20_u8)
            .map(|row| (0..15_u8).map(|column| row.wrapping_mul(13) ^ column.wrapping_mul(7)).collect())
            .collect();
        let original = Grid::from_rows(&rows).unwrap();

        let restored = inverse(&forward(&mut original.clone()).unwrap()).unwrap();

        for (expected, actual) in original.values().iter().zip(restored.values()) {
            assert!((expected - actual).abs() < 1e-9);
        }
    }

    // Tests zero-sized records rebuild empty grids
    // Verified by requiring a level 0
    #[test]
    fn test_zero_sized_records() {
        let mut calls = 0;
        let grid = inverse_progressive(&Transformed::new(0, 4), |_, _| calls += 1).unwrap();

        assert_eq!((grid.height(), grid.width()), (0, 4));
        assert_eq!(calls, 0);
    }

    // Tests a level with too few values is rejected
    // Verified by padding missing values with zero
    #[test]
    fn test_too_few_values() {
        let result = inverse(&record(2, 2, vec![vec![2.5], vec![-1.5, 0.5]]));

        assert_eq!(malformed_level(result), 1);
    }

    // Tests a level with too many values is rejected
    // Verified by ignoring leftover values
    #[test]
    fn test_too_many_values() {
        let result = inverse(&record(2, 2, vec![vec![2.5], vec![-1.5, 0.5, -0.5, 9.0]]));

        assert_eq!(malformed_level(result), 1);
    }

    // Tests missing and surplus levels are rejected
    // Verified by skipping levels with no cursor
    #[test]
    fn test_level_count_mismatch() {
        let missing = inverse(&record(2, 2, vec![vec![2.5]]));
        assert_eq!(malformed_level(missing), 1);

        let surplus = inverse(&record(2, 2, vec![vec![2.5], vec![-1.5, 0.5, -0.5], vec![1.0]]));
        assert_eq!(malformed_level(surplus), 2);

        let empty_root = inverse(&record(1, 1, vec![vec![]]));
        assert_eq!(malformed_level(empty_root), 0);
    }

    // Tests progressive reconstruction reports each level coarse to fine
    // Verified by reporting before a level is applied
    #[test]
    fn test_progressive_levels() {
        let mut snapshots = Vec::new();
        let grid = inverse_progressive(&two_by_two(), |depth, grid| {
            snapshots.push((depth, grid.to_rows()));
        })
        .unwrap();

        assert_eq!(
            snapshots,
            vec![
                (0, vec![vec![2.5, 2.5], vec![2.5, 2.5]]),
                (1, vec![vec![1.0, 2.0], vec![3.0, 4.0]]),
            ]
        );
        assert_eq!(snapshots.last().map(|(_, rows)| rows), Some(&grid.to_rows()));
    }

    // Tests one callback per stored level on a deep tree
    // Verified by calling back once per sibling group
    #[test]
    fn test_progressive_callback_count() {
        let original = Grid::from_rows(&vec![vec![1.0, 9.0, 4.0, 4.0, 0.5]; 11]).unwrap();
        let transformed = forward(&mut original.clone()).unwrap();

        let mut depths = Vec::new();
        inverse_progressive(&transformed, |depth, _| depths.push(depth)).unwrap();

        assert_eq!(depths, (0..transformed.depth_count()).collect::<Vec<_>>());
    }
}
