//! Tests for the forward transform and its coefficient record

#[cfg(test)]
mod tests {
    use bigpixels::algorithm::forward::forward_with_summary;
    use bigpixels::{Grid, Transformed, forward};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_grid(height: usize, width: usize, seed: u64) -> Grid {
        let mut rng = StdRng::seed_from_u64(seed);
        let rows: Vec<Vec<f64>> = (0..height)
            .map(|_| (0..width).map(|_| rng.random_range(0.0..255.0)).collect())
            .collect();
        Grid::from_rows(&rows).unwrap()
    }

    // Tests the 2x2 worked example, including which quadrant mean is withheld
    // Verified by storing the bottom-right mean instead of withholding it
    #[test]
    fn test_two_by_two_example() {
        let mut grid = Grid::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let transformed = forward(&mut grid).unwrap();

        assert_eq!(transformed.height, 2);
        assert_eq!(transformed.width, 2);
        assert_eq!(
            transformed.levels(),
            &[vec![2.5], vec![-1.5, 0.5, -0.5]]
        );
        assert!(grid.values().iter().all(|&residual| residual == 0.0));
    }

    // Tests a wide pair splits into unit strips
    // Verified by storing both strip means
    #[test]
    fn test_one_by_two_example() {
        let mut grid = Grid::from_rows(&[[4.0, 6.0]]).unwrap();
        let transformed = forward(&mut grid).unwrap();

        assert_eq!(transformed.levels(), &[vec![5.0], vec![-1.0]]);
        assert_eq!(grid.values(), vec![0.0, 0.0]);
    }

    // Tests a single sample stores its own value
    // Verified by withholding the root mean of a singleton group
    #[test]
    fn test_single_sample() {
        let mut grid = Grid::from_rows(&[[42.0]]).unwrap();
        let transformed = forward(&mut grid).unwrap();

        assert_eq!(transformed.levels(), &[vec![42.0]]);
        assert_eq!(transformed.coefficient_count(), 1);
    }

    // Tests zero-sized grids produce empty records
    // Verified by pushing an empty level 0
    #[test]
    fn test_zero_sized_grids() {
        for (height, width) in [(0, 0), (0, 3), (3, 0)] {
            let mut grid = Grid::zeros(height, width);
            let transformed = forward(&mut grid).unwrap();

            assert_eq!(transformed, Transformed::new(height, width));
            assert_eq!(transformed.depth_count(), 0);
            assert!(transformed.coefficients().is_empty());
        }
    }

    // Tests the first level always holds the grid mean
    // Verified by recording the mean after subtraction
    #[test]
    fn test_root_level_is_grid_mean() {
        let original = random_grid(9, 14, 7);
        let expected = original.values().iter().sum::<f64>() / 126.0;

        let mut grid = original.clone();
        let transformed = forward(&mut grid).unwrap();
        let root = transformed.level(0).unwrap();

        assert_eq!(root.len(), 1);
        assert!((root[0] - expected).abs() < 1e-9);
    }

    // Tests residuals vanish once every leaf is reached
    // Verified by stopping subdivision at 2x2 regions
    #[test]
    fn test_residuals_vanish() {
        for (seed, (height, width)) in [(3, 5), (16, 16), (1, 33), (40, 3), (27, 19)]
            .into_iter()
            .enumerate()
        {
            let mut grid = random_grid(height, width, seed as u64);
            forward(&mut grid).unwrap();

            let worst = grid.values().iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
            assert!(worst < 1e-9, "{height}x{width} left residual {worst}");
        }
    }

    // Tests storage matches the traversal: one mean withheld per group of two or more
    // Verified by withholding a mean from the root group too
    #[test]
    fn test_coefficient_accounting() {
        for (height, width) in [(1, 1), (2, 3), (8, 8), (5, 21), (30, 17)] {
            let mut grid = random_grid(height, width, 11);
            let (transformed, summary) = forward_with_summary(&mut grid).unwrap();

            assert_eq!(transformed.coefficient_count(), summary.stored_value_count());
            assert_eq!(transformed.depth_count(), summary.level_count());
            assert_eq!(
                transformed.coefficient_count(),
                height * width,
                "every sample is accounted for by exactly one stored mean"
            );
        }
    }

    // Tests a constant grid puts all its signal in the root
    // Verified by skipping the in-place subtraction
    #[test]
    fn test_constant_grid() {
        let mut grid = Grid::from_rows(&vec![vec![3.25; 7]; 5]).unwrap();
        let transformed = forward(&mut grid).unwrap();

        assert_eq!(transformed.level(0), Some([3.25].as_slice()));
        assert!(
            transformed.levels()[1..]
                .iter()
                .flatten()
                .all(|mean| mean.abs() < 1e-12)
        );
    }

    // Tests the record is deterministic
    // Verified by iterating regions through a hash set
    #[test]
    fn test_deterministic() {
        let original = random_grid(12, 10, 99);

        let first = forward(&mut original.clone()).unwrap();
        let second = forward(&mut original.clone()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.coefficients().len(), first.coefficient_count());
    }
}
