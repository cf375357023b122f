//! Sample grid with rectangular-shape validation and region arithmetic
//!
//! The grid is the single mutable resource of a transform call. The forward
//! engine subtracts region means from it in place and the inverse engine
//! accumulates region means into it, both through the region operations
//! defined here.

use ndarray::{Array2, ArrayView2, ArrayViewMut2, s};
use num_traits::ToPrimitive;

use crate::io::error::{BigPixelsError, Result, computation_error};
use crate::spatial::Region;

/// Rectangular grid of finite real samples, indexed `[row, column]`
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    samples: Array2<f64>,
}

impl Grid {
    /// A `height` x `width` grid of zeros
    pub fn zeros(height: usize, width: usize) -> Self {
        Self {
            samples: Array2::zeros((height, width)),
        }
    }

    /// Build a grid from rows of numeric samples
    ///
    /// Every row must have the same length as the first. An empty slice
    /// yields a 0 x 0 grid, and rows that are all empty yield a grid of
    /// width 0; both are legal and transform to nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Rows have differing lengths (`InvalidInputShape`)
    /// - A sample cannot be represented as a finite `f64` (`InvalidSourceData`)
    pub fn from_rows<R, T>(rows: &[R]) -> Result<Self>
    where
        R: AsRef<[T]>,
        T: ToPrimitive,
    {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        let mut values = Vec::with_capacity(height * width);

        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(BigPixelsError::InvalidInputShape {
                    reason: format!(
                        "row {row_index} has {} samples but row 0 has {width}",
                        row.len()
                    ),
                });
            }
            for (column_index, sample) in row.iter().enumerate() {
                let value = sample
                    .to_f64()
                    .filter(|value| value.is_finite())
                    .ok_or_else(|| BigPixelsError::InvalidSourceData {
                        reason: format!(
                            "sample at row {row_index}, column {column_index} is not a finite number"
                        ),
                    })?;
                values.push(value);
            }
        }

        let samples = Array2::from_shape_vec((height, width), values).map_err(|e| {
            BigPixelsError::InvalidInputShape {
                reason: e.to_string(),
            }
        })?;
        Ok(Self { samples })
    }

    /// Wrap an existing array
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if any sample is not finite
    pub fn from_array(samples: Array2<f64>) -> Result<Self> {
        if let Some(((row, column), _)) = samples.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(BigPixelsError::InvalidSourceData {
                reason: format!("sample at row {row}, column {column} is not a finite number"),
            });
        }
        Ok(Self { samples })
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.samples.nrows()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.samples.ncols()
    }

    /// Whether the grid holds no samples at all
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Borrow the underlying array
    pub const fn samples(&self) -> &Array2<f64> {
        &self.samples
    }

    /// Take the underlying array
    pub fn into_samples(self) -> Array2<f64> {
        self.samples
    }

    /// Sample at `[row, column]`, if inside the grid
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.samples.get([row, column]).copied()
    }

    /// All samples in row-major order
    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }

    /// Copy the samples out as a vector of rows
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.samples
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect()
    }

    /// Arithmetic mean of the samples currently inside `region`
    ///
    /// # Errors
    ///
    /// Returns an error if the region is empty or extends past the grid
    pub fn region_mean(&self, region: &Region) -> Result<f64> {
        if region.pixel_count() == 0 {
            return Err(computation_error(
                "region mean",
                &format!("{region:?} covers no samples"),
            ));
        }
        let footprint = self.footprint(region)?;
        Ok(footprint.sum() / region.pixel_count() as f64)
    }

    /// Add `delta` to every sample inside `region`
    ///
    /// # Errors
    ///
    /// Returns an error if the region extends past the grid
    pub fn offset_region(&mut self, region: &Region, delta: f64) -> Result<()> {
        let mut footprint = self.footprint_mut(region)?;
        footprint += delta;
        Ok(())
    }

    /// Largest absolute sample-wise difference from `other`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInputShape` if the grids have different dimensions
    pub fn max_abs_difference(&self, other: &Self) -> Result<f64> {
        if self.samples.dim() != other.samples.dim() {
            return Err(BigPixelsError::InvalidInputShape {
                reason: format!(
                    "cannot compare a {}x{} grid with a {}x{} grid",
                    self.height(),
                    self.width(),
                    other.height(),
                    other.width()
                ),
            });
        }
        Ok(self
            .samples
            .iter()
            .zip(other.samples.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max))
    }

    fn check_bounds(&self, region: &Region) -> Result<()> {
        if region.top_row + region.height > self.height()
            || region.left_column + region.width > self.width()
        {
            return Err(computation_error(
                "region access",
                &format!(
                    "{region:?} extends past a {}x{} grid",
                    self.height(),
                    self.width()
                ),
            ));
        }
        Ok(())
    }

    fn footprint(&self, region: &Region) -> Result<ArrayView2<'_, f64>> {
        self.check_bounds(region)?;
        Ok(self.samples.slice(s![region.rows(), region.columns()]))
    }

    fn footprint_mut(&mut self, region: &Region) -> Result<ArrayViewMut2<'_, f64>> {
        self.check_bounds(region)?;
        Ok(self.samples.slice_mut(s![region.rows(), region.columns()]))
    }
}
