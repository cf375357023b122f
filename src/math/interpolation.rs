//! Straight-line interpolation through two points
//!
//! Strip boundaries and distribution breakpoints are both "evenly spaced
//! points between two ends", so both go through [`Linear`].

use num_traits::Float;
use std::error::Error;
use std::fmt;

/// Error type for interpolation operations
#[derive(Debug, Clone)]
pub struct InterpolationError {
    message: String,
}

impl fmt::Display for InterpolationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Interpolation error: {}", self.message)
    }
}

impl Error for InterpolationError {}

impl InterpolationError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The line through `(x1, y1)` and `(x2, y2)`
///
/// Evaluates as `y1 + (x - x1) * slope`, so `evaluate(x1)` is exactly `y1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Linear<T> {
    x1: T,
    y1: T,
    slope: T,
}

impl<T: Float> Linear<T> {
    /// Create the line through two points
    ///
    /// # Errors
    ///
    /// Returns an error if `x1 == x2` or any coordinate is not finite
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Result<Self, InterpolationError> {
        if !(x1.is_finite() && y1.is_finite() && x2.is_finite() && y2.is_finite()) {
            return Err(InterpolationError::new("end points must be finite"));
        }
        if x1 == x2 {
            return Err(InterpolationError::new(
                "end points must have distinct x values",
            ));
        }

        Ok(Self {
            x1,
            y1,
            slope: (y2 - y1) / (x2 - x1),
        })
    }

    /// Evaluate the line at `x`
    pub fn evaluate(&self, x: T) -> T {
        (x - self.x1).mul_add(self.slope, self.y1)
    }

    /// Rate of change of `y` per unit of `x`
    pub const fn slope(&self) -> T {
        self.slope
    }
}

/// `count + 1` evenly spaced points from `start` to `stop`, inclusive
///
/// Point `i` is the line through `(0, start)` and `(count, stop)` evaluated
/// at `i`, so the first and last points are `start` and `stop` (up to
/// floating point rounding of the last).
///
/// # Errors
///
/// Returns an error if `count` is zero
pub fn evenly_spaced(start: f64, stop: f64, count: usize) -> Result<Vec<f64>, InterpolationError> {
    let line = Linear::new(0.0, start, count as f64, stop)?;
    Ok((0..=count).map(|i| line.evaluate(i as f64)).collect())
}
