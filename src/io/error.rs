//! Error types for transform, analysis and file operations

use std::fmt;
use std::path::PathBuf;

use crate::math::interpolation::InterpolationError;
use crate::spatial::Region;

/// Every way a bigpixels operation can fail
#[derive(Debug)]
pub enum BigPixelsError {
    /// An input image could not be opened or decoded
    ImageLoad {
        /// Image that was being read
        path: PathBuf,
        /// Decoder failure
        source: image::ImageError,
    },

    /// Input is not a rectangular grid
    ///
    /// Raised at the boundary for ragged rows or mismatched dimensions,
    /// before any subdivision happens
    InvalidInputShape {
        /// Which rows or dimensions disagree
        reason: String,
    },

    /// Input samples are not finite real numbers
    InvalidSourceData {
        /// Which sample was rejected and why
        reason: String,
    },

    /// A split produced children whose pixel counts don't sum to the parent's
    ///
    /// This is an internal invariant failure and is never retried
    ConservationViolation {
        /// Region that was split
        parent: Region,
        /// Pixel count of the parent
        parent_pixels: usize,
        /// Summed pixel count of the children
        child_pixels: usize,
    },

    /// Coefficient record doesn't match the traversal of its own dimensions
    MalformedCoefficients {
        /// Depth at which the mismatch was found
        level: usize,
        /// Description of the mismatch
        reason: String,
    },

    /// Reconstruction differs from the original beyond tolerance
    RoundTripMismatch {
        /// Largest absolute sample difference found
        max_error: f64,
        /// Allowed absolute difference
        tolerance: f64,
    },

    /// A command-line or caller-supplied value was rejected
    InvalidParameter {
        /// Parameter name as the user knows it
        parameter: &'static str,
        /// Value as supplied
        value: String,
        /// What the value must satisfy
        reason: String,
    },

    /// A rendered image or animation could not be written
    ImageExport {
        /// Destination file
        path: PathBuf,
        /// Encoder failure
        source: image::ImageError,
    },

    /// Reading or writing the file system failed
    FileSystem {
        /// File or directory involved
        path: PathBuf,
        /// What was being attempted, e.g. "write report"
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A numeric helper could not produce a usable result
    Computation {
        /// Helper that failed
        operation: &'static str,
        /// Why it failed
        reason: String,
    },
}

impl fmt::Display for BigPixelsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Cannot read image '{}': {source}", path.display())
            }
            Self::InvalidInputShape { reason } => {
                write!(f, "Invalid input shape: {reason}")
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid sample data: {reason}")
            }
            Self::ConservationViolation {
                parent,
                parent_pixels,
                child_pixels,
            } => {
                write!(
                    f,
                    "Pixel count mismatch splitting {}x{} region at ({}, {}) depth {}: parent has {parent_pixels}, children have {child_pixels}",
                    parent.height, parent.width, parent.top_row, parent.left_column, parent.depth
                )
            }
            Self::MalformedCoefficients { level, reason } => {
                write!(f, "Malformed coefficients at level {level}: {reason}")
            }
            Self::RoundTripMismatch {
                max_error,
                tolerance,
            } => {
                write!(
                    f,
                    "Reconstruction differs from original by {max_error:e} (tolerance {tolerance:e})"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Rejected {parameter} '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(f, "Cannot write image '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(f, "Cannot {operation} '{}': {source}", path.display())
            }
            Self::Computation { operation, reason } => {
                write!(f, "{operation} failed: {reason}")
            }
        }
    }
}

impl std::error::Error for BigPixelsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, BigPixelsError>;

impl From<std::io::Error> for BigPixelsError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::new(),
            operation: "access",
            source: err,
        }
    }
}

impl From<InterpolationError> for BigPixelsError {
    fn from(err: InterpolationError) -> Self {
        computation_error("linear interpolation", &err)
    }
}

/// Build an `InvalidParameter` error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> BigPixelsError {
    BigPixelsError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Build a `Computation` error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> BigPixelsError {
    BigPixelsError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Build a `MalformedCoefficients` error
pub fn malformed(level: usize, reason: &impl ToString) -> BigPixelsError {
    BigPixelsError::MalformedCoefficients {
        level,
        reason: reason.to_string(),
    }
}
