//! Multiresolution mean/residual transform with entropy cost analysis
//!
//! A grid of samples is subdivided breadth-first into ever smaller regions.
//! Each region's mean is recorded and subtracted, so the grid becomes a
//! hierarchy of block averages that can be reassembled exactly, one value
//! per sibling group cheaper than storing every mean. The analyzer measures
//! the ideal entropy-coding cost of the resulting coefficient streams.

#![deny(unsafe_code)]

/// Subdivision, forward transform and reconstruction
pub mod algorithm;
/// Distribution and entropy-cost analysis of numeric streams
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Mathematical utilities for interpolation
pub mod math;
/// Sample grid and region descriptors
pub mod spatial;

pub use algorithm::{Transformed, forward, inverse};
pub use analysis::distribution::Distribution;
pub use io::error::{BigPixelsError, Result};
pub use spatial::{Grid, Region};
