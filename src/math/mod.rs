//! Mathematical utilities shared by the subdivider and the analyzer

/// Linear interpolation for evenly spaced boundaries and rank positions
pub mod interpolation;
