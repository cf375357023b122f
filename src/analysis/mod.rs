//! Statistical analysis of numeric streams

/// Quantized frequency tables, breakpoints and the distribution summary
pub mod distribution;
/// Ideal code lengths and entropy-coding cost
pub mod entropy;
