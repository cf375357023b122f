//! Spatial data structures: the sample grid and the regions that tile it

/// Validated two dimensional sample storage
pub mod grid;
/// Rectangle descriptors produced by subdivision
pub mod region;

pub use grid::Grid;
pub use region::Region;
