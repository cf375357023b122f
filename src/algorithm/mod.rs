/// Pixel-count and total conservation shared by both transform directions
pub mod conservation;
/// Forward transform producing per-level means
pub mod forward;
/// Reconstruction from per-level means
pub mod inverse;
/// Breadth-first region subdivision
pub mod subdivision;

pub use forward::{Transformed, forward};
pub use inverse::inverse;
