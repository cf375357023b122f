//! Conservation identities shared by subdivision and reconstruction
//!
//! Two quantities are conserved when a region is split: its pixel count,
//! which the children must partition exactly, and its pixel-weighted total,
//! which the children's means must reproduce. The second identity is what
//! lets each sibling group store one mean fewer than it has members.

use crate::io::error::{BigPixelsError, Result};
use crate::spatial::Region;

/// Verify that `children` partition exactly as many pixels as `parent` covers
///
/// # Errors
///
/// Returns `ConservationViolation` when the counts differ
pub fn check_pixel_conservation(parent: &Region, children: &[Region]) -> Result<()> {
    let parent_pixels = parent.pixel_count();
    let child_pixels: usize = children.iter().map(Region::pixel_count).sum();

    if parent_pixels == child_pixels {
        Ok(())
    } else {
        Err(BigPixelsError::ConservationViolation {
            parent: *parent,
            parent_pixels,
            child_pixels,
        })
    }
}

/// Pixel-weighted total of a region whose samples average `mean`
pub fn region_total(pixel_count: usize, mean: f64) -> f64 {
    pixel_count as f64 * mean
}

/// Mean of the one sibling whose value was not stored
///
/// The siblings' totals must add up to `parent_total`, so the withheld
/// sibling carries whatever the known siblings leave over, spread across its
/// own `withheld_pixels`. `known` yields `(pixel_count, mean)` pairs.
///
/// `withheld_pixels` is never zero for regions produced by the subdivider;
/// passing zero yields a non-finite result.
pub fn withheld_mean<I>(parent_total: f64, known: I, withheld_pixels: usize) -> f64
where
    I: IntoIterator<Item = (usize, f64)>,
{
    let known_total: f64 = known
        .into_iter()
        .map(|(pixel_count, mean)| region_total(pixel_count, mean))
        .sum();
    (parent_total - known_total) / withheld_pixels as f64
}

/// How many of a sibling group's means are written out
///
/// All but the last, except that a lone sibling has nothing to be recovered
/// from and is always written.
pub const fn stored_mean_count(sibling_count: usize) -> usize {
    if sibling_count == 1 {
        1
    } else {
        sibling_count.saturating_sub(1)
    }
}
