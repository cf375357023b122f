//! Inverse transform: rebuild a grid from its stored means
//!
//! Replays the forward traversal over a grid of zeros. Each level's stored
//! means are read back in the order they were written, the withheld last
//! mean of every group is recovered by conservation, and each resolved mean
//! is added across its region's footprint.

use std::slice;

use crate::algorithm::conservation::{stored_mean_count, withheld_mean};
use crate::algorithm::forward::Transformed;
use crate::algorithm::subdivision::Subdivider;
use crate::io::error::{Result, malformed};
use crate::spatial::{Grid, Region};

// After a parent's mean is removed its residuals sum to zero, so the
// children's totals must as well.
const RESIDUAL_PARENT_TOTAL: f64 = 0.0;

/// Reconstruct the grid a [`Transformed`] record was produced from
///
/// # Errors
///
/// Returns `MalformedCoefficients` if a level holds too few or too many
/// values for the record's dimensions
pub fn inverse(transformed: &Transformed) -> Result<Grid> {
    inverse_progressive(transformed, |_, _| {})
}

/// [`inverse`], calling `on_level` each time a depth is fully applied
///
/// After depth `d` the grid holds every sample's region mean at that
/// resolution, a coarse-to-fine sequence ending in the reconstruction.
///
/// # Errors
///
/// Returns `MalformedCoefficients` if a level holds too few or too many
/// values for the record's dimensions
pub fn inverse_progressive<F>(transformed: &Transformed, mut on_level: F) -> Result<Grid>
where
    F: FnMut(usize, &Grid),
{
    let mut grid = Grid::zeros(transformed.height, transformed.width);
    let mut cursors: Vec<slice::Iter<'_, f64>> =
        transformed.levels().iter().map(|level| level.iter()).collect();
    let mut current_depth: Option<usize> = None;

    Subdivider::new(transformed.height, transformed.width).traverse(|siblings| {
        let Some(first) = siblings.first() else {
            return Ok(());
        };
        let depth = first.depth;

        if let Some(previous) = current_depth.filter(|&previous| previous != depth) {
            on_level(previous, &grid);
        }
        current_depth = Some(depth);

        let cursor = cursors
            .get_mut(depth)
            .ok_or_else(|| malformed(depth, &"no values stored for this level"))?;
        let means = resolve_group(siblings, cursor, depth)?;

        for (region, mean) in siblings.iter().zip(means) {
            grid.offset_region(region, mean)?;
        }
        Ok(())
    })?;

    if let Some(last) = current_depth {
        on_level(last, &grid);
    }

    if let Some((level, cursor)) = cursors
        .iter()
        .enumerate()
        .find(|(_, cursor)| !cursor.as_slice().is_empty())
    {
        return Err(malformed(
            level,
            &format!(
                "{} stored values were never used",
                cursor.as_slice().len()
            ),
        ));
    }

    Ok(grid)
}

// Means for every sibling, reading stored ones and deriving the withheld one
fn resolve_group(
    siblings: &[Region],
    cursor: &mut slice::Iter<'_, f64>,
    depth: usize,
) -> Result<Vec<f64>> {
    let stored = stored_mean_count(siblings.len());
    let mut means = Vec::with_capacity(siblings.len());

    for _ in 0..stored {
        let mean = cursor
            .next()
            .ok_or_else(|| malformed(depth, &"ran out of stored values"))?;
        means.push(*mean);
    }

    if let Some(withheld) = siblings.get(stored) {
        let known = siblings
            .iter()
            .zip(&means)
            .map(|(region, &mean)| (region.pixel_count(), mean));
        let mean = withheld_mean(RESIDUAL_PARENT_TOTAL, known, withheld.pixel_count());
        means.push(mean);
    }

    Ok(means)
}
