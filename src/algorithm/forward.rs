//! Forward transform: region means out, residuals left behind
//!
//! Each sibling group is visited in breadth-first order. Every sibling's
//! mean is measured on the grid as the previous levels left it, then
//! subtracted in place, so deeper levels see only what coarser levels could
//! not explain. Once the traversal reaches the 1x1 leaves, the grid holds
//! nothing but rounding noise and the means hold the whole signal.

use crate::algorithm::conservation::stored_mean_count;
use crate::algorithm::subdivision::{Subdivider, TraversalSummary};
use crate::io::error::{Result, computation_error};
use crate::spatial::Grid;

/// Coefficients produced by the forward transform
///
/// `values_by_level[d]` concatenates, in visiting order, the stored means of
/// every sibling group at depth `d`. Each group of two or more members
/// leaves out its last mean, which the inverse recovers by conservation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transformed {
    /// Rows in the source grid
    pub height: usize,
    /// Columns in the source grid
    pub width: usize,
    /// Stored means, indexed by depth
    pub values_by_level: Vec<Vec<f64>>,
}

impl Transformed {
    /// An empty record for a grid of the given dimensions
    pub const fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            values_by_level: Vec::new(),
        }
    }

    /// Stored means of every level, coarsest first
    pub fn levels(&self) -> &[Vec<f64>] {
        &self.values_by_level
    }

    /// Stored means at `depth`
    pub fn level(&self, depth: usize) -> Option<&[f64]> {
        self.values_by_level.get(depth).map(Vec::as_slice)
    }

    /// Number of levels holding coefficients
    pub fn depth_count(&self) -> usize {
        self.values_by_level.len()
    }

    /// Total number of stored means across all levels
    pub fn coefficient_count(&self) -> usize {
        self.values_by_level.iter().map(Vec::len).sum()
    }

    /// Every stored mean, level by level
    pub fn coefficients(&self) -> Vec<f64> {
        self.values_by_level.iter().flatten().copied().collect()
    }

    fn append(&mut self, depth: usize, means: &[f64]) -> Result<()> {
        if self.values_by_level.len() <= depth {
            self.values_by_level.resize_with(depth + 1, Vec::new);
        }
        self.values_by_level
            .get_mut(depth)
            .ok_or_else(|| computation_error("coefficient storage", &format!("no level {depth}")))?
            .extend_from_slice(means);
        Ok(())
    }
}

/// Transform `grid` in place, returning the stored means
///
/// The grid is consumed as scratch space and ends up holding residuals;
/// keep a copy if the original is needed. Zero-sized grids produce an empty
/// record.
///
/// # Errors
///
/// Returns an error if subdivision violates pixel conservation
pub fn forward(grid: &mut Grid) -> Result<Transformed> {
    forward_with_summary(grid).map(|(transformed, _)| transformed)
}

/// [`forward`], also reporting the shape of the subdivision tree
///
/// # Errors
///
/// Returns an error if subdivision violates pixel conservation
pub fn forward_with_summary(grid: &mut Grid) -> Result<(Transformed, TraversalSummary)> {
    let mut transformed = Transformed::new(grid.height(), grid.width());
    let subdivider = Subdivider::new(grid.height(), grid.width());

    let summary = subdivider.traverse(|siblings| {
        let Some(first) = siblings.first() else {
            return Ok(());
        };

        let mut means = Vec::with_capacity(siblings.len());
        for region in siblings {
            let mean = grid.region_mean(region)?;
            grid.offset_region(region, -mean)?;
            means.push(mean);
        }

        let stored = stored_mean_count(siblings.len());
        transformed.append(first.depth, means.get(..stored).unwrap_or(&means))
    })?;

    Ok((transformed, summary))
}
