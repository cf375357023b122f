//! Breadth-first subdivision of a grid into a tree of regions
//!
//! Both transform directions drive their work from this one traversal, so
//! they agree on every region boundary and on the order in which sibling
//! groups appear. The traversal keeps an explicit FIFO of pending sibling
//! groups: every group at depth `d` is visited before any group at depth
//! `d + 1`, and memory is bounded by the pending groups, not by tree depth.

use std::collections::VecDeque;

use crate::algorithm::conservation::check_pixel_conservation;
use crate::io::configuration::STRIP_ASPECT_RATIO;
use crate::io::error::Result;
use crate::math::interpolation::evenly_spaced;
use crate::spatial::Region;

/// How a region is divided into children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitPolicy {
    /// Tall region: `count` full-width strips stacked top to bottom
    HorizontalStrips {
        /// Number of strips, `height / width`
        count: usize,
    },
    /// Wide region: `count` full-height strips left to right
    VerticalStrips {
        /// Number of strips, `width / height`
        count: usize,
    },
    /// Single sample (or nothing at all); subdivision stops here
    Leaf,
    /// Near-square region: four quadrants
    Quadrants,
}

impl SplitPolicy {
    /// Choose the split for `region`
    ///
    /// Checked in priority order: tall strips, wide strips, leaf, quadrants.
    pub const fn for_region(region: &Region) -> Self {
        let Region { height, width, .. } = *region;

        if height == 0 || width == 0 {
            Self::Leaf
        } else if height >= STRIP_ASPECT_RATIO * width {
            Self::HorizontalStrips {
                count: height / width,
            }
        } else if width >= STRIP_ASPECT_RATIO * height {
            Self::VerticalStrips {
                count: width / height,
            }
        } else if region.is_unit() {
            Self::Leaf
        } else {
            Self::Quadrants
        }
    }
}

/// `count + 1` integer cut points evenly spread over `origin..origin + extent`
///
/// Each point is rounded to the nearest integer on its own, so the first is
/// `origin`, the last is `origin + extent`, and strip `i` runs from point
/// `i` to point `i + 1`.
///
/// # Errors
///
/// Returns an error if `count` is zero
pub fn strip_boundaries(origin: usize, extent: usize, count: usize) -> Result<Vec<usize>> {
    let points = evenly_spaced(origin as f64, (origin + extent) as f64, count)?;
    Ok(points.into_iter().map(|point| point.round() as usize).collect())
}

/// Children of `region` in their fixed sibling order
///
/// Leaves have no children. Every non-empty split is checked for pixel
/// conservation before it is returned.
///
/// # Errors
///
/// Returns `ConservationViolation` if the children don't cover exactly the
/// parent's pixel count, or a computation error if strip boundaries can't
/// be produced
pub fn split(region: &Region) -> Result<Vec<Region>> {
    let depth = region.depth + 1;

    let children: Vec<Region> = match SplitPolicy::for_region(region) {
        SplitPolicy::HorizontalStrips { count } => {
            strip_boundaries(region.top_row, region.height, count)?
                .windows(2)
                .filter_map(|pair| match *pair {
                    [top_row, stop] => Some(Region {
                        depth,
                        top_row,
                        left_column: region.left_column,
                        height: stop.saturating_sub(top_row),
                        width: region.width,
                    }),
                    _ => None,
                })
                .collect()
        }
        SplitPolicy::VerticalStrips { count } => {
            strip_boundaries(region.left_column, region.width, count)?
                .windows(2)
                .filter_map(|pair| match *pair {
                    [left_column, stop] => Some(Region {
                        depth,
                        top_row: region.top_row,
                        left_column,
                        height: region.height,
                        width: stop.saturating_sub(left_column),
                    }),
                    _ => None,
                })
                .collect()
        }
        SplitPolicy::Leaf => Vec::new(),
        SplitPolicy::Quadrants => quadrants(region, depth),
    };

    if !children.is_empty() {
        check_pixel_conservation(region, &children)?;
    }
    Ok(children)
}

// Top-left, bottom-left, top-right, bottom-right
fn quadrants(region: &Region, depth: usize) -> Vec<Region> {
    let left_width = region.width / 2;
    let right_width = region.width - left_width;
    let top_height = region.height / 2;
    let bottom_height = region.height - top_height;
    let right_column = region.left_column + left_width;
    let bottom_row = region.top_row + top_height;

    let quadrant = |top_row, height, left_column, width| Region {
        depth,
        top_row,
        left_column,
        height,
        width,
    };

    vec![
        quadrant(region.top_row, top_height, region.left_column, left_width),
        quadrant(bottom_row, bottom_height, region.left_column, left_width),
        quadrant(region.top_row, top_height, right_column, right_width),
        quadrant(bottom_row, bottom_height, right_column, right_width),
    ]
}

/// Shape of a completed traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalSummary {
    /// Deepest level visited
    pub max_depth: usize,
    /// Number of sibling groups visited
    pub sibling_groups: usize,
    /// Number of sibling groups with more than one member
    pub multi_member_groups: usize,
    /// Number of regions visited, leaves included
    pub regions: usize,
}

impl TraversalSummary {
    fn record(&mut self, siblings: &[Region]) {
        self.sibling_groups += 1;
        self.regions += siblings.len();
        if siblings.len() > 1 {
            self.multi_member_groups += 1;
        }
        if let Some(first) = siblings.first() {
            self.max_depth = self.max_depth.max(first.depth);
        }
    }

    /// Number of distinct depths visited
    pub const fn level_count(&self) -> usize {
        if self.regions == 0 {
            0
        } else {
            self.max_depth + 1
        }
    }

    /// Number of means a forward transform stores for this tree
    ///
    /// Every group of two or more withholds exactly one mean.
    pub const fn stored_value_count(&self) -> usize {
        self.regions - self.multi_member_groups
    }
}

/// Level-order walker over the subdivision tree of a `height` x `width` grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subdivider {
    height: usize,
    width: usize,
}

impl Subdivider {
    /// Subdivider for a grid of the given dimensions
    pub const fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    /// Call `visit` once per sibling group, in breadth-first order
    ///
    /// The first group is the singleton root covering the whole grid. A grid
    /// with zero height or width produces no groups at all. `visit` may
    /// abort the traversal by returning an error.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by `visit` or by a split
    pub fn traverse<F>(&self, mut visit: F) -> Result<TraversalSummary>
    where
        F: FnMut(&[Region]) -> Result<()>,
    {
        let mut summary = TraversalSummary::default();
        if self.height == 0 || self.width == 0 {
            return Ok(summary);
        }

        let mut pending = VecDeque::from([vec![Region::root(self.height, self.width)]]);

        while let Some(siblings) = pending.pop_front() {
            summary.record(&siblings);
            visit(&siblings)?;

            for region in &siblings {
                let children = split(region)?;
                if !children.is_empty() {
                    pending.push_back(children);
                }
            }
        }

        Ok(summary)
    }

    /// Every sibling group in visiting order
    ///
    /// # Errors
    ///
    /// Returns an error if any split fails its conservation check
    pub fn sibling_groups(&self) -> Result<Vec<Vec<Region>>> {
        let mut groups = Vec::new();
        self.traverse(|siblings| {
            groups.push(siblings.to_vec());
            Ok(())
        })?;
        Ok(groups)
    }
}
