//! Rectangular regions of the sample grid

use std::ops::Range;

/// Axis-aligned rectangle of the grid at some depth of the subdivision tree
///
/// Regions are created by the subdivider and never mutated. The footprint is
/// rows `top_row..top_row + height` and columns
/// `left_column..left_column + width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    /// Distance from the root region (the whole grid is depth 0)
    pub depth: usize,
    /// First row covered
    pub top_row: usize,
    /// First column covered
    pub left_column: usize,
    /// Number of rows covered
    pub height: usize,
    /// Number of columns covered
    pub width: usize,
}

impl Region {
    /// The region covering a whole `height` x `width` grid
    pub const fn root(height: usize, width: usize) -> Self {
        Self {
            depth: 0,
            top_row: 0,
            left_column: 0,
            height,
            width,
        }
    }

    /// Number of samples covered
    pub const fn pixel_count(&self) -> usize {
        self.height * self.width
    }

    /// Row indices covered
    pub const fn rows(&self) -> Range<usize> {
        self.top_row..self.top_row + self.height
    }

    /// Column indices covered
    pub const fn columns(&self) -> Range<usize> {
        self.left_column..self.left_column + self.width
    }

    /// Whether this is a single sample, which terminates subdivision
    pub const fn is_unit(&self) -> bool {
        self.height == 1 && self.width == 1
    }

    /// Whether the two footprints share at least one sample
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.top_row < other.top_row + other.height
            && other.top_row < self.top_row + self.height
            && self.left_column < other.left_column + other.width
            && other.left_column < self.left_column + self.width
    }

    /// Whether `other` lies entirely inside this footprint
    pub const fn contains(&self, other: &Self) -> bool {
        other.top_row >= self.top_row
            && other.top_row + other.height <= self.top_row + self.height
            && other.left_column >= self.left_column
            && other.left_column + other.width <= self.left_column + self.width
    }
}
