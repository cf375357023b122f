//! Luminance acquisition from image files and PNG rendering of grids

use std::path::Path;

use image::{GrayImage, Luma};

use crate::io::configuration::MAX_LUMINANCE;
use crate::io::error::{BigPixelsError, Result};
use crate::spatial::Grid;

/// Load an image and reduce it to a grid of luminance samples in `0..=255`
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_luminance<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let path_buf = path.as_ref().to_path_buf();
    let img = image::open(&path_buf).map_err(|e| BigPixelsError::ImageLoad {
        path: path_buf,
        source: e,
    })?;
    luminance_grid(&img.to_luma8())
}

/// Convert an 8-bit greyscale image into a grid
///
/// # Errors
///
/// Returns an error if the pixel rows don't form a rectangle, which a
/// decoded image never produces
pub fn luminance_grid(luma: &GrayImage) -> Result<Grid> {
    let rows: Vec<Vec<u8>> = luma
        .rows()
        .map(|row| row.map(|pixel| pixel.0[0]).collect())
        .collect();
    Grid::from_rows(&rows)
}

/// Render a grid as 8-bit greyscale, rounding and clamping to `0..=255`
pub fn render_luminance(grid: &Grid) -> GrayImage {
    let mut img = GrayImage::new(grid.width() as u32, grid.height() as u32);

    for ((row, col), &sample) in grid.samples().indexed_iter() {
        let level = sample.round().clamp(0.0, MAX_LUMINANCE) as u8;
        img.put_pixel(col as u32, row as u32, Luma([level]));
    }

    img
}

/// Write a grid to disk as a greyscale PNG
///
/// # Errors
///
/// Returns an error if:
/// - The grid has no samples
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(grid: &Grid, output_path: &Path) -> Result<()> {
    if grid.is_empty() {
        return Err(BigPixelsError::InvalidSourceData {
            reason: "cannot export an empty grid".to_string(),
        });
    }

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| BigPixelsError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    render_luminance(grid)
        .save(output_path)
        .map_err(|e| BigPixelsError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
