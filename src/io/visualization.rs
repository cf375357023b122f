//! Animated GIF of progressive, level-by-level reconstruction
//!
//! Each frame shows the grid after the inverse transform has applied every
//! level up to some depth: first one flat mean, then ever smaller blocks,
//! until the last frame is the full reconstruction.

use std::path::Path;

use image::{Delay, DynamicImage, Frame};

use crate::algorithm::forward::Transformed;
use crate::algorithm::inverse::inverse_progressive;
use crate::io::configuration::{FINAL_FRAME_HOLD, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{BigPixelsError, Result};
use crate::io::image::render_luminance;
use crate::spatial::Grid;

/// One captured reconstruction stage
#[derive(Debug, Clone)]
pub struct LevelFrame {
    /// Deepest level applied when this frame was captured
    pub depth: usize,
    /// Rendered luminance at that stage
    pub image: image::GrayImage,
}

/// Captures the intermediate grids of an inverse transform
#[derive(Debug, Clone, Default)]
pub struct LevelCapture {
    frames: Vec<LevelFrame>,
}

impl LevelCapture {
    /// Create an empty capture
    pub const fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Reconstruct `transformed`, capturing a frame per level
    ///
    /// Returns the capture and the final reconstructed grid.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is malformed
    pub fn from_transformed(transformed: &Transformed) -> Result<(Self, Grid)> {
        let mut capture = Self::new();
        let grid = inverse_progressive(transformed, |depth, stage| capture.record(depth, stage))?;
        Ok((capture, grid))
    }

    /// Render and keep the grid as it stands after `depth`
    pub fn record(&mut self, depth: usize, grid: &Grid) {
        self.frames.push(LevelFrame {
            depth,
            image: render_luminance(grid),
        });
    }

    /// Captured frames, coarsest first
    pub fn frames(&self) -> &[LevelFrame] {
        &self.frames
    }

    /// Number of captured frames
    pub const fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Export the captured frames as an animated GIF
    ///
    /// Delays shorter than viewers reliably honour are raised to
    /// `VIEWER_MIN_FRAME_DELAY_MS`. The final frame is held longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.frames.is_empty() {
            return Err(BigPixelsError::InvalidSourceData {
                reason: "No reconstruction levels captured for visualization".to_string(),
            });
        }

        let delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let last = self.frames.len() - 1;
        let frames = self.frames.iter().enumerate().map(|(index, level)| {
            let hold = if index == last { FINAL_FRAME_HOLD } else { 1 };
            let rgba = DynamicImage::ImageLuma8(level.image.clone()).to_rgba8();
            Frame::from_parts(
                rgba,
                0,
                0,
                Delay::from_numer_denom_ms(delay_ms * hold, 1),
            )
        });

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| BigPixelsError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| BigPixelsError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| BigPixelsError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }
}
