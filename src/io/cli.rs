//! Command-line interface for batch transforming PNG files

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::algorithm::forward::forward;
use crate::algorithm::inverse::inverse;
use crate::io::configuration::{
    GIF_FRAME_DELAY_MS, LEVELS_SUFFIX, REPORT_EXTENSION, REPORT_SUFFIX, RESTORED_SUFFIX,
    ROUND_TRIP_TOLERANCE,
};
use crate::io::error::{BigPixelsError, Result, invalid_parameter};
use crate::io::image::{export_grid_as_png, load_luminance};
use crate::io::progress::{ProgressManager, Stage};
use crate::io::report::TransformReport;
use crate::io::visualization::LevelCapture;
use crate::spatial::Grid;

/// Command-line arguments for the transform tool
#[derive(Parser)]
#[command(
    name = "bigpixels",
    author,
    version,
    about = "Decompose images into a hierarchy of block means and measure their coding cost"
)]
// Each output is an independent opt-in switch
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// PNG image, or a directory whose PNG images are all processed
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Hide progress bars and notices
    #[arg(short, long)]
    pub quiet: bool,

    /// Reprocess images that already have a report
    #[arg(short, long)]
    pub no_skip: bool,

    /// Also write the reconstructed image as <input>_restored.png
    #[arg(short = 'o', long)]
    pub restored: bool,

    /// Also write the level-by-level reconstruction as <input>_levels.gif
    #[arg(short, long)]
    pub visualize: bool,

    /// Include a distribution for every level in the report
    #[arg(short, long)]
    pub levels: bool,
}

impl Cli {
    /// Whether images with an existing report are left alone
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Whether progress bars are drawn
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Runs the transform pipeline over every image the command line names
pub struct FileProcessor {
    cli: Cli,
    progress: Option<ProgressManager>,
}

impl FileProcessor {
    /// Processor for the given arguments
    pub fn new(cli: Cli) -> Self {
        let progress = cli.should_show_progress().then(ProgressManager::new);
        Self { cli, progress }
    }

    /// Transform, verify and report on every selected image in order
    ///
    /// Stops at the first image that fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a PNG nor a directory, or
    /// if any image fails to load, transform, verify or write
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;
        if files.is_empty() {
            return Ok(());
        }

        if let Some(progress) = self.progress.as_mut() {
            progress.initialize(files.len());
        }
        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }
        if let Some(progress) = &self.progress {
            progress.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;

        let candidates = if target.is_file() {
            if !is_png(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"target file must be a PNG image",
                ));
            }
            vec![target.clone()]
        } else if target.is_dir() {
            let entries = std::fs::read_dir(target).map_err(|e| BigPixelsError::FileSystem {
                path: target.clone(),
                operation: "read directory",
                source: e,
            })?;
            let mut images = Vec::new();
            for entry in entries {
                let path = entry
                    .map_err(|e| BigPixelsError::FileSystem {
                        path: target.clone(),
                        operation: "read directory entry",
                        source: e,
                    })?
                    .path();
                if is_png(&path) && !is_derived_output(&path) {
                    images.push(path);
                }
            }
            images.sort();
            images
        } else {
            return Err(invalid_parameter(
                "target",
                &target.display(),
                &"target must be a PNG file or directory",
            ));
        };

        Ok(candidates
            .into_iter()
            .filter(|path| self.needs_processing(path))
            .collect())
    }

    fn needs_processing(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() || !report_path(input_path).exists() {
            return true;
        }

        // Notices share stderr with the progress bars
        #[allow(clippy::print_stderr)]
        if !self.cli.quiet {
            eprintln!("Skipping: {} (report exists)", input_path.display());
        }
        false
    }

    fn enter_stage(&mut self, index: usize, stage: Stage) {
        if let Some(progress) = self.progress.as_mut() {
            progress.enter_stage(index, stage);
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        if let Some(progress) = self.progress.as_mut() {
            progress.start_file(index, input_path);
        }

        let original = load_luminance(input_path)?;

        self.enter_stage(index, Stage::Transforming);
        let mut residuals = original.clone();
        let transformed = forward(&mut residuals)?;

        self.enter_stage(index, Stage::Restoring);
        let (restored, capture) = if self.cli.visualize {
            let (capture, restored) = LevelCapture::from_transformed(&transformed)?;
            (restored, Some(capture))
        } else {
            (inverse(&transformed)?, None)
        };
        let round_trip_error = verify_round_trip(&original, &restored)?;

        self.enter_stage(index, Stage::Analyzing);
        let report = TransformReport::new(
            input_path,
            &original.values(),
            &residuals.values(),
            &transformed,
            self.cli.levels,
            round_trip_error,
        )?;

        self.enter_stage(index, Stage::Writing);
        report.write_to(&report_path(input_path))?;
        if self.cli.restored {
            export_grid_as_png(&restored, &sibling_path(input_path, RESTORED_SUFFIX, "png"))?;
        }
        if let Some(capture) = capture {
            capture.export_gif(
                &sibling_path(input_path, LEVELS_SUFFIX, "gif"),
                GIF_FRAME_DELAY_MS,
            )?;
        }

        if let Some(progress) = self.progress.as_mut() {
            progress.complete_file(index);
        }
        Ok(())
    }
}

/// Compare a reconstruction with its original
///
/// The tolerance scales with the largest sample magnitude, so grids of large
/// values aren't held to a tighter relative bound than small ones.
///
/// # Errors
///
/// Returns `RoundTripMismatch` when the largest difference exceeds the
/// tolerance, or `InvalidInputShape` if the grids differ in size
pub fn verify_round_trip(original: &Grid, restored: &Grid) -> Result<f64> {
    let max_error = original.max_abs_difference(restored)?;
    let scale = original
        .samples()
        .iter()
        .fold(1.0_f64, |scale, sample| scale.max(sample.abs()));
    let tolerance = ROUND_TRIP_TOLERANCE * scale;

    if max_error <= tolerance {
        Ok(max_error)
    } else {
        Err(BigPixelsError::RoundTripMismatch {
            max_error,
            tolerance,
        })
    }
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("png")
}

// Restored images written next to their inputs must not be picked up again
fn is_derived_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(RESTORED_SUFFIX))
}

fn report_path(input_path: &Path) -> PathBuf {
    sibling_path(input_path, REPORT_SUFFIX, REPORT_EXTENSION)
}

fn sibling_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default().to_string_lossy();
    input_path.with_file_name(format!("{stem}{suffix}.{extension}"))
}
