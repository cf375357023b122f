//! Plain-text report of a transform run

use std::fmt;
use std::path::{Path, PathBuf};

use crate::algorithm::forward::Transformed;
use crate::analysis::distribution::Distribution;
use crate::io::error::{BigPixelsError, Result};

/// Everything measured about one transformed grid
#[derive(Debug, Clone)]
pub struct TransformReport {
    /// Where the samples came from
    pub source: PathBuf,
    /// Grid rows
    pub height: usize,
    /// Grid columns
    pub width: usize,
    /// Levels holding coefficients
    pub depth_count: usize,
    /// Distribution of the untransformed samples
    pub samples: Distribution,
    /// Distribution of every stored coefficient
    pub coefficients: Distribution,
    /// Distribution of each level's coefficients, if requested
    pub levels: Vec<Distribution>,
    /// Largest residual magnitude left in the grid by the forward transform
    pub max_residual: f64,
    /// Largest reconstruction error
    pub round_trip_error: f64,
}

impl TransformReport {
    /// Analyse a completed transform
    ///
    /// `original` is the untransformed grid's samples and `residuals` what
    /// the forward transform left behind.
    ///
    /// # Errors
    ///
    /// Returns an error if any analysed value is not finite
    pub fn new(
        source: &Path,
        original: &[f64],
        residuals: &[f64],
        transformed: &Transformed,
        per_level: bool,
        round_trip_error: f64,
    ) -> Result<Self> {
        let levels = if per_level {
            transformed
                .levels()
                .iter()
                .map(|level| Distribution::analyze(level))
                .collect::<Result<Vec<_>>>()?
        } else {
            Vec::new()
        };

        Ok(Self {
            source: source.to_path_buf(),
            height: transformed.height,
            width: transformed.width,
            depth_count: transformed.depth_count(),
            samples: Distribution::analyze(original)?,
            coefficients: Distribution::analyze(&transformed.coefficients())?,
            levels,
            max_residual: residuals.iter().fold(0.0, |max, r| r.abs().max(max)),
            round_trip_error,
        })
    }

    /// Write the rendered report to `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or the file can't be written
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| BigPixelsError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
        std::fs::write(path, self.to_string()).map_err(|e| BigPixelsError::FileSystem {
            path: path.to_path_buf(),
            operation: "write report",
            source: e,
        })
    }
}

fn write_distribution(f: &mut fmt::Formatter<'_>, title: &str, d: &Distribution) -> fmt::Result {
    writeln!(f, "[{title}]")?;
    writeln!(f, "values:         {}", d.input_count)?;
    writeln!(f, "distinct:       {}", d.distinct_count)?;
    writeln!(f, "mean:           {:.5}", d.mean)?;
    writeln!(f, "ideal bits:     {:.3}", d.total_bits)?;
    writeln!(f, "bits per value: {:.4}", d.bits_per_value())?;

    if !d.breakpoints.is_empty() {
        write!(f, "breakpoints:   ")?;
        for breakpoint in &d.breakpoints {
            write!(f, " {:.5}", breakpoint.value)?;
        }
        writeln!(f)?;
    }
    writeln!(f)
}

impl fmt::Display for TransformReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "source:           {}", self.source.display())?;
        writeln!(f, "dimensions:       {}x{}", self.height, self.width)?;
        writeln!(f, "levels:           {}", self.depth_count)?;
        writeln!(f, "max residual:     {:e}", self.max_residual)?;
        writeln!(f, "round-trip error: {:e}", self.round_trip_error)?;
        writeln!(f)?;

        write_distribution(f, "samples", &self.samples)?;
        write_distribution(f, "coefficients", &self.coefficients)?;
        for (depth, level) in self.levels.iter().enumerate() {
            write_distribution(f, &format!("level {depth}"), level)?;
        }
        Ok(())
    }
}
