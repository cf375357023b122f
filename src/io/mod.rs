//! Input/output: errors, configuration, images, reports and the command line

/// Command-line parsing and batch file processing
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Luminance loading and PNG rendering
pub mod image;
/// Progress bars for batch runs
pub mod progress;
/// Plain-text transform reports
pub mod report;
/// Animated progressive reconstruction
pub mod visualization;
