//! Transform constants and runtime configuration defaults

// Analyzer settings
/// Values are rounded to multiples of `1 / QUANTIZATION_SCALE` before counting
pub const QUANTIZATION_SCALE: f64 = 100_000.0;
/// Number of distribution breakpoints, including both extremes
pub const BREAKPOINT_COUNT: usize = 11;

// Aspect ratio at which a region is cut into strips instead of quadrants
/// Minimum long-side to short-side ratio for a strip split
pub const STRIP_ASPECT_RATIO: usize = 2;

/// Largest absolute per-sample error accepted when verifying reconstruction
///
/// Scaled by the largest sample magnitude (at least 1) before comparing
pub const ROUND_TRIP_TOLERANCE: f64 = 1e-9;

// Image rendering
/// Largest representable luminance
pub const MAX_LUMINANCE: f64 = 255.0;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix of the text report written next to each input
pub const REPORT_SUFFIX: &str = "_analysis";
/// Extension of the text report
pub const REPORT_EXTENSION: &str = "txt";
/// Suffix of the rendered reconstruction
pub const RESTORED_SUFFIX: &str = "_restored";
/// Suffix of the progressive reconstruction animation
pub const LEVELS_SUFFIX: &str = "_levels";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 400;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// The last frame is held this many times longer than the others
pub const FINAL_FRAME_HOLD: u32 = 5;
