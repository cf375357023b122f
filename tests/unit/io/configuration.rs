//! Tests for transform constants and output naming

#[cfg(test)]
mod tests {
    use bigpixels::io::configuration::{
        BREAKPOINT_COUNT, FINAL_FRAME_HOLD, GIF_FRAME_DELAY_MS, LEVELS_SUFFIX,
        MAX_INDIVIDUAL_PROGRESS_BARS, MAX_LUMINANCE, QUANTIZATION_SCALE, REPORT_EXTENSION,
        REPORT_SUFFIX, RESTORED_SUFFIX, ROUND_TRIP_TOLERANCE, STRIP_ASPECT_RATIO,
        VIEWER_MIN_FRAME_DELAY_MS,
    };

    // Tests quantization keeps five decimal places
    // Verified by changing the scale to 1e4
    #[test]
    fn test_quantization_scale() {
        assert!((QUANTIZATION_SCALE - 100_000.0).abs() < f64::EPSILON);
    }

    // Tests breakpoints cover both extremes and nine interior points
    // Verified by changing the count to 10
    #[test]
    fn test_breakpoint_count() {
        assert_eq!(BREAKPOINT_COUNT, 11);
    }

    // Tests strips start at a 2:1 aspect ratio
    // Verified by changing the ratio to 3
    #[test]
    fn test_strip_aspect_ratio() {
        assert_eq!(STRIP_ASPECT_RATIO, 2);
    }

    // Tests the reconstruction tolerance is tight but nonzero
    // Verified by setting the tolerance to zero
    #[test]
    fn test_round_trip_tolerance() {
        assert!(ROUND_TRIP_TOLERANCE > 0.0);
        assert!(ROUND_TRIP_TOLERANCE <= 1e-6);
    }

    // Tests rendering clamps to the 8-bit range
    // Verified by changing the maximum to 256
    #[test]
    fn test_max_luminance() {
        assert!((MAX_LUMINANCE - f64::from(u8::MAX)).abs() < f64::EPSILON);
    }

    // Tests progress bar limit
    // Verified by increasing bar limit
    #[test]
    fn test_max_progress_bars_value() {
        assert_eq!(MAX_INDIVIDUAL_PROGRESS_BARS, 5);
    }

    // Tests output suffixes are distinct so outputs never collide
    // Verified by giving two outputs the same suffix
    #[test]
    fn test_output_suffixes() {
        assert_eq!(REPORT_SUFFIX, "_analysis");
        assert_eq!(REPORT_EXTENSION, "txt");
        assert_eq!(RESTORED_SUFFIX, "_restored");
        assert_eq!(LEVELS_SUFFIX, "_levels");
        assert_ne!(REPORT_SUFFIX, RESTORED_SUFFIX);
        assert_ne!(RESTORED_SUFFIX, LEVELS_SUFFIX);
    }

    // Tests animation timing respects the viewer minimum
    // Verified by lowering the frame delay below the minimum
    #[test]
    fn test_gif_timing() {
        assert_eq!(GIF_FRAME_DELAY_MS, 400);
        assert!(GIF_FRAME_DELAY_MS >= VIEWER_MIN_FRAME_DELAY_MS);
        assert!(FINAL_FRAME_HOLD >= 1);
    }
}
