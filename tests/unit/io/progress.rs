//! Tests for progress tracking and multi-file batch processing

#[cfg(test)]
mod tests {
    use bigpixels::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
    use bigpixels::io::progress::{ProgressManager, Stage};
    use std::path::Path;

    // Tests stages are listed in processing order with matching positions
    // Verified by swapping Restoring and Analyzing
    #[test]
    fn test_stage_order() {
        for (position, stage) in Stage::ALL.iter().enumerate() {
            assert_eq!(stage.position(), position);
        }
        assert!(Stage::Restoring < Stage::Analyzing);
        assert_eq!(Stage::ALL.first(), Some(&Stage::Loading));
        assert_eq!(Stage::ALL.last(), Some(&Stage::Writing));
    }

    // Tests stage labels are distinct
    // Verified by reusing one label for two stages
    #[test]
    fn test_stage_labels() {
        let labels: Vec<&str> = Stage::ALL.iter().map(|stage| stage.label()).collect();

        assert_eq!(
            labels,
            vec!["loading", "transforming", "restoring", "analyzing", "writing"]
        );
    }

    // Tests a single file walks through every stage
    // Verified by panicking on stage updates for unknown files
    #[test]
    fn test_single_file_lifecycle() {
        let mut pm = ProgressManager::new();
        pm.initialize(1);
        assert_eq!(pm.file_count(), 1);

        pm.start_file(0, Path::new("single.png"));
        for stage in Stage::ALL {
            pm.enter_stage(0, stage);
        }
        pm.complete_file(0);
        pm.finish();
    }

    // Tests default trait implementation
    // Verified by creating different initial states
    #[test]
    fn test_progress_manager_default() {
        let mut pm = ProgressManager::default();

        assert_eq!(pm.file_count(), 0);
        pm.initialize(0);
        pm.finish();
    }

    // Tests large batches switch to a batch bar and rotate file bars
    // Verified by creating one bar per file
    #[test]
    fn test_batch_mode() {
        let file_count = MAX_INDIVIDUAL_PROGRESS_BARS * 3;
        let mut pm = ProgressManager::new();
        pm.initialize(file_count);

        for index in 0..file_count {
            pm.start_file(index, Path::new(&format!("file_{index}.png")));
            pm.enter_stage(index, Stage::Analyzing);
            pm.complete_file(index);
        }

        assert_eq!(pm.file_count(), file_count);
        pm.finish();
    }

    // Tests updates for files never started are ignored
    // Verified by indexing file states directly
    #[test]
    fn test_out_of_order_updates() {
        let mut pm = ProgressManager::new();
        pm.initialize(2);

        pm.enter_stage(1, Stage::Writing);
        pm.complete_file(1);
        pm.start_file(1, Path::new("late.png"));
        pm.complete_file(1);
        pm.finish();
    }
}
