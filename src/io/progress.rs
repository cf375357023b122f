//! Per-file stage bars, collapsing into a batch counter for long runs

use std::path::Path;
use std::sync::LazyLock;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;

/// Pipeline steps applied to each file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Decoding the image into a luminance grid
    Loading,
    /// Running the forward transform
    Transforming,
    /// Running the inverse transform and checking it
    Restoring,
    /// Measuring distributions and coding cost
    Analyzing,
    /// Writing the report and any requested images
    Writing,
}

impl Stage {
    /// Every stage in processing order
    pub const ALL: [Self; 5] = [
        Self::Loading,
        Self::Transforming,
        Self::Restoring,
        Self::Analyzing,
        Self::Writing,
    ];

    /// Short label shown next to the bar
    pub const fn label(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Transforming => "transforming",
            Self::Restoring => "restoring",
            Self::Analyzing => "analyzing",
            Self::Writing => "writing",
        }
    }

    /// Stages finished before this one starts
    pub const fn position(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Default)]
struct FileState {
    name: String,
    completed: usize,
    label: &'static str,
}

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg:>12} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Images: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Stage-by-stage progress for a batch of images
///
/// At most `MAX_INDIVIDUAL_PROGRESS_BARS` stage bars are shown, always for
/// the most recently started files. Larger batches add an overall counter.
pub struct ProgressManager {
    display: MultiProgress,
    batch_bar: Option<ProgressBar>,
    stage_bars: Vec<ProgressBar>,
    file_count: usize,
    files: Vec<FileState>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Manager with no bars until [`Self::initialize`] is called
    pub fn new() -> Self {
        Self {
            display: MultiProgress::new(),
            batch_bar: None,
            stage_bars: Vec::new(),
            file_count: 0,
            files: Vec::new(),
        }
    }

    /// Create the bars for a run over `file_count` files
    pub fn initialize(&mut self, file_count: usize) {
        self.file_count = file_count;

        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.display.add(batch_bar));
        }

        let stage_count = Stage::ALL.len() as u64;
        self.stage_bars = (0..file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS))
            .map(|_| {
                let bar = ProgressBar::new(stage_count);
                bar.set_style(STAGE_STYLE.clone());
                self.display.add(bar)
            })
            .collect();
    }

    /// Number of files announced by [`Self::initialize`]
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Begin tracking the file at `index`
    pub fn start_file(&mut self, index: usize, path: &Path) {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        if self.files.len() <= index {
            self.files.resize_with(index + 1, FileState::default);
        }
        if let Some(state) = self.files.get_mut(index) {
            *state = FileState {
                name,
                completed: 0,
                label: Stage::Loading.label(),
            };
        }
        self.refresh();
    }

    /// Report that a file has entered `stage`
    pub fn enter_stage(&mut self, index: usize, stage: Stage) {
        if let Some(state) = self.files.get_mut(index) {
            state.completed = stage.position();
            state.label = stage.label();
        }
        self.refresh();
    }

    /// Mark a file as done and advance the batch counter
    pub fn complete_file(&mut self, index: usize) {
        if let Some(batch_bar) = &self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(state) = self.files.get_mut(index) {
            state.name = format!("✓ {}", state.name);
            state.completed = Stage::ALL.len();
            state.label = "done";
        }
        self.refresh();
    }

    /// Remove every bar from the terminal
    pub fn finish(&self) {
        if let Some(batch_bar) = &self.batch_bar {
            batch_bar.finish_with_message("All images processed");
        }
        let _ = self.display.clear();
    }

    // Stage bars follow the newest started files; spare bars are blanked
    fn refresh(&self) {
        let started: Vec<&FileState> = self
            .files
            .iter()
            .filter(|state| !state.name.is_empty())
            .collect();
        let newest = started
            .get(started.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS)..)
            .unwrap_or_default();

        for (position, bar) in self.stage_bars.iter().enumerate() {
            match newest.get(position) {
                Some(state) => {
                    bar.set_length(Stage::ALL.len() as u64);
                    bar.set_position(state.completed as u64);
                    bar.set_message(state.label);
                    bar.set_prefix(state.name.clone());
                }
                None => {
                    bar.set_length(0);
                    bar.set_position(0);
                    bar.set_message("");
                    bar.set_prefix(String::new());
                }
            }
        }
    }
}
