//! Multi-file progress tracking with automatic batching for large sets

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

/// Outcome shown next to a file name
#[derive(Debug, Clone, PartialEq, Eq)]
enum FileStatus {
    Rendering,
    Done { words: usize, millis: u128 },
    Failed,
}

#[derive(Debug, Clone)]
struct FileState {
    name: String,
    status: FileStatus,
}

/// Coordinates progress display for batch renders
///
/// Shows one line per file for small batches and adds an overall files bar
/// when there are more files than individual lines.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    file_states: Vec<Option<FileState>>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static FILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:30} [{bar:10.cyan/blue}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            file_states: Vec::new(),
        }
    }

    /// Create bars for `file_count` files
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let pb = ProgressBar::new(1);
            pb.set_style(FILE_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(pb));
        }
        self.file_states = vec![None; file_count];
    }

    /// Mark a file as being rendered
    pub fn start_file(&mut self, index: usize, path: &Path) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        self.set_state(index, FileState {
            name,
            status: FileStatus::Rendering,
        });
    }

    /// Mark a file as rendered with `words` placed words
    pub fn complete_file(&mut self, index: usize, words: usize, elapsed: Duration) {
        self.finish_file(index, FileStatus::Done {
            words,
            millis: elapsed.as_millis(),
        });
    }

    /// Mark a file as failed
    pub fn fail_file(&mut self, index: usize) {
        self.finish_file(index, FileStatus::Failed);
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }

    fn finish_file(&mut self, index: usize, status: FileStatus) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(Some(state)) = self.file_states.get_mut(index) {
            state.status = status;
        }
        self.update_bars();
    }

    fn set_state(&mut self, index: usize, state: FileState) {
        if index >= self.file_states.len() {
            self.file_states.resize(index + 1, None);
        }
        if let Some(slot) = self.file_states.get_mut(index) {
            *slot = Some(state);
        }
        self.update_bars();
    }

    /// Show the most recent files on the available bars
    fn update_bars(&self) {
        let active: Vec<&FileState> = self.file_states.iter().flatten().collect();
        let start = active.len().saturating_sub(self.file_bars.len());
        let visible = active.get(start..).unwrap_or(&[]);

        for (bar, state) in self.file_bars.iter().zip(visible) {
            let (position, prefix, message) = match state.status {
                FileStatus::Rendering => (0, state.name.clone(), "rendering".to_owned()),
                FileStatus::Done { words, millis } => (
                    1,
                    format!("✓ {}", state.name),
                    format!("{words} words in {millis} ms"),
                ),
                FileStatus::Failed => (1, format!("✗ {}", state.name), "failed".to_owned()),
            };
            bar.set_position(position);
            bar.set_prefix(prefix);
            bar.set_message(message);
        }

        for bar in self.file_bars.iter().skip(visible.len()) {
            bar.set_position(0);
            bar.set_prefix(String::new());
            bar.set_message(String::new());
        }
    }
}
