//! Progress reporting for the batch driver.
//!
//! The batch driver only sees the `ProgressReporter` trait, so the terminal
//! bar can be swapped for a no-op in tests and with `--no-progress`.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Receives one tick per processed input line.
pub trait ProgressReporter: Send + Sync {
    /// Called once before the first line with the number of lines.
    fn start(&self, total: u64);

    /// Called once per processed input line, including skipped ones.
    fn tick(&self);

    /// Called after the last line.
    fn finish(&self);
}

/// A progress reporter that ignores all updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn start(&self, _total: u64) {}
    fn tick(&self) {}
    fn finish(&self) {}
}

/// Terminal progress bar on stderr.
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    /// Creates a hidden bar; it becomes visible on [`ProgressReporter::start`].
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::hidden());
        let style = ProgressStyle::default_bar()
            .template("{bar:50.cyan/blue} {pos}/{len} URLs ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        Self { bar }
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for BarProgress {
    fn start(&self, total: u64) {
        self.bar.set_length(total);
        self.bar.set_position(0);
        self.bar.set_draw_target(ProgressDrawTarget::stderr());
    }

    fn tick(&self) {
        self.bar.inc(1);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
