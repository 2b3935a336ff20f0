//! Main application modules.
//!
//! This module provides input normalization, progress reporting and
//! statistics printing used by the batch run.

pub mod progress;
pub mod statistics;
pub mod url;

// Re-export public API
pub use progress::{BarProgress, NoProgress, ProgressReporter};
pub use statistics::print_outcome_statistics;
pub use url::{count_urls, normalize_line};
