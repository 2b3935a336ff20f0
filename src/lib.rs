//! bulk_url_check library: resolves lists of URLs to their final destination
//!
//! Every URL of an input file is requested, its redirect chain is followed,
//! and the final URL, number of redirects, final status code and address of
//! the destination server are written to a CSV file. Failures never abort a
//! run: a host without DNS entry, an expired certificate or a refused
//! connection each end up as a row with explanatory remarks.
//!
//! # Example
//!
//! ```no_run
//! use bulk_url_check::{run_check, Config};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     input: PathBuf::from("urls.txt"),
//!     output: PathBuf::from("out/urls.csv"),
//!     ..Default::default()
//! };
//!
//! let report = run_check(config).await?;
//! println!("Resolved {} of {} URLs", report.resolved, report.total_urls);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

#![warn(missing_docs)]

mod app;
mod batch;
pub mod config;
mod dns;
mod error_handling;
pub mod export;
mod fetch;
pub mod initialization;
pub mod maintenance;
mod models;

// Re-export public API
pub use app::{count_urls, normalize_line, BarProgress, NoProgress, ProgressReporter};
pub use batch::process_batch;
pub use config::{Config, LogFormat, LogLevel};
pub use dns::{lookup_peer_address, DnsLookupError, HickoryResolver, SharedResolver};
pub use error_handling::{
    DatabaseError, EnvGateError, ErrorType, FailureKind, InitializationError, OutcomeKind,
    ProcessingStats,
};
pub use fetch::{classify_failure, resolve_url, CheckContext, FetchError};
pub use models::{Field, ResolutionResult};
pub use run::{run_check, CheckReport};

// Internal run module (reads the input, resolves the batch, writes the CSV)
mod run {
    use std::path::PathBuf;
    use std::time::Instant;

    use anyhow::{Context, Result};
    use log::info;

    use crate::app::{
        count_urls, print_outcome_statistics, BarProgress, NoProgress, ProgressReporter,
    };
    use crate::batch::process_batch;
    use crate::config::Config;
    use crate::error_handling::OutcomeKind;
    use crate::export::write_csv;
    use crate::fetch::CheckContext;

    /// Results of a completed run.
    #[derive(Debug, Clone)]
    pub struct CheckReport {
        /// Number of rows written (one per non-blank input line)
        pub total_urls: usize,
        /// Rows with a response below 400
        pub resolved: usize,
        /// Rows for hosts without DNS entry
        pub no_dns: usize,
        /// Rows reached only after disabling certificate validation
        pub certificate_expired: usize,
        /// Best-effort rows built from a failure
        pub failed: usize,
        /// Path of the CSV file
        pub output_path: PathBuf,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs a check with the provided configuration.
    ///
    /// Reads URLs from `config.input`, resolves them and writes one CSV row
    /// per URL to `config.output`.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The input file cannot be read
    /// - The HTTP clients cannot be initialized
    /// - The output file cannot be written
    ///
    /// Failures of individual URLs are not errors; they become rows.
    pub async fn run_check(config: Config) -> Result<CheckReport> {
        let start_time = Instant::now();

        let content = tokio::fs::read_to_string(&config.input)
            .await
            .with_context(|| format!("Failed to read input file {}", config.input.display()))?;
        let lines: Vec<&str> = content.lines().collect();

        let url_count = count_urls(&lines);
        info!(
            "Processing {} URL{}",
            url_count,
            if url_count == 1 { "" } else { "s" }
        );

        let ctx = CheckContext::new(&config).context("Failed to initialize check context")?;
        let progress: Box<dyn ProgressReporter> = if config.no_progress {
            Box::new(NoProgress)
        } else {
            Box::new(BarProgress::new())
        };

        let rows = process_batch(&ctx, &lines, progress.as_ref()).await;

        let written = write_csv(&config.output, &rows)
            .with_context(|| format!("Failed to write {}", config.output.display()))?;
        info!("CSV file was written successfully");

        let stats = ctx.stats();
        print_outcome_statistics(stats);

        Ok(CheckReport {
            total_urls: written,
            resolved: stats.get_outcome_count(OutcomeKind::Resolved),
            no_dns: stats.get_outcome_count(OutcomeKind::DnsNotFound),
            certificate_expired: stats.get_outcome_count(OutcomeKind::CertificateExpired),
            failed: stats.get_outcome_count(OutcomeKind::Failed),
            output_path: config.output,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }
}
