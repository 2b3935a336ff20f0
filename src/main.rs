//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `bulk_url_check` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use bulk_url_check::initialization::{init_crypto_provider, init_logger_with};
use bulk_url_check::{run_check, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine, every setting has a CLI default
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    init_crypto_provider();

    match run_check(config).await {
        Ok(report) => {
            println!(
                "✅ Checked {} URL{} ({} resolved, {} without DNS entry, {} with expired certificate, {} failed) in {:.1}s",
                report.total_urls,
                if report.total_urls == 1 { "" } else { "s" },
                report.resolved,
                report.no_dns,
                report.certificate_expired,
                report.failed,
                report.elapsed_seconds
            );
            println!("Results saved in {}", report.output_path.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("bulk_url_check error: {:#}", e);
            process::exit(1);
        }
    }
}
