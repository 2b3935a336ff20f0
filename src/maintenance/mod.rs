//! Maintenance component.
//!
//! A long-running companion process that refuses to start with an
//! incomplete environment, connects to its Postgres store and then runs a
//! recurring refresh until interrupted.

pub mod env_gate;
pub mod scheduler;
pub mod store;

use std::path::PathBuf;

use clap::Parser;

use crate::config::{LogFormat, LogLevel, DEFAULT_MAINTENANCE_INTERVAL_SECS, ENV_TEMPLATE_PATH};

// Re-export public API
pub use env_gate::{check_environment, missing_variables, required_variables};
pub use scheduler::{run_schedule, RefreshTask, StoreRefresh};
pub use store::{connect_store, StoreConfig};

/// Configuration of the maintenance process.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "url_maintenance",
    about = "Runs the recurring maintenance task of the URL checker."
)]
pub struct MaintenanceConfig {
    /// Template listing the required environment variables
    #[arg(long, default_value = ENV_TEMPLATE_PATH)]
    pub env_template: PathBuf,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Seconds between two runs of the maintenance task
    #[arg(
        long,
        env = "MAINTENANCE_INTERVAL_SECS",
        default_value_t = DEFAULT_MAINTENANCE_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval_seconds: u64,
}
