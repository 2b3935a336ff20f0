//! Logger initialization.

use std::io::Write;

use colored::*;
use log::LevelFilter;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first and the explicit `level` is applied on top, so
/// `RUST_LOG=hickory_proto=debug` still works for dependency modules while
/// `--log-level` controls this crate.
///
/// Two formats are supported:
/// - `Plain`: colored level, target and message
/// - `Json`: one object per line with `ts`, `level`, `target` and `msg`
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=reqwest=debug bulk_url_check --log-level debug
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    builder.filter_module("rustls", LevelFilter::Warn);
    builder.filter_module("sqlx", LevelFilter::Info);
    // Truncated UDP answers are retried by hickory; its warnings are noise here
    builder.filter_module("hickory_proto", LevelFilter::Error);
    builder.filter_module("hickory_resolver", LevelFilter::Warn);
    builder.filter_module("bulk_url_check", level);
    builder.filter_module("url_maintenance", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            colored::control::set_override(true);
            builder.format(|buf, record| {
                let level = record.level().to_string();
                let level = match record.level() {
                    log::Level::Error => level.red().bold(),
                    log::Level::Warn => level.yellow(),
                    log::Level::Info => level.green(),
                    log::Level::Debug => level.blue(),
                    log::Level::Trace => level.purple(),
                };
                writeln!(
                    buf,
                    "{} [{}] {}: {}",
                    chrono::Local::now().format("%H:%M:%S"),
                    level,
                    record.target().cyan(),
                    record.args()
                )
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)
}
