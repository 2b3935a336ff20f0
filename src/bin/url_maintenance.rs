//! Maintenance process entry point.
//!
//! Checks the environment against the template, connects to the store and
//! runs the recurring refresh until Ctrl-C.

use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use tokio_util::sync::CancellationToken;

use bulk_url_check::config::EXIT_ENV_INCOMPLETE;
use bulk_url_check::initialization::{init_crypto_provider, init_logger_with};
use bulk_url_check::maintenance::{
    check_environment, connect_store, run_schedule, MaintenanceConfig, RefreshTask, StoreConfig,
    StoreRefresh,
};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let config = MaintenanceConfig::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    init_crypto_provider();

    if let Err(e) = check_environment(&config.env_template) {
        error!("{e}");
        eprintln!("url_maintenance error: {e}");
        process::exit(EXIT_ENV_INCOMPLETE);
    }

    let store_config = match StoreConfig::from_env() {
        Ok(store_config) => store_config,
        Err(e) => {
            error!("{e}");
            eprintln!("url_maintenance error: {e}");
            process::exit(EXIT_ENV_INCOMPLETE);
        }
    };

    let pool = connect_store(&store_config)
        .await
        .context("Failed to connect to the maintenance store")?;

    let cancel = CancellationToken::new();
    let task: Arc<dyn RefreshTask> = Arc::new(StoreRefresh::new(pool.clone()));
    let schedule = tokio::spawn(run_schedule(
        task,
        Duration::from_secs(config.interval_seconds),
        cancel.clone(),
    ));

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for the shutdown signal")?;
    info!("Shutdown requested");
    cancel.cancel();

    let runs = schedule.await.context("Maintenance schedule panicked")?;
    pool.close().await;
    info!("Maintenance stopped after {runs} run(s)");
    Ok(())
}
