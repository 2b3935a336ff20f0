//! Recurring maintenance task.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use log::{debug, error, info};
use sqlx::PgPool;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::error_handling::DatabaseError;

/// A unit of work run on every tick of the maintenance schedule.
pub trait RefreshTask: Send + Sync {
    /// Name used in log messages.
    fn name(&self) -> &str;

    /// Runs the task once.
    fn refresh(&self) -> BoxFuture<'_, anyhow::Result<()>>;
}

/// Keeps the store connection alive and reports when it is not.
pub struct StoreRefresh {
    pool: PgPool,
}

impl StoreRefresh {
    /// Creates the task for `pool`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl RefreshTask for StoreRefresh {
    fn name(&self) -> &str {
        "store connectivity"
    }

    fn refresh(&self) -> BoxFuture<'_, anyhow::Result<()>> {
        Box::pin(async move {
            sqlx::query("SELECT 1")
                .execute(&self.pool)
                .await
                .map_err(DatabaseError::from)?;
            Ok(())
        })
    }
}

/// Runs `task` once per `period` until `cancel` fires.
///
/// The first run happens immediately. A failing run is logged and the
/// schedule continues. Runs that overrun the period delay the next tick
/// instead of bursting.
///
/// # Returns
///
/// The number of runs started.
pub async fn run_schedule(
    task: Arc<dyn RefreshTask>,
    period: Duration,
    cancel: CancellationToken,
) -> usize {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut runs = 0usize;

    info!(
        "Maintenance task '{}' scheduled every {}s",
        task.name(),
        period.as_secs()
    );

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("Maintenance task '{}' stopped", task.name());
                break;
            }
            _ = ticker.tick() => {
                runs += 1;
                match task.refresh().await {
                    Ok(()) => debug!("Maintenance task '{}' run {} succeeded", task.name(), runs),
                    Err(e) => error!("Maintenance task '{}' run {} failed: {e:#}", task.name(), runs),
                }
            }
        }
    }

    runs
}
