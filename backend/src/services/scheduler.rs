//! Periodic refresh tasks.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use super::refresh::{RefreshController, RefreshOutcome};

/// Spawn a task refreshing `controller` every `period`.
///
/// The first tick fires one full period after spawning; the startup refresh
/// is the caller's job. Failures are logged and the task keeps running.
pub fn spawn_periodic_refresh(
    controller: Arc<RefreshController>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let start = tokio::time::Instant::now() + period;
        let mut interval = tokio::time::interval_at(start, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            debug!("Scheduled refresh for {}", controller.state());
            match controller.refresh().await {
                Ok(RefreshOutcome::Coalesced) => {
                    debug!("Scheduled refresh for {} skipped, one is running", controller.state())
                }
                Ok(RefreshOutcome::Completed(_)) => {}
                Err(e) => warn!("Scheduled refresh for {} failed: {}", controller.state(), e),
            }
        }
    })
}
