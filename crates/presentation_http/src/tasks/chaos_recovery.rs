//! Chaos auto-recovery task
//!
//! Periodically checks whether the armed chaos configuration has passed its
//! expiry and clears it without administrative intervention. The check and
//! the reset run under the controller's write lock, so a configuration
//! freshly re-armed between ticks is never clobbered.

use std::sync::Arc;
use std::time::Duration;

use application::ChaosController;
use chrono::Utc;
use domain::{ChaosType, DecisionKind};
use tracing::info;

/// Default expiry check interval: once per second
const DEFAULT_RECOVERY_INTERVAL: Duration = Duration::from_secs(1);

/// Spawn the background task that reclaims expired chaos configurations.
///
/// Returns a `JoinHandle` the composition root aborts during graceful
/// shutdown, so no background work leaks in tests or embedding scenarios.
///
/// # Arguments
///
/// * `controller` - The chaos controller to watch
/// * `interval` - How often to check for expiry (defaults to 1 second)
pub fn spawn_chaos_recovery_task(
    controller: Arc<ChaosController>,
    interval: Option<Duration>,
) -> tokio::task::JoinHandle<()> {
    let interval = interval.unwrap_or(DEFAULT_RECOVERY_INTERVAL);

    info!(
        interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
        "Starting chaos auto-recovery task"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // Don't fire an expiry check immediately on startup
        ticker.tick().await;

        loop {
            ticker.tick().await;

            if controller.try_auto_recover(Utc::now()) {
                info!(
                    decision = %DecisionKind::Chaos,
                    chaos_type = %ChaosType::Recovery,
                    "Expired chaos configuration cleared"
                );
            }
        }
    })
}
