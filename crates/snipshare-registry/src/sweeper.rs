use snipshare_core::ShareStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::warn;

/// Interval between sweeps when none is configured: one hour,
/// independent of the 24-hour record lifetime.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Spawns the periodic sweep task.
///
/// The registry stays correct without it (lookup re-checks expiry on
/// every read); the sweeper only reclaims storage. A failed sweep is
/// logged and retried on the next tick.
pub fn spawn_sweeper<S>(store: Arc<S>, interval: Duration) -> JoinHandle<()>
where
    S: ShareStore + ?Sized,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(err) = store.sweep().await {
                warn!(error = %err, "sweep failed");
            }
        }
    })
}
