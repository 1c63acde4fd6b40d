//! TTL Cleanup Task
//!
//! Background task that periodically removes expired store entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::cache::CacheStore;

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task runs `CacheStore::start_cleanup` until `true` is sent on the
/// shutdown channel or its sender is dropped. Sweeps take the store's read
/// lock to collect expired keys and its write lock only to remove them.
///
/// # Arguments
/// * `store` - Shared reference to the store
/// * `period` - Interval between sweeps
/// * `shutdown` - Receiver signalled when the task should stop
///
/// # Returns
/// A JoinHandle for the spawned task. A panic inside a sweep is logged and
/// the task keeps running; it never reaches other store callers.
///
/// # Example
/// ```ignore
/// let store = Arc::new(CacheStore::new());
/// let (shutdown_tx, shutdown_rx) = watch::channel(false);
/// let cleanup_handle = spawn_cleanup_task(store.clone(), Duration::from_secs(1), shutdown_rx);
/// // Later, during shutdown:
/// shutdown_tx.send(true).ok();
/// cleanup_handle.await.ok();
/// ```
pub fn spawn_cleanup_task(
    store: Arc<CacheStore>,
    period: Duration,
    shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        store.start_cleanup(period, shutdown).await;
    })
}
