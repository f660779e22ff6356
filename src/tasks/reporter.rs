//! Stats Reporter Task
//!
//! Background task that periodically logs a snapshot of the cache counters.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::accounts::AccountCache;
use crate::cache::CacheStats;

/// Spawns a background task that logs cache statistics every `interval`.
///
/// A full line is logged at `info` when anything changed since the previous
/// tick, otherwise a short `debug` line. The task only reads counters.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let accounts = Arc::new(AccountCache::new(1000, 3)?);
/// let reporter = spawn_stats_reporter(accounts.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// reporter.abort();
/// ```
pub fn spawn_stats_reporter(accounts: Arc<AccountCache>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting stats reporter with interval of {:?}", interval);

        let mut last: Option<CacheStats> = None;
        loop {
            tokio::time::sleep(interval).await;

            let stats = accounts.stats();
            if last.as_ref() == Some(&stats) {
                debug!("Stats unchanged: {} entries", stats.total_entries);
                continue;
            }

            info!(
                hits = stats.hits,
                misses = stats.misses,
                puts = stats.puts,
                evictions = stats.evictions,
                observer_failures = stats.observer_failures,
                entries = stats.total_entries,
                ranked = stats.ranked_entries,
                "Cache stats: hit rate {:.2}",
                stats.hit_rate()
            );
            last = Some(stats);
        }
    })
}
