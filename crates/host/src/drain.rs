// Queue drain (runs inside the detached worker, or inline when auto-drain is on)

use anyhow::Result;
use std::time::{Duration, Instant};
use tracing::info;

use async_queue_core::domain::Settings;

use crate::queue::{QueuedItem, SpoolQueue};

/// Claim age after which an item counts as abandoned when the pool is unbounded
const DEFAULT_STALE_CLAIM_AGE: Duration = Duration::from_secs(3600);

/// Slack on top of the pool lifetime for the item a worker was processing
const STALE_CLAIM_GRACE: Duration = Duration::from_secs(60);

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DrainStats {
    pub processed: usize,
    /// Stopped because the pool lifetime ran out
    pub expired: bool,
}

/// Process items until the queue is empty or `pool_lifetime` has elapsed
///
/// A non-positive pool lifetime means no limit. Claims left behind by
/// workers that outlived their lifetime are returned to the queue first.
pub fn run(queue: &SpoolQueue, settings: &Settings) -> Result<DrainStats> {
    let started = Instant::now();
    let lifetime = settings.lifetime();
    let mut stats = DrainStats::default();

    queue.recover_stale(stale_claim_age(lifetime))?;

    loop {
        if lifetime.is_some_and(|limit| started.elapsed() >= limit) {
            info!(
                processed = stats.processed,
                pool_lifetime = settings.pool_lifetime,
                "Pool lifetime reached, leaving remaining items queued"
            );
            stats.expired = true;
            break;
        }

        let Some(claim) = queue.claim_next()? else {
            break;
        };
        process(&claim.item);
        queue.complete(claim)?;
        stats.processed += 1;
    }

    info!(processed = stats.processed, "Queue drained");
    Ok(stats)
}

fn stale_claim_age(lifetime: Option<Duration>) -> Duration {
    lifetime.map_or(DEFAULT_STALE_CLAIM_AGE, |limit| limit + STALE_CLAIM_GRACE)
}

fn process(item: &QueuedItem) {
    info!(
        id = %item.id,
        description = item.description.as_deref().unwrap_or("-"),
        queued_ms = chrono::Utc::now().timestamp_millis() - item.pushed_at,
        "Processing queued job"
    );
}
