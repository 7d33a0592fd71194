// Spool-directory queue
// One JSON file per item; claiming is an atomic rename, so concurrent
// workers never process the same item twice. Claimed files carry their
// claim time so items stranded by a dead worker can be put back.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use async_queue_core::domain::{EnqueueNotification, ItemRef};

const PENDING_DIR: &str = "pending";
const CLAIMED_DIR: &str = "claimed";
const ITEM_EXT: &str = "json";
const CLAIM_SEPARATOR: char = '~';

/// A pushed unit of work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedItem {
    pub id: String,
    pub description: Option<String>,
    pub pushed_at: i64, // epoch ms
}

impl QueuedItem {
    pub fn new(description: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            description,
            pushed_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn notification(&self) -> EnqueueNotification {
        EnqueueNotification::new(ItemRef::new(self.id.clone()), self.description.clone())
    }

    // Zero-padded timestamp keeps directory order equal to push order
    fn file_name(&self) -> String {
        format!("{:013}-{}.{}", self.pushed_at, self.id, ITEM_EXT)
    }
}

/// An item taken out of `pending/` by this worker
#[derive(Debug)]
pub struct Claim {
    pub item: QueuedItem,
    path: PathBuf,
}

pub struct SpoolQueue {
    pending: PathBuf,
    claimed: PathBuf,
}

impl SpoolQueue {
    /// Open (and create) the spool under `<base>/queue`
    pub fn open(base_path: &Path) -> Result<Self> {
        let root = base_path.join("queue");
        let queue = Self {
            pending: root.join(PENDING_DIR),
            claimed: root.join(CLAIMED_DIR),
        };
        fs::create_dir_all(&queue.pending)
            .with_context(|| format!("creating {}", queue.pending.display()))?;
        fs::create_dir_all(&queue.claimed)
            .with_context(|| format!("creating {}", queue.claimed.display()))?;
        Ok(queue)
    }

    /// Durably enqueue an item (write to a hidden temp file, then rename)
    pub fn push(&self, description: Option<String>) -> Result<QueuedItem> {
        let item = QueuedItem::new(description);
        let final_path = self.pending.join(item.file_name());
        let tmp_path = self.pending.join(format!(".{}.tmp", item.id));

        let body = serde_json::to_vec(&item)?;
        fs::write(&tmp_path, body).with_context(|| format!("writing {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &final_path)
            .with_context(|| format!("publishing {}", final_path.display()))?;

        debug!(id = %item.id, "Item pushed");
        Ok(item)
    }

    /// Claim the oldest pending item, if any
    pub fn claim_next(&self) -> Result<Option<Claim>> {
        for name in self.pending_names()? {
            let from = self.pending.join(&name);
            let claimed_at = chrono::Utc::now().timestamp_millis();
            let to = self
                .claimed
                .join(format!("{:013}{}{}", claimed_at, CLAIM_SEPARATOR, name));

            match fs::rename(&from, &to) {
                Ok(()) => {}
                // Another worker won the race
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e).with_context(|| format!("claiming {}", name)),
            }

            let raw = fs::read(&to)?;
            match serde_json::from_slice::<QueuedItem>(&raw) {
                Ok(item) => return Ok(Some(Claim { item, path: to })),
                Err(e) => {
                    warn!(file = %name, error = %e, "Dropping malformed queue item");
                    fs::remove_file(&to)?;
                }
            }
        }
        Ok(None)
    }

    /// Finish a claimed item
    pub fn complete(&self, claim: Claim) -> Result<()> {
        fs::remove_file(&claim.path)
            .with_context(|| format!("completing {}", claim.path.display()))
    }

    /// Move claims older than `older_than` back to `pending/`
    ///
    /// A claim only stays in `claimed/` past its worker's lifetime when the
    /// worker died between claiming and completing.
    pub fn recover_stale(&self, older_than: Duration) -> Result<usize> {
        let now = chrono::Utc::now().timestamp_millis();
        let max_age_ms = i64::try_from(older_than.as_millis()).unwrap_or(i64::MAX);
        let mut recovered = 0;

        for entry in fs::read_dir(&self.claimed)? {
            let claimed_name = entry?.file_name().to_string_lossy().into_owned();
            let Some((claimed_at, name)) = claimed_name.split_once(CLAIM_SEPARATOR) else {
                continue;
            };
            let stale = claimed_at
                .parse::<i64>()
                .map(|at| now.saturating_sub(at) >= max_age_ms)
                .unwrap_or(true);
            if !stale {
                continue;
            }

            match fs::rename(self.claimed.join(&claimed_name), self.pending.join(name)) {
                Ok(()) => recovered += 1,
                // Completed or recovered by someone else meanwhile
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e).with_context(|| format!("recovering {}", claimed_name))
                }
            }
        }

        if recovered > 0 {
            info!(recovered, "Returned stale claims to the queue");
        }
        Ok(recovered)
    }

    #[cfg(test)]
    pub fn pending_count(&self) -> Result<usize> {
        Ok(self.pending_names()?.len())
    }

    fn pending_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.pending)? {
            let name = entry?.file_name().to_string_lossy().into_owned();
            if !name.starts_with('.') && name.ends_with(ITEM_EXT) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_then_claim_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let queue = SpoolQueue::open(dir.path()).unwrap();

        let first = queue.push(Some("send-email".to_string())).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = queue.push(None).unwrap();
        assert_eq!(queue.pending_count().unwrap(), 2);

        let claim = queue.claim_next().unwrap().unwrap();
        assert_eq!(claim.item, first);
        queue.complete(claim).unwrap();

        let claim = queue.claim_next().unwrap().unwrap();
        assert_eq!(claim.item, second);
        queue.complete(claim).unwrap();

        assert!(queue.claim_next().unwrap().is_none());
        assert_eq!(queue.pending_count().unwrap(), 0);
    }

    #[test]
    fn test_claimed_item_not_visible_to_other_workers() {
        let dir = tempfile::tempdir().unwrap();
        let worker_a = SpoolQueue::open(dir.path()).unwrap();
        let worker_b = SpoolQueue::open(dir.path()).unwrap();
        worker_a.push(Some("resize".to_string())).unwrap();

        let claim = worker_a.claim_next().unwrap();

        assert!(claim.is_some());
        assert!(worker_b.claim_next().unwrap().is_none());
    }

    #[test]
    fn test_malformed_item_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let queue = SpoolQueue::open(dir.path()).unwrap();
        std::fs::write(
            dir.path().join("queue").join(PENDING_DIR).join("0000000000000-bad.json"),
            "{oops",
        )
        .unwrap();

        assert!(queue.claim_next().unwrap().is_none());
        assert_eq!(queue.pending_count().unwrap(), 0);
    }

    #[test]
    fn test_abandoned_claim_is_recovered() {
        let dir = tempfile::tempdir().unwrap();
        let queue = SpoolQueue::open(dir.path()).unwrap();
        let item = queue.push(Some("send-email".to_string())).unwrap();

        // Worker dies after claiming
        drop(queue.claim_next().unwrap().unwrap());
        assert!(queue.claim_next().unwrap().is_none());

        assert_eq!(queue.recover_stale(Duration::ZERO).unwrap(), 1);

        let claim = queue.claim_next().unwrap().unwrap();
        assert_eq!(claim.item, item);
    }

    #[test]
    fn test_fresh_claim_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let queue = SpoolQueue::open(dir.path()).unwrap();
        queue.push(None).unwrap();
        let _claim = queue.claim_next().unwrap().unwrap();

        assert_eq!(queue.recover_stale(Duration::from_secs(3600)).unwrap(), 0);
        assert_eq!(queue.pending_count().unwrap(), 0);
    }

    #[test]
    fn test_notification_carries_description() {
        let item = QueuedItem::new(Some("send-email".to_string()));
        let event = item.notification();

        assert_eq!(event.item.as_str(), item.id);
        assert_eq!(event.description(), Some("send-email"));
    }
}
