// Notifier Port
// The host wires this to however it delivers push notifications

use crate::domain::EnqueueNotification;
use async_trait::async_trait;

/// Receiver of "item pushed to queue" notifications
///
/// Called inline by the host after each durable push. Implementations must
/// not fail the push: there is no error channel back to the caller.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn on_item_enqueued(&self, event: &EnqueueNotification);
}
