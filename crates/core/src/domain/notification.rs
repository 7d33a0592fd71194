// Enqueue Notification Domain Model

use serde::{Deserialize, Serialize};

/// Opaque reference to an enqueued unit of work
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef(String);

impl ItemRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fired by the queue after an item has been durably enqueued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnqueueNotification {
    pub item: ItemRef,
    pub description: Option<String>,
}

impl EnqueueNotification {
    pub fn new(item: ItemRef, description: Option<String>) -> Self {
        Self { item, description }
    }

    /// Human-readable job description, if the item carries a non-blank one
    pub fn description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_description_is_absent() {
        let event = EnqueueNotification::new(ItemRef::new("1"), Some("  ".to_string()));
        assert_eq!(event.description(), None);

        let event = EnqueueNotification::new(ItemRef::new("2"), Some("send-email".to_string()));
        assert_eq!(event.description(), Some("send-email"));
    }
}
