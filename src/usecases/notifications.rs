//! Toast queue. Store mutations push here; the UI drains and renders it.

use crate::domain::{Notification, Severity};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

struct Entry {
    notification: Notification,
    expires_at: Instant,
}

/// Append-only toast list with per-entry expiry.
///
/// Entries are kept in insertion order. Expired entries are dropped lazily on
/// the next read.
pub struct NotificationCenter {
    ttl: Duration,
    next_id: AtomicU64,
    entries: Mutex<Vec<Entry>>,
}

impl NotificationCenter {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            next_id: AtomicU64::new(1),
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Queue a toast and return its id.
    pub async fn show(&self, severity: Severity, message: impl Into<String>) -> String {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed).to_string();
        let message = message.into();
        info!(id = %id, ?severity, message = %message, "notification");
        self.entries.lock().await.push(Entry {
            notification: Notification {
                id: id.clone(),
                severity,
                message,
            },
            expires_at: Instant::now() + self.ttl,
        });
        id
    }

    pub async fn success(&self, message: impl Into<String>) -> String {
        self.show(Severity::Success, message).await
    }

    pub async fn info(&self, message: impl Into<String>) -> String {
        self.show(Severity::Info, message).await
    }

    pub async fn error(&self, message: impl Into<String>) -> String {
        self.show(Severity::Error, message).await
    }

    /// Dismiss a toast. Unknown ids are ignored.
    pub async fn remove(&self, id: &str) {
        self.entries
            .lock()
            .await
            .retain(|e| e.notification.id != id);
    }

    /// Toasts still alive now, oldest first.
    pub async fn active(&self) -> Vec<Notification> {
        self.active_at(Instant::now()).await
    }

    /// Toasts still alive at `now`, oldest first. Drops the expired ones.
    pub async fn active_at(&self, now: Instant) -> Vec<Notification> {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|e| e.expires_at > now);
        if entries.len() != before {
            debug!(expired = before - entries.len(), "notifications expired");
        }
        entries.iter().map(|e| e.notification.clone()).collect()
    }

    /// Return every live toast and clear the queue.
    pub async fn drain(&self) -> Vec<Notification> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        entries
            .drain(..)
            .filter(|e| e.expires_at > now)
            .map(|e| e.notification)
            .collect()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(Duration::from_millis(
            crate::shared::config::DEFAULT_NOTIFICATION_TTL_MS,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_show_appends_in_order() {
        let center = NotificationCenter::default();
        center.success("first").await;
        center.info("second").await;

        let active = center.active().await;
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].message, "first");
        assert_eq!(active[1].severity, Severity::Info);
        assert_ne!(active[0].id, active[1].id);
    }

    #[tokio::test]
    async fn test_remove_and_unknown_id() {
        let center = NotificationCenter::default();
        let id = center.error("failed").await;
        center.remove("nope").await;
        assert_eq!(center.active().await.len(), 1);
        center.remove(&id).await;
        assert!(center.active().await.is_empty());
    }

    #[tokio::test]
    async fn test_expiry() {
        let center = NotificationCenter::new(Duration::from_millis(4000));
        center.success("saved").await;

        let soon = Instant::now() + Duration::from_millis(1000);
        assert_eq!(center.active_at(soon).await.len(), 1);

        let later = Instant::now() + Duration::from_millis(5000);
        assert!(center.active_at(later).await.is_empty());
        // pruned for good
        assert!(center.active().await.is_empty());
    }

    #[tokio::test]
    async fn test_drain_clears() {
        let center = NotificationCenter::default();
        center.success("a").await;
        center.success("b").await;
        assert_eq!(center.drain().await.len(), 2);
        assert!(center.active().await.is_empty());
    }
}
