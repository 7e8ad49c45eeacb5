//! Process-wide notification list.
//!
//! Any component may publish; only the center removes. A message with a
//! duration schedules its own expiry as a cancellable task, so a manual
//! dismissal never races a stale removal of a recycled id.

use std::collections::HashMap;
use std::sync::Arc;

use frigosync_core::models::AlertMessage;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use uuid::Uuid;

/// An alert registered with the center, carrying its unique id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: Uuid,
    #[serde(flatten)]
    pub alert: AlertMessage,
}

#[derive(Clone, Default)]
pub struct NotificationCenter {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    notifications: Vec<Notification>,
    timers: HashMap<Uuid, AbortHandle>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a message and, if it carries a duration, schedule its
    /// expiry. Returns the assigned id.
    pub async fn publish(&self, alert: AlertMessage) -> Uuid {
        let id = Uuid::new_v4();
        let duration = alert.duration;

        // The lock is held across the spawn so the expiry task cannot
        // observe the center before its abort handle is registered.
        let mut inner = self.inner.lock().await;
        inner.notifications.push(Notification { id, alert });

        if let Some(delay) = duration {
            let center = self.clone();
            let handle = tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                center.expire(id).await;
            });
            inner.timers.insert(id, handle.abort_handle());
        }

        id
    }

    async fn expire(&self, id: Uuid) {
        let mut inner = self.inner.lock().await;
        inner.timers.remove(&id);
        inner.notifications.retain(|n| n.id != id);
    }

    /// Remove a notification, cancelling any pending expiry for it.
    pub async fn dismiss(&self, id: Uuid) {
        let mut inner = self.inner.lock().await;
        if let Some(timer) = inner.timers.remove(&id) {
            timer.abort();
        }
        inner.notifications.retain(|n| n.id != id);
    }

    pub async fn active(&self) -> Vec<Notification> {
        self.inner.lock().await.notifications.clone()
    }

    pub async fn clear(&self) {
        let mut inner = self.inner.lock().await;
        for (_, timer) in inner.timers.drain() {
            timer.abort();
        }
        inner.notifications.clear();
    }
}
