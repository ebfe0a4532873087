//! The message board service shared by the HTTP handlers.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::models::{MessageLog, NewMessage, MAX_MESSAGES};
use crate::store::{MessageStore, Result};

/// Read-modify-write access to a [`MessageStore`].
///
/// Adds are serialized by `write_lock`, held from `load()` through `save()`,
/// so concurrent posts cannot drop each other's messages. Lists skip the lock.
pub struct MessageBoard {
    store: Arc<dyn MessageStore>,
    write_lock: Mutex<()>,
}

impl MessageBoard {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Current persisted log.
    pub async fn list(&self) -> Result<MessageLog> {
        self.store.load().await
    }

    /// Timestamp `new`, append it (evicting the oldest entries past
    /// [`MAX_MESSAGES`]) and persist the whole log. Returns the saved log.
    ///
    /// Nothing is persisted unless the final `save()` succeeds.
    pub async fn add(&self, new: NewMessage) -> Result<MessageLog> {
        let _guard = self.write_lock.lock().await;

        let mut log = self.store.load().await?;
        let evicted = log.push(new.stamp(Utc::now()));
        if evicted > 0 {
            warn!(evicted, limit = MAX_MESSAGES, "Message limit reached, evicting oldest");
        }

        self.store.save(&log).await?;
        info!(count = log.len(), "Message added");
        Ok(log)
    }
}
