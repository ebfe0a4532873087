use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::MessageLog;
use crate::store::error::{Result, StoreError};
use crate::store::MessageStore;

const LOCATION: &str = "memory";

/// In-process store holding the log behind a lock.
///
/// Reads and writes can be made to fail on demand, which lets callers exercise
/// the error paths without touching the filesystem.
#[derive(Debug, Default)]
pub struct MemoryMessageStore {
    log: RwLock<MessageLog>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log(log: MessageLog) -> Self {
        Self {
            log: RwLock::new(log),
            ..Self::default()
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Current contents, bypassing the failure switches.
    pub async fn snapshot(&self) -> MessageLog {
        self.log.read().await.clone()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn load(&self) -> Result<MessageLog> {
        // Give other tasks a chance to interleave, as a real read would.
        tokio::task::yield_now().await;

        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Read {
                location: LOCATION.to_string(),
                source: io::Error::other("simulated read failure"),
            });
        }
        Ok(self.log.read().await.clone())
    }

    async fn save(&self, log: &MessageLog) -> Result<()> {
        tokio::task::yield_now().await;

        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Write {
                location: LOCATION.to_string(),
                source: io::Error::other("simulated write failure"),
            });
        }
        *self.log.write().await = log.clone();
        Ok(())
    }
}
