//! Persistence for the message log.
//!
//! The board talks to storage only through [`MessageStore`], so the file-backed
//! store used in production and the in-memory store used in tests are
//! interchangeable.

pub mod error;
pub mod file;
pub mod memory;

use async_trait::async_trait;

use crate::models::MessageLog;

pub use error::{Result, StoreError};
pub use file::FileMessageStore;
pub use memory::MemoryMessageStore;

/// Load/save contract for the persisted message log.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Read the whole log. A document without a `messages` field yields an
    /// empty log.
    async fn load(&self) -> Result<MessageLog>;

    /// Replace the persisted log in full.
    async fn save(&self, log: &MessageLog) -> Result<()>;
}
