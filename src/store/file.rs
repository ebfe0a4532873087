use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};

use crate::models::MessageLog;
use crate::store::error::{Result, StoreError};
use crate::store::MessageStore;

/// Stores the log as a pretty-printed JSON document on disk.
///
/// Saves go through a sibling `<file>.tmp` that is renamed over the target, so
/// readers never see a half-written document and a failed save leaves the
/// previous one in place.
#[derive(Debug, Clone)]
pub struct FileMessageStore {
    path: PathBuf,
}

impl FileMessageStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the parent directory and an empty document if the file does not
    /// exist yet. Existing documents are left untouched.
    pub async fn init(&self) -> Result<()> {
        let exists = fs::try_exists(&self.path)
            .await
            .map_err(|source| self.read_error(source))?;
        if exists {
            debug!(path = %self.path.display(), "Message file already present");
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|source| self.write_error(source))?;
            }
        }

        self.save(&MessageLog::new()).await?;
        info!(path = %self.path.display(), "Created empty message file");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("messages"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn read_error(&self, source: io::Error) -> StoreError {
        StoreError::Read {
            location: self.location(),
            source,
        }
    }

    fn write_error(&self, source: io::Error) -> StoreError {
        StoreError::Write {
            location: self.location(),
            source,
        }
    }
}

#[async_trait]
impl MessageStore for FileMessageStore {
    async fn load(&self) -> Result<MessageLog> {
        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|source| self.read_error(source))?;

        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            location: self.location(),
            source,
        })
    }

    async fn save(&self, log: &MessageLog) -> Result<()> {
        let document = serde_json::to_string_pretty(log)
            .map_err(|err| self.write_error(io::Error::other(err)))?;

        let temp = self.temp_path();
        fs::write(&temp, document)
            .await
            .map_err(|source| self.write_error(source))?;

        if let Err(source) = fs::rename(&temp, &self.path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(self.write_error(source));
        }

        debug!(path = %self.path.display(), count = log.len(), "Saved message log");
        Ok(())
    }
}
