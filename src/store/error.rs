use std::io;

use thiserror::Error;

/// Result type for message store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised while loading or persisting the message log
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying read failed
    #[error("failed to read `{location}`: {source}")]
    Read {
        location: String,
        #[source]
        source: io::Error,
    },

    /// The document is not valid JSON of the expected shape
    #[error("failed to parse `{location}`: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing or writing the document failed
    #[error("failed to write `{location}`: {source}")]
    Write {
        location: String,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// Where the failing document lives (a file path, or a store label)
    pub fn location(&self) -> &str {
        match self {
            StoreError::Read { location, .. }
            | StoreError::Parse { location, .. }
            | StoreError::Write { location, .. } => location,
        }
    }
}
