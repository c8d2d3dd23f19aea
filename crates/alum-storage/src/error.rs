//! Storage error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The backing file does not contain a JSON object.
    #[error("storage file {path} is not valid JSON: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A partial update produced a value that does not fit the target shape.
    #[error("invalid update for {key}: {reason}")]
    InvalidUpdate { key: String, reason: String },

    /// No storage directory could be determined.
    #[error("no storage directory available")]
    NoDirectory,
}
