use std::path::PathBuf;

use thiserror::Error;

/// Every failure a service operation can raise. Validation always happens
/// before any mutation, so an `Err` means the collections are untouched.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    InvalidRange(String),

    #[error("{0}")]
    Authentication(String),

    /// Fatal I/O failure while reading or writing a collection file.
    #[error("unable to access {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The collection file exists but does not hold the expected JSON array.
    #[error("malformed JSON in {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
