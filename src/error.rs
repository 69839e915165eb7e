// src/error.rs
use std::path::PathBuf;

/// Errors raised around the matching core. The query path itself never fails.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed knowledge base (json): {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed knowledge base (bincode): {0}")]
    Bincode(#[from] bincode::Error),
    #[error("could not replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
    /// `save` was called on an engine that was not loaded from a file.
    #[error("no storage path bound to this engine")]
    NoStoragePath,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
