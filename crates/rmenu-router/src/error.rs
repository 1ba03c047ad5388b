use std::path::PathBuf;

use thiserror::Error;

use crate::emit::RecordKind;

/// Failure of a single sink write
#[derive(Error, Debug)]
pub enum SinkError {
    /// File system operation failed.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Record could not be serialized.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    /// Sink refused the record.
    #[error("record rejected: {0}")]
    Rejected(String),
}

/// A node whose output could not be written
///
/// Writes for the node stop at the first failing record; records already
/// written for it stay in place.
#[derive(Error, Debug)]
#[error("failed to emit {record} for '{path}'")]
pub struct EmitError {
    /// Canonical path of the node
    pub path: String,
    /// Record that failed
    pub record: RecordKind,
    #[source]
    pub source: SinkError,
}

/// Errors loading a module manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file could not be read.
    #[error("failed to read manifest {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML syntax or shape error.
    #[error("invalid TOML manifest: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON syntax or shape error.
    #[error("invalid JSON manifest: {0}")]
    Json(#[from] serde_json::Error),
    /// File extension is neither `.toml` nor `.json`.
    #[error("unsupported manifest format: {0:?}")]
    UnsupportedFormat(PathBuf),
}
