use std::path::PathBuf;

use pathstore_codec::CodecError;
use pathstore_types::{PathKey, TypeError};

/// Errors from path store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No value exists at the requested path.
    #[error("path not found: {0}")]
    NotFound(PathKey),

    /// The value violates a storage invariant (e.g. empty content type).
    #[error("invalid value for {path}: {source}")]
    InvalidValue {
        path: PathKey,
        #[source]
        source: TypeError,
    },

    /// The value could not be encoded.
    #[error("failed to encode value for {path}: {source}")]
    Encoding {
        path: PathKey,
        #[source]
        source: CodecError,
    },

    /// The stored bytes are corrupt.
    #[error("corrupt value at {path}: {source}")]
    Decoding {
        path: PathKey,
        #[source]
        source: CodecError,
    },

    /// The engine failed while reading.
    #[error("engine read error: {0}")]
    EngineRead(String),

    /// The engine failed while writing or committing.
    #[error("engine write error: {0}")]
    EngineWrite(String),

    /// The engine could not be opened.
    #[error("failed to open store at {}: {reason}", .path.display())]
    Open { path: PathBuf, reason: String },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Errors caused by the caller's input rather than by the store.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidValue { .. } | Self::Encoding { .. })
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
