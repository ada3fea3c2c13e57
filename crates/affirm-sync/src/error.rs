use thiserror::Error;

/// Errors produced by the sync layer.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The remote blob store rejected or failed an operation.
    #[error("Blob store error: {0}")]
    Blob(String),

    /// A remote call outlived the soft deadline.
    #[error("Remote operation timed out")]
    Timeout,

    /// Local store failure while applying remote state.
    #[error("Store error: {0}")]
    Store(#[from] affirm_store::StoreError),

    /// (De)serialization failure for a blob payload.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O failure in a file-backed blob store.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SyncError>;
