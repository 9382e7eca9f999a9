//! Error types for SnowStore
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for SnowStore operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    /// The record file is absent, or the process may not read it.
    #[error("entry not found")]
    EntryNotFound,

    /// An empty parent was passed to a namespace-scoped operation.
    #[error("root parent can't be specified")]
    RootParentSpecified,

    /// A parent or key that would leave the data directory.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Record corruption detected: {0}")]
    Corruption(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// True for [`StoreError::EntryNotFound`]
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::EntryNotFound)
    }

    /// True for [`StoreError::RootParentSpecified`]
    pub fn is_root_parent(&self) -> bool {
        matches!(self, StoreError::RootParentSpecified)
    }
}

impl From<bincode::Error> for StoreError {
    fn from(err: bincode::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
