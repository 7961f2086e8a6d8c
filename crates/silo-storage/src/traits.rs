//! Storage adapter abstraction
//!
//! This module defines the contract the host's upload pipeline programs
//! against, independent of any concrete store client.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use silo_core::UploadRequest;
use thiserror::Error;

use crate::keys;
use crate::serve::PassthroughLayer;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Operation not supported: {0}")]
    Unsupported(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Contract between the host pipeline and a storage adapter.
///
/// `exists` and `delete` are predicates, not fallible operations: any store
/// error, not-found included, resolves to `false` and never propagates.
/// Callers depend on that boolean contract, so it is preserved even though
/// it cannot distinguish "absent" from "unreachable". `save` propagates
/// every failure unchanged.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    /// Check whether an object exists under `target_dir` (or the current
    /// month's directory when none is given).
    async fn exists(&self, file_name: &str, target_dir: Option<&str>) -> bool;

    /// Upload the file under a freshly derived key and return the public URL
    /// of the stored object.
    async fn save(&self, upload: &UploadRequest, target_dir: Option<&str>)
        -> StorageResult<String>;

    /// Delete an object. `false` covers both "already absent" and "delete
    /// failed".
    async fn delete(&self, file_name: &str, target_dir: Option<&str>) -> bool;

    /// Always fails: objects are read back through the public asset host,
    /// never through the adapter.
    async fn read(&self, path: &str) -> StorageResult<Bytes>;

    /// Middleware for the host's asset route. Pass-through: delivery is
    /// delegated to the asset host, so no request is intercepted.
    fn serve(&self) -> PassthroughLayer {
        PassthroughLayer
    }

    /// Month-partitioned directory under `base_dir` for new uploads.
    fn target_dir(&self, base_dir: &str) -> String {
        keys::target_dir(base_dir, Utc::now())
    }

    /// Fresh probabilistically-unique key for `upload` under `target_dir`.
    /// Each call yields a different key, even for the same logical file.
    async fn unique_file_name(&self, upload: &UploadRequest, target_dir: &str) -> String {
        keys::unique_file_name(&upload.name, target_dir)
    }
}
