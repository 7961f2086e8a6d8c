//! Silo Storage Library
//!
//! This crate provides the storage-adapter contract a CMS host programs
//! against, plus the S3-compatible facade behind it. An upload is mapped to
//! a month-partitioned, sanitized, randomly-suffixed key, pushed to the
//! object store in a single put, and returned to the host as a public URL on
//! the configured asset host.
//!
//! # Storage key format
//!
//! Keys look like `prefix/YYYY/MM/base-suffix.ext`. They never carry a
//! leading `/` and always use forward slashes regardless of host OS. Key
//! derivation is centralized in the `keys` module.
//!
//! `exists` and `delete` are predicates: every store error, not-found
//! included, collapses to `false`. Read-back is unsupported by design;
//! object delivery is delegated entirely to the asset host.

pub mod factory;
pub mod keys;
pub mod s3;
pub mod serve;
pub mod traits;

// Re-export commonly used types
pub use factory::create_adapter;
pub use s3::S3Adapter;
pub use serve::{Passthrough, PassthroughLayer};
pub use traits::{StorageAdapter, StorageError, StorageResult};
