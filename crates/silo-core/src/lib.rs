//! Core types for the silo storage adapter.
//!
//! This crate holds everything the adapter needs before it talks to a store:
//! configuration resolution (explicit value, then environment variable, then
//! default) and the upload request model handed over by the host pipeline.
//! No network I/O lives here.

pub mod config;
pub mod error;
pub mod upload;

// Re-export commonly used types
pub use config::{AdapterConfig, RawConfig};
pub use error::ConfigError;
pub use upload::{UploadRequest, UploadSource};
