//! Upload request model.

use std::path::PathBuf;

use bytes::Bytes;
use chrono::{DateTime, Utc};

/// A single uploaded asset handed to the adapter by the host pipeline.
///
/// Immutable input to one save call; the adapter keeps no reference to it
/// afterwards. The host owns the temporary file (if any) and its cleanup.
#[derive(Clone, Debug)]
pub struct UploadRequest {
    /// Original filename as supplied by the uploader.
    pub name: String,
    pub source: UploadSource,
    /// Declared MIME type; `application/octet-stream` is assumed when absent.
    pub content_type: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

/// Where the upload's bytes live until they are pushed to the store.
#[derive(Clone, Debug)]
pub enum UploadSource {
    /// Spooled to a local temporary file by the host.
    File(PathBuf),
    /// Already buffered in memory.
    Memory(Bytes),
}

impl UploadRequest {
    pub fn from_path(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        UploadRequest {
            name: name.into(),
            source: UploadSource::File(path.into()),
            content_type: None,
            uploaded_at: Utc::now(),
        }
    }

    pub fn from_bytes(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        UploadRequest {
            name: name.into(),
            source: UploadSource::Memory(data.into()),
            content_type: None,
            uploaded_at: Utc::now(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}
