use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};
use silo_core::{AdapterConfig, UploadRequest, UploadSource};
use tokio::fs;

use crate::keys;
use crate::traits::{StorageAdapter, StorageError, StorageResult};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// S3-compatible storage facade
///
/// Wraps an object store client behind the host-facing [`StorageAdapter`]
/// contract. Each operation is a single store round trip; there is no retry
/// and no shared mutable state between in-flight calls.
#[derive(Clone)]
pub struct S3Adapter {
    store: Arc<dyn ObjectStore>,
    config: AdapterConfig,
}

impl S3Adapter {
    /// Build the facade from resolved configuration.
    ///
    /// The region is fixed to `auto` for S3-compatible endpoints (R2, MinIO,
    /// Spaces); `allow_http` is enabled only for plain-http endpoints. A
    /// missing bucket or malformed endpoint fails here, not on first use.
    pub fn new(config: AdapterConfig) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::new()
            .with_region("auto")
            .with_access_key_id(&config.access_key_id)
            .with_secret_access_key(&config.secret_access_key);

        if let Some(ref bucket) = config.bucket {
            builder = builder.with_bucket_name(bucket);
        }
        if let Some(ref endpoint) = config.endpoint {
            let allow_http = endpoint.starts_with("http://");
            builder = builder.with_endpoint(endpoint).with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Adapter {
            store: Arc::new(store),
            config,
        })
    }

    #[cfg(test)]
    fn with_store(store: Arc<dyn ObjectStore>, config: AdapterConfig) -> Self {
        S3Adapter { store, config }
    }

    /// Directory for an operation: the caller's override when given,
    /// otherwise the configured prefix partitioned by the current month.
    fn resolve_dir(&self, target_dir: Option<&str>) -> String {
        match target_dir {
            Some(dir) => dir.to_string(),
            None => keys::target_dir(&self.config.path_prefix, Utc::now()),
        }
    }

    /// Read the whole payload into memory. Large files cost proportional
    /// memory; there is no streaming upload path.
    async fn payload(upload: &UploadRequest) -> StorageResult<Bytes> {
        match &upload.source {
            UploadSource::File(path) => Ok(Bytes::from(fs::read(path).await?)),
            UploadSource::Memory(data) => Ok(data.clone()),
        }
    }
}

#[async_trait]
impl StorageAdapter for S3Adapter {
    async fn exists(&self, file_name: &str, target_dir: Option<&str>) -> bool {
        let dir = self.resolve_dir(target_dir);
        let key = keys::object_key(&dir, file_name);
        let location = Path::from(key.clone());

        match self.store.head(&location).await {
            Ok(_) => true,
            // Not-found and transport failures both collapse to false; the
            // host treats this as a predicate, not a fallible operation.
            Err(e) => {
                tracing::debug!(error = %e, key = %key, "existence check resolved false");
                false
            }
        }
    }

    async fn save(
        &self,
        upload: &UploadRequest,
        target_dir: Option<&str>,
    ) -> StorageResult<String> {
        // The upload's own timestamp picks the month partition, so a save
        // lands in the same directory no matter when it is retried by the
        // host.
        let dir = match target_dir {
            Some(dir) => dir.to_string(),
            None => keys::target_dir(&self.config.path_prefix, upload.uploaded_at),
        };
        let key = self.unique_file_name(upload, &dir).await;
        let key = keys::normalize_key(&key).to_string();
        let location = Path::from(key.clone());

        let data = Self::payload(upload).await?;
        let size = data.len() as u64;
        let content_type = upload
            .content_type
            .clone()
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.into());

        let start = Instant::now();

        self.store
            .put_opts(&location, PutPayload::from(data), PutOptions::from(attributes))
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    key = %key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "upload failed"
                );
                StorageError::UploadFailed(e.to_string())
            })?;

        let url = keys::public_url(&self.config.asset_host, &key);

        tracing::info!(
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "upload successful"
        );

        Ok(url)
    }

    async fn delete(&self, file_name: &str, target_dir: Option<&str>) -> bool {
        let dir = self.resolve_dir(target_dir);
        let key = keys::object_key(&dir, file_name);
        let location = Path::from(key.clone());
        let start = Instant::now();

        match self.store.delete(&location).await {
            Ok(()) => {
                tracing::info!(
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "delete successful"
                );
                true
            }
            // Mirrors exists: already-absent and delete-failed both report
            // false.
            Err(e) => {
                tracing::debug!(error = %e, key = %key, "delete resolved false");
                false
            }
        }
    }

    async fn read(&self, _path: &str) -> StorageResult<Bytes> {
        Err(StorageError::Unsupported(
            "read() is not available; assets are served from the public asset host",
        ))
    }
}
