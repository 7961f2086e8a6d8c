use std::sync::Arc;

use silo_core::{AdapterConfig, RawConfig};

use crate::s3::S3Adapter;
use crate::traits::{StorageAdapter, StorageError, StorageResult};

/// Resolve configuration and build the adapter behind the host-facing trait.
///
/// Misconfiguration fails here, before any store client exists, never on the
/// first upload.
pub fn create_adapter(raw: RawConfig) -> StorageResult<Arc<dyn StorageAdapter>> {
    let config =
        AdapterConfig::resolve(raw).map_err(|e| StorageError::ConfigError(e.to_string()))?;
    let adapter = S3Adapter::new(config)?;
    Ok(Arc::new(adapter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use silo_core::config::{ENV_ACCESS_KEY_ID, ENV_SECRET_ACCESS_KEY};

    #[test]
    fn missing_credentials_fail_before_any_client_is_built() {
        // Isolate from any ambient SILO_* configuration; no other test
        // touches the process environment.
        std::env::remove_var(ENV_ACCESS_KEY_ID);
        std::env::remove_var(ENV_SECRET_ACCESS_KEY);

        let result = create_adapter(RawConfig::default());
        assert!(matches!(result, Err(StorageError::ConfigError(_))));
    }

    #[test]
    fn full_config_builds_an_adapter() {
        let raw = RawConfig {
            access_key_id: Some("key".to_string()),
            secret_access_key: Some("secret".to_string()),
            bucket: Some("assets".to_string()),
            endpoint: Some("https://accountid.r2.cloudflarestorage.com".to_string()),
            asset_host: Some("https://cdn.example.test".to_string()),
            path_prefix: Some("blog-media".to_string()),
        };
        assert!(create_adapter(raw).is_ok());
    }
}
