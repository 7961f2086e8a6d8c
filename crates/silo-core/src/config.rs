//! Configuration module
//!
//! Every field resolves through the same ordered chain: explicit value from
//! the host configuration, then a named environment variable, then (for the
//! asset host and path prefix only) a built-in default. Empty strings count
//! as absent at every stage. Resolution happens once, synchronously, at
//! adapter construction; the environment is never re-read afterwards.

use std::env;

use serde::Deserialize;

use crate::error::ConfigError;

pub const ENV_ACCESS_KEY_ID: &str = "SILO_ACCESS_KEY_ID";
pub const ENV_SECRET_ACCESS_KEY: &str = "SILO_SECRET_ACCESS_KEY";
pub const ENV_BUCKET: &str = "SILO_BUCKET";
pub const ENV_ENDPOINT: &str = "SILO_ENDPOINT";
pub const ENV_ASSET_HOST: &str = "SILO_ASSET_HOST";
pub const ENV_PATH_PREFIX: &str = "SILO_PATH_PREFIX";

/// Placeholder CDN host used when neither configuration nor environment
/// supplies one.
pub const DEFAULT_ASSET_HOST: &str = "https://assets.example.com";
/// Key prefix grouping all adapter-managed objects within a shared bucket.
pub const DEFAULT_PATH_PREFIX: &str = "silo-media";

/// Configuration as supplied by the host, before resolution.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub bucket: Option<String>,
    pub endpoint: Option<String>,
    pub asset_host: Option<String>,
    pub path_prefix: Option<String>,
}

/// Fully-resolved adapter configuration, immutable for the adapter's
/// lifetime.
///
/// The bucket stays optional here; a missing bucket fails when the store
/// client is built rather than during resolution. Only the two credentials
/// are mandatory.
#[derive(Clone, Debug)]
pub struct AdapterConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: Option<String>,
    pub endpoint: Option<String>,
    pub asset_host: String,
    pub path_prefix: String,
}

impl AdapterConfig {
    /// Resolve configuration against the process environment.
    pub fn resolve(raw: RawConfig) -> Result<Self, ConfigError> {
        Self::resolve_with(raw, |name| env::var(name).ok())
    }

    /// Resolve configuration with an explicit environment lookup.
    ///
    /// Pure apart from the supplied lookup; tests use this with a closure
    /// over a map instead of mutating process state.
    pub fn resolve_with(
        raw: RawConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let access_key_id = resolve_field(raw.access_key_id, env(ENV_ACCESS_KEY_ID)).ok_or(
            ConfigError::MissingCredential {
                field: "access_key_id",
                env_var: ENV_ACCESS_KEY_ID,
            },
        )?;
        let secret_access_key = resolve_field(raw.secret_access_key, env(ENV_SECRET_ACCESS_KEY))
            .ok_or(ConfigError::MissingCredential {
                field: "secret_access_key",
                env_var: ENV_SECRET_ACCESS_KEY,
            })?;

        Ok(AdapterConfig {
            access_key_id,
            secret_access_key,
            bucket: resolve_field(raw.bucket, env(ENV_BUCKET)),
            endpoint: resolve_field(raw.endpoint, env(ENV_ENDPOINT)),
            asset_host: resolve_field(raw.asset_host, env(ENV_ASSET_HOST))
                .unwrap_or_else(|| DEFAULT_ASSET_HOST.to_string()),
            path_prefix: resolve_field(raw.path_prefix, env(ENV_PATH_PREFIX))
                .unwrap_or_else(|| DEFAULT_PATH_PREFIX.to_string()),
        })
    }
}

/// One step of the fallback chain: explicit value first, then the
/// environment. Empty strings are treated as absent.
fn resolve_field(explicit: Option<String>, env_value: Option<String>) -> Option<String> {
    explicit
        .filter(|v| !v.is_empty())
        .or_else(|| env_value.filter(|v| !v.is_empty()))
}
