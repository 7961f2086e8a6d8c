use thiserror::Error;

/// Configuration errors.
///
/// These are fatal at adapter construction: a misconfigured adapter must
/// never be built, so missing credentials surface here instead of on the
/// first upload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} is required: pass it in the adapter configuration or set {env_var}")]
    MissingCredential {
        field: &'static str,
        env_var: &'static str,
    },
}
