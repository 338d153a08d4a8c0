//! Error types for registry construction and config loading.

use thiserror::Error;

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors that can occur while loading config or building the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate service key: {0}")]
    DuplicateKey(String),

    #[error("config declares no services")]
    Empty,
}
