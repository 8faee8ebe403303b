//! Error types for validator configuration.
//!
//! Package problems are reported as [`ValidationError`]s from the core
//! crate; this module only covers failing to load the validator's own
//! configuration.
//!
//! [`ValidationError`]: rayforge_package_core::ValidationError

use thiserror::Error;

/// Errors that can occur while loading a [`ValidatorConfig`](crate::ValidatorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A setting parsed but holds an unusable value.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
