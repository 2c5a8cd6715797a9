//! Error types for configuration loading

use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the config file failed
    #[error("config IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for this schema
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A configuration-module response is not valid JSON for this schema
    #[error("config entries parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required setting is absent or empty
    #[error("missing configuration value: {field}")]
    Missing {
        /// Name of the missing setting
        field: String,
    },

    /// A setting is present but unusable
    #[error("invalid configuration value for {field}: {reason}")]
    Invalid {
        /// Name of the offending setting
        field: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
