//! Configuration error types.

/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading and applying client settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Failed to serialize settings.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// No token source yielded a value.
    #[error(
        "API token not found. Set {env_var}, point token_env at a variable holding it, or add token to your config"
    )]
    TokenNotFound { env_var: String },

    /// No zone configured.
    #[error("no zone configured. Set CONVEYOR_ZONE or add zone to your config")]
    MissingZone,

    /// A setting has a value that cannot be used.
    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}
