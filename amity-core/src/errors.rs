use thiserror::Error;

/// Result type used across the Amity core crate.
pub type Result<T> = std::result::Result<T, AmityError>;

/// Process-level error raised while bootstrapping an Amity binary.
#[derive(Debug, Error)]
pub enum AmityError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("logging error: {0}")]
    Logging(String),
}

/// Dedicated configuration error used by the configuration module.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for environment variable {key}: {value}")]
    InvalidEnvVar { key: String, value: String },
}
