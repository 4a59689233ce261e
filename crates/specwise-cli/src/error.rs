//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Specification could not be built or translated
    #[error("Specification error: {0}")]
    Spec(#[from] specwise_domain::SpecError),

    /// Translated expression could not be compiled or rendered
    #[error("Expression error: {0}")]
    Expression(#[from] specwise_store::ExprError),

    /// Store error
    #[error("Store error: {0}")]
    Store(#[from] specwise_store::StoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
