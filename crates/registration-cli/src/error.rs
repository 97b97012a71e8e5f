//! Application error types.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("{0}")]
    Field(#[from] registration_client::UnknownField),

    #[error("Invalid value '{value}' for {field} (choose from: {choices})")]
    InvalidChoice {
        field: registration_client::FormField,
        value: String,
        choices: String,
    },
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
