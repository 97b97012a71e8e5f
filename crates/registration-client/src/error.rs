//! Registration client errors.

use crate::types::FormField;
use thiserror::Error;

/// Client-side form validation failure. Never reaches the network layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all required fields.")]
    MissingRequiredField(FormField),

    #[error("Please provide a valid email address.")]
    InvalidEmailFormat,

    #[error("Experience must be a number of years.")]
    InvalidNumericField(FormField),
}

/// Failure while posting a registration.
#[derive(Error, Debug)]
pub enum SubmissionError {
    /// Non-2xx response; `message` is already the user-facing text.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Http(#[from] reqwest::Error),
}

impl SubmissionError {
    /// HTTP status of the rejected request, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            SubmissionError::Api { status, .. } => Some(*status),
            SubmissionError::Http(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// Failure while retrieving the student list.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

/// A field name that is not part of the registration form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown form field: {0}")]
pub struct UnknownField(pub String);
