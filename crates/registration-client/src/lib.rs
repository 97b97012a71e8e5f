//! Music center student registration client.
//!
//! Validates the registration form, posts it to `{api_base}/api/students`,
//! and fetches the list of registered students for the admin view.

mod admin;
mod client;
mod config;
mod error;
mod flag;
mod flow;
mod page;
mod roster;
mod types;
mod validate;

pub use admin::AdminMode;
pub use client::{normalize_students, RegistrationClient, StudentsApi};
pub use config::{resolve_api_base, ClientConfig};
pub use error::{FetchError, SubmissionError, UnknownField, ValidationError};
pub use flag::BusyFlag;
pub use flow::{FlowState, SubmissionFlow, SUBMITTING_LABEL, SUBMIT_LABEL};
pub use page::RegistrationPage;
pub use roster::{ListState, StudentList, COLUMNS};
pub use types::*;
pub use validate::{is_valid_email, validate};
