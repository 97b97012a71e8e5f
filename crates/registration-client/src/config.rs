//! Client configuration.

use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings injected into [`RegistrationClient`](crate::RegistrationClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend root URL with trailing slashes stripped. Empty means
    /// same-origin relative paths.
    pub api_base: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Build a config from an optional base URL.
    pub fn new(api_base: Option<&str>, timeout: Duration) -> Self {
        Self {
            api_base: resolve_api_base(api_base),
            timeout,
        }
    }

    /// Full URL of the students collection.
    pub fn students_url(&self) -> String {
        format!("{}/api/students", self.api_base)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(None, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

/// Strip trailing slashes; unset or blank yields the empty string.
pub fn resolve_api_base(raw: Option<&str>) -> String {
    raw.map(|url| url.trim().trim_end_matches('/').to_string())
        .unwrap_or_default()
}
