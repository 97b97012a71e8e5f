//! Admin-mode gate.
//!
//! Admin mode only toggles the read-only student list. It is derived from the
//! page URL and confers no authorization; access control, if any, belongs to
//! the backend.

use reqwest::Url;

/// Whether the student list is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdminMode {
    #[default]
    Off,
    On,
}

impl AdminMode {
    /// `On` when the first `admin` query parameter of `page_url` is `1`.
    /// Unparseable URLs are treated as `Off`.
    pub fn from_page_url(page_url: &str) -> Self {
        let Ok(url) = Url::parse(page_url) else {
            return AdminMode::Off;
        };

        let admin = url
            .query_pairs()
            .find(|(key, _)| key == "admin")
            .is_some_and(|(_, value)| value == "1");

        if admin {
            AdminMode::On
        } else {
            AdminMode::Off
        }
    }

    pub fn is_on(&self) -> bool {
        matches!(self, AdminMode::On)
    }
}
