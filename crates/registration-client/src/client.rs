//! Students API HTTP client.

use crate::config::ClientConfig;
use crate::error::{FetchError, SubmissionError};
use crate::types::{RegistrationRequest, StudentRecord};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Backend operations used by the submission flow and the student list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentsApi: Send + Sync {
    /// Post one registration. Any 2xx status is success.
    async fn submit_registration(&self, request: &RegistrationRequest)
        -> Result<(), SubmissionError>;

    /// Fetch the full list of registrations.
    async fn fetch_students(&self) -> Result<Vec<StudentRecord>, FetchError>;
}

/// HTTP client for `{api_base}/api/students`.
#[derive(Clone, Debug)]
pub struct RegistrationClient {
    client: Client,
    config: ClientConfig,
}

impl RegistrationClient {
    /// Create a new client.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }

    /// Resolved backend root.
    pub fn api_base(&self) -> &str {
        &self.config.api_base
    }

    /// Extract the user-facing message from a rejected submission.
    async fn submission_error(response: Response) -> SubmissionError {
        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return SubmissionError::Http(e),
        };

        let message = if is_json {
            json_error_message(&body).unwrap_or(body)
        } else {
            body
        };

        warn!(status = %status, error = %message, "Registration rejected");

        let message = if message.is_empty() {
            format!("Server error: {}", status.as_u16())
        } else {
            message
        };

        SubmissionError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl StudentsApi for RegistrationClient {
    #[instrument(skip(self, request), fields(instrument = %request.instrument))]
    async fn submit_registration(
        &self,
        request: &RegistrationRequest,
    ) -> Result<(), SubmissionError> {
        let url = self.config.students_url();
        debug!(url = %url, "Submitting registration");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::submission_error(response).await);
        }

        debug!(status = %response.status(), "Registration accepted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch_students(&self) -> Result<Vec<StudentRecord>, FetchError> {
        let response = self.client.get(self.config.students_url()).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %message, "Student list fetch failed");
            let message = if message.is_empty() {
                "Failed to fetch students".to_string()
            } else {
                message
            };
            return Err(FetchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        let students = normalize_students(body)?;
        debug!("Fetched {} students", students.len());
        Ok(students)
    }
}

/// `message`, then `error`, then the JSON text itself. `None` when the body is
/// not JSON.
fn json_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    let field = ["message", "error"]
        .into_iter()
        .find_map(|key| match value.get(key)? {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        });

    Some(field.unwrap_or_else(|| value.to_string()))
}

/// Accept a bare array or `{"students": [...]}`; anything else is empty.
pub fn normalize_students(body: Value) -> Result<Vec<StudentRecord>, FetchError> {
    let list = match body {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => match map.remove("students") {
            Some(students @ Value::Array(_)) => students,
            _ => return Ok(Vec::new()),
        },
        _ => return Ok(Vec::new()),
    };

    Ok(serde_json::from_value(list)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_bare_array() {
        let students = normalize_students(json!([
            {"student_name": "A", "email": "a@x.com"},
            {"student_name": "B", "email": "b@x.com", "grade": 4}
        ]))
        .unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[1].grade, "4");
    }

    #[test]
    fn test_normalize_wrapped_object() {
        let students =
            normalize_students(json!({"students": [{"student_name": "A", "email": "a@x.com"}]}))
                .unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].student_name, "A");
        assert_eq!(students[0].parent_name, "");
    }

    #[test]
    fn test_normalize_unrecognized_shapes() {
        for body in [
            json!({"data": []}),
            json!({"students": null}),
            json!({"students": "none"}),
            json!("text"),
            json!(42),
            json!(null),
        ] {
            assert!(normalize_students(body).unwrap().is_empty());
        }
    }

    #[test]
    fn test_json_error_message_prefers_message_then_error() {
        assert_eq!(
            json_error_message(r#"{"message":"Email already registered","error":"x"}"#),
            Some("Email already registered".into())
        );
        assert_eq!(
            json_error_message(r#"{"error":"Bad request"}"#),
            Some("Bad request".into())
        );
        assert_eq!(
            json_error_message(r#"{"detail":"nope"}"#),
            Some(r#"{"detail":"nope"}"#.into())
        );
        assert_eq!(json_error_message("<html>oops</html>"), None);
    }
}
