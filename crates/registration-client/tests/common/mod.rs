//! Common test utilities for integration tests.

use registration_client::{ClientConfig, RegistrationClient};
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

/// Start a mock students backend.
pub async fn mock_backend() -> MockServer {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("registration_client=debug")
        .with_test_writer()
        .try_init();

    MockServer::start().await
}

/// Create a registration client pointed at the mock backend, with a trailing
/// slash to exercise base URL normalization.
pub fn test_client(mock_server: &MockServer) -> Arc<RegistrationClient> {
    let base = format!("{}/", mock_server.uri());
    Arc::new(
        RegistrationClient::new(ClientConfig::new(Some(base.as_str()), Duration::from_secs(5))).unwrap(),
    )
}
