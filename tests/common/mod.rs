//! Shared helpers for integration tests.

use jpush_client::JPushClient;
use wiremock::MockServer;

/// Start a mock provider and a client routed to it.
pub async fn mock_client() -> (MockServer, JPushClient) {
    let server = MockServer::start().await;
    let client = JPushClient::builder("appkey", "secret")
        .base_url(server.uri())
        .build()
        .unwrap();
    (server, client)
}
