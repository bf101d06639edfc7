//! Model tester
//!
//! A tester sends the test prompt to one model and reports the outcome in the
//! log. Failures stay inside the tester so the next model is always tried.

use crate::provider::{ProviderClient, ProviderConfig, ProviderError};
use async_trait::async_trait;

#[async_trait]
pub trait ModelTester: Send + Sync {
    /// Send `prompt` to `target` and log the reply or the error.
    async fn test_model(&self, target: &ProviderConfig, prompt: &str);
}

/// Tests models over HTTP with [`ProviderClient`]
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpModelTester;

impl HttpModelTester {
    pub fn new() -> Self {
        Self
    }

    async fn probe(target: &ProviderConfig, prompt: &str) -> Result<String, ProviderError> {
        let client = ProviderClient::new(target.clone())?;
        client.complete(prompt).await
    }
}

#[async_trait]
impl ModelTester for HttpModelTester {
    async fn test_model(&self, target: &ProviderConfig, prompt: &str) {
        tracing::info!("Testing model: {}", target.name);
        tracing::info!("  URL: {}", target.base_url);
        tracing::info!("  Deployment: {}", target.deployment);

        match Self::probe(target, prompt).await {
            Ok(answer) => tracing::info!("  ✓ Response: {}", answer),
            Err(e) => tracing::error!("  ✗ Error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_logs;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_logs_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "I'm fine, thanks!"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let target = ProviderConfig::new("kaito-phi", format!("{}/v1", server.uri()), "k", "phi-3");
        let logs = capture_logs();
        HttpModelTester::new().test_model(&target, "Hello").await;

        let output = logs.contents();
        assert!(output.contains("Testing model: kaito-phi"));
        assert!(output.contains("Deployment: phi-3"));
        assert!(output.contains("✓ Response: I'm fine, thanks!"));
    }

    #[tokio::test]
    async fn test_logs_error_without_panicking() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream timeout"))
            .mount(&server)
            .await;

        let target = ProviderConfig::new("foundry", format!("{}/v1", server.uri()), "k", "gpt-4o");
        let logs = capture_logs();
        HttpModelTester::new().test_model(&target, "Hello").await;

        let output = logs.contents();
        assert!(output.contains("✗ Error: API error 500"));
        assert!(output.contains("upstream timeout"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_logged() {
        // Reserve a port, then free it so connections are refused
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let target = ProviderConfig::new("offline", format!("http://127.0.0.1:{port}/v1"), "k", "d");
        let logs = capture_logs();
        HttpModelTester::new().test_model(&target, "Hello").await;

        assert!(logs.contents().contains("✗ Error: API request failed"));
    }
}
