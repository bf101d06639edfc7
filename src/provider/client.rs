//! OpenAI-compatible provider client
//!
//! Sends a single non-streaming chat completion through an API gateway.
//! The request body is built with async-openai's types; the HTTP call goes
//! through reqwest so the gateway's `api-key` header travels next to the
//! bearer credential and nothing is retried behind our back.

use super::{ProviderConfig, MAX_TOKENS};
use async_openai::{
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
    },
};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;

/// Header the gateway reads the subscription key from
pub const API_KEY_HEADER: &str = "api-key";

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API key contains characters not allowed in an HTTP header")]
    InvalidKey,

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to build request: {0}")]
    Request(#[from] OpenAIError),

    #[error("API request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("Failed to parse response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("No content in response")]
    EmptyResponse,
}

// Only the fields a connectivity check reads
#[derive(Debug, serde::Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, serde::Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, serde::Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

/// OpenAI-compatible client for one model endpoint
#[derive(Clone)]
pub struct ProviderClient {
    config: ProviderConfig,
    http_client: reqwest::Client,
}

impl ProviderClient {
    /// Create a new provider client from config
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let headers = Self::auth_headers(&config.api_key)?;

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ProviderError::Client)?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Bearer credential plus the gateway's own key header, both always sent
    fn auth_headers(api_key: &str) -> Result<HeaderMap, ProviderError> {
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| ProviderError::InvalidKey)?;
        bearer.set_sensitive(true);

        let mut key = HeaderValue::from_str(api_key).map_err(|_| ProviderError::InvalidKey)?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(API_KEY_HEADER, key);
        Ok(headers)
    }

    /// Build the chat completion request for a single user prompt
    pub fn build_request(&self, prompt: &str) -> Result<CreateChatCompletionRequest, ProviderError> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into(),
        ];

        // Gateways in front of older deployments only understand `max_tokens`
        #[allow(deprecated)]
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.config.deployment)
            .messages(messages)
            .max_tokens(MAX_TOKENS)
            .build()?;

        Ok(request)
    }

    /// Send `prompt` as the only user message and return the reply text
    pub async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = self.build_request(prompt)?;
        let url = self.config.chat_completions_url();

        let start = std::time::Instant::now();
        tracing::debug!(
            target: "llm",
            model = %self.config.name,
            deployment = %self.config.deployment,
            url = %url,
            "Starting chat completion"
        );

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(ProviderError::Transport)?;

        let elapsed = start.elapsed();

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(
                target: "llm",
                status = %status,
                elapsed_ms = elapsed.as_millis() as u64,
                "Chat completion returned error"
            );
            return Err(ProviderError::Api { status, body });
        }

        let body: CompletionResponse = response.json().await.map_err(ProviderError::Decode)?;

        tracing::debug!(
            target: "llm",
            model = %self.config.name,
            elapsed_ms = elapsed.as_millis() as u64,
            choices = body.choices.len(),
            "Chat completion finished"
        );

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ProviderError::EmptyResponse)
    }
}
