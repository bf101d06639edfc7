//! Provider configuration

use std::fmt;

/// Completion budget for a connectivity check
pub const MAX_TOKENS: u32 = 100;

/// A resolved OpenAI-compatible endpoint for one configured model
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Display name from the config file
    pub name: String,
    /// API base URL (e.g., "https://apim.example.net/foundry/openai/v1")
    pub base_url: String,
    /// Gateway subscription key
    pub api_key: String,
    /// Backend model identifier sent as `model`
    pub deployment: String,
}

impl ProviderConfig {
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        deployment: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            deployment: deployment.into(),
        }
    }

    /// Chat completions endpoint under the base URL
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("deployment", &self.deployment)
            .finish()
    }
}
