//! Probe configuration
//!
//! Loads the list of model endpoints from a YAML file:
//!
//! ```yaml
//! test_prompt: "Hello, how are you?"
//! models:
//!   gpt-4o:
//!     url: https://apim.example.net/foundry/openai/v1
//!     key: <subscription key>
//!     deployment: gpt-4o-2024-08-06
//! ```
//!
//! Models keep the order they have in the file.

use crate::provider::ProviderConfig;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use std::fmt;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Template users copy to create their config
pub const EXAMPLE_CONFIG_PATH: &str = "config.example.yml";

/// Prompt sent when the config has no `test_prompt`
pub const DEFAULT_TEST_PROMPT: &str = "Hello, how are you?";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "Config file not found: {}\nCopy {} to {} and fill in your values.",
        .path.display(),
        EXAMPLE_CONFIG_PATH,
        DEFAULT_CONFIG_PATH
    )]
    Missing { path: PathBuf },

    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in config file {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Top-level config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeConfig {
    /// Models to test, in file order
    #[serde(default, deserialize_with = "deserialize_models")]
    pub models: IndexMap<String, ModelEntry>,

    /// Prompt sent to every model
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub test_prompt: Option<String>,
}

impl ProbeConfig {
    /// Parse a config from YAML text. An empty document yields an empty config.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_yaml::from_value(value)
    }

    /// The configured prompt, or [`DEFAULT_TEST_PROMPT`]
    pub fn test_prompt(&self) -> &str {
        self.test_prompt.as_deref().unwrap_or(DEFAULT_TEST_PROMPT)
    }
}

/// One model endpoint as written in the config file
///
/// Scalar fields are read leniently: `key: 1234567890` becomes `"1234567890"`.
/// Lists or maps in a field count as missing.
#[derive(Clone, Default, Deserialize)]
pub struct ModelEntry {
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub url: Option<String>,

    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub key: Option<String>,

    /// Backend deployment name; the model's display name when omitted
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub deployment: Option<String>,
}

impl ModelEntry {
    /// Resolve this entry into a testable target.
    ///
    /// Returns `None` when `url` or `key` is missing or empty.
    pub fn target(&self, name: &str) -> Option<ProviderConfig> {
        let url = non_empty(&self.url)?;
        let key = non_empty(&self.key)?;
        let deployment = non_empty(&self.deployment).unwrap_or(name);

        Some(ProviderConfig::new(name, url, key, deployment))
    }
}

// Keep the subscription key out of logs and panics
impl fmt::Debug for ModelEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelEntry")
            .field("url", &self.url)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("deployment", &self.deployment)
            .finish()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn deserialize_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_to_string(Value::deserialize(deserializer)?))
}

/// `models:` may be null, and so may any single model.
///
/// A model whose value is not a mapping becomes an empty entry, so the run
/// skips it instead of rejecting the whole file.
fn deserialize_models<'de, D>(deserializer: D) -> Result<IndexMap<String, ModelEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_yaml::Mapping> = Option::deserialize(deserializer)?;

    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(name, entry)| {
            let name = scalar_to_string(name.clone()).unwrap_or_else(|| {
                serde_yaml::to_string(&name)
                    .map(|s| s.trim_end().to_string())
                    .unwrap_or_default()
            });
            let entry = match entry {
                Value::Mapping(_) => serde_yaml::from_value(entry).unwrap_or_default(),
                _ => ModelEntry::default(),
            };
            (name, entry)
        })
        .collect())
}

/// Load the probe config from a YAML file
pub fn load_config(path: &Path) -> Result<ProbeConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::Missing {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    ProbeConfig::from_yaml(&content).map_err(|source| ConfigError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}
