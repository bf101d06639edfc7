//! APIM Probe - connectivity smoke test for OpenAI-compatible model endpoints
//!
//! This crate provides:
//! - A YAML config of named model endpoints behind an API gateway
//! - A one-shot chat completion client that sends the gateway key as bearer
//!   credential and `api-key` header
//! - A sequential test pass that logs the reply or error per model

pub mod config;
pub mod provider;
pub mod runner;
pub mod telemetry;
pub mod tester;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{load_config, ConfigError, ModelEntry, ProbeConfig};
pub use provider::{ProviderClient, ProviderConfig, ProviderError};
pub use runner::run;
pub use telemetry::TelemetryOptions;
pub use tester::{HttpModelTester, ModelTester};
