//! LLM Provider layer
//!
//! Minimal OpenAI-compatible client for one-shot chat completions against
//! an API gateway.

mod client;
mod config;

pub use client::*;
pub use config::*;
