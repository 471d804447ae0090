//! Inference endpoint and credential configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which model to talk to and how to authenticate.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Model identifier on the inference service.
    pub model: String,
    pub base_url: String,
    /// Explicit API key. Takes precedence over `api_key_env`.
    pub api_key: Option<String>,
    /// Environment variable consulted when `api_key` is unset.
    pub api_key_env: String,
    /// Request an incremental response; the engine falls back to a single
    /// payload when the model cannot stream.
    pub streaming: bool,
    pub temperature: Option<f64>,
    pub max_new_tokens: Option<u32>,
    /// Replaces the built-in health-information instruction.
    pub system_prompt: Option<String>,
}

impl fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_key_env", &self.api_key_env)
            .field("streaming", &self.streaming)
            .field("temperature", &self.temperature)
            .field("max_new_tokens", &self.max_new_tokens)
            .field("system_prompt", &self.system_prompt.is_some())
            .finish()
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: "google/gemini-3-pro-preview".into(),
            base_url: "https://api.bytez.com".into(),
            api_key: None,
            api_key_env: "BYTEZ_API_KEY".into(),
            streaming: true,
            temperature: None,
            max_new_tokens: None,
            system_prompt: None,
        }
    }
}

impl AssistantConfig {
    /// Resolve the API key: explicit value first, then the configured
    /// environment variable. Blank values count as missing.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}
