//! Configuration schema types for Vita.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults the assistant ships with.

mod assistant;
mod retry;
mod system;

pub use assistant::*;
pub use retry::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Root configuration for Vita.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VitaConfig {
    pub assistant: AssistantConfig,
    pub retry: RetryConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_correct_assistant() {
        let config = VitaConfig::default();
        assert_eq!(config.assistant.model, "google/gemini-3-pro-preview");
        assert_eq!(config.assistant.base_url, "https://api.bytez.com");
        assert_eq!(config.assistant.api_key_env, "BYTEZ_API_KEY");
        assert!(config.assistant.api_key.is_none());
        assert!(config.assistant.streaming);
        assert!(config.assistant.system_prompt.is_none());
    }

    #[test]
    fn default_config_has_correct_retry() {
        let config = VitaConfig::default();
        assert_eq!(config.retry.delays_secs, vec![3, 6, 10]);
        assert_eq!(config.retry.fragment_delay_ms, 15);
        assert_eq!(config.retry.response_timeout_secs, 60);
    }

    #[test]
    fn default_config_has_correct_logging() {
        let config = VitaConfig::default();
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: VitaConfig = toml::from_str(
            r#"
[retry]
delays_secs = [1, 2]
"#,
        )
        .unwrap();
        assert_eq!(config.retry.delays_secs, vec![1, 2]);
        assert_eq!(config.retry.fragment_delay_ms, 15);
        assert_eq!(config.assistant.model, "google/gemini-3-pro-preview");
    }

    #[test]
    fn log_level_parses_uppercase() {
        let config: VitaConfig = toml::from_str(
            r#"
[logging]
level = "DEBUG"
"#,
        )
        .unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.level.as_directive(), "debug");
    }
}
