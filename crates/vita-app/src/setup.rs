//! Turns loaded configuration into a ready chat engine.

use std::sync::Arc;
use std::time::Duration;

use vita_ai::prompt::HEALTH_SYSTEM_PROMPT;
use vita_ai::{BytezClient, BytezConfig, ChatEngine, EngineOptions, RetrySchedule, TransportError};
use vita_config::{AssistantConfig, RetryConfig, VitaConfig};

use crate::cli::Args;

/// Apply command-line overrides on top of the file config.
pub fn apply_overrides(config: &mut VitaConfig, args: &Args) {
    if let Some(ref model) = args.model {
        config.assistant.model = model.clone();
    }
    if args.no_stream {
        config.assistant.streaming = false;
    }
}

pub fn bytez_config(assistant: &AssistantConfig) -> BytezConfig {
    // A missing key is not fatal here: the first exchange reports it as an
    // authentication error.
    let mut config = BytezConfig::new(assistant.resolve_api_key().unwrap_or_default())
        .with_model(assistant.model.clone())
        .with_base_url(assistant.base_url.clone())
        .with_streaming(assistant.streaming);
    if let Some(temperature) = assistant.temperature {
        config = config.with_temperature(temperature);
    }
    if let Some(max_new_tokens) = assistant.max_new_tokens {
        config = config.with_max_new_tokens(max_new_tokens);
    }
    config
}

pub fn engine_options(retry: &RetryConfig) -> EngineOptions {
    EngineOptions {
        schedule: RetrySchedule::from_secs(&retry.delays_secs),
        fragment_delay: Duration::from_millis(u64::from(retry.fragment_delay_ms)),
        response_timeout: match retry.response_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(u64::from(secs))),
        },
    }
}

pub fn build_engine(config: &VitaConfig) -> Result<ChatEngine, TransportError> {
    let bytez = bytez_config(&config.assistant);
    if bytez.api_key.is_empty() {
        tracing::warn!(
            env = %config.assistant.api_key_env,
            "No API key configured; requests will fail until one is set"
        );
    }
    tracing::info!(model = %bytez.model, streaming = bytez.streaming, "Assistant configured");

    let client = BytezClient::new(bytez)?;
    let system_prompt = config
        .assistant
        .system_prompt
        .clone()
        .unwrap_or_else(|| HEALTH_SYSTEM_PROMPT.to_string());

    Ok(ChatEngine::new(Arc::new(client), system_prompt).with_options(engine_options(&config.retry)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn overrides_replace_model_and_streaming() {
        let mut config = VitaConfig::default();
        let args = Args::parse_from(["vita", "--model", "meta/llama", "--no-stream"]);
        apply_overrides(&mut config, &args);
        assert_eq!(config.assistant.model, "meta/llama");
        assert!(!config.assistant.streaming);
    }

    #[test]
    fn no_overrides_keep_config() {
        let mut config = VitaConfig::default();
        apply_overrides(&mut config, &Args::parse_from(["vita"]));
        assert_eq!(config.assistant.model, AssistantConfig::default().model);
        assert!(config.assistant.streaming);
    }

    #[test]
    fn bytez_config_carries_assistant_settings() {
        let assistant = AssistantConfig {
            api_key: Some("key-1".into()),
            model: "org/model".into(),
            base_url: "http://localhost:9000".into(),
            streaming: false,
            temperature: Some(0.3),
            max_new_tokens: Some(128),
            ..Default::default()
        };
        let bytez = bytez_config(&assistant);
        assert_eq!(bytez.api_key, "key-1");
        assert_eq!(bytez.model, "org/model");
        assert_eq!(bytez.base_url, "http://localhost:9000");
        assert!(!bytez.streaming);
        assert_eq!(bytez.temperature, Some(0.3));
        assert_eq!(bytez.max_new_tokens, Some(128));
    }

    #[test]
    fn missing_key_becomes_blank() {
        let assistant = AssistantConfig {
            api_key: None,
            api_key_env: "VITA_TEST_SETUP_NO_SUCH_VAR".into(),
            ..Default::default()
        };
        assert_eq!(bytez_config(&assistant).api_key, "");
    }

    #[test]
    fn engine_options_from_retry_config() {
        let options = engine_options(&RetryConfig {
            delays_secs: vec![1, 2],
            fragment_delay_ms: 5,
            response_timeout_secs: 0,
        });
        assert_eq!(options.schedule, RetrySchedule::from_secs(&[1, 2]));
        assert_eq!(options.fragment_delay, Duration::from_millis(5));
        assert_eq!(options.response_timeout, None);

        let options = engine_options(&RetryConfig::default());
        assert_eq!(options.response_timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn engine_uses_custom_system_prompt() {
        let mut config = VitaConfig::default();
        config.assistant.system_prompt = Some("Be brief.".into());
        let engine = build_engine(&config).unwrap();
        assert_eq!(
            engine.snapshot_for_request(),
            vec![vita_ai::Message::system("Be brief.")]
        );
    }

    #[test]
    fn engine_defaults_to_health_prompt() {
        let engine = build_engine(&VitaConfig::default()).unwrap();
        assert_eq!(
            engine.snapshot_for_request()[0].content,
            HEALTH_SYSTEM_PROMPT
        );
    }
}
