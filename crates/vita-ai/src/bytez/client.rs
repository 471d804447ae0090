//! Bytez API client struct, request building, and response parsing.

use serde::Deserialize;
use serde_json::Value;

use crate::{BatchPayload, Message, TransportError};

use super::config::BytezConfig;

/// Longest upstream error body carried into an error message.
const MAX_ERROR_DETAIL: usize = 200;

/// Bytez API client.
pub struct BytezClient {
    pub(crate) config: BytezConfig,
    pub(crate) http: reqwest::Client,
}

/// Body of a single-payload answer.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    error: Value,
    #[serde(default)]
    output: Value,
}

impl BytezClient {
    pub fn new(config: BytezConfig) -> Result<Self, TransportError> {
        // No overall timeout: streamed replies may legitimately take minutes.
        // The engine bounds each wait instead.
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &BytezConfig {
        &self.config
    }

    pub(crate) fn api_url(&self) -> String {
        format!(
            "{}/models/v2/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    pub(crate) fn auth_header(&self) -> String {
        format!("Key {}", self.config.api_key.trim())
    }

    /// Build the JSON request body for the Bytez API.
    pub(crate) fn build_request_body(&self, messages: &[Message], stream: bool) -> Value {
        let mut params = serde_json::Map::new();
        if let Some(temperature) = self.config.temperature {
            params.insert("temperature".into(), temperature.into());
        }
        if let Some(max_new_tokens) = self.config.max_new_tokens {
            params.insert("max_new_tokens".into(), max_new_tokens.into());
        }

        serde_json::json!({
            "messages": messages,
            "stream": stream,
            "params": params,
        })
    }

    /// Parse a single-payload answer.
    pub(crate) fn parse_envelope(&self, json: Value) -> Result<BatchPayload, TransportError> {
        let envelope: Envelope =
            serde_json::from_value(json).map_err(|e| TransportError::Parse(e.to_string()))?;

        if let Some(error) = envelope_error(&envelope.error) {
            return Err(TransportError::Api(error));
        }
        Ok(BatchPayload::from_value(envelope.output))
    }
}

/// Text of a non-empty `error` field.
fn envelope_error(error: &Value) -> Option<String> {
    match error {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Short description of a failed response body: the envelope's `error`
/// when present, otherwise the raw text, truncated.
pub(crate) fn error_detail(body: &str) -> String {
    let detail = serde_json::from_str::<Envelope>(body)
        .ok()
        .and_then(|envelope| envelope_error(&envelope.error))
        .unwrap_or_else(|| body.trim().to_string());
    detail.chars().take(MAX_ERROR_DETAIL).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(config: BytezConfig) -> BytezClient {
        BytezClient::new(config).unwrap()
    }

    #[test]
    fn url_joins_base_and_model() {
        let c = client(BytezConfig::new("k").with_base_url("https://api.bytez.com/"));
        assert_eq!(
            c.api_url(),
            "https://api.bytez.com/models/v2/google/gemini-3-pro-preview"
        );
    }

    #[test]
    fn auth_header_uses_key_scheme() {
        let c = client(BytezConfig::new(" abc "));
        assert_eq!(c.auth_header(), "Key abc");
    }

    #[test]
    fn request_body_carries_roles_and_stream_flag() {
        let c = client(BytezConfig::new("k"));
        let body = c.build_request_body(
            &[Message::system("be careful"), Message::user("hello")],
            true,
        );
        assert_eq!(body["stream"], true);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "hello");
        assert_eq!(body["params"], json!({}));
    }

    #[test]
    fn request_body_includes_configured_params() {
        let c = client(
            BytezConfig::new("k")
                .with_temperature(0.5)
                .with_max_new_tokens(300),
        );
        let body = c.build_request_body(&[Message::user("hi")], false);
        assert_eq!(body["stream"], false);
        assert_eq!(body["params"]["temperature"], 0.5);
        assert_eq!(body["params"]["max_new_tokens"], 300);
    }

    #[test]
    fn envelope_output_is_normalized() {
        let c = client(BytezConfig::new("k"));
        let payload = c
            .parse_envelope(json!({ "error": null, "output": { "role": "assistant", "content": "Hi." } }))
            .unwrap();
        assert_eq!(payload.into_text(), "Hi.");
    }

    #[test]
    fn envelope_error_is_reported() {
        let c = client(BytezConfig::new("k"));
        let err = c
            .parse_envelope(json!({ "error": "Rate limit exceeded", "output": null }))
            .unwrap_err();
        assert!(matches!(err, TransportError::Api(ref m) if m == "Rate limit exceeded"));
    }

    #[test]
    fn empty_envelope_error_is_ignored() {
        let c = client(BytezConfig::new("k"));
        let payload = c
            .parse_envelope(json!({ "error": "", "output": "fine" }))
            .unwrap();
        assert_eq!(payload.into_text(), "fine");
    }

    #[test]
    fn envelope_that_is_not_an_object_fails_to_parse() {
        let c = client(BytezConfig::new("k"));
        assert!(matches!(
            c.parse_envelope(json!("plain")),
            Err(TransportError::Parse(_))
        ));
    }

    #[test]
    fn error_detail_prefers_envelope_error() {
        assert_eq!(
            error_detail(r#"{"error":"model is loading","output":null}"#),
            "model is loading"
        );
        assert_eq!(error_detail("  gateway timeout \n"), "gateway timeout");
    }

    #[test]
    fn error_detail_is_truncated() {
        let long = "x".repeat(500);
        assert_eq!(error_detail(&long).len(), MAX_ERROR_DETAIL);
    }
}
