//! Transport trait implementation for BytezClient (stream + complete).

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use tracing::debug;

use crate::streaming::decode_text_stream;
use crate::{BatchPayload, Message, TextStream, Transport, TransportError};

use super::client::{error_detail, BytezClient};

impl BytezClient {
    async fn send(&self, messages: &[Message], stream: bool) -> Result<Response, TransportError> {
        if !self.config.has_credential() {
            return Err(TransportError::MissingCredential);
        }

        let body = self.build_request_body(messages, stream);
        let response = self
            .http
            .post(self.api_url())
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, self.auth_header())
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        check_status(response).await
    }
}

/// Map a non-2xx response to the matching error.
async fn check_status(response: Response) -> Result<Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let detail = error_detail(&text);
    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            TransportError::Unauthorized(format!("HTTP {status}: {detail}"))
        }
        StatusCode::TOO_MANY_REQUESTS => TransportError::RateLimited(detail),
        _ => TransportError::Api(format!("HTTP {status}: {detail}")),
    })
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

#[async_trait]
impl Transport for BytezClient {
    async fn stream(&self, messages: &[Message]) -> Result<TextStream, TransportError> {
        if !self.config.streaming {
            return Err(TransportError::StreamingUnsupported);
        }

        debug!(model = %self.config.model, "Bytez streaming request");
        let response = self.send(messages, true).await?;

        // Models that cannot stream answer with a JSON envelope instead.
        if is_json(&response) {
            debug!(model = %self.config.model, "Model answered without streaming");
            return Err(TransportError::StreamingUnsupported);
        }

        Ok(decode_text_stream(Box::pin(response.bytes_stream())))
    }

    async fn complete(&self, messages: &[Message]) -> Result<BatchPayload, TransportError> {
        debug!(model = %self.config.model, "Bytez API request");
        let response = self.send(messages, false).await?;

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TransportError::Parse(e.to_string()))?;

        self.parse_envelope(json)
    }
}
