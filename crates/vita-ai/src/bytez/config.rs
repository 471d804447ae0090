//! Bytez API client configuration.

/// Bytez API client configuration.
#[derive(Clone)]
pub struct BytezConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Ask for an incremental response. When `false` every request is
    /// answered with a single payload.
    pub streaming: bool,
    pub temperature: Option<f64>,
    pub max_new_tokens: Option<u32>,
}

impl std::fmt::Debug for BytezConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BytezConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("streaming", &self.streaming)
            .field("temperature", &self.temperature)
            .field("max_new_tokens", &self.max_new_tokens)
            .finish()
    }
}

impl BytezConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "google/gemini-3-pro-preview".to_string(),
            base_url: "https://api.bytez.com".to_string(),
            streaming: true,
            temperature: None,
            max_new_tokens: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = Some(max_new_tokens);
        self
    }

    pub(crate) fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
