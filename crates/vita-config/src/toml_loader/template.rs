//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# Vita Configuration
# Only override what you want to change -- missing fields use defaults.

[assistant]
# model = "google/gemini-3-pro-preview"
# base_url = "https://api.bytez.com"
# api_key_env = "BYTEZ_API_KEY"   # read when api_key is unset
# api_key = ""
# streaming = true                # falls back to a single response when unsupported
# temperature = 0.7               # 0.0-2.0
# max_new_tokens = 1024
# system_prompt = ""              # replaces the built-in health instruction

[retry]
# delays_secs = [3, 6, 10]        # one wait per rate-limit failure, 1-300 each
# fragment_delay_ms = 15          # 0-1000
# response_timeout_secs = 60      # 0-600, 0 disables

[logging]
# level = "INFO"                  # DEBUG, INFO, WARNING, ERROR
"##
}
