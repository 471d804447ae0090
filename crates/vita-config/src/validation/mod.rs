//! Full configuration validation.
//!
//! Validates numeric ranges and required fields, collecting every problem
//! into a single error.

mod helpers;

#[cfg(test)]
mod tests;

use crate::schema::VitaConfig;
use vita_common::ConfigError;

use helpers::{validate_range, validate_range_f64};

/// Most retries a schedule may hold.
pub const MAX_RETRY_ENTRIES: usize = 8;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &VitaConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    // Assistant
    if config.assistant.model.trim().is_empty() {
        errors.push("assistant.model must not be empty".into());
    }
    if config.assistant.base_url.trim().is_empty() {
        errors.push("assistant.base_url must not be empty".into());
    }
    if let Some(temperature) = config.assistant.temperature {
        validate_range_f64(&mut errors, "assistant.temperature", temperature, 0.0, 2.0);
    }

    // Retry schedule
    if config.retry.delays_secs.len() > MAX_RETRY_ENTRIES {
        errors.push(format!(
            "retry.delays_secs has {} entries, at most {MAX_RETRY_ENTRIES} allowed",
            config.retry.delays_secs.len()
        ));
    }
    for (i, delay) in config.retry.delays_secs.iter().enumerate() {
        validate_range(&mut errors, &format!("retry.delays_secs[{i}]"), *delay, 1, 300);
    }
    validate_range(
        &mut errors,
        "retry.fragment_delay_ms",
        config.retry.fragment_delay_ms,
        0,
        1000,
    );
    validate_range(
        &mut errors,
        "retry.response_timeout_secs",
        config.retry.response_timeout_secs,
        0,
        600,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
