//! Tests for the full validation pipeline.

use super::*;

#[test]
fn default_config_validates() {
    let config = VitaConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_empty_model() {
    let mut config = VitaConfig::default();
    config.assistant.model = "  ".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("assistant.model"));
}

#[test]
fn catches_temperature_out_of_range() {
    let mut config = VitaConfig::default();
    config.assistant.temperature = Some(3.5);
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("assistant.temperature"));
}

#[test]
fn unset_temperature_is_fine() {
    let mut config = VitaConfig::default();
    config.assistant.temperature = None;
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_zero_retry_delay() {
    let mut config = VitaConfig::default();
    config.retry.delays_secs = vec![3, 0, 10];
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("retry.delays_secs[1]"));
}

#[test]
fn catches_too_many_retries() {
    let mut config = VitaConfig::default();
    config.retry.delays_secs = vec![1; MAX_RETRY_ENTRIES + 1];
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("at most"));
}

#[test]
fn empty_schedule_is_allowed() {
    let mut config = VitaConfig::default();
    config.retry.delays_secs.clear();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_fragment_delay_too_large() {
    let mut config = VitaConfig::default();
    config.retry.fragment_delay_ms = 5000;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("retry.fragment_delay_ms"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = VitaConfig::default();
    config.assistant.model = String::new();
    config.retry.response_timeout_secs = 9999;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("assistant.model"));
    assert!(err.contains("retry.response_timeout_secs"));
}
