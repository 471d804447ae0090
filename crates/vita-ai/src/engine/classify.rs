//! Failure classification.
//!
//! The upstream API does not promise structured status codes, so failures
//! are classified by inspecting their message text. This is a heuristic:
//! a message that happens to contain a marker will be misclassified.

use std::fmt;

/// Caller-visible failure taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Credential missing or rejected. Never retried.
    AuthError,
    /// Throttled, and the retry schedule is exhausted.
    RateLimited,
    /// Anything else: network faults, malformed responses, timeouts.
    UnknownError,
}

const RATE_LIMIT_MARKERS: &[&str] = &[
    "rate limit",
    "rate-limit",
    "rate_limit",
    "ratelimit",
    "rate exceeded",
    "throttl",
    "quota",
    "429",
    "too many",
    "resource has been exhausted",
    "resource exhausted",
    "resource_exhausted",
];

/// Whether a failure message indicates throttling or quota exhaustion.
pub fn is_rate_limit(message: &str) -> bool {
    let msg = message.to_lowercase();
    RATE_LIMIT_MARKERS.iter().any(|marker| msg.contains(marker))
}

/// Whether a failure message indicates a missing or rejected credential.
pub fn is_auth_failure(message: &str) -> bool {
    let msg = message.to_lowercase();
    msg.contains("api") && (msg.contains("key") || msg.contains("auth"))
}

/// Classify a terminal failure. Credential problems take precedence over
/// throttling.
pub fn classify(message: &str) -> ErrorKind {
    if is_auth_failure(message) {
        ErrorKind::AuthError
    } else if is_rate_limit(message) {
        ErrorKind::RateLimited
    } else {
        ErrorKind::UnknownError
    }
}

impl ErrorKind {
    /// Short headline for display.
    pub fn title(self) -> &'static str {
        match self {
            ErrorKind::AuthError => "Invalid API Key",
            ErrorKind::RateLimited => "Rate Limited",
            ErrorKind::UnknownError => "Something went wrong",
        }
    }

    /// One-sentence explanation for display.
    pub fn description(self) -> &'static str {
        match self {
            ErrorKind::AuthError => {
                "The API key is missing or was rejected. Check the assistant configuration."
            }
            ErrorKind::RateLimited => {
                "Too many requests. Retries exhausted, please wait a moment and try again."
            }
            ErrorKind::UnknownError => "An unexpected error occurred. Please try again.",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TransportError;

    #[test]
    fn rate_limit_markers() {
        for msg in [
            "HTTP 429",
            "Rate limit reached for model",
            "You exceeded your current quota",
            "Too Many Requests",
            "Resource has been exhausted (e.g. check quota).",
            "RESOURCE_EXHAUSTED",
            "Request was throttled",
            "ThrottlingException: slow down",
            "Rate exceeded",
        ] {
            assert!(is_rate_limit(msg), "should be rate limited: {msg}");
        }
    }

    #[test]
    fn words_containing_rate_are_not_rate_limits() {
        assert!(!is_rate_limit("failed to generate a response"));
        assert!(!is_rate_limit("moderate load"));
    }

    #[test]
    fn auth_needs_api_and_key_or_auth() {
        assert!(is_auth_failure("Invalid API key provided"));
        assert!(is_auth_failure("API authentication failed: HTTP 401"));
        assert!(!is_auth_failure("missing key in response"));
        assert!(!is_auth_failure("connection refused"));
    }

    #[test]
    fn auth_takes_precedence() {
        assert_eq!(classify("API key over quota"), ErrorKind::AuthError);
    }

    #[test]
    fn transport_errors_classify_as_expected() {
        assert_eq!(
            classify(&TransportError::MissingCredential.to_string()),
            ErrorKind::AuthError
        );
        assert_eq!(
            classify(&TransportError::Unauthorized("HTTP 401".into()).to_string()),
            ErrorKind::AuthError
        );
        assert_eq!(
            classify(&TransportError::RateLimited("slow down".into()).to_string()),
            ErrorKind::RateLimited
        );
        assert_eq!(
            classify(&TransportError::Network("connection reset".into()).to_string()),
            ErrorKind::UnknownError
        );
        assert_eq!(
            classify(&TransportError::Parse("expected value".into()).to_string()),
            ErrorKind::UnknownError
        );
    }

    #[test]
    fn every_kind_has_display_text() {
        for kind in [
            ErrorKind::AuthError,
            ErrorKind::RateLimited,
            ErrorKind::UnknownError,
        ] {
            assert!(!kind.title().is_empty());
            assert!(!kind.description().is_empty());
            assert_eq!(kind.to_string(), kind.title());
        }
    }
}
