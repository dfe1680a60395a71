//! Error types for the homework bot

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::core::catalog::STATUS_CODES;

/// Problems found while building the configuration at startup. Fatal.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("required environment variables are missing: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("environment variable {name} has an invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// What was sent to the grading service, kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    pub endpoint: String,
    pub from_date: i64,
    pub timeout: Duration,
}

impl fmt::Display for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The token never ends up in logs.
        write!(
            f,
            "endpoint={}, headers={{Authorization: OAuth ***}}, params={{from_date: {}}}, timeout={}s",
            self.endpoint,
            self.from_date,
            self.timeout.as_secs()
        )
    }
}

/// Failures that abort a single poll cycle. All of them are recovered by
/// waiting for the next interval.
#[derive(Debug, Error, PartialEq)]
pub enum CycleError {
    #[error("grading service unreachable ({reason}); {context}")]
    NetworkFailure {
        reason: String,
        context: RequestContext,
    },

    #[error("grading service answered with status {status}; {context}")]
    ServerFailure { status: u16, context: RequestContext },

    #[error("grading service refused the request (code: {code}, message: {message}); {context}")]
    ServiceRejection {
        code: String,
        message: String,
        context: RequestContext,
    },

    #[error("field `{0}` is missing")]
    MissingField(&'static str),

    #[error("field `{field}` has the wrong type, expected {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },

    #[error("unknown homework status `{0}` (known: {known})", known = STATUS_CODES.join(", "))]
    UnknownStatus(String),
}

impl CycleError {
    /// Taxonomy name used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NetworkFailure { .. } => "NetworkFailure",
            Self::ServerFailure { .. } => "ServerFailure",
            Self::ServiceRejection { .. } => "ServiceRejection",
            Self::MissingField(_) => "MissingField",
            Self::TypeMismatch { .. } => "TypeMismatch",
            Self::UnknownStatus(_) => "UnknownStatus",
        }
    }
}

/// The messaging collaborator could not deliver a message. Never aborts a cycle.
#[derive(Debug, Error, PartialEq)]
#[error("message not delivered: {0}")]
pub struct DeliveryError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_context_redacts_token() {
        let context = RequestContext {
            endpoint: "https://example.test/statuses/".to_string(),
            from_date: 42,
            timeout: Duration::from_secs(10),
        };
        let rendered = context.to_string();
        assert!(rendered.contains("OAuth ***"));
        assert!(rendered.contains("from_date: 42"));
        assert!(rendered.contains("timeout=10s"));
    }

    #[test]
    fn unknown_status_names_the_known_codes() {
        let err = CycleError::UnknownStatus("unknown".to_string());
        assert_eq!(
            err.to_string(),
            "unknown homework status `unknown` (known: approved, reviewing, rejected)"
        );
    }

    #[test]
    fn missing_config_lists_every_name() {
        let err = ConfigError::Missing(vec!["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID"]);
        assert_eq!(
            err.to_string(),
            "required environment variables are missing: PRACTICUM_TOKEN, TELEGRAM_CHAT_ID"
        );
    }
}
