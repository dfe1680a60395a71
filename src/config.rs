//! Bot configuration
//!
//! Built once at startup from the environment and never mutated afterwards.

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_RETRY_TIME: Duration = Duration::from_secs(600);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Where notifications go.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatTarget {
    Id(i64),
    Username(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub chat: ChatTarget,
    pub endpoint: String,
    /// Pause between two poll cycles, whatever their outcome
    pub retry_interval: Duration,
    /// Upper bound on a single request to the grading service
    pub request_timeout: Duration,
    /// Send failed cycles to the chat as well
    pub notify_on_failure: bool,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// Required:
    /// - PRACTICUM_TOKEN
    /// - TELEGRAM_TOKEN
    /// - TELEGRAM_CHAT_ID (numeric id or @channel)
    ///
    /// Optional:
    /// - PRACTICUM_ENDPOINT
    /// - RETRY_TIME (seconds, default: 600)
    /// - REQUEST_TIMEOUT (seconds, default: 10)
    /// - NOTIFY_ON_FAILURE (true/false, default: false)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = [
            ("PRACTICUM_TOKEN", lookup("PRACTICUM_TOKEN")),
            ("TELEGRAM_TOKEN", lookup("TELEGRAM_TOKEN")),
            ("TELEGRAM_CHAT_ID", lookup("TELEGRAM_CHAT_ID")),
        ];

        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let [practicum_token, telegram_token, chat_id] =
            required.map(|(_, value)| value.unwrap_or_default().trim().to_string());

        let endpoint = lookup("PRACTICUM_ENDPOINT")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        Ok(Self {
            practicum_token,
            telegram_token,
            chat: parse_chat_target(&chat_id)?,
            endpoint,
            retry_interval: parse_seconds("RETRY_TIME", lookup("RETRY_TIME"), DEFAULT_RETRY_TIME)?,
            request_timeout: parse_seconds(
                "REQUEST_TIMEOUT",
                lookup("REQUEST_TIMEOUT"),
                DEFAULT_REQUEST_TIMEOUT,
            )?,
            notify_on_failure: parse_flag("NOTIFY_ON_FAILURE", lookup("NOTIFY_ON_FAILURE"))?,
        })
    }
}

fn parse_chat_target(raw: &str) -> Result<ChatTarget, ConfigError> {
    if let Ok(id) = raw.parse::<i64>() {
        return Ok(ChatTarget::Id(id));
    }
    if raw.len() > 1 && raw.starts_with('@') {
        return Ok(ChatTarget::Username(raw.to_string()));
    }
    Err(ConfigError::Invalid {
        name: "TELEGRAM_CHAT_ID",
        value: raw.to_string(),
        reason: "expected a numeric chat id or an @channel name",
    })
}

fn parse_seconds(
    name: &'static str,
    raw: Option<String>,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let Some(raw) = raw.filter(|v| !v.trim().is_empty()) else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::Invalid {
            name,
            value: raw,
            reason: "expected a positive number of seconds",
        }),
    }
}

fn parse_flag(name: &'static str, raw: Option<String>) -> Result<bool, ConfigError> {
    let Some(raw) = raw else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        _ => Err(ConfigError::Invalid {
            name,
            value: raw,
            reason: "expected true or false",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    const COMPLETE: [(&str, &str); 3] = [
        ("PRACTICUM_TOKEN", "practicum-secret"),
        ("TELEGRAM_TOKEN", "123:telegram-secret"),
        ("TELEGRAM_CHAT_ID", "987654"),
    ];

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&COMPLETE)).unwrap();
        assert_eq!(config.practicum_token, "practicum-secret");
        assert_eq!(config.chat, ChatTarget::Id(987654));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.retry_interval, Duration::from_secs(600));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(!config.notify_on_failure);
    }

    #[test]
    fn test_failure_notifications_flag() {
        let mut vars = COMPLETE.to_vec();
        vars.push(("NOTIFY_ON_FAILURE", "Yes"));
        assert!(Config::from_lookup(lookup_from(&vars)).unwrap().notify_on_failure);

        let mut vars = COMPLETE.to_vec();
        vars.push(("NOTIFY_ON_FAILURE", "maybe"));
        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "NOTIFY_ON_FAILURE", .. }));
    }

    #[test]
    fn test_every_missing_credential_reported() {
        let err = Config::from_lookup(lookup_from(&[("TELEGRAM_TOKEN", "abc")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Missing(vec!["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID"])
        );
    }

    #[test]
    fn test_blank_credential_counts_as_missing() {
        let err = Config::from_lookup(lookup_from(&[
            ("PRACTICUM_TOKEN", "  "),
            ("TELEGRAM_TOKEN", "abc"),
            ("TELEGRAM_CHAT_ID", "1"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing(vec!["PRACTICUM_TOKEN"]));
    }

    #[test]
    fn test_channel_username_and_negative_ids() {
        let mut vars = COMPLETE.to_vec();
        vars[2] = ("TELEGRAM_CHAT_ID", "@homework_channel");
        let config = Config::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.chat, ChatTarget::Username("@homework_channel".to_string()));

        vars[2] = ("TELEGRAM_CHAT_ID", "-100200300");
        let config = Config::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.chat, ChatTarget::Id(-100200300));
    }

    #[test]
    fn test_garbage_chat_id_rejected() {
        let mut vars = COMPLETE.to_vec();
        vars[2] = ("TELEGRAM_CHAT_ID", "not-a-chat");
        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "TELEGRAM_CHAT_ID", .. }));
    }

    #[test]
    fn test_interval_overrides() {
        let mut vars = COMPLETE.to_vec();
        vars.push(("RETRY_TIME", "30"));
        vars.push(("REQUEST_TIMEOUT", "3"));
        vars.push(("PRACTICUM_ENDPOINT", "http://localhost:8080/statuses/"));
        let config = Config::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.retry_interval, Duration::from_secs(30));
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.endpoint, "http://localhost:8080/statuses/");

        let mut vars = COMPLETE.to_vec();
        vars.push(("RETRY_TIME", "0"));
        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "RETRY_TIME", .. }));
    }
}
