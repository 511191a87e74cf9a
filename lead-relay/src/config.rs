//! Relay configuration, read from the environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `RELAY_HOST` | `0.0.0.0` |
//! | `RELAY_PORT` | `8080` |
//! | `TELEGRAM_API_BASE` | `https://api.telegram.org` |
//! | `TELEGRAM_BOT_TOKEN` | unset |
//! | `TELEGRAM_CHAT_ID` | unset |
//! | `TELEGRAM_TIMEOUT_SECS` | `10` |
//!
//! A `.env` file in the working directory is loaded first when present.

use std::env;
use std::time::Duration;

use crate::telegram::DEFAULT_TIMEOUT;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Server-held bot credentials. Never sent to clients.
#[derive(Clone)]
pub struct TelegramCredentials {
    pub bot_token: String,
    pub chat_id: String,
}

impl std::fmt::Debug for TelegramCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramCredentials")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    pub telegram_api_base: String,
    /// Upper bound on each Telegram request.
    pub telegram_timeout: Duration,
    /// `None` when either credential is missing or empty.
    pub telegram: Option<TelegramCredentials>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("RELAY_PORT must be a port number, got {0:?}")]
    InvalidPort(String),

    #[error("TELEGRAM_TIMEOUT_SECS must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
            telegram_api_base: String::from(DEFAULT_API_BASE),
            telegram_timeout: DEFAULT_TIMEOUT,
            telegram: None,
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is normal in production.
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match var("RELAY_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => defaults.port,
        };

        let telegram_timeout = match var("TELEGRAM_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => defaults.telegram_timeout,
        };

        let telegram = match (var("TELEGRAM_BOT_TOKEN"), var("TELEGRAM_CHAT_ID")) {
            (Some(bot_token), Some(chat_id)) => Some(TelegramCredentials { bot_token, chat_id }),
            _ => None,
        };

        Ok(Self {
            host: var("RELAY_HOST").unwrap_or(defaults.host),
            port,
            telegram_api_base: var("TELEGRAM_API_BASE").unwrap_or(defaults.telegram_api_base),
            telegram_timeout,
            telegram,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_credentials() {
        let config = RelayConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.telegram_api_base, DEFAULT_API_BASE);
        assert!(config.telegram.is_none());
    }

    #[test]
    fn both_credentials_required() {
        let config = RelayConfig::from_lookup(lookup(&[("TELEGRAM_BOT_TOKEN", "123:abc")])).unwrap();
        assert!(config.telegram.is_none());

        let config = RelayConfig::from_lookup(lookup(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("TELEGRAM_CHAT_ID", "-100"),
        ]))
        .unwrap();
        assert_eq!(config.telegram.unwrap().chat_id, "-100");
    }

    #[test]
    fn empty_values_count_as_missing() {
        let config = RelayConfig::from_lookup(lookup(&[
            ("TELEGRAM_BOT_TOKEN", ""),
            ("TELEGRAM_CHAT_ID", "-100"),
            ("RELAY_PORT", " "),
        ]))
        .unwrap();

        assert!(config.telegram.is_none());
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn bad_port_is_an_error() {
        let result = RelayConfig::from_lookup(lookup(&[("RELAY_PORT", "http")]));

        assert!(matches!(result, Err(ConfigError::InvalidPort(_))));
    }

    #[test]
    fn timeout_is_read_in_seconds() {
        let config = RelayConfig::from_lookup(lookup(&[("TELEGRAM_TIMEOUT_SECS", "3")])).unwrap();
        assert_eq!(config.telegram_timeout, Duration::from_secs(3));

        let result = RelayConfig::from_lookup(lookup(&[("TELEGRAM_TIMEOUT_SECS", "0")]));
        assert!(matches!(result, Err(ConfigError::InvalidTimeout(_))));
    }

    #[test]
    fn token_is_redacted_in_debug_output() {
        let credentials = TelegramCredentials {
            bot_token: String::from("secret-token"),
            chat_id: String::from("42"),
        };

        assert!(!format!("{credentials:?}").contains("secret-token"));
    }
}
