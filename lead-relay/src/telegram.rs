//! Minimal Telegram Bot API client: just `sendMessage`.

use std::time::Duration;

use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::config::TelegramCredentials;

#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    /// The request never completed, timed out, or the reply was not JSON.
    /// The URL is stripped since it carries the bot token.
    #[error("Telegram request failed: {0}")]
    Transport(reqwest::Error),

    #[error("Telegram API rejected the message with {status}: {body}")]
    Rejected { status: StatusCode, body: Value },
}

impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

/// Upper bound on one `sendMessage` round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    api_base: String,
    credentials: TelegramCredentials,
    timeout: Duration,
}

impl TelegramClient {
    pub fn new(api_base: impl Into<String>, credentials: TelegramCredentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into(),
            credentials,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send `text` to the configured chat, formatted as HTML.
    pub async fn send_message(&self, text: &str) -> Result<(), TelegramError> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.credentials.bot_token
        );

        let response = self
            .http
            .post(url)
            .timeout(self.timeout)
            .json(&SendMessage {
                chat_id: &self.credentials.chat_id,
                text,
                parse_mode: "HTML",
            })
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;

        if !status.is_success() {
            return Err(TelegramError::Rejected { status, body });
        }

        Ok(())
    }
}
