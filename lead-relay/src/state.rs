use crate::config::RelayConfig;
use crate::telegram::TelegramClient;

/// Shared state for the relay, injected through axum's `State` extractor.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// `None` when the server has no bot credentials; every notification then
    /// fails with a configuration error.
    pub telegram: Option<TelegramClient>,
}

impl AppState {
    pub fn from_config(config: &RelayConfig) -> Self {
        Self {
            telegram: config
                .telegram
                .clone()
                .map(|credentials| {
                    TelegramClient::new(&config.telegram_api_base, credentials)
                        .with_timeout(config.telegram_timeout)
                }),
        }
    }
}
