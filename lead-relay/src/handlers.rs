//! Endpoint handlers.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/telegram` | Forward `{"message": ...}` to the configured chat |
//! | `GET` | `/health` | Liveness probe |

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};

use crate::error::RelayError;
use crate::state::AppState;
use crate::telegram::TelegramError;

#[derive(Debug, Deserialize)]
pub struct NotifyRequest {
    pub message: String,
}

/// Forward a message to the chat channel.
///
/// The body is parsed by hand so that a malformed request yields the same
/// `500 {"error": "Internal server error"}` as any other unexpected failure,
/// rather than axum's plain-text rejection.
pub async fn notify(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, RelayError> {
    let request: NotifyRequest = serde_json::from_slice(&body).map_err(|err| {
        error!(error = %err, "malformed notification request");
        RelayError::Internal(err.to_string())
    })?;

    let Some(telegram) = &state.telegram else {
        error!("Telegram credentials missing in environment");
        return Err(RelayError::MissingConfig);
    };

    match telegram.send_message(&request.message).await {
        Ok(()) => {
            info!(chars = request.message.chars().count(), "notification forwarded");
            Ok(Json(serde_json::json!({ "success": true })))
        }

        Err(TelegramError::Rejected { status, body: reply }) => {
            error!(%status, %reply, "Telegram API error");
            Err(RelayError::Upstream(status))
        }

        Err(err @ TelegramError::Transport(_)) => {
            error!(error = %err, "Telegram request failed");
            Err(RelayError::Internal(err.to_string()))
        }
    }
}

pub async fn health() -> &'static str {
    "OK"
}
