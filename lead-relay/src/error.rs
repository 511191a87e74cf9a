//! Error responses of the relay endpoint.
//!
//! Bodies are always `{"error": "<message>"}`. The messages are part of the
//! contract with the site's front end and must not change.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Bot token or chat id not configured on the server.
    #[error("Telegram configuration missing")]
    MissingConfig,

    /// Telegram answered with a non-success status, which is passed through.
    #[error("Failed to send Telegram message")]
    Upstream(StatusCode),

    /// Anything else. The detail is logged, never returned.
    #[error("Internal server error")]
    Internal(String),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingConfig | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream(status) => *status,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });

        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(RelayError::MissingConfig, 500, "Telegram configuration missing")]
    #[case(RelayError::Upstream(StatusCode::BAD_REQUEST), 400, "Failed to send Telegram message")]
    #[case(RelayError::Upstream(StatusCode::TOO_MANY_REQUESTS), 429, "Failed to send Telegram message")]
    #[case(RelayError::Internal(String::from("boom")), 500, "Internal server error")]
    fn maps_to_status_and_message(
        #[case] error: RelayError,
        #[case] status: u16,
        #[case] message: &str,
    ) {
        assert_eq!(error.status().as_u16(), status);
        assert_eq!(error.to_string(), message);
    }
}
