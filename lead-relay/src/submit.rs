//! Submitting a lead: primary email delivery, then a best-effort chat ping.

use std::future::Future;
use std::time::Duration;

use serde_json::json;
use tracing::{info, warn};

use crate::lead::{InvalidLead, Lead};

/// A delivery channel failed. Carries a description for the logs only.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct DeliveryError(pub String);

/// The primary lead channel (an email provider).
pub trait EmailDelivery {
    fn deliver(&self, lead: &Lead) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}

/// The secondary, best-effort chat channel.
pub trait ChatNotifier {
    fn notify(&self, message: &str) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] InvalidLead),

    #[error("lead delivery failed: {0}")]
    Delivery(DeliveryError),
}

impl SubmitError {
    /// What the visitor is shown. Delivery details stay in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Invalid(_) => "Please check the highlighted fields.",
            Self::Delivery(_) => "Something went wrong. Please try again.",
        }
    }
}

/// Validate `lead`, deliver it by email, then announce it in chat.
///
/// Email failure fails the submission and is not retried. Chat failure is
/// logged and ignored.
pub async fn submit_lead<E, C>(lead: &Lead, email: &E, chat: &C) -> Result<(), SubmitError>
where
    E: EmailDelivery,
    C: ChatNotifier,
{
    lead.validate()?;

    email.deliver(lead).await.map_err(SubmitError::Delivery)?;

    if let Err(err) = chat.notify(&lead.format_message()).await {
        warn!(error = %err, "chat notification failed; lead was still delivered");
    }

    info!(company = %lead.company.trim(), plan = ?lead.plan, "lead submitted");
    Ok(())
}

/// [`ChatNotifier`] that posts to the relay's `/api/telegram` endpoint.
///
/// Requests give up after a timeout so a stalled relay cannot hold up a lead
/// that was already delivered.
#[derive(Debug, Clone)]
pub struct RelayNotifier {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl RelayNotifier {
    /// `endpoint` is the full URL of the relay route.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl ChatNotifier for RelayNotifier {
    async fn notify(&self, message: &str) -> Result<(), DeliveryError> {
        let response = self
            .http
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&json!({ "message": message }))
            .send()
            .await
            .map_err(|e| DeliveryError(e.to_string()))?;

        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        let reason = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get("error").and_then(|e| e.as_str()).map(str::to_owned))
            .unwrap_or_else(|| String::from("no error message"));

        Err(DeliveryError(format!("relay answered {status}: {reason}")))
    }
}
