//! Lead capture for the marketing site.
//!
//! - **Relay endpoint** (`POST /api/telegram`): forwards `{"message": ...}`
//!   to a Telegram chat using bot credentials that only the server holds.
//! - **Lead form layer**: validates a registration [`Lead`], delivers it
//!   through the primary email channel and announces it in chat on a
//!   best-effort basis ([`submit_lead`]).

pub mod config;
pub mod error;
pub mod handlers;
pub mod lead;
pub mod router;
pub mod server;
pub mod state;
pub mod submit;
pub mod telegram;

pub use config::{RelayConfig, TelegramCredentials};
pub use error::RelayError;
pub use lead::{InvalidLead, Lead, LeadField};
pub use router::build_router;
pub use server::{start_server, ServerError};
pub use state::AppState;
pub use submit::{submit_lead, ChatNotifier, EmailDelivery, RelayNotifier, SubmitError};
