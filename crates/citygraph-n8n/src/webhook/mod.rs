//! Client and scenarios for exercising the deployed cityGraph webhook.
//!
//! Every request is a JSON object whose `action` field selects the branch the
//! workflow takes (`chat`, `extract_address`, or anything else for the error
//! branch).

mod client;
mod config;
mod payload;
mod response;
mod suite;

pub use client::WebhookClient;
pub use config::{DEFAULT_WEBHOOK_URL, WebhookConfig};
pub use payload::{DEFAULT_USER_ID, INVALID_ACTION_DATA, WebhookPayload, default_session_id};
pub use response::{ResponseBody, WebhookResponse};
pub use suite::{Expectation, TestCase, TestSummary, default_suite};
