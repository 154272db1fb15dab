//! Request payloads accepted by the cityGraph webhook.

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// User id sent with chat messages when none is given.
pub const DEFAULT_USER_ID: &str = "test_user";

/// Filler sent with the `invalid_action` probe.
pub const INVALID_ACTION_DATA: &str = "test";

/// Body posted to the webhook, discriminated by its `action` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "action", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WebhookPayload {
    /// Send a chat message on behalf of a user.
    Chat {
        message: String,
        user_id: String,
        session_id: String,
    },
    /// Extract addresses from a file in the linked repository.
    ExtractAddress { file_path: String },
    /// An action the workflow does not know, used to probe its error branch.
    InvalidAction { data: String },
}

impl WebhookPayload {
    /// Creates a chat payload, filling in the default user and a fresh session id.
    pub fn chat(
        message: impl Into<String>,
        user_id: Option<String>,
        session_id: Option<String>,
    ) -> Self {
        Self::Chat {
            message: message.into(),
            user_id: user_id.unwrap_or_else(|| DEFAULT_USER_ID.to_owned()),
            session_id: session_id.unwrap_or_else(default_session_id),
        }
    }

    /// Creates an address extraction payload.
    pub fn extract_address(file_path: impl Into<String>) -> Self {
        Self::ExtractAddress {
            file_path: file_path.into(),
        }
    }

    /// Creates the unknown-action probe.
    pub fn invalid_action() -> Self {
        Self::InvalidAction {
            data: INVALID_ACTION_DATA.to_owned(),
        }
    }

    /// Returns the value of the `action` discriminator.
    pub fn action(&self) -> &'static str {
        self.into()
    }
}

/// Returns `session_<YYYYMMDD_HHMMSS>` for the current local time.
pub fn default_session_id() -> String {
    format!("session_{}", jiff::Zoned::now().strftime("%Y%m%d_%H%M%S"))
}
