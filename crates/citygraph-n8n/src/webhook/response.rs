//! Webhook response types.

use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{Error, Result};

/// Body returned by the webhook.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// No body at all.
    Empty,
    /// A body that parsed as JSON.
    Json(Value),
    /// Anything else, kept verbatim.
    Text(String),
}

impl ResponseBody {
    /// Classifies a raw response text.
    pub fn from_text(text: String) -> Self {
        if text.trim().is_empty() {
            return Self::Empty;
        }

        match serde_json::from_str(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }

    /// Renders the body for display: pretty JSON (2-space indent) or the raw text.
    pub fn render(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Self::Text(text) => text.clone(),
        }
    }
}

/// Result of a single webhook call.
#[derive(Debug, Clone)]
pub struct WebhookResponse {
    /// HTTP status returned by the webhook.
    pub status: StatusCode,
    /// Response body.
    pub body: ResponseBody,
}

impl WebhookResponse {
    /// Creates a response from a status and raw body text.
    pub fn new(status: StatusCode, text: String) -> Self {
        Self {
            status,
            body: ResponseBody::from_text(text),
        }
    }

    /// Returns the numeric status code.
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Returns whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Converts a non-2xx response into an error carrying status and body.
    ///
    /// # Errors
    ///
    /// Returns an error classified from the status when it is not 2xx.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }

        Err(Error::from_response(self.status, self.body.render()))
    }
}
