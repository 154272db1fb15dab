//! Webhook client configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::client::DEFAULT_TIMEOUT_SECS;
use crate::error::{Error, Result};

/// Placeholder webhook URL shipped with the test tooling.
pub const DEFAULT_WEBHOOK_URL: &str = "https://your-n8n-instance.com/webhook/citygraph-webhook";

/// Configuration for the webhook test client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct WebhookConfig {
    /// Full URL of the cityGraph webhook
    #[cfg_attr(
        feature = "config",
        arg(
            long = "webhook-url",
            env = "CITYGRAPH_WEBHOOK_URL",
            default_value = DEFAULT_WEBHOOK_URL
        )
    )]
    #[serde(default = "default_webhook_url")]
    pub webhook_url: String,

    /// HTTP request timeout in seconds
    #[cfg_attr(
        feature = "config",
        arg(long = "http-timeout", env = "HTTP_TIMEOUT", default_value = "30")
    )]
    #[serde(default = "default_timeout_secs")]
    pub http_timeout: u64,
}

fn default_webhook_url() -> String {
    DEFAULT_WEBHOOK_URL.to_owned()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            webhook_url: default_webhook_url(),
            http_timeout: default_timeout_secs(),
        }
    }
}

impl WebhookConfig {
    /// Creates a configuration for the given webhook URL.
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            ..Self::default()
        }
    }

    /// Replaces the webhook URL.
    pub fn with_webhook_url(mut self, webhook_url: impl Into<String>) -> Self {
        self.webhook_url = webhook_url.into();
        self
    }

    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.http_timeout == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.http_timeout)
        }
    }

    /// Returns whether the webhook URL is still the shipped placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.webhook_url.trim() == DEFAULT_WEBHOOK_URL
    }

    /// Parses the webhook URL.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for unparsable or non-HTTP URLs.
    pub fn url(&self) -> Result<Url> {
        let raw = self.webhook_url.trim();
        let url = Url::parse(raw)
            .map_err(|e| Error::from(e).with_message(format!("invalid webhook URL '{raw}'")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::configuration().with_message(format!(
                "webhook URL '{raw}' must use http or https"
            )));
        }

        Ok(url)
    }
}
