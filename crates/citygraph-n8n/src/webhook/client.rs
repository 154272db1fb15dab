//! Webhook client implementation using reqwest.

use std::sync::Arc;
use std::time::Instant;

use reqwest::Client;
use url::Url;

use super::{WebhookConfig, WebhookPayload, WebhookResponse};
use crate::TRACING_TARGET_WEBHOOK;
use crate::client::TransportError;
use crate::error::Result;

/// Inner client that holds the HTTP client and configuration.
struct WebhookClientInner {
    http: Client,
    config: WebhookConfig,
    url: Url,
}

/// Posts JSON payloads to the cityGraph webhook.
///
/// # Examples
///
/// ```rust,ignore
/// use citygraph_n8n::webhook::{WebhookClient, WebhookConfig, WebhookPayload};
///
/// let client = WebhookClient::new(WebhookConfig::new(url))?;
/// let response = client.send(&WebhookPayload::invalid_action()).await?;
/// println!("{}", response.status_code());
/// ```
#[derive(Clone)]
pub struct WebhookClient {
    inner: Arc<WebhookClientInner>,
}

impl std::fmt::Debug for WebhookClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl WebhookClient {
    /// Creates a new webhook client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the webhook URL is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: WebhookConfig) -> Result<Self> {
        let url = config.url()?;
        let timeout = config.effective_timeout();

        tracing::debug!(
            target: TRACING_TARGET_WEBHOOK,
            url = %url,
            timeout_ms = timeout.as_millis(),
            "Creating webhook client"
        );

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(format!("citygraph/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(TransportError::from)?;

        let inner = WebhookClientInner { http, config, url };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Returns the webhook URL requests are sent to.
    pub fn url(&self) -> &Url {
        &self.inner.url
    }

    /// Posts the payload and returns whatever the webhook answered.
    ///
    /// Non-2xx statuses are not errors here; see
    /// [`WebhookResponse::error_for_status`].
    ///
    /// # Errors
    ///
    /// Returns an error only when no HTTP response was received.
    pub async fn send(&self, payload: &WebhookPayload) -> Result<WebhookResponse> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET_WEBHOOK,
            url = %self.inner.url,
            action = payload.action(),
            "Sending webhook request"
        );

        let result = self
            .inner
            .http
            .post(self.inner.url.clone())
            .json(payload)
            .send()
            .await;

        let http_response = match result {
            Ok(http_response) => http_response,
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET_WEBHOOK,
                    action = payload.action(),
                    error = %err,
                    elapsed_ms = started_at.elapsed().as_millis(),
                    "Webhook request failed"
                );
                return Err(TransportError::from(err).into());
            }
        };

        let status = http_response.status();
        let text = http_response.text().await.map_err(TransportError::from)?;
        let response = WebhookResponse::new(status, text);

        tracing::debug!(
            target: TRACING_TARGET_WEBHOOK,
            action = payload.action(),
            status_code = response.status_code(),
            success = response.is_success(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Webhook request completed"
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_client_creation() {
        let client = WebhookClient::new(WebhookConfig::default()).unwrap();
        assert_eq!(
            client.url().as_str(),
            "https://your-n8n-instance.com/webhook/citygraph-webhook"
        );
    }

    #[test]
    fn test_client_rejects_invalid_url() {
        let error = WebhookClient::new(WebhookConfig::new("nope")).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Configuration);
    }
}
