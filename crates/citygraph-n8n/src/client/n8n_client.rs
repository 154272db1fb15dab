//! n8n REST API client implementation using reqwest.

use std::collections::HashSet;
use std::sync::Arc;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::{N8nConfig, TransportError, join};
use crate::error::{Error, Result};
use crate::workflow::{WorkflowDocument, WorkflowList, WorkflowSummary};
use crate::{TRACING_TARGET_CLIENT, WorkflowApi};

/// Header carrying the n8n API key.
pub const API_KEY_HEADER: &str = "x-n8n-api-key";

/// Page size requested from `GET /workflows` (the API maximum).
pub const LIST_PAGE_LIMIT: u32 = 250;

/// Inner client that holds the HTTP client and configuration.
struct N8nClientInner {
    http: Client,
    config: N8nConfig,
    api_url: Url,
}

/// Client for the n8n public REST API.
///
/// Every request carries the API key, `Content-Type: application/json` and
/// `Accept: application/json`. Non-2xx answers are turned into errors that keep
/// the status code and the response text.
#[derive(Clone)]
pub struct N8nClient {
    inner: Arc<N8nClientInner>,
}

impl std::fmt::Debug for N8nClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("N8nClient")
            .field("config", &self.inner.config)
            .field("api_url", &self.inner.api_url.as_str())
            .finish_non_exhaustive()
    }
}

impl N8nClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: N8nConfig) -> Result<Self> {
        config.validate()?;

        let api_url = config.api_url()?;
        let timeout = config.effective_timeout();

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            api_url = %api_url,
            timeout_ms = timeout.as_millis(),
            "Creating n8n client"
        );

        let mut api_key =
            HeaderValue::from_str(config.api_key.trim()).map_err(TransportError::from)?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(config.effective_user_agent())
            .default_headers(headers)
            .build()
            .map_err(TransportError::from)?;

        let inner = N8nClientInner {
            http,
            config,
            api_url,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Returns the REST API root this client talks to.
    pub fn api_url(&self) -> &Url {
        &self.inner.api_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        join(&self.inner.api_url, segments)
    }

    /// Sends the request and rejects non-2xx responses.
    async fn execute(&self, request: RequestBuilder, operation: &'static str) -> Result<Response> {
        let response = request.send().await.map_err(TransportError::from)?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();

        tracing::warn!(
            target: TRACING_TARGET_CLIENT,
            operation,
            status = status.as_u16(),
            "n8n API request failed"
        );

        Err(Error::from_response(status, body)
            .with_message(format!("{operation} failed with HTTP {status}")))
    }

    /// Sends the request and decodes a JSON response body.
    async fn execute_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &'static str,
    ) -> Result<T> {
        let response = self.execute(request, operation).await?;
        let bytes = response.bytes().await.map_err(TransportError::from)?;
        let decoded = serde_json::from_slice(&bytes).map_err(TransportError::from)?;
        Ok(decoded)
    }
}

#[async_trait::async_trait]
impl WorkflowApi for N8nClient {
    async fn list_workflows(&self) -> Result<Vec<WorkflowSummary>> {
        let mut workflows = Vec::new();
        let mut seen_cursors = HashSet::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut url = self.endpoint(&["workflows"])?;
            url.query_pairs_mut()
                .append_pair("limit", &LIST_PAGE_LIMIT.to_string());
            if let Some(cursor) = &cursor {
                url.query_pairs_mut().append_pair("cursor", cursor);
            }

            tracing::debug!(
                target: TRACING_TARGET_CLIENT,
                url = %url,
                "Listing workflows"
            );

            let page: WorkflowList = self
                .execute_json(self.inner.http.get(url), "list workflows")
                .await?;
            workflows.extend(page.data);

            match page.next_cursor.filter(|next| !next.is_empty()) {
                Some(next) if seen_cursors.insert(next.clone()) => cursor = Some(next),
                _ => break,
            }
        }

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            count = workflows.len(),
            "Listed workflows"
        );

        Ok(workflows)
    }

    async fn create_workflow(&self, document: &WorkflowDocument) -> Result<WorkflowSummary> {
        let url = self.endpoint(&["workflows"])?;

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            url = %url,
            name = document.name(),
            "Creating workflow"
        );

        let created: WorkflowSummary = self
            .execute_json(self.inner.http.post(url).json(document), "create workflow")
            .await?;

        tracing::info!(
            target: TRACING_TARGET_CLIENT,
            workflow_id = ?created.id,
            "Workflow created"
        );

        Ok(created)
    }

    async fn update_workflow(
        &self,
        id: &str,
        document: &WorkflowDocument,
    ) -> Result<WorkflowSummary> {
        let url = self.endpoint(&["workflows", id])?;

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            url = %url,
            name = document.name(),
            "Updating workflow"
        );

        let updated: WorkflowSummary = self
            .execute_json(self.inner.http.put(url).json(document), "update workflow")
            .await?;

        tracing::info!(
            target: TRACING_TARGET_CLIENT,
            workflow_id = ?updated.id,
            "Workflow updated"
        );

        Ok(updated)
    }

    async fn activate_workflow(&self, id: &str) -> Result<()> {
        let url = self.endpoint(&["workflows", id, "activate"])?;

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            url = %url,
            "Activating workflow"
        );

        self.execute(self.inner.http.post(url), "activate workflow")
            .await?;

        tracing::info!(
            target: TRACING_TARGET_CLIENT,
            workflow_id = id,
            "Workflow activated"
        );

        Ok(())
    }
}
