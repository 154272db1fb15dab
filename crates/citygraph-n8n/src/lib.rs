#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod error;
pub mod webhook;
pub mod workflow;

pub use crate::client::{
    API_KEY_HEADER, DEFAULT_N8N_URL, DEFAULT_TIMEOUT_SECS, LIST_PAGE_LIMIT, N8nClient, N8nConfig,
};
pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::workflow::{DEFAULT_WORKFLOW_NAME, WorkflowDocument, WorkflowSummary};

/// Tracing target for n8n REST API operations.
pub const TRACING_TARGET_CLIENT: &str = "citygraph_n8n::client";

/// Tracing target for webhook operations.
pub const TRACING_TARGET_WEBHOOK: &str = "citygraph_n8n::webhook";

/// Tracing target for workflow document handling.
pub const TRACING_TARGET_WORKFLOW: &str = "citygraph_n8n::workflow";

/// Workflow management operations of the n8n public API.
///
/// [`N8nClient`] is the HTTP implementation; the deploy procedure only
/// depends on this trait.
#[async_trait::async_trait]
pub trait WorkflowApi: Send + Sync {
    /// Lists every workflow on the instance, following pagination.
    async fn list_workflows(&self) -> Result<Vec<WorkflowSummary>>;

    /// Creates a workflow from the document.
    async fn create_workflow(&self, document: &WorkflowDocument) -> Result<WorkflowSummary>;

    /// Replaces the workflow `id` with the document.
    async fn update_workflow(&self, id: &str, document: &WorkflowDocument)
    -> Result<WorkflowSummary>;

    /// Activates the workflow `id`.
    async fn activate_workflow(&self, id: &str) -> Result<()>;

    /// Returns the first workflow whose name equals `name` exactly.
    async fn find_workflow_by_name(&self, name: &str) -> Result<Option<WorkflowSummary>> {
        let workflows = self.list_workflows().await?;
        Ok(workflows
            .into_iter()
            .find(|workflow| workflow.name() == Some(name)))
    }
}
