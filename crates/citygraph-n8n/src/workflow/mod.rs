//! Workflow documents and the remote view of deployed workflows.

mod document;
mod summary;

pub use document::{DEFAULT_WORKFLOW_NAME, WorkflowDocument};
pub use summary::{WorkflowList, WorkflowSummary};
