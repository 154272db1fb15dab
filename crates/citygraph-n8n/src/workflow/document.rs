//! Local workflow definition loaded from disk.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::TRACING_TARGET_WORKFLOW;
use crate::error::{Error, ErrorKind, Result};

/// Name used when the document does not carry a usable `name` field.
pub const DEFAULT_WORKFLOW_NAME: &str = "cityGraph_n8n";

/// An n8n workflow definition.
///
/// The document is treated as opaque JSON and sent to the API exactly as it
/// was read. Only the display name is ever inspected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WorkflowDocument {
    value: Value,
}

impl WorkflowDocument {
    /// Wraps an already parsed JSON value.
    pub fn from_value(value: Value) -> Self {
        Self { value }
    }

    /// Reads and parses a workflow file.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NotFound`] when the file does not exist and
    /// [`ErrorKind::Serialization`] when it is not valid JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        tracing::debug!(
            target: TRACING_TARGET_WORKFLOW,
            path = %path.display(),
            "Loading workflow document"
        );

        let contents = fs::read_to_string(path).map_err(|e| {
            let message = match e.kind() {
                std::io::ErrorKind::NotFound => format!("{} not found", path.display()),
                _ => format!("failed to read {}", path.display()),
            };
            Error::from(e).with_message(message)
        })?;

        let value = serde_json::from_str(&contents).map_err(|e| {
            Error::from_source(ErrorKind::Serialization, e)
                .with_message(format!("{} is not valid JSON", path.display()))
        })?;

        let document = Self::from_value(value);

        tracing::debug!(
            target: TRACING_TARGET_WORKFLOW,
            name = document.name(),
            bytes = contents.len(),
            "Workflow document loaded"
        );

        Ok(document)
    }

    /// Returns the workflow's display name, falling back to [`DEFAULT_WORKFLOW_NAME`].
    pub fn name(&self) -> &str {
        self.value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_WORKFLOW_NAME)
    }

    /// Returns the raw JSON value.
    pub fn as_value(&self) -> &Value {
        &self.value
    }
}

impl From<Value> for WorkflowDocument {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}
