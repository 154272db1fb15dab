//! Workflow records as returned by the n8n public API.

use serde::{Deserialize, Deserializer, Serialize};

/// A workflow as reported by the n8n API.
///
/// Every field is optional: the API response is only trusted as far as the
/// fields we actually read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSummary {
    /// Workflow identifier. Older n8n releases use numeric ids.
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the workflow is currently active.
    #[serde(default)]
    pub active: Option<bool>,
}

impl WorkflowSummary {
    /// Returns the workflow id, if present.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the workflow name, if present.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// One page of the `GET /workflows` listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowList {
    /// Workflows on this page.
    #[serde(default)]
    pub data: Vec<WorkflowSummary>,
    /// Cursor for the next page, absent on the last one.
    #[serde(default)]
    pub next_cursor: Option<String>,
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    let id = Option::<RawId>::deserialize(deserializer)?;
    Ok(id.map(|id| match id {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    }))
}
