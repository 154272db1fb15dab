//! Reqwest-based client for the n8n public REST API.
//!
//! # Example
//!
//! ```rust,ignore
//! use citygraph_n8n::{N8nClient, N8nConfig, WorkflowApi, WorkflowDocument};
//!
//! let client = N8nClient::new(N8nConfig::new("https://n8n.example.com", api_key))?;
//! let document = WorkflowDocument::load("cityGraph_n8n_workflow.json")?;
//!
//! let created = client.create_workflow(&document).await?;
//! ```

mod error;
mod n8n_client;
mod n8n_config;

pub(crate) use error::Error as TransportError;
pub(crate) use n8n_config::join;
pub use n8n_client::{API_KEY_HEADER, LIST_PAGE_LIMIT, N8nClient};
pub use n8n_config::{DEFAULT_N8N_URL, DEFAULT_TIMEOUT_SECS, N8nConfig};
