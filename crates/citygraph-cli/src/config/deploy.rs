//! Arguments of the `deploy` subcommand.

use std::path::PathBuf;

use citygraph_n8n::N8nConfig;
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Workflow definition read when no file is given.
pub const DEFAULT_WORKFLOW_FILE: &str = "cityGraph_n8n_workflow.json";

/// Webhook path registered by the cityGraph workflow.
pub const DEFAULT_WEBHOOK_PATH: &str = "citygraph-webhook";

/// Deploys the workflow definition to an n8n instance.
///
/// # Environment Variables
///
/// - `N8N_URL` - Root URL of the n8n instance
/// - `N8N_API_KEY` - API key for the public REST API (required)
/// - `CITYGRAPH_WORKFLOW_FILE` - Workflow definition to deploy
/// - `CITYGRAPH_WEBHOOK_PATH` - Webhook path reported after deployment
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct DeployArgs {
    /// Root URL of the n8n instance (overrides --n8n-url).
    #[arg(value_name = "N8N_URL")]
    #[serde(default)]
    pub instance: Option<String>,

    /// n8n API connection settings.
    #[clap(flatten)]
    pub n8n: N8nConfig,

    /// Path to the workflow definition JSON.
    #[arg(
        short = 'f',
        long,
        env = "CITYGRAPH_WORKFLOW_FILE",
        default_value = DEFAULT_WORKFLOW_FILE
    )]
    pub workflow_file: PathBuf,

    /// Webhook path the workflow listens on, used for the final summary.
    #[arg(long, env = "CITYGRAPH_WEBHOOK_PATH", default_value = DEFAULT_WEBHOOK_PATH)]
    pub webhook_path: String,

    /// Skip the instance URL confirmation prompt.
    #[arg(short = 'y', long)]
    #[serde(default)]
    pub yes: bool,
}

impl DeployArgs {
    /// Returns the n8n configuration with the positional URL applied.
    pub fn n8n_config(&self) -> N8nConfig {
        match &self.instance {
            Some(url) => self.n8n.clone().with_n8n_url(url.clone()),
            None => self.n8n.clone(),
        }
    }

    /// Logs the configuration (no sensitive information).
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            n8n_url = %self.n8n_config().n8n_url,
            workflow_file = %self.workflow_file.display(),
            webhook_path = %self.webhook_path,
            http_timeout_secs = self.n8n.http_timeout,
            skip_confirmation = self.yes,
            "Deploy configuration"
        );
    }
}
