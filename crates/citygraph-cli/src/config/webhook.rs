//! Arguments of the `webhook` subcommand.

use citygraph_n8n::webhook::{DEFAULT_USER_ID, WebhookConfig};
use clap::{Args, Subcommand};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Sends sample requests to the deployed workflow's webhook.
///
/// Without a command, prints usage and starts interactive mode.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct WebhookArgs {
    /// Webhook connection settings.
    #[clap(flatten)]
    pub webhook: WebhookConfig,

    /// Do not ask for a webhook URL when the placeholder is configured.
    #[arg(short = 'y', long)]
    #[serde(default)]
    pub yes: bool,

    /// Scenario to run.
    #[command(subcommand)]
    #[serde(default)]
    pub command: Option<WebhookCommand>,
}

impl WebhookArgs {
    /// Logs the configuration.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            webhook_url = %self.webhook.webhook_url,
            http_timeout_secs = self.webhook.http_timeout,
            command = ?self.command,
            "Webhook configuration"
        );
    }
}

/// Webhook scenarios.
#[derive(Debug, Clone, Subcommand, Serialize, Deserialize)]
pub enum WebhookCommand {
    /// Send a chat message.
    Chat {
        /// Message text; multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,

        /// User id sent with the message.
        #[arg(long, default_value = DEFAULT_USER_ID)]
        user_id: String,

        /// Session id (defaults to session_<YYYYMMDD_HHMMSS>).
        #[arg(long)]
        session_id: Option<String>,
    },
    /// Ask the workflow to extract addresses from a repository file.
    Extract {
        /// Path of the file inside the linked GitHub repository.
        file_path: String,
    },
    /// Run every canned scenario and print a summary.
    #[command(alias = "test")]
    Suite,
    /// Pick scenarios from a menu.
    Interactive,
}
