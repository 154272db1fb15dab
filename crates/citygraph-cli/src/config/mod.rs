//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── verbose                       # log verbosity (-v, -vv)
//! └── command
//!     ├── deploy: DeployArgs        # n8n URL, API key, workflow file
//!     └── webhook: WebhookArgs      # webhook URL, scenario
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.

mod deploy;
mod webhook;

use std::process;

use clap::{ArgAction, Parser, Subcommand};
pub use deploy::DeployArgs;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
pub use webhook::{WebhookArgs, WebhookCommand};

use crate::TRACING_TARGET_STARTUP;

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "citygraph")]
#[command(about = "Deploy and exercise the cityGraph n8n workflow")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    #[serde(default)]
    pub verbose: u8,

    /// Procedure to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level procedures.
#[derive(Debug, Clone, Subcommand, Serialize, Deserialize)]
pub enum Command {
    /// Create or update the workflow on n8n, then activate it.
    Deploy(DeployArgs),
    /// Send sample requests to the workflow's webhook.
    Webhook(WebhookArgs),
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing on stderr with environment-based filtering.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(Self::default_directive(self.verbose)));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    /// Filter used when `RUST_LOG` is not set.
    fn default_directive(verbose: u8) -> &'static str {
        match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Logs build information and the selected command's configuration.
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );

        match &self.command {
            Command::Deploy(args) => args.log(),
            Command::Webhook(args) => args.log(),
        }
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
