#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod commands;
mod config;
mod console;

use std::process;

use crate::config::{Cli, Command};

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "citygraph_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "citygraph_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "citygraph_cli::config";
pub const TRACING_TARGET_DEPLOY: &str = "citygraph_cli::deploy";
pub const TRACING_TARGET_WEBHOOK: &str = "citygraph_cli::webhook";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let Err(error) = run().await else {
        tracing::debug!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = format!("{error:#}"),
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    cli.init_tracing();
    cli.log();

    match cli.command {
        Command::Deploy(args) => commands::deploy::execute(args).await,
        Command::Webhook(args) => commands::webhook::execute(args).await,
    }
}
