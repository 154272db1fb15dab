//! Create-or-update deployment of the workflow definition.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Context;
use citygraph_n8n::{N8nClient, WorkflowApi, WorkflowDocument, WorkflowSummary};
use url::Url;

use crate::TRACING_TARGET_DEPLOY;
use crate::config::DeployArgs;
use crate::console::Console;

/// Whether the deployment created a new workflow or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployAction {
    Created,
    Updated,
}

impl DeployAction {
    fn verb(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
        }
    }
}

/// What a deployment did.
#[derive(Debug, Clone)]
pub struct DeployOutcome {
    pub action: DeployAction,
    pub workflow: WorkflowSummary,
    pub activated: bool,
}

/// Runs the `deploy` subcommand against stdin/stdout.
pub async fn execute(args: DeployArgs) -> anyhow::Result<()> {
    let mut console = Console::stdio();
    let mut config = args.n8n_config();

    writeln!(console, "Using n8n instance: {}", config.n8n_url)?;

    if !args.yes {
        let n8n_url = confirm_instance_url(&mut console, &config.n8n_url)?;
        config = config.with_n8n_url(n8n_url);
    }

    let webhook_url = config
        .webhook_url(&args.webhook_path)
        .context("invalid n8n configuration")?;
    let client = N8nClient::new(config).context("invalid n8n configuration")?;

    let outcome = deploy(&client, &args.workflow_file, &webhook_url, &mut console).await?;
    tracing::debug!(
        target: TRACING_TARGET_DEPLOY,
        workflow = ?outcome.workflow,
        created = outcome.action == DeployAction::Created,
        activated = outcome.activated,
        "Deploy command finished"
    );

    Ok(())
}

/// Asks the operator to confirm or replace the instance URL.
///
/// `y` keeps the URL, any other non-empty answer except `n` replaces it, and
/// `n` or an empty answer asks for the URL explicitly. Running out of input
/// keeps the current URL.
pub fn confirm_instance_url<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    current: &str,
) -> std::io::Result<String> {
    let Some(answer) =
        console.prompt("\nIs this the correct n8n URL? (y/n, or enter new URL): ")?
    else {
        return Ok(current.to_owned());
    };

    if answer.eq_ignore_ascii_case("y") {
        return Ok(current.to_owned());
    }

    if !answer.is_empty() && !answer.eq_ignore_ascii_case("n") {
        return Ok(answer);
    }

    let entered =
        console.prompt("Enter your n8n instance URL (e.g., https://n8n.yourdomain.com): ")?;
    Ok(entered
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| current.to_owned()))
}

/// Loads the workflow, creates or updates it, and activates the result.
///
/// # Errors
///
/// Fails when the workflow file cannot be loaded or the create/update call
/// fails. A failed lookup falls back to creating; a failed activation is only
/// reported.
pub async fn deploy<A, R, W>(
    api: &A,
    workflow_file: &Path,
    webhook_url: &Url,
    console: &mut Console<R, W>,
) -> anyhow::Result<DeployOutcome>
where
    A: WorkflowApi + ?Sized,
    R: BufRead,
    W: Write,
{
    console.banner("cityGraph n8n Workflow Deployment")?;

    writeln!(console, "\n📂 Loading workflow configuration...")?;
    let document = match WorkflowDocument::load(workflow_file) {
        Ok(document) => document,
        Err(error) => {
            writeln!(console, "❌ Error: {error}")?;
            return Err(error).with_context(|| {
                format!("failed to load workflow from {}", workflow_file.display())
            });
        }
    };
    let name = document.name();

    writeln!(console, "\n🔍 Checking for existing workflow: {name}")?;
    let existing_id = match api.find_workflow_by_name(name).await {
        Ok(found) => found.and_then(|workflow| workflow.id),
        Err(error) => {
            tracing::warn!(
                target: TRACING_TARGET_DEPLOY,
                error = %error,
                "Workflow lookup failed, creating a new workflow"
            );
            writeln!(console, "⚠️  Error checking existing workflows: {error}")?;
            None
        }
    };

    let (action, result) = match existing_id {
        Some(id) => {
            writeln!(console, "   Found existing workflow with ID: {id}")?;
            writeln!(console, "\n🔄 Updating existing workflow...")?;
            (DeployAction::Updated, api.update_workflow(&id, &document).await)
        }
        None => {
            writeln!(console, "   No existing workflow found")?;
            writeln!(console, "\n➕ Creating new workflow...")?;
            (DeployAction::Created, api.create_workflow(&document).await)
        }
    };

    let workflow = match result {
        Ok(workflow) => workflow,
        Err(error) => {
            let verb = match action {
                DeployAction::Created => "creating",
                DeployAction::Updated => "updating",
            };
            writeln!(console, "❌ Error {verb} workflow: {error}")?;
            if let Some(body) = error.response_body() {
                writeln!(console, "   Response: {body}")?;
            }
            return Err(error).with_context(|| format!("failed {verb} workflow '{name}'"));
        }
    };

    writeln!(console, "✅ Workflow {} successfully!", action.verb())?;
    writeln!(console, "   Workflow ID: {}", workflow.id().unwrap_or("unknown"))?;
    writeln!(console, "   Workflow Name: {}", workflow.name().unwrap_or("unknown"))?;

    let mut activated = false;
    if let Some(id) = workflow.id() {
        writeln!(console, "\n🚀 Activating workflow...")?;
        match api.activate_workflow(id).await {
            Ok(()) => {
                activated = true;
                writeln!(console, "✅ Workflow activated successfully!")?;
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET_DEPLOY,
                    workflow_id = id,
                    error = %error,
                    "Workflow activation failed"
                );
                writeln!(console, "⚠️  Warning: Could not activate workflow: {error}")?;
            }
        }
    }

    writeln!(console)?;
    console.banner("Deployment Complete!")?;
    writeln!(console, "\n📋 Next Steps:")?;
    writeln!(
        console,
        "   1. Go to your n8n instance and open the '{name}' workflow"
    )?;
    writeln!(
        console,
        "   2. Configure GitHub authentication (add your GitHub token)"
    )?;
    writeln!(console, "   3. Test the webhook endpoints")?;
    writeln!(console, "   4. Integrate with your application")?;
    writeln!(console, "\n📡 Webhook URL will be:")?;
    writeln!(console, "   {webhook_url}")?;
    writeln!(console)?;

    tracing::info!(
        target: TRACING_TARGET_DEPLOY,
        action = action.verb(),
        workflow_id = ?workflow.id,
        activated,
        "Deployment finished"
    );

    Ok(DeployOutcome {
        action,
        workflow,
        activated,
    })
}
