//! Sample requests against the workflow's webhook.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use citygraph_n8n::webhook::{
    TestCase, TestSummary, WebhookClient, WebhookConfig, WebhookPayload, WebhookResponse,
    default_suite,
};

use crate::TRACING_TARGET_WEBHOOK;
use crate::config::{WebhookArgs, WebhookCommand};
use crate::console::Console;

/// Runs the `webhook` subcommand against stdin/stdout.
pub async fn execute(args: WebhookArgs) -> anyhow::Result<()> {
    let mut console = Console::stdio();
    let config = if args.yes {
        args.webhook
    } else {
        confirm_webhook_url(&mut console, args.webhook)?
    };

    let client = WebhookClient::new(config).context("invalid webhook configuration")?;

    match args.command {
        Some(WebhookCommand::Chat {
            message,
            user_id,
            session_id,
        }) => {
            let payload = WebhookPayload::chat(message.join(" "), Some(user_id), session_id);
            run_case(&client, &TestCase::new("Chat", payload), &mut console).await?;
        }
        Some(WebhookCommand::Extract { file_path }) => {
            let payload = WebhookPayload::extract_address(file_path);
            run_case(&client, &TestCase::new("Address Extraction", payload), &mut console).await?;
        }
        Some(WebhookCommand::Suite) => {
            run_suite(&client, &mut console).await?;
        }
        Some(WebhookCommand::Interactive) => {
            interactive(&client, &mut console).await?;
        }
        None => {
            print_usage(&mut console)?;
            interactive(&client, &mut console).await?;
        }
    }

    Ok(())
}

/// Asks for a webhook URL while the placeholder is configured.
///
/// An empty answer or running out of input keeps the placeholder. Any other
/// URL is returned unchanged without prompting.
pub fn confirm_webhook_url<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: WebhookConfig,
) -> io::Result<WebhookConfig> {
    if !config.is_placeholder() {
        return Ok(config);
    }

    writeln!(console, "⚠️  Default webhook URL detected.")?;
    let answer = console.prompt("Enter your n8n webhook URL (or press Enter to use default): ")?;

    Ok(match answer.filter(|url| !url.is_empty()) {
        Some(url) => config.with_webhook_url(url),
        None => config,
    })
}

fn print_usage<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<()> {
    writeln!(console, "Usage:")?;
    writeln!(console, "  citygraph webhook [--webhook-url <URL>] chat <message>...")?;
    writeln!(console, "  citygraph webhook [--webhook-url <URL>] extract <file_path>")?;
    writeln!(console, "  citygraph webhook [--webhook-url <URL>] test")?;
    writeln!(console, "  citygraph webhook [--webhook-url <URL>] interactive")?;
    writeln!(console, "\nStarting interactive mode...\n")
}

/// Runs one case, printing its inputs and the outcome.
///
/// Returns whether the case passed. Only console failures are errors.
pub async fn run_case<R, W>(
    client: &WebhookClient,
    case: &TestCase,
    console: &mut Console<R, W>,
) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    match &case.payload {
        WebhookPayload::Chat {
            message,
            user_id,
            session_id,
        } => {
            console.header("Testing Chat Functionality")?;
            writeln!(console, "\n💬 Message: {message}")?;
            writeln!(console, "👤 User ID: {user_id}")?;
            writeln!(console, "🔑 Session ID: {session_id}")?;
        }
        WebhookPayload::ExtractAddress { file_path } => {
            console.header("Testing Address Extraction")?;
            writeln!(console, "\n📁 File Path: {file_path}")?;
        }
        WebhookPayload::InvalidAction { .. } => {
            console.header("Testing Invalid Action (Error Handling)")?;
        }
    }

    match case.run(client).await {
        Ok(response) => {
            print_response(console, &response)?;
            Ok(true)
        }
        Err(error) => {
            tracing::warn!(
                target: TRACING_TARGET_WEBHOOK,
                action = case.payload.action(),
                error = %error,
                "Webhook case failed"
            );
            writeln!(console, "\n❌ Error: {error}")?;
            if let Some(body) = error.response_body() {
                writeln!(console, "Response: {body}")?;
            }
            Ok(false)
        }
    }
}

fn print_response<R, W: Write>(
    console: &mut Console<R, W>,
    response: &WebhookResponse,
) -> io::Result<()> {
    writeln!(console, "\n📊 Status Code: {}", response.status_code())?;
    writeln!(console, "📝 Response:")?;
    writeln!(console, "{}", response.body.render())
}

/// Runs the five canned cases in order and prints the tally.
pub async fn run_suite<R, W>(
    client: &WebhookClient,
    console: &mut Console<R, W>,
) -> io::Result<TestSummary>
where
    R: BufRead,
    W: Write,
{
    console.header("cityGraph n8n Workflow Test Suite")?;
    writeln!(console, "Webhook URL: {}", client.url())?;

    let mut summary = TestSummary::default();
    for (index, case) in default_suite().enumerate() {
        writeln!(console, "\n\n🧪 Test {}: {}", index + 1, case.title)?;
        summary.record(run_case(client, &case, console).await?);
    }

    console.header("Test Summary")?;
    writeln!(console, "\n✅ Passed: {}", summary.passed)?;
    writeln!(console, "❌ Failed: {}", summary.failed)?;
    writeln!(console, "📊 Total: {}", summary.total())?;
    writeln!(console, "🎯 Success Rate: {:.1}%\n", summary.success_rate())?;

    tracing::info!(
        target: TRACING_TARGET_WEBHOOK,
        passed = summary.passed,
        failed = summary.failed,
        "Test suite finished"
    );

    Ok(summary)
}

/// Menu loop; returns on `5` or when input runs out at any prompt.
pub async fn interactive<R, W>(
    client: &WebhookClient,
    console: &mut Console<R, W>,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    console.header("Interactive Testing Mode")?;

    loop {
        writeln!(console, "\n📋 Options:")?;
        writeln!(console, "  1. Test Chat")?;
        writeln!(console, "  2. Test Address Extraction")?;
        writeln!(console, "  3. Test Invalid Action")?;
        writeln!(console, "  4. Run All Tests")?;
        writeln!(console, "  5. Exit")?;

        let Some(choice) = console.prompt("\n👉 Select an option (1-5): ")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => {
                let Some(message) = console.prompt("Enter chat message: ")? else {
                    return Ok(());
                };
                let Some(user_id) =
                    console.prompt("Enter user ID (or press Enter for default): ")?
                else {
                    return Ok(());
                };
                let user_id = Some(user_id).filter(|id| !id.is_empty());
                let payload = WebhookPayload::chat(message, user_id, None);
                run_case(client, &TestCase::new("Chat", payload), console).await?;
            }
            "2" => {
                let Some(file_path) = console.prompt("Enter file path in GitHub repo: ")? else {
                    return Ok(());
                };
                let payload = WebhookPayload::extract_address(file_path);
                run_case(client, &TestCase::new("Address Extraction", payload), console).await?;
            }
            "3" => {
                let payload = WebhookPayload::invalid_action();
                run_case(client, &TestCase::new("Invalid Action", payload), console).await?;
            }
            "4" => {
                run_suite(client, console).await?;
            }
            "5" => {
                writeln!(console, "\n👋 Goodbye!")?;
                return Ok(());
            }
            _ => {
                writeln!(console, "\n❌ Invalid option. Please select 1-5.")?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use citygraph_n8n::webhook::DEFAULT_WEBHOOK_URL;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::console::{captured, scripted};

    const HOOK_PATH: &str = "/webhook/citygraph-webhook";

    fn client_for(server: &MockServer) -> WebhookClient {
        WebhookClient::new(WebhookConfig::new(format!("{}{HOOK_PATH}", server.uri()))).unwrap()
    }

    async fn answer_everything(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path(HOOK_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_chat_case_prints_inputs_and_response() {
        let server = MockServer::start().await;
        answer_everything(&server).await;

        let payload = WebhookPayload::chat(
            "Hello",
            None,
            Some("session_20250101_120000".to_owned()),
        );
        let mut console = scripted("");
        let passed = run_case(&client_for(&server), &TestCase::new("Chat", payload), &mut console)
            .await
            .unwrap();

        assert!(passed);
        let output = captured(console);
        assert!(output.contains("  Testing Chat Functionality"));
        assert!(output.contains("💬 Message: Hello"));
        assert!(output.contains("👤 User ID: test_user"));
        assert!(output.contains("🔑 Session ID: session_20250101_120000"));
        assert!(output.contains("📊 Status Code: 200"));
        assert!(output.contains("{\n  \"success\": true\n}"));
    }

    #[tokio::test]
    async fn test_failed_case_prints_error_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(HOOK_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("Workflow could not be started"))
            .mount(&server)
            .await;

        let payload = WebhookPayload::extract_address("README.md");
        let mut console = scripted("");
        let passed = run_case(
            &client_for(&server),
            &TestCase::new("Address Extraction", payload),
            &mut console,
        )
        .await
        .unwrap();

        assert!(!passed);
        let output = captured(console);
        assert!(output.contains("📁 File Path: README.md"));
        assert!(output.contains("❌ Error:"));
        assert!(output.contains("Response: Workflow could not be started"));
        assert!(!output.contains("📊 Status Code"));
    }

    #[tokio::test]
    async fn test_suite_tallies_results() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(HOOK_PATH))
            .and(body_partial_json(json!({"action": "extract_address"})))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "no token"})))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(HOOK_PATH))
            .and(body_partial_json(json!({"action": "invalid_action"})))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Unknown action"})))
            .with_priority(1)
            .mount(&server)
            .await;
        answer_everything(&server).await;

        let mut console = scripted("");
        let summary = run_suite(&client_for(&server), &mut console).await.unwrap();

        assert_eq!(summary.passed, 4);
        assert_eq!(summary.failed, 1);

        let output = captured(console);
        assert!(output.contains("🧪 Test 1: Chat - Greeting"));
        assert!(output.contains("🧪 Test 5: Invalid Action Handling"));
        assert!(output.contains("📊 Total: 5"));
        assert!(output.contains("🎯 Success Rate: 80.0%"));
    }

    #[tokio::test]
    async fn test_interactive_menu() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(HOOK_PATH))
            .and(body_partial_json(json!({
                "action": "chat",
                "message": "Hi there",
                "user_id": "test_user"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(HOOK_PATH))
            .and(body_partial_json(json!({"action": "invalid_action"})))
            .respond_with(ResponseTemplate::new(400))
            .expect(1)
            .mount(&server)
            .await;

        let mut console = scripted("9\n1\nHi there\n\n3\n5\n4\n");
        interactive(&client_for(&server), &mut console).await.unwrap();

        let output = captured(console);
        assert!(output.contains("❌ Invalid option. Please select 1-5."));
        assert!(output.contains("📊 Status Code: 400"));
        assert!(output.contains("👋 Goodbye!"));
        assert!(!output.contains("Test Suite"));
    }

    #[tokio::test]
    async fn test_interactive_stops_at_end_of_input() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut console = scripted("");
        interactive(&client_for(&server), &mut console).await.unwrap();

        assert!(captured(console).contains("Interactive Testing Mode"));
    }

    #[tokio::test]
    async fn test_interactive_sends_nothing_when_input_ends_at_follow_up_prompt() {
        for script in ["1\n", "1\nHi there\n", "2\n"] {
            let server = MockServer::start().await;
            answer_everything(&server).await;

            let mut console = scripted(script);
            interactive(&client_for(&server), &mut console).await.unwrap();

            let received = server.received_requests().await.unwrap();
            assert!(received.is_empty(), "{script:?} posted {} request(s)", received.len());
            let output = captured(console);
            assert!(!output.contains("Testing Chat Functionality"));
            assert!(!output.contains("Testing Address Extraction"));
        }
    }

    #[test]
    fn test_confirm_webhook_url() {
        let placeholder = WebhookConfig::default();

        let mut console = scripted("https://n8n.example.com/webhook/citygraph-webhook\n");
        let config = confirm_webhook_url(&mut console, placeholder.clone()).unwrap();
        assert_eq!(
            config.webhook_url,
            "https://n8n.example.com/webhook/citygraph-webhook"
        );
        assert!(captured(console).contains("Default webhook URL detected"));

        let mut console = scripted("\n");
        let config = confirm_webhook_url(&mut console, placeholder.clone()).unwrap();
        assert_eq!(config.webhook_url, DEFAULT_WEBHOOK_URL);

        let mut console = scripted("");
        let config = confirm_webhook_url(&mut console, placeholder).unwrap();
        assert_eq!(config.webhook_url, DEFAULT_WEBHOOK_URL);

        let custom = WebhookConfig::new("https://n8n.example.com/webhook/other");
        let mut console = scripted("https://ignored.example.com\n");
        let config = confirm_webhook_url(&mut console, custom).unwrap();
        assert_eq!(config.webhook_url, "https://n8n.example.com/webhook/other");
        assert!(captured(console).is_empty());
    }
}
