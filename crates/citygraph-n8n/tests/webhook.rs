//! HTTP-level tests for the webhook client and test cases.

use citygraph_n8n::ErrorKind;
use citygraph_n8n::webhook::{
    ResponseBody, TestCase, WebhookClient, WebhookConfig, WebhookPayload,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HOOK_PATH: &str = "/webhook/citygraph-webhook";

fn client_for(server: &MockServer) -> WebhookClient {
    let config = WebhookConfig::new(format!("{}{HOOK_PATH}", server.uri()));
    WebhookClient::new(config).expect("client")
}

#[tokio::test]
async fn chat_posts_action_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(HOOK_PATH))
        .and(body_json(json!({
            "action": "chat",
            "message": "Hello, how are you?",
            "user_id": "test_user",
            "session_id": "session_20250101_120000"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "Hi!"})))
        .expect(1)
        .mount(&server)
        .await;

    let payload = WebhookPayload::chat(
        "Hello, how are you?",
        None,
        Some("session_20250101_120000".to_owned()),
    );
    let response = client_for(&server).send(&payload).await.unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.body, ResponseBody::Json(json!({"reply": "Hi!"})));
}

#[tokio::test]
async fn send_does_not_fail_on_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(HOOK_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("Workflow could not be started"))
        .mount(&server)
        .await;

    let response = client_for(&server)
        .send(&WebhookPayload::extract_address("README.md"))
        .await
        .unwrap();

    assert!(!response.is_success());
    assert_eq!(
        response.body,
        ResponseBody::Text("Workflow could not be started".to_owned())
    );
}

#[tokio::test]
async fn extract_case_fails_on_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(HOOK_PATH))
        .and(body_json(json!({"action": "extract_address", "file_path": "README.md"})))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "GitHub token missing"})))
        .mount(&server)
        .await;

    let case = TestCase::new(
        "Address Extraction",
        WebhookPayload::extract_address("README.md"),
    );
    let error = case.run(&client_for(&server)).await.unwrap_err();

    assert_eq!(error.status, Some(500));
    assert!(error.response_body().unwrap().contains("GitHub token missing"));
}

#[tokio::test]
async fn probe_case_accepts_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(HOOK_PATH))
        .and(body_json(json!({"action": "invalid_action", "data": "test"})))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Unknown action"})))
        .expect(1)
        .mount(&server)
        .await;

    let case = TestCase::new("Invalid Action Handling", WebhookPayload::invalid_action());
    let response = case.run(&client_for(&server)).await.unwrap();

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn unreachable_webhook_is_a_transport_error() {
    // Pooled servers keep listening after drop; use a dedicated one so the port actually closes.
    let server = MockServer::builder().start().await;
    let client = client_for(&server);
    drop(server);

    let case = TestCase::new("Invalid Action Handling", WebhookPayload::invalid_action());
    let error = case.run(&client).await.unwrap_err();

    assert!(matches!(
        error.kind(),
        ErrorKind::NetworkError | ErrorKind::Timeout
    ));
    assert!(error.status.is_none());
}
