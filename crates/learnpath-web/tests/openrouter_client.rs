//! End-to-end tests for the OpenRouter client against a local mock of the
//! chat completions endpoint.

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, response::IntoResponse};
use common::{fenced, hybrid_document};
use learnpath::invoker::{InvokeError, ModelInvoker};
use learnpath::{
    ErrorCategory, GeneratorConfig, ModelConfig, OpenRouterClient, PathGenerator, RawPathRequest,
};
use serde_json::{Value, json};

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    reply: Value,
    delay: Duration,
    seen: Arc<Mutex<Vec<(HeaderMap, Value)>>>,
}

async fn completions(
    State(mock): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    mock.seen.lock().unwrap().push((headers, body));
    tokio::time::sleep(mock.delay).await;
    (mock.status, Json(mock.reply.clone()))
}

fn completion_with(content: &str) -> Value {
    json!({
        "choices": [{"message": {"role": "assistant", "content": content}, "finish_reason": "stop"}],
        "usage": {"prompt_tokens": 900, "completion_tokens": 1500, "total_tokens": 2400}
    })
}

/// Start a mock endpoint and return a client pointed at it plus the record
/// of requests it received.
async fn mock_openrouter(
    status: StatusCode,
    reply: Value,
    delay: Duration,
) -> (OpenRouterClient, Arc<Mutex<Vec<(HeaderMap, Value)>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        status,
        reply,
        delay,
        seen: seen.clone(),
    };
    let router = Router::new()
        .route("/api/v1/chat/completions", post(completions))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let config = ModelConfig::new("sk-test-key")
        .with_model("test/model")
        .with_endpoint(format!("http://{addr}/api/v1/chat/completions"));
    (OpenRouterClient::new(config).unwrap(), seen)
}

#[tokio::test]
async fn fenced_reply_becomes_a_document() {
    let doc = hybrid_document("Learning path for: Learn CSS (Level: Beginner)", 3, 4);
    let (client, seen) = mock_openrouter(
        StatusCode::OK,
        completion_with(&fenced(&doc)),
        Duration::ZERO,
    )
    .await;
    let generator = PathGenerator::new(client, GeneratorConfig::default());

    let result = generator
        .generate(RawPathRequest::new("Learn CSS").with_level("Beginner"))
        .await
        .unwrap();
    assert_eq!(result.phase_count(), 3);
    assert!(result.within_bounds());

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (headers, body) = &seen[0];
    assert_eq!(headers["authorization"], "Bearer sk-test-key");
    assert_eq!(body["model"], "test/model");
    assert_eq!(body["messages"].as_array().unwrap().len(), 1);
    assert_eq!(body["messages"][0]["role"], "user");
    assert!(
        body["messages"][0]["content"]
            .as_str()
            .unwrap()
            .contains("'Learn CSS'")
    );
}

#[tokio::test]
async fn invoke_returns_content_verbatim() {
    let (client, _) = mock_openrouter(
        StatusCode::OK,
        completion_with("```json\n{}\n```"),
        Duration::ZERO,
    )
    .await;

    let reply = client
        .invoke("prompt", Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(reply, "```json\n{}\n```");
    assert_eq!(client.model_label(), "test/model");
}

#[tokio::test]
async fn http_error_is_upstream_failure() {
    let (client, _) = mock_openrouter(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": {"message": "provider down", "code": 500}}),
        Duration::ZERO,
    )
    .await;

    let err = client
        .invoke("prompt", Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, InvokeError::Service { status: 500, .. }));

    let generator = PathGenerator::new(client, GeneratorConfig::default());
    let err = generator
        .generate(RawPathRequest::new("Learn CSS"))
        .await
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::UpstreamFailure);
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn api_error_in_ok_body_is_upstream_failure() {
    let (client, _) = mock_openrouter(
        StatusCode::OK,
        json!({"error": {"message": "model not found", "code": 404}}),
        Duration::ZERO,
    )
    .await;

    let err = client
        .invoke("prompt", Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, InvokeError::Protocol(_)));
}

#[tokio::test]
async fn slow_endpoint_times_out() {
    let (client, _) = mock_openrouter(
        StatusCode::OK,
        completion_with("{}"),
        Duration::from_secs(30),
    )
    .await;

    let err = client
        .invoke("prompt", Duration::from_millis(200))
        .await
        .unwrap_err();
    assert!(matches!(err, InvokeError::Timeout(_)));

    let generator = PathGenerator::new(
        client,
        GeneratorConfig::default().with_timeout(Duration::from_millis(200)),
    );
    let err = generator
        .generate(RawPathRequest::new("Learn CSS"))
        .await
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::UpstreamTimeout);
}

#[tokio::test]
async fn missing_content_is_malformed() {
    let (client, _) = mock_openrouter(
        StatusCode::OK,
        json!({"choices": []}),
        Duration::ZERO,
    )
    .await;
    let generator = PathGenerator::new(client, GeneratorConfig::default());

    let err = generator
        .generate(RawPathRequest::new("Learn CSS"))
        .await
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::MalformedResponse);
}
