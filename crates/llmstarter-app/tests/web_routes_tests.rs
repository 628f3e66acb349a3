use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use llmstarter::llm_api::ClientFactory;
use llmstarter::{SecretStore, WebServer, WebServerConfig};

fn responses_body(text: &str) -> Value {
    json!({
        "id": "resp_test",
        "object": "response",
        "status": "completed",
        "output": [{
            "type": "message",
            "role": "assistant",
            "content": [{ "type": "output_text", "text": text, "annotations": [] }]
        }]
    })
}

fn app(api_url: &str, secrets: SecretStore) -> Router {
    WebServer::new(WebServerConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        provider: Arc::new(ClientFactory::new(api_url)),
        secrets,
    })
    .router()
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn new_session(app: &Router) -> String {
    let (status, body) = call(app, "POST", "/api/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_hello_scenario_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_json(json!({
            "model": "gpt-4o",
            "input": "Hello",
            "temperature": 0.2,
            "instructions": "You are a helpful assistant."
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(responses_body("Hi there!")))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(&server.uri(), SecretStore::empty());
    let id = new_session(&app).await;

    let (status, view) = call(
        &app,
        "PUT",
        &format!("/api/sessions/{}/credential", id),
        Some(json!({ "credential": "sk-test" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["api_key"]["notice"], "Key stored in session (not persisted).");

    let (status, _) = call(
        &app,
        "PUT",
        &format!("/api/sessions/{}/params", id),
        Some(json!({ "model": "gpt-4o", "temperature": 0.2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, view) = call(
        &app,
        "POST",
        &format!("/api/sessions/{}/messages", id),
        Some(json!({ "content": "Hello" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        view["chat"]["entries"],
        json!([
            { "role": "user", "text": "Hello" },
            { "role": "assistant", "text": "Hi there!" }
        ])
    );
}

#[tokio::test]
async fn test_fresh_session_renders_defaults() {
    let app = app("http://127.0.0.1:9", SecretStore::empty());
    let id = new_session(&app).await;

    let (status, view) = call(&app, "GET", &format!("/api/sessions/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["params"]["model"], "gpt-4o");
    assert_eq!(view["params"]["temperature"], 0.7);
    assert_eq!(view["tabs"].as_array().unwrap().len(), 5);
    assert_eq!(view["api_key"]["key_available"], false);
    assert_eq!(view["chat"]["entries"], json!([]));
}

#[tokio::test]
async fn test_fallback_key_is_used_without_session_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .and(header("authorization", "Bearer sk-fallback"))
        .respond_with(ResponseTemplate::new(200).set_body_json(responses_body("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(&server.uri(), SecretStore::with_key("sk-fallback"));
    let id = new_session(&app).await;

    let (status, view) = call(
        &app,
        "POST",
        &format!("/api/sessions/{}/messages", id),
        Some(json!({ "content": "ping" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["chat"]["entries"].as_array().unwrap().len(), 2);
    assert_eq!(view["api_key"]["key_available"], true);
}

#[tokio::test]
async fn test_missing_credential_is_unauthorized_and_keeps_user_entry() {
    let app = app("http://127.0.0.1:9", SecretStore::empty());
    let id = new_session(&app).await;

    let (status, body) = call(
        &app,
        "POST",
        &format!("/api/sessions/{}/messages", id),
        Some(json!({ "content": "Hello" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);

    let (_, view) = call(&app, "GET", &format!("/api/sessions/{}", id), None).await;
    assert_eq!(view["chat"]["entries"], json!([{ "role": "user", "text": "Hello" }]));
}

#[tokio::test]
async fn test_placeholder_model_is_not_implemented() {
    let app = app("http://127.0.0.1:9", SecretStore::with_key("sk-test"));
    let id = new_session(&app).await;

    call(
        &app,
        "PUT",
        &format!("/api/sessions/{}/params", id),
        Some(json!({ "model": "Claude 3.7", "temperature": 0.7 })),
    )
    .await;

    let (status, body) = call(
        &app,
        "POST",
        &format!("/api/sessions/{}/messages", id),
        Some(json!({ "content": "Hello" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert!(body["error"].as_str().unwrap().contains("Claude 3.7"));
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })))
        .mount(&server)
        .await;

    let app = app(&server.uri(), SecretStore::with_key("sk-bad"));
    let id = new_session(&app).await;

    let (status, body) = call(
        &app,
        "POST",
        &format!("/api/sessions/{}/messages", id),
        Some(json!({ "content": "Hello" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("Incorrect API key provided"));
}

#[tokio::test]
async fn test_bad_params_are_rejected() {
    let app = app("http://127.0.0.1:9", SecretStore::empty());
    let id = new_session(&app).await;

    let (status, _) = call(
        &app,
        "PUT",
        &format!("/api/sessions/{}/params", id),
        Some(json!({ "model": "gpt-4o", "temperature": 1.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &app,
        "PUT",
        &format!("/api/sessions/{}/params", id),
        Some(json!({ "model": "gpt-5", "temperature": 0.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, view) = call(&app, "GET", &format!("/api/sessions/{}", id), None).await;
    assert_eq!(view["params"]["model"], "gpt-4o");
    assert_eq!(view["params"]["temperature"], 0.7);
}

#[tokio::test]
async fn test_unknown_and_closed_sessions_are_not_found() {
    let app = app("http://127.0.0.1:9", SecretStore::empty());

    let (status, _) = call(
        &app,
        "GET",
        "/api/sessions/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let id = new_session(&app).await;
    let (status, _) = call(&app, "DELETE", &format!("/api/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call(&app, "GET", &format!("/api/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_models_and_session_listing() {
    let app = app("http://127.0.0.1:9", SecretStore::empty());

    let (status, models) = call(&app, "GET", "/api/models", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        models,
        json!([
            { "id": "gpt-4o", "label": "gpt-4o", "wired": true },
            { "id": "claude-3.7", "label": "Claude 3.7", "wired": false },
            { "id": "gemini-2.5-pro", "label": "Gemini 2.5 Pro", "wired": false }
        ])
    );

    let id = new_session(&app).await;
    let (_, sessions) = call(&app, "GET", "/api/sessions", None).await;
    let sessions = sessions.as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["id"], id);
    assert_eq!(sessions[0]["message_count"], 0);
}

#[tokio::test]
async fn test_index_page_is_served() {
    let app = app("http://127.0.0.1:9", SecretStore::empty());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("<title>LLM Starter</title>"));
}
