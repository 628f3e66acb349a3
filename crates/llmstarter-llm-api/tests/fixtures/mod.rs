use serde_json::{json, Value};
use wiremock::matchers::*;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock OpenAI Responses endpoint
pub struct ResponsesMockServer {
    server: MockServer,
}

impl ResponsesMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// A successful Responses API body carrying `text` as its only output
    pub fn success_body(text: &str) -> Value {
        json!({
            "id": "resp_test123",
            "object": "response",
            "created_at": 1741476542,
            "status": "completed",
            "model": "gpt-4o-2024-08-06",
            "output": [{
                "type": "message",
                "id": "msg_test123",
                "status": "completed",
                "role": "assistant",
                "content": [{
                    "type": "output_text",
                    "text": text,
                    "annotations": []
                }]
            }],
            "usage": {
                "input_tokens": 10,
                "output_tokens": 20,
                "total_tokens": 30
            }
        })
    }

    /// Answer only requests whose body equals `expected_body` and whose
    /// bearer token is `api_key`
    pub async fn mock_success_for(&self, api_key: &str, expected_body: Value, reply: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/responses"))
            .and(header("authorization", format!("Bearer {}", api_key).as_str()))
            .and(body_json(expected_body))
            .respond_with(ResponseTemplate::new(200).set_body_json(Self::success_body(reply)))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Answer any request with `reply`
    pub async fn mock_success(&self, reply: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/responses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(Self::success_body(reply)))
            .mount(&self.server)
            .await;
    }

    /// OpenAI-style error envelope
    pub async fn mock_error(&self, status: u16, message: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/responses"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": {
                    "message": message,
                    "type": "invalid_request_error",
                    "param": null,
                    "code": "invalid_api_key"
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Error with a body that is not JSON
    pub async fn mock_plain_error(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/responses"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_garbage(&self) {
        Mock::given(method("POST"))
            .and(path("/v1/responses"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&self.server)
            .await;
    }

    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}
