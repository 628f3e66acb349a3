use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::{Completion, CompletionClient, CompletionRequest};
use crate::config::normalize_api_url;
use crate::error::LlmApiError;
use crate::request_logger::{log_request, log_response};

/// Client for the OpenAI Responses API (`POST /v1/responses`)
pub struct OpenAiResponsesClient {
    api_url: String,
    client: reqwest::Client,
}

impl OpenAiResponsesClient {
    /// `api_url` may be a bare host (`https://api.openai.com`) or the full
    /// endpoint; it is normalized either way.
    pub fn new(api_url: &str) -> Self {
        Self::with_http_client(api_url, reqwest::Client::new())
    }

    pub fn with_http_client(api_url: &str, client: reqwest::Client) -> Self {
        Self {
            api_url: normalize_api_url(api_url),
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.api_url
    }
}

#[derive(Serialize)]
struct ResponsesBody<'a> {
    model: &'a str,
    input: &'a str,
    temperature: f64,
    instructions: &'a str,
}

impl<'a> From<&'a CompletionRequest> for ResponsesBody<'a> {
    fn from(request: &'a CompletionRequest) -> Self {
        Self {
            model: &request.model,
            input: &request.input,
            temperature: request.temperature,
            instructions: &request.instructions,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResponsesReply {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    item_type: String,
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    part_type: String,
    #[serde(default)]
    text: Option<String>,
}

impl ResponsesReply {
    /// Concatenation of every `output_text` part of every `message` item.
    /// A top-level `output_text` wins when the server already provides one.
    fn output_text(self) -> String {
        if let Some(text) = self.output_text {
            return text;
        }

        self.output
            .into_iter()
            .filter(|item| item.item_type == "message")
            .flat_map(|item| item.content)
            .filter(|part| part.part_type == "output_text")
            .filter_map(|part| part.text)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorReply {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

#[async_trait]
impl CompletionClient for OpenAiResponsesClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, LlmApiError> {
        // Same failure the official client raises before any I/O.
        let api_key = request
            .credential
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(LlmApiError::MissingCredential)?;

        let body = ResponsesBody::from(request);
        log_request(&self.api_url, &body, api_key);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;
        log_response(status, &response_text);

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorReply>(&response_text)
                .map(|reply| reply.error.message)
                .unwrap_or(response_text);
            return Err(LlmApiError::Api { status, message });
        }

        let reply: ResponsesReply = serde_json::from_str(&response_text)?;
        Ok(Completion {
            text: reply.output_text(),
        })
    }
}
