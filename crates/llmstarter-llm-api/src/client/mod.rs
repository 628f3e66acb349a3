use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use llmstarter_types::{ModelChoice, Temperature, SYSTEM_INSTRUCTIONS};

use crate::error::LlmApiError;

pub mod openai;

/// Everything the chat panel sends for one user line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub input: String,
    pub temperature: f64,
    pub instructions: String,
    /// Sent as a bearer token, never in the body
    #[serde(skip_serializing)]
    pub credential: Option<String>,
}

impl CompletionRequest {
    /// Build a request carrying the fixed system instruction
    pub fn new(
        model: ModelChoice,
        input: impl Into<String>,
        temperature: Temperature,
        credential: Option<String>,
    ) -> Self {
        Self {
            model: model.id().to_string(),
            input: input.into(),
            temperature: temperature.value(),
            instructions: SYSTEM_INSTRUCTIONS.to_string(),
            credential,
        }
    }
}

/// Generated text returned by a backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub text: String,
}

/// A completion backend. One synchronous round trip per call: no retries,
/// no streaming.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, LlmApiError>;
}

/// Resolves the backend behind a model menu entry
pub trait ClientProvider: Send + Sync {
    fn client_for(&self, model: ModelChoice) -> Result<Arc<dyn CompletionClient>, LlmApiError>;
}
