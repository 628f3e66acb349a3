use std::sync::Arc;

use llmstarter_types::ModelChoice;

use crate::client::{openai::OpenAiResponsesClient, ClientProvider, CompletionClient};
use crate::config::BackendType;
use crate::error::LlmApiError;

/// Client factory for the model menu
///
/// Holds one OpenAI client for the process; credentials travel with each
/// request, so the client is shared by every session.
pub struct ClientFactory {
    openai: Arc<OpenAiResponsesClient>,
}

impl ClientFactory {
    /// # Arguments
    /// * `openai_api_url` - API base or full endpoint for the OpenAI backend
    pub fn new(openai_api_url: &str) -> Self {
        Self {
            openai: Arc::new(OpenAiResponsesClient::new(openai_api_url)),
        }
    }

    pub fn openai_endpoint(&self) -> &str {
        self.openai.endpoint()
    }
}

impl ClientProvider for ClientFactory {
    fn client_for(&self, model: ModelChoice) -> Result<Arc<dyn CompletionClient>, LlmApiError> {
        match BackendType::for_model(model) {
            BackendType::OpenAI => {
                let client: Arc<dyn CompletionClient> = self.openai.clone();
                Ok(client)
            }
            BackendType::Anthropic | BackendType::Google => Err(LlmApiError::ProviderNotWired {
                model: model.label().to_string(),
            }),
        }
    }
}
