use log::{info, warn};
use serde::{Deserialize, Serialize};

use llmstarter_llm_api::{ClientProvider, CompletionRequest, LlmApiError};
use llmstarter_types::ChatEntry;

use crate::config::SecretStore;
use crate::session::SessionState;

/// Placeholder text of the prompt box
pub const INPUT_PLACEHOLDER: &str = "Ask anything…";

/// What the chat tab shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatView {
    pub header: String,
    pub placeholder: String,
    /// Busy indicator shown while a request is in flight
    pub thinking: String,
    /// Oldest first
    pub entries: Vec<ChatEntry>,
}

/// The chat script: one line in, one completion out, everything appended to
/// the session history.
pub struct ChatPanel<'a> {
    provider: &'a dyn ClientProvider,
    secrets: &'a SecretStore,
}

impl<'a> ChatPanel<'a> {
    pub fn new(provider: &'a dyn ClientProvider, secrets: &'a SecretStore) -> Self {
        Self { provider, secrets }
    }

    /// Handle one submitted line.
    ///
    /// Empty input changes nothing. Any other line, whitespace included, is
    /// sent as typed. The user line is appended first
    /// and stays in the history even when the completion fails; the
    /// assistant line is appended only on success. No retries.
    pub async fn submit(&self, state: &mut SessionState, input: &str) -> Result<(), LlmApiError> {
        if input.is_empty() {
            return Ok(());
        }

        state.push(ChatEntry::user(input));

        let model = state.model();
        let request = CompletionRequest::new(
            model,
            input,
            state.temperature(),
            state.get_credential(self.secrets),
        );

        info!(
            "Chat request: model={} temperature={} input_chars={}",
            model.id(),
            request.temperature,
            input.chars().count()
        );

        let client = self
            .provider
            .client_for(model)
            .inspect_err(|e| warn!("No backend for {}: {}", model, e))?;

        let completion = client
            .complete(&request)
            .await
            .inspect_err(|e| warn!("Completion failed for {}: {}", model.id(), e))?;

        state.push(ChatEntry::assistant(completion.text));
        Ok(())
    }

    /// Snapshot of the chat tab, taken after any mutation has finished
    pub fn render(state: &SessionState) -> ChatView {
        let label = state.model().label();
        ChatView {
            header: format!("Chat with {}", label),
            placeholder: INPUT_PLACEHOLDER.to_string(),
            thinking: format!("{} is thinking…", label),
            entries: state.history().to_vec(),
        }
    }
}
