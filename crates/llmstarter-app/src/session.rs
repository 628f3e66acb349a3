use llmstarter_types::{ChatEntry, ModelChoice, Temperature, DEFAULT_MODEL};

use crate::config::SecretStore;

/// Everything one browser session knows.
///
/// Created empty, grown by appending, dropped with the session. The
/// credential lives only here (and in memory) and is never written out.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    credential: Option<String>,
    model: Option<ModelChoice>,
    temperature: Option<Temperature>,
    history: Vec<ChatEntry>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill in model and temperature if they are unset.
    ///
    /// Runs before every render and never overwrites a user choice.
    pub fn init_defaults(&mut self) {
        self.model.get_or_insert(DEFAULT_MODEL);
        self.temperature.get_or_insert_with(Temperature::default);
    }

    /// Session credential if non-empty, else the configured fallback, else
    /// nothing. A missing credential is not an error here.
    pub fn get_credential(&self, fallback: &SecretStore) -> Option<String> {
        self.credential
            .as_deref()
            .filter(|c| !c.is_empty())
            .or_else(|| fallback.fallback_credential())
            .map(str::to_string)
    }

    pub fn set_credential(&mut self, credential: impl Into<String>) {
        self.credential = Some(credential.into());
    }

    /// Selected model, or the default before `init_defaults` has run
    pub fn model(&self) -> ModelChoice {
        self.model.unwrap_or(DEFAULT_MODEL)
    }

    pub fn set_model(&mut self, model: ModelChoice) {
        self.model = Some(model);
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature.unwrap_or_default()
    }

    pub fn set_temperature(&mut self, temperature: Temperature) {
        self.temperature = Some(temperature);
    }

    pub fn history(&self) -> &[ChatEntry] {
        &self.history
    }

    pub fn push(&mut self, entry: ChatEntry) {
        self.history.push(entry);
    }
}
