//! The tab container.
//!
//! Five fixed panels in fixed order. The shell writes what the user enters
//! straight into the session record and asks each panel for its view; it
//! has no logic of its own beyond parsing form values.

use serde::{Deserialize, Serialize};

use llmstarter_types::{
    model_menu, ModelChoice, ModelOption, ParseModelError, Temperature, TemperatureError,
    MAX_TEMPERATURE, MIN_TEMPERATURE,
};

use crate::chat::{ChatPanel, ChatView};
use crate::config::SecretStore;
use crate::session::SessionState;

pub const PAGE_TITLE: &str = "LLM Starter";

pub const KEY_STORED_NOTICE: &str = "Key stored in session (not persisted).";
pub const PLACEHOLDER_MODELS_NOTE: &str = "Claude & Gemini placeholders until APIs wired in.";
pub const PLACEHOLDER_PANEL_MESSAGE: &str = "Placeholder: this script is not implemented yet.";

/// Slider granularity
pub const TEMPERATURE_STEP: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabKind {
    ApiKey,
    ModelParams,
    Chat,
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub id: String,
    pub title: String,
    pub kind: TabKind,
}

/// Tab ids and titles, in display order
const TABS: [(&str, &str, TabKind); 5] = [
    ("api_key", "\u{1F511} API Key", TabKind::ApiKey),
    ("model_params", "\u{2699}\u{FE0F} Model & Params", TabKind::ModelParams),
    ("script_1", "Python Script 1", TabKind::Chat),
    ("script_2", "Python Script 2", TabKind::Placeholder),
    ("script_n", "Python Script N", TabKind::Placeholder),
];

pub fn tabs() -> Vec<Tab> {
    TABS.iter()
        .map(|(id, title, kind)| Tab {
            id: id.to_string(),
            title: title.to_string(),
            kind: *kind,
        })
        .collect()
}

/// Credential tab. The credential itself is never sent back to the browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKeyPanel {
    pub heading: String,
    pub field_label: String,
    pub key_available: bool,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamsPanel {
    pub heading: String,
    pub model: ModelChoice,
    pub models: Vec<ModelOption>,
    pub temperature: f64,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub step: f64,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderPanel {
    pub tab_id: String,
    pub message: String,
}

/// Everything the page needs to draw one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub title: String,
    pub tabs: Vec<Tab>,
    pub api_key: ApiKeyPanel,
    pub params: ParamsPanel,
    pub chat: ChatView,
    pub placeholders: Vec<PlaceholderPanel>,
}

/// Bad values coming from the parameter widgets
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error(transparent)]
    Model(#[from] ParseModelError),
    #[error(transparent)]
    Temperature(#[from] TemperatureError),
}

/// Draw the whole page for a session. Applies defaults first, so this is
/// the one place a fresh session gets its model and temperature.
pub fn render(state: &mut SessionState, secrets: &SecretStore) -> SessionView {
    state.init_defaults();

    let key_available = state.get_credential(secrets).is_some();

    SessionView {
        title: PAGE_TITLE.to_string(),
        tabs: tabs(),
        api_key: ApiKeyPanel {
            heading: "Enter your OpenAI key".to_string(),
            field_label: "OPENAI_API_KEY".to_string(),
            key_available,
            notice: key_available.then(|| KEY_STORED_NOTICE.to_string()),
        },
        params: ParamsPanel {
            heading: "Model & generation parameters".to_string(),
            model: state.model(),
            models: model_menu(),
            temperature: state.temperature().value(),
            min_temperature: MIN_TEMPERATURE,
            max_temperature: MAX_TEMPERATURE,
            step: TEMPERATURE_STEP,
            note: PLACEHOLDER_MODELS_NOTE.to_string(),
        },
        chat: ChatPanel::render(state),
        placeholders: TABS
            .iter()
            .filter(|(_, _, kind)| *kind == TabKind::Placeholder)
            .map(|(id, _, _)| render_placeholder(id))
            .collect(),
    }
}

/// Script tabs that have no script yet
pub fn render_placeholder(tab_id: &str) -> PlaceholderPanel {
    PlaceholderPanel {
        tab_id: tab_id.to_string(),
        message: PLACEHOLDER_PANEL_MESSAGE.to_string(),
    }
}

/// Credential field write-through
pub fn apply_credential(state: &mut SessionState, credential: &str) {
    state.set_credential(credential);
}

/// Dropdown and slider write-through. Nothing is written unless both values
/// are valid.
pub fn apply_params(state: &mut SessionState, model: &str, temperature: f64) -> Result<(), InputError> {
    let model: ModelChoice = model.parse()?;
    let temperature = Temperature::new(temperature)?;

    state.set_model(model);
    state.set_temperature(temperature);
    Ok(())
}
