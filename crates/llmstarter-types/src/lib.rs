//! Core types shared by the llmstarter crates.
//!
//! Everything here is plain data: the model menu, the temperature knob and
//! the entries of a chat log.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Constants
// ============================================================================

/// Fixed system instruction sent with every completion request
pub const SYSTEM_INSTRUCTIONS: &str = "You are a helpful assistant.";

/// Model selected when a session has not chosen one yet
pub const DEFAULT_MODEL: ModelChoice = ModelChoice::Gpt4o;

/// Temperature used when a session has not chosen one yet
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

pub const MIN_TEMPERATURE: f64 = 0.0;
pub const MAX_TEMPERATURE: f64 = 1.0;

// ============================================================================
// Model menu
// ============================================================================

/// Entries of the model dropdown.
///
/// Only `Gpt4o` talks to a real backend. The other two are kept as explicit
/// placeholders so the menu matches what users see, and selecting them yields
/// a "not implemented" error instead of a guessed integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelChoice {
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    #[serde(rename = "claude-3.7")]
    Claude37,
    #[serde(rename = "gemini-2.5-pro")]
    Gemini25Pro,
}

impl ModelChoice {
    /// Menu order
    pub const ALL: [ModelChoice; 3] = [
        ModelChoice::Gpt4o,
        ModelChoice::Claude37,
        ModelChoice::Gemini25Pro,
    ];

    /// Identifier used on the wire and sent to the backend
    pub fn id(&self) -> &'static str {
        match self {
            ModelChoice::Gpt4o => "gpt-4o",
            ModelChoice::Claude37 => "claude-3.7",
            ModelChoice::Gemini25Pro => "gemini-2.5-pro",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModelChoice::Gpt4o => "gpt-4o",
            ModelChoice::Claude37 => "Claude 3.7",
            ModelChoice::Gemini25Pro => "Gemini 2.5 Pro",
        }
    }

    /// Whether a completion backend exists for this entry
    pub fn is_wired(&self) -> bool {
        matches!(self, ModelChoice::Gpt4o)
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ModelChoice {
    type Err = ParseModelError;

    /// Accepts either the id or the menu label, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ModelChoice::ALL
            .into_iter()
            .find(|m| m.id().eq_ignore_ascii_case(wanted) || m.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseModelError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown model '{0}' (expected one of: gpt-4o, Claude 3.7, Gemini 2.5 Pro)")]
pub struct ParseModelError(pub String);

/// One row of the model dropdown as the UI receives it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOption {
    pub id: String,
    pub label: String,
    pub wired: bool,
}

impl From<ModelChoice> for ModelOption {
    fn from(model: ModelChoice) -> Self {
        Self {
            id: model.id().to_string(),
            label: model.label().to_string(),
            wired: model.is_wired(),
        }
    }
}

/// The dropdown contents, in menu order
pub fn model_menu() -> Vec<ModelOption> {
    ModelChoice::ALL.into_iter().map(ModelOption::from).collect()
}

// ============================================================================
// Temperature
// ============================================================================

/// Sampling temperature, always inside `[0.0, 1.0]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Temperature(f64);

impl Temperature {
    pub fn new(value: f64) -> Result<Self, TemperatureError> {
        if value.is_nan() || !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&value) {
            return Err(TemperatureError(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Temperature {
    fn default() -> Self {
        Self(DEFAULT_TEMPERATURE)
    }
}

impl TryFrom<f64> for Temperature {
    type Error = TemperatureError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Temperature::new(value)
    }
}

impl From<Temperature> for f64 {
    fn from(t: Temperature) -> Self {
        t.0
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("temperature {0} is outside the range 0.0..=1.0")]
pub struct TemperatureError(pub f64);

// ============================================================================
// Chat log
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One line of the chat log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub role: Role,
    pub text: String,
}

impl ChatEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}
