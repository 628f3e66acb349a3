use llmstarter_types::ModelChoice;

pub mod factory;
pub use factory::ClientFactory;

/// Default OpenAI API base
pub const OPENAI_API_URL: &str = "https://api.openai.com";

/// Path of the Responses endpoint below the API base
pub const RESPONSES_PATH: &str = "/v1/responses";

/// Provider behind a model menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    OpenAI,
    Anthropic,
    Google,
}

impl BackendType {
    pub fn for_model(model: ModelChoice) -> Self {
        match model {
            ModelChoice::Gpt4o => Self::OpenAI,
            ModelChoice::Claude37 => Self::Anthropic,
            ModelChoice::Gemini25Pro => Self::Google,
        }
    }
}

/// Normalize an API URL so it points at the Responses endpoint
pub fn normalize_api_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');

    // Already a full endpoint
    if url.ends_with("/responses") {
        return url.to_string();
    }

    if url.ends_with("/v1") {
        format!("{}/responses", url)
    } else {
        format!("{}{}", url, RESPONSES_PATH)
    }
}
