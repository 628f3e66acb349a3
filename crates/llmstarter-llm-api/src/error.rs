use reqwest::StatusCode;

/// Everything that can go wrong between the chat panel and a completion backend
#[derive(Debug, thiserror::Error)]
pub enum LlmApiError {
    /// No credential in the session and no fallback configured
    #[error("no API key configured: enter one in the API Key tab or set OPENAI_API_KEY")]
    MissingCredential,

    /// The menu entry has no backend behind it yet
    #[error("{model} is a placeholder and is not implemented yet")]
    ProviderNotWired { model: String },

    #[error("request to completion service failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx answer from the service
    #[error("completion service returned {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("could not decode completion response: {0}")]
    Decode(#[from] serde_json::Error),
}
