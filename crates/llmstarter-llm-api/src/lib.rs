//! # llmstarter-llm-api
//!
//! Completion clients for the chat panel.
//!
//! - **`CompletionClient`**: one request in, generated text out
//! - **`ClientProvider`**: picks the client for a menu entry; placeholder
//!   entries resolve to [`LlmApiError::ProviderNotWired`]
//! - **`OpenAiResponsesClient`**: the only wired backend, speaking the
//!   OpenAI Responses API
//!
//! ## Example
//!
//! ```rust,no_run
//! use llmstarter_llm_api::{ClientFactory, ClientProvider, CompletionRequest};
//! use llmstarter_types::{ModelChoice, Temperature};
//!
//! # async fn run() -> Result<(), llmstarter_llm_api::LlmApiError> {
//! let factory = ClientFactory::new(llmstarter_llm_api::OPENAI_API_URL);
//! let client = factory.client_for(ModelChoice::Gpt4o)?;
//!
//! let request = CompletionRequest::new(
//!     ModelChoice::Gpt4o,
//!     "Hello!",
//!     Temperature::default(),
//!     Some("sk-...".to_string()),
//! );
//! let completion = client.complete(&request).await?;
//! println!("{}", completion.text);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod request_logger;


pub use client::{
    openai::OpenAiResponsesClient,
    ClientProvider,
    Completion,
    CompletionClient,
    CompletionRequest,
};

pub use config::{
    normalize_api_url,
    BackendType,
    ClientFactory,
    OPENAI_API_URL,
};

pub use error::LlmApiError;

pub use reqwest::StatusCode;
