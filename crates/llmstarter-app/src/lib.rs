//! LLM Starter application library
//!
//! Session state, the chat panel, the tab shell and the web server that
//! exposes them.

pub use llmstarter_llm_api as llm_api;
pub use llmstarter_types as types;

pub mod chat;
pub mod cli;
pub mod config;
pub mod logging;
pub mod session;
pub mod shell;
pub mod web;

pub use chat::{ChatPanel, ChatView};
pub use cli::Cli;
pub use config::{AppConfig, SecretStore};
pub use session::SessionState;
pub use shell::{InputError, SessionView};
pub use web::{WebServer, WebServerConfig};
