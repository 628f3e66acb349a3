use anyhow::{Context, Result};
use axum::Router;
use colored::Colorize;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use llmstarter_llm_api::ClientProvider;

use crate::config::SecretStore;
use crate::web::{routes, session_manager::SessionManager};

/// Web server configuration
pub struct WebServerConfig {
    pub bind_addr: SocketAddr,
    pub provider: Arc<dyn ClientProvider>,
    pub secrets: SecretStore,
}

/// Web server instance
pub struct WebServer {
    bind_addr: SocketAddr,
    state: routes::AppState,
}

impl WebServer {
    /// Create a new web server
    pub fn new(config: WebServerConfig) -> Self {
        let state = routes::AppState {
            session_manager: Arc::new(SessionManager::new()),
            provider: config.provider,
            secrets: Arc::new(config.secrets),
        };

        Self {
            bind_addr: config.bind_addr,
            state,
        }
    }

    /// Router with all routes and layers, without binding a socket
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::create_router(self.state.clone()).layer(cors)
    }

    /// Start the web server
    pub async fn start(self) -> Result<()> {
        let app = self.router();

        let listener = tokio::net::TcpListener::bind(&self.bind_addr)
            .await
            .with_context(|| format!("Failed to bind {}", self.bind_addr))?;

        println!("{} http://{}", "🌐 LLM Starter running on".bright_green().bold(), self.bind_addr);
        println!("   WebSocket endpoint: ws://{}/ws/{{session_id}}", self.bind_addr);
        println!("   API endpoints: http://{}/api/sessions", self.bind_addr);
        info!("Listening on {}", self.bind_addr);

        axum::serve(listener, app).await.context("Web server failed")?;

        Ok(())
    }
}
