use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use llmstarter::llm_api::ClientFactory;
use llmstarter::logging::init_logging;
use llmstarter::{AppConfig, Cli, SecretStore, WebServer, WebServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = AppConfig::from_cli(&cli);
    let secrets = SecretStore::load(&config.secrets_file, cli.openai_api_key.clone())?;

    let factory = ClientFactory::new(&config.api_url);
    log::info!("Completion endpoint: {}", factory.openai_endpoint());

    let server = WebServer::new(WebServerConfig {
        bind_addr: config.bind_addr,
        provider: Arc::new(factory),
        secrets,
    });

    server.start().await
}
