use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Key looked up in the secrets file, named after the environment variable
pub const SECRET_KEY_NAME: &str = "OPENAI_API_KEY";

/// Runtime configuration assembled from the command line and environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub api_url: String,
    pub secrets_file: PathBuf,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            bind_addr: cli.bind,
            api_url: cli.api_url.clone(),
            secrets_file: cli.secrets_file.clone(),
        }
    }
}

/// Deployment-time fallback for the credential.
///
/// Read once at startup; sessions only ever read it.
#[derive(Debug, Clone, Default)]
pub struct SecretStore {
    openai_api_key: Option<String>,
}

impl SecretStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            openai_api_key: Some(key.into()),
        }
    }

    /// Load the fallback key.
    ///
    /// The secrets file wins when it defines a non-empty `OPENAI_API_KEY`;
    /// otherwise `env_key` (the `OPENAI_API_KEY` variable, possibly from
    /// `.env`) is used. A missing file is not an error.
    pub fn load(secrets_file: &Path, env_key: Option<String>) -> Result<Self> {
        let from_file = if secrets_file.exists() {
            read_secrets_file(secrets_file)?
        } else {
            debug!("No secrets file at {}", secrets_file.display());
            None
        };

        let openai_api_key = from_file
            .filter(|k| !k.is_empty())
            .or_else(|| env_key.filter(|k| !k.is_empty()));

        if openai_api_key.is_some() {
            info!("Fallback API key configured");
        }

        Ok(Self { openai_api_key })
    }

    /// The fallback credential, if a non-empty one is configured
    pub fn fallback_credential(&self) -> Option<&str> {
        self.openai_api_key.as_deref().filter(|k| !k.is_empty())
    }
}

fn read_secrets_file(path: &Path) -> Result<Option<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read secrets file {}", path.display()))?;
    let table: toml::Table = toml::from_str(&content)
        .with_context(|| format!("Failed to parse secrets file {}", path.display()))?;

    match table.get(SECRET_KEY_NAME) {
        None => Ok(None),
        Some(toml::Value::String(key)) => Ok(Some(key.clone())),
        Some(other) => anyhow::bail!(
            "{} in {} must be a string, found {}",
            SECRET_KEY_NAME,
            path.display(),
            other.type_str()
        ),
    }
}
