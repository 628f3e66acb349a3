use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

use llmstarter_llm_api::OPENAI_API_URL;

/// Default listen address
pub const DEFAULT_BIND: &str = "127.0.0.1:8501";

/// Default location of the fallback secrets file
pub const DEFAULT_SECRETS_FILE: &str = ".llmstarter/secrets.toml";

/// CLI arguments for llmstarter
#[derive(Parser, Debug)]
#[command(name = "llmstarter")]
#[command(about = "LLM Starter - a tabbed browser chat front-end for hosted LLM APIs")]
#[command(version)]
pub struct Cli {
    /// Address the web server listens on
    #[arg(long, env = "LLMSTARTER_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Base URL (or full /v1/responses endpoint) of the OpenAI API
    #[arg(long, env = "LLMSTARTER_API_URL", default_value = OPENAI_API_URL)]
    pub api_url: String,

    /// TOML file providing a fallback OPENAI_API_KEY when none is entered in the UI
    #[arg(long, env = "LLMSTARTER_SECRETS", value_name = "PATH", default_value = DEFAULT_SECRETS_FILE)]
    pub secrets_file: PathBuf,

    /// Fallback API key used when neither the session nor the secrets file has one
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, value_name = "KEY")]
    pub openai_api_key: Option<String>,

    /// Show debug logs, including masked request traces
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "llmstarter",
            "--bind",
            "0.0.0.0:9000",
            "--api-url",
            "http://localhost:8080",
            "--secrets-file",
            "/tmp/secrets.toml",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.bind, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(cli.api_url, "http://localhost:8080");
        assert_eq!(cli.secrets_file, PathBuf::from("/tmp/secrets.toml"));
        assert!(cli.verbose);
    }
}
