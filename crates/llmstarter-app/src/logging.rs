use env_logger::Env;
use log::LevelFilter;

/// Install the global logger.
///
/// `RUST_LOG` overrides the default filter; `verbose` lowers the default for
/// our own crates to `debug` so masked request traces show up.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "info,llmstarter=debug,llmstarter_llm_api=debug"
    } else {
        "info"
    };

    // A second init (tests, embedding) keeps the first logger.
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .filter_module("hyper", LevelFilter::Warn)
        .format_timestamp_millis()
        .try_init();
}
