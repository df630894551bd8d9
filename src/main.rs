//! vimtutor - ask a language model how to do things in Vim
//!
#![doc = "vimtutor - command-line Vim tutor"]
#![doc = "Main entry point for the vimtutor application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vimtutor::cli::Cli;
use vimtutor::commands;
use vimtutor::config::Config;
use vimtutor::credentials::resolve_api_key;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // The key must be known before any provider is built
    let api_key = resolve_api_key(cli.api_key.as_deref(), &config.provider.gemini.api_key_env)?;

    tracing::info!("Starting tutor with model {}", config.provider.gemini.model);
    commands::chat::run_chat(config, api_key).await?;
    Ok(())
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so they never interleave with answers on stdout.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "vimtutor=debug"
    } else {
        "vimtutor=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
