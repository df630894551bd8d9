//! Command-line interface definition for vimtutor
//!
//! This module defines the CLI structure using clap's derive API.

use clap::Parser;

/// vimtutor - ask a language model how to do things in Vim
///
/// Starts an interactive session. Type a question to get Vim commands,
/// `p`/`n` to page through previous answers, `l` to show the latest
/// answer again and `q` to quit.
#[derive(Parser, Debug, Clone)]
#[command(name = "vimtutor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// API key for the model provider (falls back to the configured
    /// environment variable, GOOGLE_API_KEY by default)
    #[arg(short = 'a', long = "api-key", visible_alias = "api_key")]
    pub api_key: Option<String>,

    /// Override the configured model
    #[arg(short, long)]
    pub model: Option<String>,

    /// Override how many exchanges are kept for review
    #[arg(long)]
    pub history_size: Option<usize>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            api_key: None,
            model: None,
            history_size: None,
        }
    }
}
