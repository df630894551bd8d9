//! vimtutor - a command-line Vim tutor backed by a hosted language model
//!
//! This library provides the pieces behind the `vimtutor` binary: a
//! session that submits questions to the model, keeps a bounded history of
//! the answers and tracks token usage, plus the provider, configuration and
//! interactive loop around it.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `agent`: Session, history store, conversation context and metrics
//! - `providers`: Provider abstraction and the Gemini implementation
//! - `commands`: Interactive read loop and command parsing
//! - `config`: Configuration management and validation
//! - `credentials`: API key resolution
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use vimtutor::{providers::GeminiProvider, Config, Session};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let provider = GeminiProvider::new(config.provider.gemini.clone(), "key".to_string())?;
//!     let mut session = Session::new(provider, config.history.clone())?;
//!     let (_, entry) = session.submit("how do I delete a line?").await?;
//!     println!("{}", entry.response());
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod prompts;
pub mod providers;

// Re-export commonly used types
pub use agent::{HistoryEntry, HistoryStore, Session};
pub use config::Config;
pub use error::{Result, VimTutorError};

#[cfg(test)]
pub mod test_utils;
