//! Provider module for vimtutor
//!
//! This module contains the model provider abstraction and the Gemini
//! implementation.

pub mod base;
pub mod gemini;

pub use base::{CompletionResponse, Message, Provider, TokenUsage, ROLE_MODEL, ROLE_USER};
pub use gemini::GeminiProvider;

use crate::config::ProviderConfig;
use crate::error::{Result, VimTutorError};

/// Create a provider instance based on configuration
///
/// # Arguments
///
/// * `config` - Provider configuration
/// * `api_key` - Resolved API key for the provider
///
/// # Errors
///
/// Returns error if provider type is invalid or initialization fails
///
/// # Examples
///
/// ```
/// use vimtutor::config::ProviderConfig;
/// use vimtutor::providers::create_provider;
///
/// let provider = create_provider(&ProviderConfig::default(), "key").unwrap();
/// assert_eq!(provider.model(), "gemini-2.0-flash");
/// ```
pub fn create_provider(config: &ProviderConfig, api_key: &str) -> Result<Box<dyn Provider>> {
    match config.provider_type.as_str() {
        "gemini" => Ok(Box::new(GeminiProvider::new(
            config.gemini.clone(),
            api_key,
        )?)),
        other => Err(VimTutorError::Provider(format!("Unknown provider type: {}", other)).into()),
    }
}
