//! Configuration management for vimtutor
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, VimTutorError};
use crate::prompts;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest history capacity accepted by validation
const MAX_HISTORY_CAPACITY: usize = 1000;

/// Main configuration structure for vimtutor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Session history settings
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Provider configuration
///
/// Specifies which AI provider to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use
    #[serde(rename = "type", default = "default_provider_type")]
    pub provider_type: String,

    /// Gemini configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
}

fn default_provider_type() -> String {
    "gemini".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            gemini: GeminiConfig::default(),
        }
    }
}

/// Gemini provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model to use for generation
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API base URL (overridable so tests can point at a mock server)
    #[serde(default = "default_gemini_api_base")]
    pub api_base: String,

    /// Environment variable consulted for the API key when no flag is given
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// HTTP timeout for a single generate call (seconds)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Desired output mime type
    #[serde(default = "default_response_mime_type")]
    pub response_mime_type: String,

    /// Optional replacement for the built-in tutor instruction
    #[serde(default)]
    pub system_instruction: Option<String>,
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_api_key_env() -> String {
    "GOOGLE_API_KEY".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_response_mime_type() -> String {
    "text/plain".to_string()
}

impl GeminiConfig {
    /// System instruction sent with every request
    ///
    /// Falls back to the built-in Vim tutor instruction when the
    /// configuration does not provide one.
    ///
    /// # Examples
    ///
    /// ```
    /// use vimtutor::config::GeminiConfig;
    ///
    /// let config = GeminiConfig::default();
    /// assert!(config.system_instruction().contains("vim"));
    /// ```
    pub fn system_instruction(&self) -> &str {
        self.system_instruction
            .as_deref()
            .unwrap_or(prompts::VIM_TUTOR_INSTRUCTION)
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            api_base: default_gemini_api_base(),
            api_key_env: default_api_key_env(),
            timeout_seconds: default_timeout(),
            response_mime_type: default_response_mime_type(),
            system_instruction: None,
        }
    }
}

/// History configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of exchanges kept for review
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

fn default_history_capacity() -> usize {
    20
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_history_capacity(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| VimTutorError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| VimTutorError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(provider_type) = std::env::var("VIMTUTOR_PROVIDER") {
            self.provider.provider_type = provider_type;
        }

        if let Ok(model) = std::env::var("VIMTUTOR_MODEL") {
            self.provider.gemini.model = model;
        }

        if let Ok(api_base) = std::env::var("VIMTUTOR_API_BASE") {
            self.provider.gemini.api_base = api_base;
        }

        if let Ok(timeout) = std::env::var("VIMTUTOR_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.provider.gemini.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid VIMTUTOR_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(capacity) = std::env::var("VIMTUTOR_HISTORY_CAPACITY") {
            if let Ok(value) = capacity.parse() {
                self.history.capacity = value;
            } else {
                tracing::warn!("Invalid VIMTUTOR_HISTORY_CAPACITY: {}", capacity);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let Some(model) = &cli.model {
            tracing::debug!("Using model override from CLI: {}", model);
            self.provider.gemini.model = model.clone();
        }

        if let Some(size) = cli.history_size {
            self.history.capacity = size;
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.provider.provider_type.is_empty() {
            return Err(VimTutorError::Config("Provider type cannot be empty".to_string()).into());
        }

        let valid_providers = ["gemini"];
        if !valid_providers.contains(&self.provider.provider_type.as_str()) {
            return Err(VimTutorError::Config(format!(
                "Invalid provider type: {}. Must be one of: {}",
                self.provider.provider_type,
                valid_providers.join(", ")
            ))
            .into());
        }

        if self.provider.gemini.model.trim().is_empty() {
            return Err(VimTutorError::Config("gemini.model cannot be empty".to_string()).into());
        }

        if self.provider.gemini.timeout_seconds == 0 {
            return Err(VimTutorError::Config(
                "gemini.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.provider.gemini.response_mime_type.trim().is_empty() {
            return Err(VimTutorError::Config(
                "gemini.response_mime_type cannot be empty".to_string(),
            )
            .into());
        }

        if self.history.capacity == 0 {
            return Err(VimTutorError::Config(
                "history.capacity must be greater than 0".to_string(),
            )
            .into());
        }

        if self.history.capacity > MAX_HISTORY_CAPACITY {
            return Err(VimTutorError::Config(format!(
                "history.capacity must be less than or equal to {}",
                MAX_HISTORY_CAPACITY
            ))
            .into());
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}
