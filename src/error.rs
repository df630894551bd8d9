//! Error types for vimtutor
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for vimtutor operations
///
/// Covers configuration loading, credential resolution, provider
/// interactions, and the interactive line editor.
#[derive(Error, Debug)]
pub enum VimTutorError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (transport failures, bad responses, quota)
    #[error("Provider error: {0}")]
    Provider(String),

    /// No API key was supplied by flag or environment
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Authentication errors (e.g., 401 Unauthorized, 403 Forbidden)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Line editor errors
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Result type alias for vimtutor operations
///
/// Uses `anyhow::Error` so callers get context chains; the typed
/// `VimTutorError` stays reachable through `downcast_ref`.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = VimTutorError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_provider_error_display() {
        let error = VimTutorError::Provider("API timeout".to_string());
        assert_eq!(error.to_string(), "Provider error: API timeout");
    }

    #[test]
    fn test_missing_credentials_error_display() {
        let error = VimTutorError::MissingCredentials("GOOGLE_API_KEY".to_string());
        assert_eq!(error.to_string(), "Missing credentials: GOOGLE_API_KEY");
    }

    #[test]
    fn test_authentication_error_display() {
        let error = VimTutorError::Authentication("API key not valid".to_string());
        assert_eq!(error.to_string(), "Authentication error: API key not valid");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: VimTutorError = io_error.into();
        assert!(matches!(error, VimTutorError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let error: VimTutorError = json_error.into();
        assert!(matches!(error, VimTutorError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: VimTutorError = yaml_error.into();
        assert!(matches!(error, VimTutorError::Yaml(_)));
    }

    #[test]
    fn test_readline_error_conversion() {
        let error: VimTutorError = rustyline::error::ReadlineError::Interrupted.into();
        assert!(matches!(error, VimTutorError::Readline(_)));
    }

    #[test]
    fn test_error_downcast_through_anyhow() {
        let result: Result<()> = Err(VimTutorError::Provider("boom".to_string()).into());
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VimTutorError>(),
            Some(VimTutorError::Provider(_))
        ));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VimTutorError>();
    }
}
