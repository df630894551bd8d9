//! API key resolution
//!
//! The key comes from the command line first and the environment second.
//! Blank values are treated as absent so an exported-but-empty variable
//! does not mask a missing key.

use crate::error::{Result, VimTutorError};

/// Resolve the provider API key
///
/// # Arguments
///
/// * `flag_value` - Value passed with `--api-key`, if any
/// * `env_var` - Name of the environment variable to fall back to
///
/// # Errors
///
/// Returns `VimTutorError::MissingCredentials` when neither source
/// yields a non-empty key.
///
/// # Examples
///
/// ```
/// use vimtutor::credentials::resolve_api_key;
///
/// let key = resolve_api_key(Some("from-flag"), "VIMTUTOR_DOC_UNSET_KEY").unwrap();
/// assert_eq!(key, "from-flag");
/// ```
pub fn resolve_api_key(flag_value: Option<&str>, env_var: &str) -> Result<String> {
    if let Some(key) = flag_value.map(str::trim).filter(|k| !k.is_empty()) {
        tracing::debug!("Using API key from command line");
        return Ok(key.to_string());
    }

    match std::env::var(env_var) {
        Ok(key) if !key.trim().is_empty() => {
            tracing::debug!("Using API key from {}", env_var);
            Ok(key.trim().to_string())
        }
        _ => Err(VimTutorError::MissingCredentials(format!(
            "please provide an API key with --api-key or the {} environment variable",
            env_var
        ))
        .into()),
    }
}
