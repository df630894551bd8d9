//! Test utilities for vimtutor
//!
//! This module provides common test utilities including temporary directory
//! management, CLI fixtures, and assertion helpers.

use crate::cli::Cli;
use crate::error::Result;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// # Returns
///
/// Returns a TempDir that will be cleaned up when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Write a configuration file into `dir` and return its path
///
/// # Panics
///
/// Panics if writing the file fails
pub fn create_config_file(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, contents).expect("Failed to write config file");
    path
}

/// Assert that an error contains the expected message
///
/// # Arguments
///
/// * `result` - Result to check
/// * `expected` - Expected error message substring
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// CLI arguments with no overrides
pub fn test_cli() -> Cli {
    Cli {
        config: None,
        verbose: false,
        api_key: None,
        model: None,
        history_size: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VimTutorError;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_create_config_file() {
        let dir = temp_dir();
        let path = create_config_file(&dir, "history:\n  capacity: 3\n");
        assert!(path.exists());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("capacity: 3"));
    }

    #[test]
    fn test_assert_error_contains_success() {
        let result: Result<()> =
            Err(VimTutorError::Config("test error message".to_string()).into());
        assert_error_contains(result, "test error");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        assert_error_contains(Ok(()), "error");
    }

    #[test]
    #[should_panic(expected = "does not contain")]
    fn test_assert_error_contains_wrong_message() {
        let result: Result<()> = Err(VimTutorError::Config("different error".to_string()).into());
        assert_error_contains(result, "not present");
    }

    #[test]
    fn test_test_cli_has_no_overrides() {
        let cli = test_cli();
        assert!(cli.model.is_none());
        assert!(cli.history_size.is_none());
        assert!(cli.api_key.is_none());
    }
}
