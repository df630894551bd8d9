use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use serde_json::{json, Value};
use vimtutor::config::GeminiConfig;

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Gemini settings pointing at a mock server
#[allow(dead_code)]
pub fn gemini_config(api_base: &str) -> GeminiConfig {
    GeminiConfig {
        api_base: api_base.to_string(),
        timeout_seconds: 5,
        ..GeminiConfig::default()
    }
}

/// A successful `generateContent` body with one text candidate
#[allow(dead_code)]
pub fn generate_body(text: &str, prompt_tokens: u64, response_tokens: u64) -> Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": text }]
            },
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": prompt_tokens,
            "candidatesTokenCount": response_tokens,
            "totalTokenCount": prompt_tokens + response_tokens
        }
    })
}
