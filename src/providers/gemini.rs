//! Gemini provider implementation for vimtutor
//!
//! This module implements the Provider trait for Google's Gemini
//! `generateContent` REST endpoint. The whole conversation is sent with
//! every request together with the configured system instruction.

use crate::config::GeminiConfig;
use crate::error::{Result, VimTutorError};
use crate::providers::{CompletionResponse, Message, Provider, TokenUsage};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gemini API provider
///
/// # Examples
///
/// ```no_run
/// use vimtutor::config::GeminiConfig;
/// use vimtutor::providers::{GeminiProvider, Message, Provider};
///
/// # async fn example() -> vimtutor::error::Result<()> {
/// let provider = GeminiProvider::new(GeminiConfig::default(), "my-api-key")?;
/// let completion = provider.complete(&[Message::user("How do I undo?")]).await?;
/// println!("{}", completion.text);
/// # Ok(())
/// # }
/// ```
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
    api_key: String,
}

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: GeminiContent,
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

/// Content block (a turn, or the system instruction)
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

/// A content part; only text parts carry `text`
#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

/// Response body from `generateContent`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Token accounting; every field may be absent
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: Option<u64>,
    #[serde(default)]
    candidates_token_count: Option<u64>,
}

/// Error envelope returned by the API on non-success status codes
#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider instance
    ///
    /// # Arguments
    ///
    /// * `config` - Gemini configuration (model, endpoint, timeout)
    /// * `api_key` - Resolved API key
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    ///
    /// # Examples
    ///
    /// ```
    /// use vimtutor::config::GeminiConfig;
    /// use vimtutor::providers::{GeminiProvider, Provider};
    ///
    /// let provider = GeminiProvider::new(GeminiConfig::default(), "key").unwrap();
    /// assert_eq!(provider.model(), "gemini-2.0-flash");
    /// ```
    pub fn new(config: GeminiConfig, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("vimtutor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| VimTutorError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized Gemini provider: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self {
            client,
            config,
            api_key: api_key.into(),
        })
    }

    /// Full URL of the generate endpoint for the configured model
    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Build the request body for a conversation
    fn build_request(&self, messages: &[Message]) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: Some(self.config.system_instruction().to_string()),
                }],
            },
            contents: messages
                .iter()
                .map(|m| GeminiContent {
                    role: Some(m.role.clone()),
                    parts: vec![GeminiPart {
                        text: Some(m.content.clone()),
                    }],
                })
                .collect(),
            generation_config: GenerationConfig {
                response_mime_type: self.config.response_mime_type.clone(),
            },
        }
    }
}

/// Turn a decoded response into text plus usage
///
/// Only the first candidate is used. Its text parts are concatenated in
/// order; parts without text (inline data, function calls) are skipped.
fn extract_completion(response: GenerateContentResponse) -> Result<CompletionResponse> {
    let usage = match &response.usage_metadata {
        Some(metadata) => {
            TokenUsage::from_counts(metadata.prompt_token_count, metadata.candidates_token_count)
        }
        None => TokenUsage::default(),
    };

    let candidate = response.candidates.into_iter().next().ok_or_else(|| {
        VimTutorError::Provider("Gemini response contained no candidates".to_string())
    })?;

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        tracing::warn!(
            "Gemini returned a candidate without text (finish_reason={:?})",
            candidate.finish_reason
        );
    }

    Ok(CompletionResponse::new(text, usage))
}

/// Map a non-success HTTP status and body to an error
fn status_error(status: StatusCode, body: &str) -> VimTutorError {
    let detail = match serde_json::from_str::<GeminiErrorResponse>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => {
            if envelope.error.status.is_empty() {
                envelope.error.message
            } else {
                format!("{}: {}", envelope.error.status, envelope.error.message)
            }
        }
        _ => body.to_string(),
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => VimTutorError::Authentication(format!(
            "Gemini rejected the API key ({}): {}",
            status, detail
        )),
        _ => VimTutorError::Provider(format!("Gemini returned error {}: {}", status, detail)),
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse> {
        let request = self.build_request(messages);

        tracing::debug!(
            "Sending Gemini request: model={}, {} turns",
            self.config.model,
            request.contents.len()
        );

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {}", e);
                VimTutorError::Provider(format!("Gemini request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini returned error {}: {}", status, error_text);
            return Err(status_error(status, &error_text).into());
        }

        let decoded: GenerateContentResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            VimTutorError::Provider(format!("Failed to parse Gemini response: {}", e))
        })?;

        let completion = extract_completion(decoded)?;

        tracing::debug!(
            "Gemini response: prompt_tokens={}, response_tokens={}",
            completion.usage.prompt_tokens,
            completion.usage.response_tokens
        );

        Ok(completion)
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }
}
