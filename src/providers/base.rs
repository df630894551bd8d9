//! Base provider trait and common types for vimtutor
//!
//! This module defines the Provider trait that model backends implement,
//! along with the conversation message and token accounting types shared
//! by the session and the providers.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Role of the user in a conversation turn
pub const ROLE_USER: &str = "user";

/// Role of the model in a conversation turn
pub const ROLE_MODEL: &str = "model";

/// Message structure for conversation
///
/// A single turn of the conversation sent back to the provider as context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender (user, model)
    pub role: String,
    /// Text content of the turn
    pub content: String,
}

impl Message {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use vimtutor::providers::Message;
    ///
    /// let msg = Message::user("How do I delete a line?");
    /// assert_eq!(msg.role, "user");
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ROLE_USER.to_string(),
            content: content.into(),
        }
    }

    /// Creates a new model message
    ///
    /// # Examples
    ///
    /// ```
    /// use vimtutor::providers::Message;
    ///
    /// let msg = Message::model("Use `dd`.");
    /// assert_eq!(msg.role, "model");
    /// ```
    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: ROLE_MODEL.to_string(),
            content: content.into(),
        }
    }
}

/// Token usage information from a completion
///
/// Tracks the number of tokens used by the prompt and by the response,
/// as reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt (including conversation context)
    pub prompt_tokens: u64,
    /// Number of tokens in the response
    pub response_tokens: u64,
}

impl TokenUsage {
    /// Create a new TokenUsage instance
    ///
    /// # Examples
    ///
    /// ```
    /// use vimtutor::providers::TokenUsage;
    ///
    /// let usage = TokenUsage::new(100, 50);
    /// assert_eq!(usage.total_tokens(), 150);
    /// ```
    pub fn new(prompt_tokens: u64, response_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            response_tokens,
        }
    }

    /// Build usage from optionally reported counts
    ///
    /// Providers may omit the usage block entirely or leave out single
    /// fields. Every missing count is coerced to zero here, once, rather
    /// than at each arithmetic site.
    ///
    /// # Examples
    ///
    /// ```
    /// use vimtutor::providers::TokenUsage;
    ///
    /// let usage = TokenUsage::from_counts(Some(12), None);
    /// assert_eq!(usage, TokenUsage::new(12, 0));
    /// ```
    pub fn from_counts(prompt_tokens: Option<u64>, response_tokens: Option<u64>) -> Self {
        Self::new(prompt_tokens.unwrap_or(0), response_tokens.unwrap_or(0))
    }

    /// Sum of prompt and response tokens
    pub fn total_tokens(&self) -> u64 {
        self.prompt_tokens + self.response_tokens
    }
}

/// Completion response with text and token usage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    /// Concatenated text of the response
    pub text: String,
    /// Token usage (zeros when the provider reported none)
    pub usage: TokenUsage,
}

impl CompletionResponse {
    /// Create a new CompletionResponse
    ///
    /// # Examples
    ///
    /// ```
    /// use vimtutor::providers::{CompletionResponse, TokenUsage};
    ///
    /// let response = CompletionResponse::new("Press `u` to undo.", TokenUsage::new(8, 5));
    /// assert_eq!(response.usage.response_tokens, 5);
    /// ```
    pub fn new(text: impl Into<String>, usage: TokenUsage) -> Self {
        Self {
            text: text.into(),
            usage,
        }
    }
}

/// Provider trait for model backends
///
/// # Examples
///
/// ```no_run
/// use vimtutor::providers::{CompletionResponse, Message, Provider, TokenUsage};
/// use vimtutor::error::Result;
/// use async_trait::async_trait;
///
/// struct EchoProvider;
///
/// #[async_trait]
/// impl Provider for EchoProvider {
///     async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse> {
///         let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
///         Ok(CompletionResponse::new(last, TokenUsage::default()))
///     }
///
///     fn model(&self) -> String {
///         "echo".to_string()
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Completes a conversation
    ///
    /// # Arguments
    ///
    /// * `messages` - Conversation so far, ending with the new user turn
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails or the response is unusable.
    /// Implementations must not retry.
    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse>;

    /// Identifier of the model this provider talks to
    fn model(&self) -> String;
}
