//! Tutor session: submission, token accounting and history navigation
//!
//! A [`Session`] owns the provider, the conversation sent as context, the
//! bounded display history and a selection cursor over that history.
//!
//! # Cursor
//!
//! The cursor is `None` while the history is empty and `Some(i)` with
//! `i < history.len()` otherwise. Every successful submission moves it to
//! the newest entry; `select_previous` / `select_next` move it one step and
//! return `None` without moving when already at the boundary.
//!
//! # Failure atomicity
//!
//! State (counters, history, conversation, cursor) is only touched after the
//! provider call returns successfully. A failed call leaves the session
//! exactly as it was.
//!
//! An empty answer (e.g. a blocked candidate) is still shown in the history
//! but is not added to the conversation sent with later prompts.

use crate::agent::conversation::Conversation;
use crate::agent::history::{HistoryEntry, HistoryStore};
use crate::agent::metrics::SubmitMetrics;
use crate::config::HistoryConfig;
use crate::error::{Result, VimTutorError};
use crate::providers::Provider;

/// One conversation with the remote model
pub struct Session {
    provider: Box<dyn Provider>,
    model: String,
    conversation: Conversation,
    history: HistoryStore,
    capacity: usize,
    selected_index: Option<usize>,
    prompt_token_count: u64,
    response_token_count: u64,
    exchange_count: u64,
}

impl Session {
    /// Creates a new session
    ///
    /// # Arguments
    ///
    /// * `provider` - Provider used for every submission
    /// * `config` - History settings (capacity)
    ///
    /// # Errors
    ///
    /// Returns `VimTutorError::Config` if the history capacity is zero
    pub fn new(provider: impl Provider + 'static, config: HistoryConfig) -> Result<Self> {
        Self::new_boxed(Box::new(provider), config)
    }

    /// Creates a new session from a boxed provider
    ///
    /// Used with `create_provider`, which returns a trait object.
    pub fn new_boxed(provider: Box<dyn Provider>, config: HistoryConfig) -> Result<Self> {
        if config.capacity == 0 {
            return Err(VimTutorError::Config(
                "history capacity must be greater than 0".to_string(),
            )
            .into());
        }

        let model = provider.model();
        tracing::debug!(
            "Created session: model={}, history_capacity={}",
            model,
            config.capacity
        );

        Ok(Self {
            provider,
            model,
            conversation: Conversation::new(),
            history: HistoryStore::new(),
            capacity: config.capacity,
            selected_index: None,
            prompt_token_count: 0,
            response_token_count: 0,
            exchange_count: 0,
        })
    }

    /// Send a prompt and record the exchange
    ///
    /// The prompt goes out together with the accumulated conversation. On
    /// success the exchange is added to the history, the history is
    /// truncated to capacity and the cursor moves to the new entry.
    ///
    /// # Returns
    ///
    /// The index and entry of the new exchange
    ///
    /// # Errors
    ///
    /// Propagates the provider error unchanged; nothing is retried and the
    /// session state is not modified.
    pub async fn submit(&mut self, prompt: &str) -> Result<(usize, &HistoryEntry)> {
        let messages = self.conversation.with_pending_prompt(prompt);
        let metrics = SubmitMetrics::start(self.model.clone());

        tracing::info!(
            "Submitting prompt ({} chars, {} context turns)",
            prompt.len(),
            self.conversation.turn_count()
        );

        let completion = match self.provider.complete(&messages).await {
            Ok(completion) => completion,
            Err(e) => {
                tracing::warn!("Submission failed: {}", e);
                metrics.record_error();
                return Err(e);
            }
        };
        metrics.record_success(completion.usage);

        let usage = completion.usage;
        self.exchange_count += 1;
        self.prompt_token_count += usage.prompt_tokens;
        self.response_token_count += usage.response_tokens;

        // Blocked or text-less answers stay out of the model's context
        if completion.text.is_empty() {
            tracing::warn!("Empty response kept for display only");
        } else {
            self.conversation.record_exchange(prompt, completion.text.clone());
        }
        self.history.add(HistoryEntry::new(
            prompt,
            completion.text,
            usage.prompt_tokens,
            usage.response_tokens,
        ));
        self.history.truncate(self.capacity);

        let index = self.history.len() - 1;
        self.selected_index = Some(index);

        tracing::debug!(
            "Recorded exchange #{}: prompt_tokens={}, response_tokens={}, history_len={}",
            self.exchange_count,
            usage.prompt_tokens,
            usage.response_tokens,
            self.history.len()
        );

        Ok((index, &self.history.entries()[index]))
    }

    /// Model identifier of the provider
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Cumulative prompt plus response tokens
    pub fn total_token_count(&self) -> u64 {
        self.prompt_token_count + self.response_token_count
    }

    pub fn prompt_token_count(&self) -> u64 {
        self.prompt_token_count
    }

    pub fn response_token_count(&self) -> u64 {
        self.response_token_count
    }

    /// Number of successful submissions, including evicted ones
    pub fn exchange_count(&self) -> u64 {
        self.exchange_count
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Maximum number of entries kept in the history
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    /// Entry under the cursor, or `None` when the history is empty
    pub fn selected(&self) -> Option<(usize, &HistoryEntry)> {
        let index = self.selected_index?;
        self.history.get(index).map(|entry| (index, entry))
    }

    pub fn selected_prompt(&self) -> Option<&str> {
        self.selected().map(|(_, entry)| entry.prompt())
    }

    pub fn selected_response(&self) -> Option<&str> {
        self.selected().map(|(_, entry)| entry.response())
    }

    pub fn last_entry(&self) -> Option<&HistoryEntry> {
        self.history.last_entry()
    }

    pub fn last_prompt(&self) -> Option<&str> {
        self.history.last_entry().map(HistoryEntry::prompt)
    }

    pub fn last_response(&self) -> Option<&str> {
        self.history.last_entry().map(HistoryEntry::response)
    }

    /// Move the cursor one entry towards the oldest
    ///
    /// Returns `None` and leaves the cursor in place when it already points
    /// at the oldest entry or the history is empty.
    pub fn select_previous(&mut self) -> Option<(usize, &HistoryEntry)> {
        match self.selected_index {
            Some(index) if index > 0 => {
                self.selected_index = Some(index - 1);
                self.selected()
            }
            _ => None,
        }
    }

    /// Move the cursor one entry towards the newest
    ///
    /// Returns `None` and leaves the cursor in place when it already points
    /// at the newest entry or the history is empty.
    pub fn select_next(&mut self) -> Option<(usize, &HistoryEntry)> {
        match self.selected_index {
            Some(index) if index + 1 < self.history.len() => {
                self.selected_index = Some(index + 1);
                self.selected()
            }
            _ => None,
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("model", &self.model)
            .field("history_len", &self.history.len())
            .field("capacity", &self.capacity)
            .field("selected_index", &self.selected_index)
            .field("prompt_token_count", &self.prompt_token_count)
            .field("response_token_count", &self.response_token_count)
            .field("exchange_count", &self.exchange_count)
            .finish()
    }
}
