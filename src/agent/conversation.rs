//! Conversation context sent to the provider
//!
//! The hosted chat remembers every turn, so the whole conversation goes out
//! with each request. This is independent of the display history, which is
//! capped; the conversation is not.

use crate::providers::Message;

/// Accumulated user/model turns of one session
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Creates an empty conversation
    ///
    /// # Examples
    ///
    /// ```
    /// use vimtutor::agent::Conversation;
    ///
    /// let conversation = Conversation::new();
    /// assert!(conversation.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages to send for a new prompt, without recording it
    ///
    /// The pending user turn is appended to a copy so a failed request
    /// leaves the conversation untouched.
    pub fn with_pending_prompt(&self, prompt: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.messages.len() + 1);
        messages.extend(self.messages.iter().cloned());
        messages.push(Message::user(prompt));
        messages
    }

    /// Record a completed exchange as a user turn followed by a model turn
    ///
    /// # Examples
    ///
    /// ```
    /// use vimtutor::agent::Conversation;
    ///
    /// let mut conversation = Conversation::new();
    /// conversation.record_exchange("undo?", "Press `u`.");
    /// assert_eq!(conversation.len(), 2);
    /// assert_eq!(conversation.turn_count(), 1);
    /// ```
    pub fn record_exchange(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.messages.push(Message::user(prompt));
        self.messages.push(Message::model(response));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of completed user/model exchanges
    pub fn turn_count(&self) -> usize {
        self.messages.len() / 2
    }
}
