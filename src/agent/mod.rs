//! Agent module for vimtutor
//!
//! This module contains the tutor session, its bounded history of
//! exchanges, the conversation context sent to the provider and the
//! submission metrics.

pub mod conversation;
pub mod history;
pub mod metrics;
pub mod session;

pub use conversation::Conversation;
pub use history::{HistoryEntry, HistoryStore};
pub use session::Session;
