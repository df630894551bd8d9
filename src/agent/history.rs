//! Bounded log of completed exchanges
//!
//! Every successful prompt/response round trip becomes one immutable
//! [`HistoryEntry`]. The [`HistoryStore`] keeps them in insertion order and
//! drops the oldest ones when truncated.

use chrono::{DateTime, Utc};

/// A single completed exchange
///
/// Entries are immutable once created; fields are only reachable through
/// accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    prompt: String,
    response: String,
    prompt_tokens: u64,
    response_tokens: u64,
    timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Create an entry stamped with the current time
    ///
    /// # Examples
    ///
    /// ```
    /// use vimtutor::agent::HistoryEntry;
    ///
    /// let entry = HistoryEntry::new("undo?", "Press `u`.", 3, 4);
    /// assert_eq!(entry.prompt(), "undo?");
    /// assert_eq!(entry.response_tokens(), 4);
    /// ```
    pub fn new(
        prompt: impl Into<String>,
        response: impl Into<String>,
        prompt_tokens: u64,
        response_tokens: u64,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            response: response.into(),
            prompt_tokens,
            response_tokens,
            timestamp: Utc::now(),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn prompt_tokens(&self) -> u64 {
        self.prompt_tokens
    }

    pub fn response_tokens(&self) -> u64 {
        self.response_tokens
    }

    /// When the exchange completed
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Insertion-ordered log of exchanges
///
/// `add` never fails and may leave the store above any capacity; callers
/// bound it with `truncate`.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn add(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Drop the oldest entries so that at most `max_length` remain
    ///
    /// # Examples
    ///
    /// ```
    /// use vimtutor::agent::{HistoryEntry, HistoryStore};
    ///
    /// let mut store = HistoryStore::new();
    /// for prompt in ["a", "b", "c"] {
    ///     store.add(HistoryEntry::new(prompt, "", 0, 0));
    /// }
    /// store.truncate(2);
    /// let prompts: Vec<_> = store.entries().iter().map(|e| e.prompt()).collect();
    /// assert_eq!(prompts, vec!["b", "c"]);
    /// ```
    pub fn truncate(&mut self, max_length: usize) {
        if self.entries.len() > max_length {
            let excess = self.entries.len() - max_length;
            self.entries.drain(..excess);
            tracing::trace!("Evicted {} history entries", excess);
        }
    }

    /// Most recently added entry
    pub fn last_entry(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(prompts: &[&str]) -> HistoryStore {
        let mut store = HistoryStore::new();
        for prompt in prompts {
            store.add(HistoryEntry::new(*prompt, format!("re: {}", prompt), 1, 2));
        }
        store
    }

    fn prompts(store: &HistoryStore) -> Vec<&str> {
        store.entries().iter().map(|e| e.prompt()).collect()
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = HistoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.last_entry().is_none());
    }

    #[test]
    fn test_add_preserves_order() {
        let store = store_with(&["a", "b", "c"]);
        assert_eq!(prompts(&store), vec!["a", "b", "c"]);
        assert_eq!(store.last_entry().unwrap().prompt(), "c");
        assert_eq!(store.get(1).unwrap().response(), "re: b");
        assert!(store.get(3).is_none());
    }

    #[test]
    fn test_add_can_exceed_capacity_until_truncated() {
        let mut store = store_with(&["a", "b"]);
        store.add(HistoryEntry::new("c", "", 0, 0));
        assert_eq!(store.len(), 3);
        store.truncate(2);
        assert_eq!(prompts(&store), vec!["b", "c"]);
    }

    #[test]
    fn test_truncate_within_bound_is_noop() {
        let mut store = store_with(&["a", "b"]);
        store.truncate(2);
        assert_eq!(prompts(&store), vec!["a", "b"]);
        store.truncate(5);
        assert_eq!(prompts(&store), vec!["a", "b"]);
    }

    #[test]
    fn test_truncate_to_zero_empties_store() {
        let mut store = store_with(&["a", "b"]);
        store.truncate(0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_truncate_keeps_most_recent_entries_for_any_count() {
        for capacity in 1..=4 {
            for added in 0..=8 {
                let names: Vec<String> = (0..added).map(|i| i.to_string()).collect();
                let refs: Vec<&str> = names.iter().map(String::as_str).collect();
                let mut store = store_with(&refs);
                store.truncate(capacity);

                let keep = added.min(capacity);
                assert_eq!(store.len(), keep);
                assert_eq!(prompts(&store), refs[added - keep..].to_vec());
            }
        }
    }

    #[test]
    fn test_entries_get_their_own_timestamp() {
        let first = HistoryEntry::new("a", "", 0, 0);
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = HistoryEntry::new("b", "", 0, 0);
        assert!(second.timestamp() > first.timestamp());
    }

    #[test]
    fn test_entry_accessors() {
        let entry = HistoryEntry::new("p", "r", 7, 9);
        assert_eq!(entry.prompt(), "p");
        assert_eq!(entry.response(), "r");
        assert_eq!(entry.prompt_tokens(), 7);
        assert_eq!(entry.response_tokens(), 9);
    }
}
