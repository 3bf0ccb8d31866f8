//! History Log
//!
//! Append-only record of (query, response) pairs for the life of a session.
//! Entries are never edited, pruned or deduplicated.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One recorded exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    query: String,
    response: String,
    recorded_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(query: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            response: response.into(),
            recorded_at: Utc::now(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn response(&self) -> &str {
        &self.response
    }
}

/// Ordered history, oldest first
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, query: impl Into<String>, response: impl Into<String>) {
        self.entries.push(HistoryEntry::new(query, response));
    }

    /// All entries in arrival order
    pub fn all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Markdown transcript used by the terminal display
    pub fn transcript(&self) -> String {
        let mut out = String::new();

        for entry in &self.entries {
            out.push_str(&format!(
                "**You:** {} ({})\n**Bot:**\n{}\n\n",
                entry.query,
                entry.recorded_at.format("%H:%M:%S"),
                entry.response
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut history = HistoryLog::new();
        history.append("q1", "r1");
        history.append("q2", "r2");

        let pairs: Vec<(&str, &str)> = history
            .all()
            .iter()
            .map(|e| (e.query(), e.response()))
            .collect();
        assert_eq!(pairs, vec![("q1", "r1"), ("q2", "r2")]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut history = HistoryLog::new();
        for _ in 0..3 {
            history.append("show me news", "- One");
        }
        assert_eq!(history.len(), 3);
        assert!(!history.is_empty());
    }

    #[test]
    fn test_transcript_lists_every_exchange() {
        let mut history = HistoryLog::new();
        assert_eq!(history.transcript(), "");

        history.append("weather in Pune", "🌞 Sunny");
        let transcript = history.transcript();
        assert!(transcript.starts_with("**You:** weather in Pune"));
        assert!(transcript.contains("**Bot:**\n🌞 Sunny"));
    }
}
