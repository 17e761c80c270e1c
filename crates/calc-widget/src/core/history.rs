//! Completed calculations, newest shown first

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::bounded::BoundedStack;

/// One `=` press: what was typed and what it evaluated to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Buffer text as typed, untrimmed
    pub expression: String,
    /// Unformatted value
    pub result: f64,
}

impl HistoryEntry {
    /// Pairs an expression with its value
    #[must_use]
    pub fn new(expression: impl Into<String>, result: f64) -> Self {
        Self {
            expression: expression.into(),
            result,
        }
    }
}

/// `expression = result` with the raw value, one line per entry
impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.expression.trim_end(), self.result)
    }
}

/// Bounded calculation log
///
/// Indices count from the oldest surviving entry and are what rendered rows
/// carry as `data-idx`. Eviction shifts them, so rows are re-rendered on
/// every push.
#[derive(Debug, Clone)]
pub struct History {
    log: BoundedStack<HistoryEntry>,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_ENTRIES)
    }
}

impl History {
    /// Entries kept when no capacity is configured
    pub const DEFAULT_MAX_ENTRIES: usize = 200;

    /// Empty log with the default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty log holding at most `max_entries`
    #[must_use]
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            log: BoundedStack::new(max_entries),
        }
    }

    /// Appends a calculation; returns the evicted oldest entry when full
    pub fn record(&mut self, expression: impl Into<String>, result: f64) -> Option<HistoryEntry> {
        self.log.push(HistoryEntry::new(expression, result))
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// True before the first `=` or after a clear
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Maximum number of entries
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.log.capacity()
    }

    /// Drops every entry
    pub fn clear(&mut self) {
        self.log.clear();
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.log.iter()
    }

    /// `(data-idx, entry)` pairs, newest first
    pub fn iter_display(&self) -> impl Iterator<Item = (usize, &HistoryEntry)> {
        self.log.iter().enumerate().rev()
    }

    /// Newest entry
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.log.top()
    }

    /// Entry by insertion index, 0 being the oldest survivor
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.log.get(index)
    }

    /// JSON array of `{expression, result}`, oldest first
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let entries: Vec<&HistoryEntry> = self.iter().collect();
        serde_json::to_string(&entries)
    }

    /// Reads a JSON array back, keeping the newest `max_entries`
    pub fn from_json(json: &str, max_entries: usize) -> Result<Self, serde_json::Error> {
        let entries: Vec<HistoryEntry> = serde_json::from_str(json)?;
        let skip = entries.len().saturating_sub(max_entries.max(1));
        let mut history = Self::with_capacity(max_entries);
        for entry in entries.into_iter().skip(skip) {
            history.log.push(entry);
        }
        Ok(history)
    }

    /// Plain text, one entry per line, oldest first
    #[must_use]
    pub fn export_formatted(&self) -> String {
        let mut text = String::new();
        for (n, entry) in self.iter().enumerate() {
            if n > 0 {
                text.push('\n');
            }
            text.push_str(&entry.to_string());
        }
        text
    }
}
