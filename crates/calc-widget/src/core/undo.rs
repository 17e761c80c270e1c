//! Undo/replay snapshots of the input buffer

use crate::core::bounded::BoundedStack;

/// Snapshot stack behind the replay button
///
/// Consecutive identical snapshots are stored once.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoStack {
    snapshots: BoundedStack<String>,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoStack {
    /// Default maximum number of snapshots
    pub const DEFAULT_CAPACITY: usize = 120;

    /// Creates an empty stack with the default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates an empty stack with a custom capacity
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: BoundedStack::new(capacity),
        }
    }

    /// Records a snapshot unless it equals the current top
    ///
    /// Returns true when the snapshot was actually stored.
    pub fn push(&mut self, snapshot: &str) -> bool {
        if self.snapshots.top().is_some_and(|top| top == snapshot) {
            return false;
        }
        self.snapshots.push(snapshot.to_string());
        true
    }

    /// Removes and returns the newest snapshot
    pub fn pop(&mut self) -> Option<String> {
        self.snapshots.pop()
    }

    /// Returns the newest snapshot
    #[must_use]
    pub fn peek(&self) -> Option<&str> {
        self.snapshots.top().map(String::as_str)
    }

    /// Number of stored snapshots
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns true if there is nothing to replay
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Maximum number of snapshots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.snapshots.capacity()
    }

    /// Iterates snapshots oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.snapshots.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let undo = UndoStack::new();
        assert!(undo.is_empty());
        assert_eq!(undo.capacity(), UndoStack::DEFAULT_CAPACITY);
        assert_eq!(undo.capacity(), 120);
    }

    #[test]
    fn test_push_dedups_consecutive() {
        let mut undo = UndoStack::new();
        assert!(undo.push(""));
        assert!(!undo.push(""));
        assert!(undo.push("1"));
        assert!(undo.push(""));
        assert_eq!(undo.len(), 3);
    }

    #[test]
    fn test_pop_newest_first() {
        let mut undo = UndoStack::new();
        undo.push("");
        undo.push("1");
        assert_eq!(undo.peek(), Some("1"));
        assert_eq!(undo.pop().as_deref(), Some("1"));
        assert_eq!(undo.pop().as_deref(), Some(""));
        assert_eq!(undo.pop(), None);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut undo = UndoStack::new();
        for i in 0..130 {
            undo.push(&i.to_string());
        }
        assert_eq!(undo.len(), 120);
        assert_eq!(undo.iter().next(), Some("10"));
        assert_eq!(undo.peek(), Some("129"));
    }
}
