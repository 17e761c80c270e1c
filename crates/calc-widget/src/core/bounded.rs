//! Fixed-capacity stack with oldest-first eviction

use std::collections::VecDeque;

/// A stack that never holds more than `capacity` items
///
/// Pushing onto a full stack evicts the oldest item (the bottom).
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedStack<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedStack<T> {
    /// Creates an empty stack holding at most `capacity` items
    ///
    /// A zero capacity is bumped to one so a push is always observable.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes an item, returning the evicted oldest item if the stack was full
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() >= self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    /// Removes and returns the newest item
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_back()
    }

    /// Returns the newest item
    #[must_use]
    pub fn top(&self) -> Option<&T> {
        self.items.back()
    }

    /// Returns the oldest item
    #[must_use]
    pub fn bottom(&self) -> Option<&T> {
        self.items.front()
    }

    /// Returns the item at `index` (0 = oldest)
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Number of items held
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is held
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum number of items
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops every item
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates oldest first
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &T> + DoubleEndedIterator {
        self.items.iter()
    }
}
