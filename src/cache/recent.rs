//! Recent Keys Module
//!
//! Bounded stack recording the keys of the most recent writes.

use std::collections::VecDeque;

use crate::cache::MAX_RECENT_KEYS;

// == Recent Keys ==
/// Bounded history of written keys, newest last.
///
/// Keys are stored in a VecDeque where:
/// - Front = Oldest write still remembered
/// - Back = Most recent write
///
/// This records write history, not live membership: a key may remain here
/// after its entry was deleted or expired. Repeated writes of one key are
/// recorded once per write.
///
/// The type does no locking of its own; the store guards it with a mutex.
#[derive(Debug)]
pub struct RecentKeys {
    /// Keys in write order
    keys: VecDeque<String>,
    /// Maximum number of keys kept
    capacity: usize,
}

impl Default for RecentKeys {
    fn default() -> Self {
        Self::new(MAX_RECENT_KEYS)
    }
}

impl RecentKeys {
    // == Constructor ==
    /// Creates an empty stack holding at most `capacity` keys (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            keys: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    // == Push ==
    /// Records a write of `key`, dropping the oldest key when full.
    pub fn push(&mut self, key: &str) {
        if self.keys.len() == self.capacity {
            self.keys.pop_front();
        }
        self.keys.push_back(key.to_string());
    }

    // == Pop ==
    /// Removes and returns the most recent key.
    pub fn pop(&mut self) -> Option<String> {
        self.keys.pop_back()
    }

    // == Top ==
    /// Returns the most recent key without removing it.
    pub fn top(&self) -> Option<&str> {
        self.keys.back().map(String::as_str)
    }

    // == Clear ==
    /// Forgets every remembered key.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Returns a copy of all keys, oldest first.
    pub fn keys(&self) -> Vec<String> {
        self.keys.iter().cloned().collect()
    }

    // == Length ==
    /// Returns the number of remembered keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if no keys are remembered.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the maximum number of keys kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
