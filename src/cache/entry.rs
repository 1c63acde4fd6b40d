//! Cache Entry Module
//!
//! Defines a stored value together with its expiry time and view counter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Cache Entry ==
/// A single stored value with optional expiry and a read counter.
///
/// Entries live behind an `Arc` inside the store. The only field mutated after
/// construction is `views`, which readers bump while holding the table's
/// shared lock, so it is atomic.
#[derive(Debug)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Absolute expiry time, None = never expires
    pub expires_at: Option<DateTime<Utc>>,
    /// Number of successful, non-expired reads
    views: AtomicU64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry expiring `ttl` from now.
    ///
    /// A zero `ttl` means the entry never expires. A `ttl` too large to be
    /// represented as a timestamp is treated the same way.
    pub fn new(value: String, ttl: Duration) -> Self {
        let expires_at = if ttl.is_zero() {
            None
        } else {
            chrono::Duration::from_std(ttl)
                .ok()
                .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        };

        Self::with_expiry(value, expires_at)
    }

    /// Creates a new entry with an explicit expiry timestamp.
    pub fn with_expiry(value: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            value,
            expires_at,
            views: AtomicU64::new(0),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired relative to the current time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Checks if the entry has expired relative to `now`.
    ///
    /// An entry is expired once `now` is strictly after its expiry time.
    /// Entries without an expiry never expire.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires) => now > expires,
            None => false,
        }
    }

    // == Views ==
    /// Returns the current view count.
    pub fn views(&self) -> u64 {
        self.views.load(Ordering::Relaxed)
    }

    /// Records one successful read and returns the new count.
    pub fn record_view(&self) -> u64 {
        self.views.fetch_add(1, Ordering::Relaxed) + 1
    }

    // == Snapshot ==
    /// Copies the entry into a plain-data value detached from the store.
    pub fn snapshot(&self) -> EntrySnapshot {
        EntrySnapshot {
            value: self.value.clone(),
            expires_at: self.expires_at,
            views: self.views(),
        }
    }
}

// == Entry Snapshot ==
/// Point-in-time copy of an entry, as returned by `Store::full_list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySnapshot {
    /// The stored value
    pub value: String,
    /// Absolute expiry time, None = never expires
    pub expires_at: Option<DateTime<Utc>>,
    /// View count at the time of the snapshot
    pub views: u64,
}
