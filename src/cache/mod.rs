//! Cache Module
//!
//! Provides the concurrent in-memory store with TTL expiry, view counting
//! and a bounded stack of recently written keys.

mod entry;
mod recent;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{CacheEntry, EntrySnapshot};
pub use recent::RecentKeys;
pub use store::CacheStore;

// == Public Constants ==
/// Default number of recently written keys remembered by a store
pub const MAX_RECENT_KEYS: usize = 30;

/// Maximum allowed key length in bytes, enforced at the HTTP boundary
pub const MAX_KEY_LENGTH: usize = 256;
