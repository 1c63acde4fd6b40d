//! Cache Store Module
//!
//! Main cache engine: a lock-guarded key/entry table with lazy and periodic
//! TTL expiry, plus an independently locked stack of recently written keys.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::cache::{CacheEntry, EntrySnapshot, RecentKeys, MAX_RECENT_KEYS};

type EntryTable = HashMap<String, Arc<CacheEntry>>;

// == Cache Store ==
/// Thread-safe in-memory store with TTL expiry and view counting.
///
/// Two locks own all state:
/// - `entries` (read/write) guards the key/entry table
/// - `recent` (exclusive) guards the recent-keys stack
///
/// No method holds both at once, and no method re-acquires a lock it already
/// holds. Share the store between threads or tasks with `Arc<CacheStore>`.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: RwLock<EntryTable>,
    /// Keys of the most recent writes
    recent: Mutex<RecentKeys>,
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store remembering the last `MAX_RECENT_KEYS` writes.
    pub fn new() -> Self {
        Self::with_recent_capacity(MAX_RECENT_KEYS)
    }

    /// Creates an empty store remembering the last `capacity` writes.
    pub fn with_recent_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            recent: Mutex::new(RecentKeys::new(capacity)),
        }
    }

    // == Set ==
    /// Stores a value under `key`, expiring after `ttl`.
    ///
    /// A zero `ttl` stores the value without expiry. Overwriting a key
    /// replaces the value and expiry and resets its view count to zero.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>, ttl: Duration) {
        let key = key.into();
        let entry = Arc::new(CacheEntry::new(value.into(), ttl));

        self.entries.write().insert(key.clone(), entry);
        self.recent.lock().push(&key);
    }

    // == Get ==
    /// Returns the value for `key` and counts the read as a view.
    ///
    /// Expired entries are never returned. An expired entry found here is
    /// removed, unless another writer already replaced it.
    pub fn get(&self, key: &str) -> Option<String> {
        let expired = {
            let entries = self.entries.read();
            let entry = entries.get(key)?;

            if !entry.is_expired() {
                entry.record_view();
                return Some(entry.value.clone());
            }

            Arc::clone(entry)
        };

        let removed = remove_if_same(&mut self.entries.write(), key, &expired);
        debug!(key, removed, "lazy expiry on read");
        None
    }

    // == Get Views ==
    /// Returns how many times `key` was read, or 0 if it is absent.
    pub fn get_views(&self, key: &str) -> u64 {
        self.entries
            .read()
            .get(key)
            .map_or(0, |entry| entry.views())
    }

    // == Delete ==
    /// Removes `key` from the table. Returns true if an entry was removed.
    ///
    /// The recent-keys stack is left untouched.
    pub fn delete(&self, key: &str) -> bool {
        self.entries.write().remove(key).is_some()
    }

    // == Size ==
    /// Returns the number of entries in the table.
    ///
    /// Expired entries not yet removed are counted.
    pub fn size(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    // == Full List ==
    /// Returns a detached copy of every entry in the table.
    pub fn full_list(&self) -> HashMap<String, EntrySnapshot> {
        let entries = self.entries.read();
        let mut list = HashMap::with_capacity(entries.len());

        for (key, entry) in entries.iter() {
            list.insert(key.clone(), entry.snapshot());
        }

        list
    }

    // == Retrieve Last Key ==
    /// Pops the most recently written key and deletes its entry.
    ///
    /// Returns the popped key whether or not its entry was still present,
    /// or None if no key was remembered. The stack and table locks are taken
    /// one after the other, never together.
    pub fn retrieve_last_key(&self) -> Option<String> {
        let key = self.recent.lock().pop()?;
        let removed = self.entries.write().remove(&key).is_some();

        debug!(key = key.as_str(), removed, "retrieved last key");
        Some(key)
    }

    // == Peek Last Key ==
    /// Returns the most recently written key without removing it.
    pub fn peek_last_key(&self) -> Option<String> {
        self.recent.lock().top().map(str::to_string)
    }

    /// Returns the remembered keys, oldest first.
    pub fn recent_keys(&self) -> Vec<String> {
        self.recent.lock().keys()
    }

    // == Reset ==
    /// Clears both the recent-keys stack and the table.
    pub fn reset(&self) {
        self.recent.lock().clear();
        self.entries.write().clear();
    }

    // == Purge Expired ==
    /// Removes all expired entries and returns how many were removed.
    ///
    /// Expired entries are collected under the read lock, then removed under
    /// the write lock. An entry replaced between the two phases is kept.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let expired: Vec<(String, Arc<CacheEntry>)> = self
            .entries
            .read()
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, entry)| (key.clone(), Arc::clone(entry)))
            .collect();

        if expired.is_empty() {
            return 0;
        }

        let mut entries = self.entries.write();
        let mut removed = 0;
        for (key, entry) in &expired {
            if remove_if_same(&mut entries, key, entry) {
                removed += 1;
            }
        }

        removed
    }

    // == Start Cleanup ==
    /// Runs the expiry sweeper until `shutdown` turns true or its sender is dropped.
    ///
    /// Sweeps once per `period`, starting one period from now. A zero period
    /// is rejected and the call returns immediately.
    pub async fn start_cleanup(&self, period: Duration, mut shutdown: watch::Receiver<bool>) {
        if period.is_zero() {
            warn!("TTL cleanup not started: period must be greater than zero");
            return;
        }

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        info!("Starting TTL cleanup with period of {:?}", period);

        loop {
            if *shutdown.borrow_and_update() {
                break;
            }

            tokio::select! {
                biased;

                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    run_sweep(|| self.purge_expired());
                }
            }
        }

        info!("TTL cleanup stopped");
    }
}

/// Runs one sweep, logging its result. A panic is logged and swallowed so
/// the sweeper keeps its schedule. Returns the removed count, None on panic.
fn run_sweep<F: FnOnce() -> usize>(sweep: F) -> Option<usize> {
    match panic::catch_unwind(AssertUnwindSafe(sweep)) {
        Ok(removed) => {
            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
            Some(removed)
        }
        Err(_) => {
            error!("TTL cleanup: sweep panicked, will retry next period");
            None
        }
    }
}

/// Removes `key` if it still maps to `expected`. Caller holds the write lock.
fn remove_if_same(entries: &mut EntryTable, key: &str, expected: &Arc<CacheEntry>) -> bool {
    match entries.get(key) {
        Some(current) if Arc::ptr_eq(current, expected) => {
            entries.remove(key);
            true
        }
        _ => false,
    }
}
