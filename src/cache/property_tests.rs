//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check store behavior over generated operation sequences.

use proptest::prelude::*;
use std::collections::HashMap;
use std::thread::sleep;
use std::time::Duration;

use crate::cache::{CacheStore, MAX_RECENT_KEYS};

const NO_TTL: Duration = Duration::ZERO;

// == Strategies ==
/// Generates store keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,16}".prop_map(|s| s)
}

/// Generates store values
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,64}".prop_map(|s| s)
}

/// Store operations used to drive a model comparison
#[derive(Debug, Clone)]
enum StoreOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
    RetrieveLast,
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    // A small key space so operations collide
    let key = "[a-e]";
    prop_oneof![
        (key, value_strategy()).prop_map(|(key, value)| StoreOp::Set { key, value }),
        key.prop_map(|key| StoreOp::Get { key }),
        key.prop_map(|key| StoreOp::Delete { key }),
        Just(StoreOp::RetrieveLast),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // *For any* sequence of operations, the store agrees with a simple model
    // of values, view counts and write history.
    #[test]
    fn prop_matches_model(ops in prop::collection::vec(store_op_strategy(), 1..80)) {
        let store = CacheStore::new();
        let mut values: HashMap<String, (String, u64)> = HashMap::new();
        let mut history: Vec<String> = Vec::new();

        for op in ops {
            match op {
                StoreOp::Set { key, value } => {
                    store.set(key.clone(), value.clone(), NO_TTL);
                    values.insert(key.clone(), (value, 0));
                    history.push(key);
                    if history.len() > MAX_RECENT_KEYS {
                        history.remove(0);
                    }
                }
                StoreOp::Get { key } => {
                    let expected = values.get_mut(&key).map(|(value, views)| {
                        *views += 1;
                        value.clone()
                    });
                    prop_assert_eq!(store.get(&key), expected);
                }
                StoreOp::Delete { key } => {
                    prop_assert_eq!(store.delete(&key), values.remove(&key).is_some());
                }
                StoreOp::RetrieveLast => {
                    let expected = history.pop();
                    if let Some(key) = &expected {
                        values.remove(key);
                    }
                    prop_assert_eq!(store.retrieve_last_key(), expected);
                }
            }
        }

        prop_assert_eq!(store.size(), values.len());
        prop_assert_eq!(store.recent_keys(), history);
        for (key, (value, views)) in &values {
            prop_assert_eq!(store.get_views(key), *views);
            let list = store.full_list();
            prop_assert_eq!(&list[key].value, value);
        }
    }

    // *For any* sequence of distinct keys longer than the stack bound, the
    // stack holds exactly the most recent MAX_RECENT_KEYS of them, oldest first.
    #[test]
    fn prop_recent_keys_bound(
        keys in prop::collection::hash_set(key_strategy(), (MAX_RECENT_KEYS + 1)..100)
    ) {
        let store = CacheStore::new();
        let keys: Vec<String> = keys.into_iter().collect();

        for key in &keys {
            store.set(key.clone(), "v", NO_TTL);
        }

        let expected = keys[keys.len() - MAX_RECENT_KEYS..].to_vec();
        prop_assert_eq!(store.recent_keys(), expected);
        prop_assert_eq!(store.size(), keys.len());
    }

    // *For any* live key read k times with no intervening write, the view
    // count is exactly k, and a later write resets it to zero.
    #[test]
    fn prop_view_count(key in key_strategy(), value in value_strategy(), reads in 0u64..50) {
        let store = CacheStore::new();
        store.set(key.clone(), value.clone(), NO_TTL);

        for _ in 0..reads {
            prop_assert_eq!(store.get(&key), Some(value.clone()));
        }
        prop_assert_eq!(store.get_views(&key), reads);

        store.set(key.clone(), value, NO_TTL);
        prop_assert_eq!(store.get_views(&key), 0);
    }

    // *For any* stored entries, the full list is unaffected by later mutation.
    #[test]
    fn prop_full_list_detached(
        entries in prop::collection::hash_map(key_strategy(), value_strategy(), 1..20)
    ) {
        let store = CacheStore::new();
        for (key, value) in &entries {
            store.set(key.clone(), value.clone(), NO_TTL);
        }

        let list = store.full_list();
        for key in entries.keys() {
            store.get(key);
            store.set(key.clone(), "overwritten", NO_TTL);
        }
        store.reset();

        prop_assert_eq!(list.len(), entries.len());
        for (key, value) in &entries {
            prop_assert_eq!(&list[key].value, value);
            prop_assert_eq!(list[key].views, 0);
        }
    }

    // *For any* populated store, reset leaves nothing behind.
    #[test]
    fn prop_reset_completeness(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 0..50)
    ) {
        let store = CacheStore::new();
        for (key, value) in entries {
            store.set(key, value, NO_TTL);
        }

        store.reset();

        prop_assert_eq!(store.size(), 0);
        prop_assert!(store.full_list().is_empty());
        prop_assert_eq!(store.retrieve_last_key(), None);
    }
}

// Separate proptest block with fewer cases for time-sensitive TTL tests
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    // *For any* entry stored with a TTL, it is readable before the TTL elapses
    // and never readable after, with or without a sweep.
    #[test]
    fn prop_ttl_expiration_behavior(
        key in key_strategy(),
        value in value_strategy(),
        sweep in any::<bool>()
    ) {
        let store = CacheStore::new();
        store.set(key.clone(), value.clone(), Duration::from_millis(200));

        prop_assert_eq!(store.get(&key), Some(value));

        sleep(Duration::from_millis(300));
        if sweep {
            prop_assert_eq!(store.purge_expired(), 1);
        }

        prop_assert_eq!(store.get(&key), None);
        prop_assert_eq!(store.size(), 0);
    }

    // *For any* entry stored without a TTL, it survives sweeps.
    #[test]
    fn prop_no_ttl_never_expires(key in key_strategy(), value in value_strategy()) {
        let store = CacheStore::new();
        store.set(key.clone(), value.clone(), NO_TTL);

        sleep(Duration::from_millis(50));

        prop_assert_eq!(store.purge_expired(), 0);
        prop_assert_eq!(store.get(&key), Some(value));
    }
}
