//! Mini KV - A concurrent in-memory key-value store
//!
//! Provides per-entry TTL expiry, per-key view counting and a bounded stack
//! of recently written keys, with a thin HTTP server on top.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::CacheStore;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
