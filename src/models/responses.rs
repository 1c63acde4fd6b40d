//! Response DTOs for the store API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::HashMap;

use serde::Serialize;

use crate::cache::EntrySnapshot;

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: String,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for the SET operation (PUT /set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for the DELETE operation (DELETE /del/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for GET /views/:key
#[derive(Debug, Clone, Serialize)]
pub struct ViewsResponse {
    pub key: String,
    /// Successful reads since the key was last set, 0 if absent
    pub views: u64,
}

/// Response body for GET /size
#[derive(Debug, Clone, Serialize)]
pub struct SizeResponse {
    pub size: usize,
}

/// Response body for GET /list
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    /// Snapshot of every entry, keyed by key
    pub entries: HashMap<String, EntrySnapshot>,
}

/// Response body for POST /last
#[derive(Debug, Clone, Serialize)]
pub struct LastKeyResponse {
    /// The popped key, null when no recent key was remembered
    pub key: Option<String>,
}

/// Response body for POST /reset
#[derive(Debug, Clone, Serialize)]
pub struct ResetResponse {
    pub message: String,
}

impl ResetResponse {
    pub fn new() -> Self {
        Self {
            message: "Store reset successfully".to_string(),
        }
    }
}

impl Default for ResetResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
