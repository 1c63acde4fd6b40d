//! API Handlers
//!
//! HTTP request handlers for each store endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::CacheStore;
use crate::error::{CacheError, Result};
use crate::models::{
    validate_key, DeleteResponse, GetResponse, HealthResponse, LastKeyResponse, ListResponse,
    ResetResponse, SetRequest, SetResponse, SizeResponse, ViewsResponse,
};

/// Application state shared across all handlers.
///
/// The store locks internally, so handlers share it through a plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Shared store
    pub store: Arc<CacheStore>,
}

impl AppState {
    /// Creates a new AppState with the given store.
    pub fn new(store: CacheStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(CacheStore::with_recent_capacity(config.recent_keys_capacity))
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair with optional TTL in seconds.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl();
    state.store.set(req.key.clone(), req.value, ttl);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value by key, counting the read as a view.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.store.get(&key) {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /views/:key
pub async fn views_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<ViewsResponse> {
    let views = state.store.get_views(&key);
    Json(ViewsResponse { key, views })
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    if state.store.delete(&key) {
        Ok(Json(DeleteResponse::new(key)))
    } else {
        Err(CacheError::NotFound(key))
    }
}

/// Handler for GET /size
pub async fn size_handler(State(state): State<AppState>) -> Json<SizeResponse> {
    Json(SizeResponse {
        size: state.store.size(),
    })
}

/// Handler for GET /list
///
/// Returns a snapshot of every entry, including expired entries not yet swept.
pub async fn list_handler(State(state): State<AppState>) -> Json<ListResponse> {
    Json(ListResponse {
        entries: state.store.full_list(),
    })
}

/// Handler for POST /last
///
/// Pops the most recently written key and deletes its entry.
pub async fn last_key_handler(State(state): State<AppState>) -> Json<LastKeyResponse> {
    Json(LastKeyResponse {
        key: state.store.retrieve_last_key(),
    })
}

/// Handler for POST /reset
pub async fn reset_handler(State(state): State<AppState>) -> Json<ResetResponse> {
    state.store.reset();
    Json(ResetResponse::new())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_request(key: &str, value: &str) -> SetRequest {
        SetRequest {
            key: key.to_string(),
            value: value.to_string(),
            ttl: None,
        }
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = AppState::new(CacheStore::new());

        let result = set_handler(
            State(state.clone()),
            Json(set_request("test_key", "test_value")),
        )
        .await;
        assert!(result.is_ok());

        let result = get_handler(State(state.clone()), Path("test_key".to_string())).await;
        let response = result.unwrap();
        assert_eq!(response.value, "test_value");

        let views = views_handler(State(state), Path("test_key".to_string())).await;
        assert_eq!(views.views, 1);
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = AppState::new(CacheStore::new());

        let result = get_handler(State(state), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = AppState::new(CacheStore::new());
        set_handler(State(state.clone()), Json(set_request("to_delete", "value")))
            .await
            .unwrap();

        let result = delete_handler(State(state.clone()), Path("to_delete".to_string())).await;
        assert!(result.is_ok());

        let result = delete_handler(State(state), Path("to_delete".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_last_key_and_reset_handlers() {
        let state = AppState::new(CacheStore::new());
        set_handler(State(state.clone()), Json(set_request("a", "1")))
            .await
            .unwrap();
        set_handler(State(state.clone()), Json(set_request("b", "2")))
            .await
            .unwrap();

        let last = last_key_handler(State(state.clone())).await;
        assert_eq!(last.key.as_deref(), Some("b"));
        assert_eq!(size_handler(State(state.clone())).await.size, 1);

        reset_handler(State(state.clone())).await;
        assert_eq!(size_handler(State(state.clone())).await.size, 0);
        assert!(list_handler(State(state.clone())).await.entries.is_empty());
        assert!(last_key_handler(State(state)).await.key.is_none());
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let state = AppState::new(CacheStore::new());

        let result = set_handler(State(state), Json(set_request("", "value"))).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }
}
