//! API Routes
//!
//! Configures the Axum router with all store endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_handler, get_handler, health_handler, last_key_handler, list_handler, reset_handler,
    set_handler, size_handler, views_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /set` - Store a key-value pair
/// - `GET /get/:key` - Retrieve a value by key
/// - `GET /views/:key` - Read count for a key
/// - `DELETE /del/:key` - Delete a key
/// - `GET /size` - Number of stored entries
/// - `GET /list` - Snapshot of all entries
/// - `POST /last` - Pop the most recently written key and delete it
/// - `POST /reset` - Clear the store
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", put(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/views/:key", get(views_handler))
        .route("/del/:key", delete(delete_handler))
        .route("/size", get(size_handler))
        .route("/list", get(list_handler))
        .route("/last", post(last_key_handler))
        .route("/reset", post(reset_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
