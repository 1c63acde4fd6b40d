//! API Module
//!
//! HTTP handlers and routing exposing the store over a REST API.
//! The handlers hold no store logic of their own.

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
