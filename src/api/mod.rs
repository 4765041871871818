//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `POST /api/v1/keys/:key` - Store a value with optional TTL
//! - `GET /api/v1/keys/:key` - Retrieve a value by key
//! - `DELETE /api/v1/keys/:key` - Delete a key
//! - `HEAD /api/v1/keys/:key` - Check key existence
//! - `GET /api/v1/keys` - List live keys
//! - `POST /api/v1/flush` - Clear all data
//! - `GET /health` - Health check endpoint
//! - `GET /info` - Server info and statistics

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
