//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_handler, exists_handler, flush_handler, get_handler, health_handler, info_handler,
    keys_handler, set_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /api/v1/keys/:key` - Store a value with optional TTL
/// - `GET /api/v1/keys/:key` - Retrieve a value
/// - `DELETE /api/v1/keys/:key` - Delete a key
/// - `HEAD /api/v1/keys/:key` - Check whether a key is live
/// - `GET /api/v1/keys` - List live keys
/// - `POST /api/v1/flush` - Drop every entry
/// - `GET /health` - Health check endpoint
/// - `GET /info` - Server info and cache statistics
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // An explicit HEAD route takes precedence over the one axum derives from GET.
    let api = Router::new()
        .route(
            "/keys/:key",
            post(set_handler)
                .get(get_handler)
                .delete(delete_handler)
                .head(exists_handler),
        )
        .route("/keys", get(keys_handler))
        .route("/flush", post(flush_handler));

    Router::new()
        .nest("/api/v1", api)
        .route("/health", get(health_handler))
        .route("/info", get(info_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
