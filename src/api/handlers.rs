//! API Handlers
//!
//! HTTP request handlers translating requests into cache calls.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::cache::CacheStore;
use crate::error::{CacheError, Result};
use crate::models::{
    validate_key, DeleteResponse, FlushResponse, GetResponse, HealthResponse, InfoResponse,
    KeysResponse, SetRequest, SetResponse,
};

/// Application state shared across all handlers.
///
/// Holds a handle to the cache the bootstrap constructed; cloning the state
/// clones the handle, not the cache.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: Arc<CacheStore>,
}

impl AppState {
    /// Creates a new AppState around an existing cache handle.
    pub fn new(cache: Arc<CacheStore>) -> Self {
        Self { cache }
    }
}

fn checked_key(key: String) -> Result<String> {
    match validate_key(&key) {
        Some(error_msg) => Err(CacheError::InvalidRequest(error_msg)),
        None => Ok(key),
    }
}

/// Handler for POST /api/v1/keys/:key
///
/// Stores a JSON value, with an expiry when the body carries a positive TTL.
pub async fn set_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    payload: std::result::Result<Json<SetRequest>, JsonRejection>,
) -> Result<Json<SetResponse>> {
    let key = checked_key(key)?;
    let Json(req) = payload?;

    match req.ttl_duration() {
        Some(ttl) => state.cache.set_with_ttl(key.clone(), req.value, ttl)?,
        None => state.cache.set(key.clone(), req.value)?,
    }

    debug!(key = %key, ttl = ?req.ttl, "stored key");
    Ok(Json(SetResponse::new(key)))
}

/// Handler for GET /api/v1/keys/:key
///
/// Returns the stored value, or 404 if the key is missing or expired.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let key = checked_key(key)?;

    match state.cache.get_with_ttl(&key) {
        Some((value, ttl)) => Ok(Json(GetResponse::new(key, value, ttl))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /api/v1/keys/:key
///
/// Always succeeds; the body reports whether the key existed.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let key = checked_key(key)?;
    let existed = state.cache.delete(&key);

    Ok(Json(DeleteResponse::new(key, existed)))
}

/// Handler for HEAD /api/v1/keys/:key
///
/// Status only: 200 if live, 404 if absent or expired, 400 for an invalid key.
pub async fn exists_handler(State(state): State<AppState>, Path(key): Path<String>) -> StatusCode {
    if validate_key(&key).is_some() {
        StatusCode::BAD_REQUEST
    } else if state.cache.contains_key(&key) {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

/// Handler for GET /api/v1/keys
pub async fn keys_handler(State(state): State<AppState>) -> Json<KeysResponse> {
    Json(KeysResponse::new(state.cache.keys()))
}

/// Handler for POST /api/v1/flush
pub async fn flush_handler(State(state): State<AppState>) -> Json<FlushResponse> {
    let removed = state.cache.clear();
    debug!(removed, "flushed cache");

    Json(FlushResponse::new(removed))
}

/// Handler for GET /info
///
/// Reports server identity, entry count and hit statistics.
pub async fn info_handler(State(state): State<AppState>) -> Json<InfoResponse> {
    Json(InfoResponse::new(state.cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_state() -> AppState {
        AppState::new(Arc::new(CacheStore::new()))
    }

    fn set_body(
        value: serde_json::Value,
        ttl: Option<i64>,
    ) -> std::result::Result<Json<SetRequest>, JsonRejection> {
        Ok(Json(SetRequest { value, ttl }))
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = test_state();

        let result = set_handler(
            State(state.clone()),
            Path("test_key".to_string()),
            set_body(json!({"v": 1}), None),
        )
        .await;
        assert!(result.is_ok());

        let response = get_handler(State(state), Path("test_key".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, json!({"v": 1}));
        assert_eq!(response.ttl, None);
    }

    #[tokio::test]
    async fn test_set_handler_attaches_ttl() {
        let state = test_state();

        set_handler(
            State(state.clone()),
            Path("session".to_string()),
            set_body(json!("token"), Some(3600)),
        )
        .await
        .unwrap();

        let response = get_handler(State(state), Path("session".to_string()))
            .await
            .unwrap();
        let ttl = response.ttl.unwrap();
        assert!((3599..=3600).contains(&ttl));
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let result = get_handler(State(test_state()), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_handler_reports_existence() {
        let state = test_state();
        state.cache.set("to_delete", json!(1)).unwrap();

        let first = delete_handler(State(state.clone()), Path("to_delete".to_string()))
            .await
            .unwrap();
        assert!(first.existed);

        let second = delete_handler(State(state), Path("to_delete".to_string()))
            .await
            .unwrap();
        assert!(!second.existed);
    }

    #[tokio::test]
    async fn test_exists_handler() {
        let state = test_state();
        state.cache.set("here", json!(true)).unwrap();

        assert_eq!(
            exists_handler(State(state.clone()), Path("here".to_string())).await,
            StatusCode::OK
        );
        assert_eq!(
            exists_handler(State(state.clone()), Path("missing".to_string())).await,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            exists_handler(State(state), Path("k".repeat(300))).await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_flush_and_keys_handlers() {
        let state = test_state();
        state.cache.set("a", json!(1)).unwrap();
        state.cache.set("b", json!(2)).unwrap();

        let keys = keys_handler(State(state.clone())).await;
        assert_eq!(keys.count, 2);

        let flushed = flush_handler(State(state.clone())).await;
        assert_eq!(flushed.removed, 2);
        assert!(state.cache.is_empty());
    }

    #[tokio::test]
    async fn test_info_handler() {
        let state = test_state();
        state.cache.set("a", json!(1)).unwrap();
        state.cache.get("a");

        let response = info_handler(State(state)).await;
        assert_eq!(response.size, 1);
        assert_eq!(response.stats.hits, 1);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "ok");
    }

    #[tokio::test]
    async fn test_set_key_too_long() {
        let result = set_handler(
            State(test_state()),
            Path("k".repeat(300)),
            set_body(json!("value"), None),
        )
        .await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }
}
