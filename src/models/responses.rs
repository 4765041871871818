//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStats;

const STATUS_SUCCESS: &str = "success";

/// Response body for the SET operation (POST /api/v1/keys/:key)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Always "success"
    pub status: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            key: key.into(),
        }
    }
}

/// Response body for the GET operation (GET /api/v1/keys/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// Always "success"
    pub status: String,
    /// The requested key
    pub key: String,
    /// The stored value, unchanged
    pub value: Value,
    /// Seconds until expiry, rounded up; omitted when the entry never expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: Value, ttl: Option<Duration>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            key: key.into(),
            value,
            ttl: ttl.map(|left| left.as_secs() + u64::from(left.subsec_nanos() > 0)),
        }
    }
}

/// Response body for the DELETE operation (DELETE /api/v1/keys/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Always "success"; deleting a missing key is not an error
    pub status: String,
    /// The key that was deleted
    pub key: String,
    /// Whether the key held an entry before the call
    pub existed: bool,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>, existed: bool) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            key: key.into(),
            existed,
        }
    }
}

/// Response body for the key listing (GET /api/v1/keys)
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    /// Live keys, sorted
    pub keys: Vec<String>,
    /// Number of keys listed
    pub count: usize,
}

impl KeysResponse {
    /// Creates a new KeysResponse, sorting the keys for stable output
    pub fn new(mut keys: Vec<String>) -> Self {
        keys.sort_unstable();
        Self {
            count: keys.len(),
            keys,
        }
    }
}

/// Response body for the flush operation (POST /api/v1/flush)
#[derive(Debug, Clone, Serialize)]
pub struct FlushResponse {
    pub status: String,
    /// Number of entries dropped
    pub removed: usize,
}

impl FlushResponse {
    pub fn new(removed: usize) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            removed,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status, "ok"
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for the info endpoint (GET /info)
#[derive(Debug, Clone, Serialize)]
pub struct InfoResponse {
    pub server: String,
    pub version: String,
    /// Stored entries, including expired ones not yet swept
    pub size: usize,
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl InfoResponse {
    /// Creates a new InfoResponse from a statistics snapshot
    pub fn new(stats: CacheStats) -> Self {
        Self {
            server: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            size: stats.total_entries,
            hit_rate: stats.hit_rate(),
            stats,
        }
    }
}
