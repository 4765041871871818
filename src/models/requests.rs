//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies and path validation.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Request body for the SET operation (POST /api/v1/keys/:key)
///
/// # Fields
/// - `value`: Any JSON value, stored as-is (a missing value stores `null`)
/// - `ttl`: Optional TTL in seconds; zero or negative means no expiry
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The value to store
    #[serde(default)]
    pub value: Value,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl: Option<i64>,
}

impl SetRequest {
    /// Returns the expiry to attach, or None when the entry should never expire.
    pub fn ttl_duration(&self) -> Option<Duration> {
        self.ttl
            .and_then(|secs| u64::try_from(secs).ok())
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }
}

/// Validates a key taken from the request path.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("key is required".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}
