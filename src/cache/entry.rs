//! Cache Entry Module
//!
//! Defines a single stored value together with its optional expiry deadline.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with value and expiry metadata.
///
/// Deadlines are taken from the monotonic clock, so wall-clock adjustments
/// never shorten or extend an entry's lifetime.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value, returned to callers unchanged
    pub value: V,
    /// Expiry deadline, None = never expires
    pub expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    // == Constructors ==
    /// Creates an entry that never expires.
    pub fn new(value: V) -> Self {
        Self {
            value,
            expires_at: None,
        }
    }

    /// Creates an entry that expires `ttl` from now.
    ///
    /// A zero `ttl` attaches no deadline at all.
    pub fn with_ttl(value: V, ttl: Duration) -> Self {
        if ttl.is_zero() {
            return Self::new(value);
        }

        // A deadline past the end of the clock's range never expires.
        let expires_at = Instant::now().checked_add(ttl);
        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks whether the entry is expired at the given instant.
    ///
    /// Boundary condition: an entry is expired once `now` reaches its deadline,
    /// so a query exactly at `expires_at` already misses.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the lifetime left at `now`, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` once the deadline has passed
    /// - `Some(remaining)` while the entry is still live
    /// - `None` if the entry never expires
    pub fn ttl_remaining_at(&self, now: Instant) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(now))
    }
}
