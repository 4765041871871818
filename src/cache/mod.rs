//! Cache Module
//!
//! Provides the in-memory key-value engine with per-entry TTL.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;
