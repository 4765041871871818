//! ttl_kv - an in-process key-value cache with per-entry expiration
//!
//! The [`cache::CacheStore`] engine is usable on its own; the `api` module
//! serves one shared store over HTTP.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::CacheStore;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
