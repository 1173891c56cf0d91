//! Expiring Cache - a concurrent in-memory key-value cache with TTL expiration
//!
//! Entries expire after a per-cache TTL and are reclaimed both lazily on read
//! and periodically by an optional background sweeper. Intended as a building
//! block inside a larger application (memoization, short-lived session data),
//! not as a standalone service.

pub mod cache;
pub mod tasks;

pub use cache::{Entry, ExpiringCache, DEFAULT_TTL};
pub use tasks::spawn_sweeper;
