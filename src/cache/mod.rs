//! Cache Module
//!
//! Provides a concurrent in-memory cache with TTL expiration.

use std::time::Duration;

mod entry;
mod store;


// Re-export public types
pub use entry::Entry;
pub use store::ExpiringCache;

// == Public Constants ==
/// TTL applied when no duration is given at construction
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);
