//! Cache Store Module
//!
//! Main cache engine: a HashMap guarded by a reader/writer lock, with lazy
//! on-read expiration and an optional background sweeper.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::cache::{Entry, DEFAULT_TTL};
use crate::tasks::spawn_sweeper;

// == Expiring Cache ==
/// Concurrent key-value cache with per-entry TTL expiration.
///
/// A single reader/writer lock guards the whole map: `get`s run concurrently
/// on the read lock, while `set`, `delete`, `flush` and `delete_expired` take
/// the write lock and serialize against everything else.
///
/// Expired entries are reclaimed two ways:
/// - lazily, when `get` observes a stale entry and removes it, and
/// - in bulk, by [`delete_expired`](Self::delete_expired), which the optional
///   background sweeper invokes on a fixed interval.
#[derive(Debug)]
pub struct ExpiringCache<T> {
    /// Key-value storage
    entries: RwLock<HashMap<String, Entry<T>>>,
    /// TTL applied to every set
    ttl: Duration,
    /// Handle to the background sweeper, if one was started
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl<T> ExpiringCache<T> {
    // == Constructor ==
    /// Creates a cache with the given TTL and no background sweeper.
    fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            sweeper: Mutex::new(None),
        }
    }

    /// Creates a cache with the default TTL of one hour.
    ///
    /// No background sweeper is started: expired entries are reclaimed only
    /// lazily, as `get` observes them. Use [`new`](Self::new) to get periodic
    /// sweeping as well.
    pub fn with_default_ttl() -> Arc<Self> {
        Arc::new(Self::with_ttl(DEFAULT_TTL))
    }

    // == Set ==
    /// Stores a key-value pair, replacing any prior entry under the key.
    ///
    /// The entry's deadline is set to now + TTL; re-inserting an existing key
    /// resets its expiry clock. Cannot fail.
    pub fn set(&self, key: String, value: T) {
        let entry = Entry::new(value, Some(self.ttl));
        self.entries.write().insert(key, entry);
    }

    // == Delete ==
    /// Removes an entry by key. No-op if the key is absent; idempotent.
    pub fn delete(&self, key: &str) {
        self.entries.write().remove(key);
    }

    // == Flush ==
    /// Atomically replaces the entire map with an empty one.
    ///
    /// Every entry disappears at once from the perspective of subsequent
    /// `get` calls.
    pub fn flush(&self) {
        *self.entries.write() = HashMap::new();
    }

    // == Delete Expired ==
    /// Removes all expired entries in one pass.
    ///
    /// Captures "now" once at scan start so every entry is compared against
    /// the same snapshot, then holds the write lock for the whole scan. This
    /// is a stop-the-world pass over the map; callers needing bounded pauses
    /// should keep the cache moderate in size or rely on lazy expiration.
    ///
    /// # Returns
    /// The number of entries removed.
    pub fn delete_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    // == Length ==
    /// Returns the number of physically present entries.
    ///
    /// Stale entries count until they are swept or lazily removed.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns the TTL applied to every `set`.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    #[cfg(test)]
    pub(crate) fn take_sweeper_handle(&self) -> Option<JoinHandle<()>> {
        self.sweeper.lock().take()
    }

    // == Stop Sweeper ==
    /// Stops the background sweeper, if one is running. Idempotent.
    ///
    /// Lazy on-read expiration continues to apply afterwards.
    pub fn stop_sweeper(&self) {
        if let Some(handle) = self.sweeper.lock().take() {
            handle.abort();
        }
    }
}

impl<T: Clone> ExpiringCache<T> {
    // == Get ==
    /// Retrieves a value by key, or `None` if absent or expired.
    ///
    /// The fast path holds only the read lock, so lookups run concurrently.
    /// A stale hit is a mutating read: the entry is removed eagerly rather
    /// than left to occupy memory until the next sweep.
    ///
    /// Between releasing the read lock and acquiring the write lock another
    /// thread may re-insert the key; the removal re-checks expiry under the
    /// write lock so a fresh re-insert is never clobbered (last-writer-wins).
    pub fn get(&self, key: &str) -> Option<T> {
        {
            let entries = self.entries.read();
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired() => return Some(entry.value().clone()),
                Some(_) => {}
            }
        }

        // Stale hit: reacquire as writer to remove the entry
        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(|entry| entry.is_expired()) {
            entries.remove(key);
        }
        None
    }
}

impl<T: Send + Sync + 'static> ExpiringCache<T> {
    /// Creates a cache with the given TTL and starts the background sweeper.
    ///
    /// The sweeper ticks at the same interval as the TTL, invoking
    /// [`delete_expired`](Self::delete_expired) each tick, until it is
    /// stopped via [`stop_sweeper`](Self::stop_sweeper) or the cache is
    /// dropped.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime, since the sweeper is spawned
    /// as a Tokio task.
    pub fn new(ttl: Duration) -> Arc<Self> {
        let cache = Arc::new(Self::with_ttl(ttl));
        let handle = spawn_sweeper(Arc::downgrade(&cache), ttl);
        *cache.sweeper.lock() = Some(handle);
        cache
    }
}

impl<T> Drop for ExpiringCache<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.sweeper.get_mut().take() {
            handle.abort();
        }
    }
}
