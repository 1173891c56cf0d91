//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cache entry: the stored value plus its expiry deadline.
///
/// The deadline is a monotonic [`Instant`]; `None` is the sentinel meaning the
/// entry never expires and is exempt from both lazy and swept removal.
#[derive(Debug, Clone)]
pub struct Entry<T> {
    /// The stored value
    value: T,
    /// Expiry deadline, None = never expires
    expires_at: Option<Instant>,
}

impl<T> Entry<T> {
    // == Constructor ==
    /// Creates a new entry with an optional TTL.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - Optional time-to-live; `None` produces a never-expiring entry
    pub fn new(value: T, ttl: Option<Duration>) -> Self {
        Self {
            value,
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        }
    }

    /// Returns a shared reference to the stored value.
    pub fn value(&self) -> &T {
        &self.value
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of now.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to its deadline, so a zero TTL expires the
    /// entry immediately.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Checks if the entry has expired as of `now`.
    ///
    /// Takes the observation time as a parameter so that a bulk sweep can
    /// capture "now" once and compare every entry against the same snapshot.
    ///
    /// # Returns
    /// - `true` if the entry has a deadline and `now >= deadline`
    /// - `false` if the entry never expires or the deadline has not passed
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining TTL, or None if the entry never expires.
    ///
    /// Saturates at zero once the deadline has passed. Useful for debugging.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}
