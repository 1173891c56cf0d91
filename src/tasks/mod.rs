//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache instance.
//!
//! # Tasks
//! - Expiry sweeper: removes expired cache entries at a fixed interval

mod sweeper;

pub use sweeper::spawn_sweeper;
