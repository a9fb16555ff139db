#![forbid(unsafe_code)]

//! Session-scoped keyed cache.
//!
//! The resolver depends on this trait, not a concrete store, so tests use
//! [`MemoryCache`] and hosts can plug in whatever session store they have.
//! Entries live for the lifetime of the store: there is no TTL and nothing is
//! proactively expired. If the cached values embed time-limited signed URLs,
//! swapping in an expiring implementation is the caller's job.

mod memory;

pub use memory::MemoryCache;

/// Keyed lookup-or-compute store with last-write-wins semantics.
pub trait Cache<K, V>: Send + Sync {
    fn get(&self, key: &K) -> Option<V>;
    fn set(&self, key: K, value: V);
}
