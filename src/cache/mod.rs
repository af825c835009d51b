//! Keyed store with per-entry expiration.
//!
//! Expiry is lazy: an expired entry is dropped by the read that finds it.
//! [`TtlCache::purge_expired`] and the optional sweeper task remove expired
//! entries nobody reads any more.

pub mod ttl;

pub use ttl::{CacheEntry, TtlCache, MAX_TTL};
