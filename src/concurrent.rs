//! Thread-safe façade over [`crate::lru::LruStore`].
//!
//! # Why a Single Lock
//!
//! `cache-rs`'s own concurrent caches use lock striping (segmented storage,
//! one `Mutex` per shard) for near-linear multi-core scaling. This cache
//! deliberately does **not** stripe: `get` must promote the hit to the MRU
//! end atomically with the lookup, and striping only preserves recency order
//! *within* a shard, not globally. A `Group`'s per-key request coalescing
//! (see [`crate::flight`]) is what keeps contention on this single lock low
//! in practice — concurrent misses for the same key collapse into one
//! producer before they ever reach the cache again.
//!
//! # Lazy Construction
//!
//! The inner [`LruStore`] is not allocated until the first `add`, so a
//! zero-traffic group (one that only ever misses, or is never queried) never
//! pays for a `HashMap` allocation.

use crate::byte_view::ByteView;
use crate::lru::LruStore;
use parking_lot::Mutex;

/// A thread-safe, lazily-initialized byte-budget LRU cache.
pub struct ConcurrentCache {
    max_bytes: u64,
    inner: Mutex<Option<LruStore>>,
}

impl std::fmt::Debug for ConcurrentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConcurrentCache")
            .field("max_bytes", &self.max_bytes)
            .finish()
    }
}

impl ConcurrentCache {
    /// Creates a cache with the given byte budget (`0` means unbounded). No
    /// allocation happens until the first write.
    pub fn new(max_bytes: u64) -> Self {
        ConcurrentCache {
            max_bytes,
            inner: Mutex::new(None),
        }
    }

    /// The configured byte budget.
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Looks up `key`. Returns `None` without allocating the inner store if
    /// it has never been written to.
    pub fn get(&self, key: &str) -> Option<ByteView> {
        let mut guard = self.inner.lock();
        guard.as_mut()?.get(key)
    }

    /// Inserts or replaces `key`, allocating the inner store on first use.
    pub fn add(&self, key: String, value: ByteView) {
        let mut guard = self.inner.lock();
        guard
            .get_or_insert_with(|| LruStore::new(self.max_bytes))
            .add(key, value);
    }

    /// Number of live entries (`0` if never written to).
    pub fn len(&self) -> usize {
        self.inner.lock().as_ref().map_or(0, LruStore::len)
    }

    /// Current total bytes held (`0` if never written to).
    pub fn cur_bytes(&self) -> u64 {
        self.inner.lock().as_ref().map_or(0, LruStore::cur_bytes)
    }
}
