//! Byte-budget least-recently-used store.
//!
//! # How It Works
//!
//! A `HashMap<String, Handle>` gives O(1) key lookup; the [`crate::list::List`]
//! it points into maintains recency order. Unlike a plain entry-count LRU,
//! eviction here is driven by a running total of `len(key) + len(value)`
//! bytes against a configured budget — the shape that matters once values
//! range from a few bytes to a few megabytes.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                         LruStore                            │
//! │                                                               │
//! │  HashMap<String, Handle>        List<(String, ByteView)>     │
//! │  ┌────────────────┐            ┌──────────────────────────┐ │
//! │  │ "a" ───────────────────────▶│ MRU ◀──▶ ... ◀──▶ LRU   │ │
//! │  │ "b" ───────────────────────▶│                           │ │
//! │  └────────────────┘            └──────────────────────────┘ │
//! │                                                               │
//! │  cur_bytes: u64  (Σ len(key) + len(value) over live entries) │
//! │  max_bytes: u64  (0 ⇒ unbounded)                             │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Eviction
//!
//! `add` applies the insertion or replacement first, then evicts from the
//! LRU end while `max_bytes > 0 && cur_bytes > max_bytes`. A single
//! oversized `add` can therefore evict many entries, and — if that one entry
//! alone exceeds `max_bytes` — can leave the store over budget holding just
//! that entry. This store **admits** such inserts rather than rejecting them,
//! matching the source behavior this crate is derived from.

use crate::byte_view::ByteView;
use crate::list::{Handle, List};
use std::collections::HashMap;

struct Slot {
    key: String,
    value: ByteView,
}

fn entry_cost(key: &str, value: &ByteView) -> u64 {
    (key.len() + value.len()) as u64
}

/// A bounded, byte-sized LRU store with an optional eviction callback.
///
/// `max_bytes == 0` means unbounded: entries are never evicted by `add`,
/// only via explicit [`LruStore::remove_oldest`] calls.
pub struct LruStore {
    index: HashMap<String, Handle>,
    list: List<Slot>,
    cur_bytes: u64,
    max_bytes: u64,
    on_evict: Option<Box<dyn FnMut(&str, &ByteView) + Send>>,
}

impl std::fmt::Debug for LruStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LruStore")
            .field("len", &self.list.len())
            .field("cur_bytes", &self.cur_bytes)
            .field("max_bytes", &self.max_bytes)
            .finish()
    }
}

impl LruStore {
    /// Creates a store with the given byte budget (`0` means unbounded) and
    /// no eviction callback.
    pub fn new(max_bytes: u64) -> Self {
        LruStore {
            index: HashMap::new(),
            list: List::new(),
            cur_bytes: 0,
            max_bytes,
            on_evict: None,
        }
    }

    /// Creates a store with the given byte budget and an eviction callback,
    /// invoked exactly once per eviction, synchronously, before the entry is
    /// dropped.
    pub fn with_on_evict(
        max_bytes: u64,
        on_evict: impl FnMut(&str, &ByteView) + Send + 'static,
    ) -> Self {
        LruStore {
            index: HashMap::new(),
            list: List::new(),
            cur_bytes: 0,
            max_bytes,
            on_evict: Some(Box::new(on_evict)),
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// `true` if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.list.len() == 0
    }

    /// Current total bytes held (`Σ len(key) + len(value)`).
    pub fn cur_bytes(&self) -> u64 {
        self.cur_bytes
    }

    /// The configured byte budget (`0` means unbounded).
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Looks up `key`, promoting it to the MRU end on a hit.
    pub fn get(&mut self, key: &str) -> Option<ByteView> {
        let handle = *self.index.get(key)?;
        self.list.touch(handle);
        Some(self.list.get(handle).value.clone())
    }

    /// Inserts or replaces `key`, then evicts from the LRU end while over
    /// budget.
    pub fn add(&mut self, key: String, value: ByteView) {
        if let Some(&handle) = self.index.get(&key) {
            let old_len = self.list.get(handle).value.len() as u64;
            let new_len = value.len() as u64;
            self.list.get_mut(handle).value = value;
            self.list.touch(handle);
            self.cur_bytes = self.cur_bytes + new_len - old_len;
        } else {
            let cost = entry_cost(&key, &value);
            let handle = self.list.push_mru(Slot { key: key.clone(), value });
            self.index.insert(key, handle);
            self.cur_bytes += cost;
        }

        while self.max_bytes > 0 && self.cur_bytes > self.max_bytes {
            if !self.evict_one() {
                break;
            }
        }
    }

    /// Evicts the LRU-end entry, if any. Exposed for tests and explicit
    /// budgeting; this is the same step `add` performs internally.
    pub fn remove_oldest(&mut self) {
        self.evict_one();
    }

    fn evict_one(&mut self) -> bool {
        let Some(slot) = self.list.pop_lru() else {
            return false;
        };
        self.index.remove(&slot.key);
        self.cur_bytes -= entry_cost(&slot.key, &slot.value);
        if let Some(cb) = self.on_evict.as_mut() {
            cb(&slot.key, &slot.value);
        }
        true
    }
}
