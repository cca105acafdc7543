//! Consistent-hash ring for locating a key's owning peer.
//!
//! # How It Works
//!
//! Each real peer is represented by `replicas` virtual nodes, placed at
//! `H(i ‖ peer_id)` for `i ∈ [0, replicas)`. Virtual-node hashes are kept in
//! a sorted `Vec<u32>`; looking up a key finds the first virtual node whose
//! hash is `>= H(key)` via binary search, wrapping to index 0 if the key
//! hashes past the last virtual node (the ring is circular).
//!
//! ```text
//!            H(key)
//!               │
//!               ▼
//!   ... ──●───────●───●────●─── (wraps around) ───●── ...
//!         vnode    vnode vnode                    vnode
//!          │                                        ▲
//!          └── first vnode hash >= H(key) ───────────┘ (wrap-around case)
//! ```
//!
//! More virtual nodes per peer smooths the key distribution at the cost of a
//! larger ring; the source this crate is derived from uses 50 replicas by
//! default, which this crate keeps as [`HashRing::DEFAULT_REPLICAS`].
//!
//! # Membership
//!
//! The ring is append-only here: [`HashRing::add`] inserts new peers'
//! virtual nodes and re-sorts; there is no `remove`. Removal (and the
//! partial-reshuffle consistency guarantees that come with it) is out of
//! scope for this crate, matching the design's non-goal of "strict
//! consistency across peers during ring membership changes."

use std::collections::HashMap;

/// A 32-bit hash function injectable into a [`HashRing`].
///
/// The default implementation ([`Crc32Hasher`]) matches the source's
/// `crc32.ChecksumIEEE`.
pub trait RingHasher: Send + Sync {
    /// Hashes `data` to a 32-bit value.
    fn hash(&self, data: &[u8]) -> u32;
}

/// CRC-32/IEEE, the default [`RingHasher`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Crc32Hasher;

impl RingHasher for Crc32Hasher {
    fn hash(&self, data: &[u8]) -> u32 {
        crc32fast::hash(data)
    }
}

/// A consistent-hash ring mapping keys to peer identifiers.
pub struct HashRing {
    replicas: usize,
    hasher: Box<dyn RingHasher>,
    /// Sorted virtual-node hashes.
    ring: Vec<u32>,
    /// Virtual-node hash -> owning peer id.
    owners: HashMap<u32, String>,
}

impl std::fmt::Debug for HashRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashRing")
            .field("replicas", &self.replicas)
            .field("virtual_nodes", &self.ring.len())
            .field("peers", &self.owners.len())
            .finish()
    }
}

impl HashRing {
    /// Virtual nodes per real peer used by [`HashRing::new`], matching the
    /// source demo's configuration.
    pub const DEFAULT_REPLICAS: usize = 50;

    /// Creates a ring with [`HashRing::DEFAULT_REPLICAS`] virtual nodes per
    /// peer and the default [`Crc32Hasher`].
    pub fn new() -> Self {
        HashRing::with_replicas_and_hasher(Self::DEFAULT_REPLICAS, Crc32Hasher)
    }

    /// Creates a ring with a custom virtual-node count and the default hasher.
    ///
    /// # Panics
    ///
    /// Panics if `replicas` is zero — a peer with no virtual nodes could
    /// never be the target of a lookup, which is a construction error, not
    /// a runtime condition.
    pub fn with_replicas(replicas: usize) -> Self {
        HashRing::with_replicas_and_hasher(replicas, Crc32Hasher)
    }

    /// Creates a ring with a custom virtual-node count and an injected hash
    /// function.
    ///
    /// # Panics
    ///
    /// Panics if `replicas` is zero.
    pub fn with_replicas_and_hasher(replicas: usize, hasher: impl RingHasher + 'static) -> Self {
        assert!(replicas > 0, "replicas must be positive");
        HashRing {
            replicas,
            hasher: Box::new(hasher),
            ring: Vec::new(),
            owners: HashMap::new(),
        }
    }

    /// Adds peers to the ring, generating `replicas` virtual nodes for each.
    /// Re-sorts the ring once after all insertions.
    pub fn add(&mut self, peers: impl IntoIterator<Item = impl Into<String>>) {
        for peer in peers {
            let peer_id = peer.into();
            for i in 0..self.replicas {
                let vnode_key = format!("{i}{peer_id}");
                let hash = self.hasher.hash(vnode_key.as_bytes());
                self.ring.push(hash);
                self.owners.insert(hash, peer_id.clone());
            }
            log::debug!("hash ring: added peer {peer_id} ({} virtual nodes)", self.replicas);
        }
        self.ring.sort_unstable();
    }

    /// Returns the peer owning `key`, or `None` if the ring has no peers.
    pub fn get(&self, key: &str) -> Option<&str> {
        if self.ring.is_empty() {
            return None;
        }
        let hash = self.hasher.hash(key.as_bytes());
        let idx = match self.ring.binary_search(&hash) {
            Ok(i) => i,
            Err(i) => i % self.ring.len(),
        };
        self.owners.get(&self.ring[idx]).map(String::as_str)
    }

    /// Number of distinct virtual nodes currently on the ring.
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// `true` if no peers have been added yet.
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }
}

impl Default for HashRing {
    fn default() -> Self {
        HashRing::new()
    }
}
