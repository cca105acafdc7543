//! The read-through cache orchestrator: hit → remote peer → local loader.
//!
//! A [`Group`] is a named, bounded cache backed by a single [`Loader`] of
//! last resort. `get` probes the local [`ConcurrentCache`] first; on a miss
//! it coalesces concurrent callers for the same key through a
//! [`FlightGroup`], consults an optional [`PeerPicker`] to decide whether
//! some other peer owns the key, and falls back to the local loader if
//! there is no peer, the key is local, or the remote fetch fails.
//!
//! Only the local-load branch installs a value into the cache: a value
//! fetched from a remote peer is assumed already cached at the owning peer,
//! and re-caching it here would let popular keys replicate across every
//! member of the ring without bound.

use crate::byte_view::ByteView;
use crate::concurrent::ConcurrentCache;
use crate::config::GroupConfig;
use crate::error::CacheError;
use crate::flight::FlightGroup;
use crate::metrics::GroupMetrics;
use crate::peer::{Loader, PeerPicker, PickedPeer};
use parking_lot::RwLock;
use std::sync::Arc;

/// A named, bounded read-through cache with a fixed [`Loader`].
pub struct Group {
    name: String,
    loader: Arc<dyn Loader>,
    cache: ConcurrentCache,
    flights: FlightGroup<Result<ByteView, CacheError>>,
    peers: RwLock<Option<Arc<dyn PeerPicker>>>,
    metrics: GroupMetrics,
}

impl std::fmt::Debug for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("cache", &self.cache)
            .field("has_peers", &self.peers.read().is_some())
            .finish()
    }
}

impl Group {
    /// Creates a group named `name`, with a local byte budget of `max_bytes`
    /// (`0` means unbounded), using `loader` for values missing everywhere.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfig`] if `name` is empty.
    pub fn new(
        config: GroupConfig,
        loader: impl Loader + 'static,
    ) -> Result<Self, CacheError> {
        if config.name().is_empty() {
            return Err(CacheError::InvalidConfig(
                "group name must not be empty".to_string(),
            ));
        }
        Ok(Group {
            name: config.name().to_string(),
            loader: Arc::new(loader),
            cache: ConcurrentCache::new(config.max_bytes()),
            flights: FlightGroup::new(),
            peers: RwLock::new(None),
            metrics: GroupMetrics::new(),
        })
    }

    /// This group's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// This group's counters.
    pub fn metrics(&self) -> &GroupMetrics {
        &self.metrics
    }

    /// Attaches a [`PeerPicker`] to this group.
    ///
    /// This is one-shot: calling it a second time is a programmer error.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::DuplicateRegistration`] if peers are already
    /// registered.
    pub fn register_peers(&self, picker: impl PeerPicker + 'static) -> Result<(), CacheError> {
        let mut peers = self.peers.write();
        if peers.is_some() {
            return Err(CacheError::DuplicateRegistration);
        }
        *peers = Some(Arc::new(picker));
        Ok(())
    }

    /// Retrieves `key`, consulting the local cache, peers, and finally the
    /// local loader, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidKey`] for an empty key, or whatever
    /// error the loader produces on a total miss.
    pub fn get(&self, key: &str) -> Result<ByteView, CacheError> {
        self.metrics.record_request();

        if key.is_empty() {
            return Err(CacheError::InvalidKey);
        }

        if let Some(value) = self.cache.get(key) {
            log::debug!("group {}: local hit for {key}", self.name);
            self.metrics.record_hit();
            return Ok(value);
        }

        self.flights.do_call(key, || self.load(key))
    }

    /// Runs the miss path for `key`: try a remote peer, then the local loader.
    /// Invoked once per in-flight key regardless of how many callers coalesce
    /// on it.
    fn load(&self, key: &str) -> Result<ByteView, CacheError> {
        let picked = match self.peers.read().as_ref() {
            Some(picker) => picker.pick(key),
            None => PickedPeer::None,
        };

        if let PickedPeer::Remote(client) = picked {
            self.metrics.record_peer_call();
            match client.fetch(&self.name, key) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    log::warn!(
                        "group {}: peer fetch failed for {key}, falling back to loader: {err}",
                        self.name
                    );
                    self.metrics.record_peer_failure();
                }
            }
        }

        self.load_locally(key)
    }

    fn load_locally(&self, key: &str) -> Result<ByteView, CacheError> {
        self.metrics.record_loader_call();
        match self.loader.load(key) {
            Ok(value) => {
                self.cache.add(key.to_string(), value.clone());
                Ok(value)
            }
            Err(err) => {
                log::warn!("group {}: loader failed for {key}: {err}", self.name);
                self.metrics.record_loader_failure();
                Err(err)
            }
        }
    }
}
