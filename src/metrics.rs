//! Per-group counters for the read-through miss path.
//!
//! Shaped after `cache-rs`'s own `CoreCacheMetrics` — a plain counters
//! struct with a `to_btreemap()` reporting method, so output ordering is
//! deterministic for tests and logs — but specialized to the operations a
//! [`crate::group::Group`] actually performs: cache probes, loader
//! invocations, and peer fetches, rather than an eviction-policy's
//! frequency/age bookkeeping.
//!
//! Counters are plain `AtomicU64`s rather than requiring `&mut self`, since
//! a `Group` is queried from arbitrarily many threads and metrics recording
//! must never take a lock of its own.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters tracked for a single [`crate::group::Group`].
#[derive(Debug, Default)]
pub struct GroupMetrics {
    requests: AtomicU64,
    hits: AtomicU64,
    loader_calls: AtomicU64,
    loader_failures: AtomicU64,
    peer_calls: AtomicU64,
    peer_failures: AtomicU64,
}

impl GroupMetrics {
    /// Creates a zeroed counter set.
    pub fn new() -> Self {
        GroupMetrics::default()
    }

    pub(crate) fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_loader_call(&self) {
        self.loader_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_loader_failure(&self) {
        self.loader_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_peer_call(&self) {
        self.peer_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_peer_failure(&self) {
        self.peer_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Total `Group::get` calls observed.
    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// Requests served directly from the local cache.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Ratio of hits to requests, or `0.0` if there have been no requests.
    pub fn hit_rate(&self) -> f64 {
        let requests = self.requests();
        if requests == 0 {
            0.0
        } else {
            self.hits() as f64 / requests as f64
        }
    }

    /// Number of times the local [`crate::peer::Loader`] was invoked.
    pub fn loader_calls(&self) -> u64 {
        self.loader_calls.load(Ordering::Relaxed)
    }

    /// Number of times the local loader returned an error.
    pub fn loader_failures(&self) -> u64 {
        self.loader_failures.load(Ordering::Relaxed)
    }

    /// Number of times a remote [`crate::peer::PeerClient`] was called.
    pub fn peer_calls(&self) -> u64 {
        self.peer_calls.load(Ordering::Relaxed)
    }

    /// Number of remote calls that failed and fell back to the local loader.
    pub fn peer_failures(&self) -> u64 {
        self.peer_failures.load(Ordering::Relaxed)
    }

    /// Renders all counters and derived rates in deterministic key order.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();
        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("hits".to_string(), self.hits() as f64);
        metrics.insert("loader_calls".to_string(), self.loader_calls() as f64);
        metrics.insert("loader_failures".to_string(), self.loader_failures() as f64);
        metrics.insert("peer_calls".to_string(), self.peer_calls() as f64);
        metrics.insert("peer_failures".to_string(), self.peer_failures() as f64);
        metrics.insert("requests".to_string(), self.requests() as f64);
        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_is_zero_with_no_requests() {
        let metrics = GroupMetrics::new();
        assert_eq!(metrics.hit_rate(), 0.0);
    }

    #[test]
    fn counters_accumulate() {
        let metrics = GroupMetrics::new();
        metrics.record_request();
        metrics.record_hit();
        metrics.record_request();
        metrics.record_loader_call();

        assert_eq!(metrics.requests(), 2);
        assert_eq!(metrics.hits(), 1);
        assert_eq!(metrics.loader_calls(), 1);
        assert_eq!(metrics.hit_rate(), 0.5);
    }
}
