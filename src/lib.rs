#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Request Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Group::get(key)                             │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                     │
//! │   local cache hit? ──Yes──▶ return ByteView                         │
//! │        │                                                            │
//! │        No                                                           │
//! │        ▼                                                            │
//! │   FlightGroup::do_call(key, ...)  (coalesce concurrent misses)      │
//! │        │                                                            │
//! │        ▼                                                            │
//! │   PeerPicker::pick(key)                                             │
//! │        │                                                            │
//! │   ┌────┴─────┐                                                      │
//! │   Remote      Local / None                                          │
//! │   │                │                                                 │
//! │   ▼                ▼                                                │
//! │ PeerClient::fetch   Loader::load ──▶ ConcurrentCache::add            │
//! │   │ (on error, falls through to Loader)                              │
//! │   └──────────────────────────────────▶ returned, NOT cached locally │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Reference
//!
//! | Type | Role |
//! |------|------|
//! | [`ByteView`] | Immutable, cheaply cloneable view over cached bytes |
//! | [`LruStore`] | Single-threaded, byte-budgeted LRU store |
//! | [`ConcurrentCache`] | Thread-safe wrapper around [`LruStore`] |
//! | [`HashRing`] | Consistent-hash ring mapping keys to peer ids |
//! | [`FlightGroup`] | Per-key request coalescing ("singleflight") |
//! | [`Group`] | Orchestrates cache, peers, and loader for one named cache |
//! | [`GroupRegistry`] | Process-wide `name -> Group` lookup |
//!
//! ## Example
//!
//! ```rust
//! use meshcache::config::GroupConfig;
//! use meshcache::group::Group;
//!
//! let group = Group::new(
//!     GroupConfig::new("scores", 64 * 1024),
//!     |key: &str| Ok(meshcache::byte_view::ByteView::from(key.to_uppercase())),
//! ).unwrap();
//!
//! let value = group.get("alice").unwrap();
//! assert_eq!(value.as_string(), "ALICE");
//!
//! // Second call is served from the local cache; the loader does not run again.
//! let cached = group.get("alice").unwrap();
//! assert_eq!(cached.as_string(), "ALICE");
//! ```
//!
//! ## Modules
//!
//! - [`byte_view`]: immutable, shareable byte buffers handed to callers
//! - [`lru`]: single-threaded byte-budgeted LRU store
//! - [`concurrent`]: thread-safe wrapper around the LRU store
//! - [`ring`]: consistent-hash ring for peer ownership
//! - [`flight`]: per-key request coalescing
//! - [`peer`]: trait seams connecting a group to its loader and peers
//! - [`group`]: the read-through cache orchestrator
//! - [`registry`]: process-wide group registry
//! - [`config`]: construction-time configuration structures
//! - [`metrics`]: per-group operation counters
//! - [`error`]: error types surfaced by the core

/// Immutable, cheaply shareable view over cached byte data.
pub mod byte_view;

/// Safe, index-addressed doubly linked list backing the LRU store.
///
/// Internal infrastructure; not part of the public API.
pub(crate) mod list;

/// Single-threaded, byte-budgeted LRU store.
pub mod lru;

/// Thread-safe wrapper around [`lru::LruStore`].
pub mod concurrent;

/// Consistent-hash ring mapping keys to peer identifiers.
pub mod ring;

/// Per-key request coalescing ("singleflight").
pub mod flight;

/// Trait seams connecting a group to its data source and its peers.
pub mod peer;

/// The read-through cache orchestrator.
pub mod group;

/// Process-wide `name -> Group` lookup.
pub mod registry;

/// Construction-time configuration structures.
pub mod config;

/// Per-group operation counters.
pub mod metrics;

/// Error types surfaced by the core.
pub mod error;

pub use byte_view::ByteView;
pub use concurrent::ConcurrentCache;
pub use error::CacheError;
pub use flight::FlightGroup;
pub use group::Group;
pub use lru::LruStore;
pub use registry::{global as global_registry, GroupRegistry};
pub use ring::HashRing;
