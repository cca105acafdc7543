//! Trait seams connecting a [`crate::group::Group`] to its data source and
//! its peers.
//!
//! Three roles, matching the source's `Getter` and `PeerPicker`/`PeerGetter`
//! interfaces:
//!
//! - [`Loader`] — produces a value for a key that is missing everywhere.
//!   Exactly one per group, supplied at construction time.
//! - [`PeerPicker`] — given a key, decides which peer (if any) owns it. In
//!   practice this wraps a [`crate::ring::HashRing`], but it is a trait so
//!   tests can substitute fixed routing.
//! - [`PeerClient`] — fetches a key from one specific remote peer.

use crate::byte_view::ByteView;
use crate::error::CacheError;
use std::sync::Arc;

/// Loads a value for a key on a total cache miss (local and peer both empty).
///
/// Implementations should treat `key` as opaque; they are never called with
/// an empty key (the group rejects those before reaching the loader).
pub trait Loader: Send + Sync {
    /// Produces the value for `key`, or an error if none can be produced.
    fn load(&self, key: &str) -> Result<ByteView, CacheError>;
}

/// Blanket impl so a plain closure can serve as a [`Loader`], matching how
/// the source's `GetterFunc` adapts a function value to its interface.
impl<F> Loader for F
where
    F: Fn(&str) -> Result<ByteView, CacheError> + Send + Sync,
{
    fn load(&self, key: &str) -> Result<ByteView, CacheError> {
        self(key)
    }
}

/// The outcome of asking a [`PeerPicker`] who owns a key.
#[derive(Clone)]
pub enum PickedPeer {
    /// The current process owns this key; go straight to the local loader.
    Local,
    /// A remote peer owns this key; fetch it through the given client.
    Remote(Arc<dyn PeerClient>),
    /// No peers are registered at all; fall back to the local loader.
    None,
}

impl std::fmt::Debug for PickedPeer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PickedPeer::Local => f.write_str("PickedPeer::Local"),
            PickedPeer::Remote(_) => f.write_str("PickedPeer::Remote(..)"),
            PickedPeer::None => f.write_str("PickedPeer::None"),
        }
    }
}

/// Decides which peer owns a given key.
///
/// Implementations must resolve ties with the local process consistently:
/// if the ring's answer names the peer that *is* the local process, return
/// [`PickedPeer::Local`] rather than [`PickedPeer::Remote`], so the group
/// never calls out over the network to reach itself.
pub trait PeerPicker: Send + Sync {
    /// Selects the peer responsible for `key`.
    fn pick(&self, key: &str) -> PickedPeer;
}

/// Fetches a key's value from one specific remote peer.
pub trait PeerClient: Send + Sync {
    /// Retrieves `key` from `group` as owned by this peer.
    ///
    /// Returns [`CacheError::PeerUnavailable`] (or any other variant) on
    /// failure; the caller falls back to the local loader rather than
    /// propagating the error directly.
    fn fetch(&self, group: &str, key: &str) -> Result<ByteView, CacheError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_closure_satisfies_the_loader_trait() {
        let loader = |key: &str| Ok(ByteView::from(key.to_string()));
        let value = loader.load("hello").unwrap();
        assert_eq!(value.as_string(), "hello");
    }

    struct AlwaysFails;
    impl PeerClient for AlwaysFails {
        fn fetch(&self, _group: &str, _key: &str) -> Result<ByteView, CacheError> {
            Err(CacheError::PeerUnavailable("no route".to_string()))
        }
    }

    #[test]
    fn picked_peer_remote_carries_a_working_client() {
        let picked = PickedPeer::Remote(Arc::new(AlwaysFails));
        match picked {
            PickedPeer::Remote(client) => {
                assert!(client.fetch("g", "k").is_err());
            }
            _ => panic!("expected Remote"),
        }
    }
}
