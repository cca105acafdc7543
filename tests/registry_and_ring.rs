//! Integration tests tying the registry and the hash ring to a [`PeerPicker`]
//! the way a real deployment would.

use meshcache::byte_view::ByteView;
use meshcache::config::GroupConfig;
use meshcache::error::CacheError;
use meshcache::peer::{PeerClient, PeerPicker, PickedPeer};
use meshcache::{GroupRegistry, HashRing};
use std::sync::Arc;

/// A [`PeerPicker`] that routes through a [`HashRing`], treating one peer id
/// as "this process" so self-routes resolve to [`PickedPeer::Local`].
struct RingPicker {
    ring: HashRing,
    self_id: String,
    client: Arc<dyn PeerClient>,
}

impl PeerPicker for RingPicker {
    fn pick(&self, key: &str) -> PickedPeer {
        match self.ring.get(key) {
            None => PickedPeer::None,
            Some(owner) if owner == self.self_id => PickedPeer::Local,
            Some(_) => PickedPeer::Remote(Arc::clone(&self.client)),
        }
    }
}

struct RecordingClient {
    calls: std::sync::atomic::AtomicUsize,
}

impl PeerClient for RecordingClient {
    fn fetch(&self, _group: &str, key: &str) -> Result<ByteView, CacheError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(ByteView::from(format!("remote:{key}")))
    }
}

#[test]
fn registry_backed_group_routes_through_the_ring() {
    let registry = GroupRegistry::new();
    let group = registry
        .new_group(GroupConfig::new("routed", 0), |key: &str| {
            Ok(ByteView::from(format!("local:{key}")))
        })
        .unwrap();

    let mut ring = HashRing::new();
    ring.add(["self", "peer-a", "peer-b"]);
    let client = Arc::new(RecordingClient {
        calls: std::sync::atomic::AtomicUsize::new(0),
    });
    group
        .register_peers(RingPicker {
            ring,
            self_id: "self".to_string(),
            client: client.clone(),
        })
        .unwrap();

    // Every key either resolves locally or via the recording client; no
    // other outcome is possible with this picker.
    for i in 0..20 {
        let key = format!("item-{i}");
        let value = registry.group("routed").unwrap().get(&key).unwrap();
        assert!(value.as_string() == format!("local:{key}") || value.as_string() == format!("remote:{key}"));
    }
}

#[test]
fn lookups_on_an_unregistered_name_find_nothing() {
    let registry = GroupRegistry::new();
    assert!(registry.group("never-registered").is_none());
}

#[test]
fn two_independent_registries_do_not_share_state() {
    let a = GroupRegistry::new();
    let b = GroupRegistry::new();

    a.new_group(GroupConfig::new("only-in-a", 0), |key: &str| {
        Ok(ByteView::from(key.to_string()))
    })
    .unwrap();

    assert!(a.group("only-in-a").is_some());
    assert!(b.group("only-in-a").is_none());
}
