//! End-to-end scenarios exercising a [`Group`] through its public API,
//! without reaching into its private fields the way the unit tests do.

use meshcache::byte_view::ByteView;
use meshcache::config::GroupConfig;
use meshcache::error::CacheError;
use meshcache::group::Group;
use meshcache::peer::{PeerClient, PeerPicker, PickedPeer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

struct FailingPeer;
impl PeerClient for FailingPeer {
    fn fetch(&self, _group: &str, _key: &str) -> Result<ByteView, CacheError> {
        Err(CacheError::PeerUnavailable("down".to_string()))
    }
}

struct RemotePicker(Arc<dyn PeerClient>);
impl PeerPicker for RemotePicker {
    fn pick(&self, _key: &str) -> PickedPeer {
        PickedPeer::Remote(Arc::clone(&self.0))
    }
}

struct LocalPicker;
impl PeerPicker for LocalPicker {
    fn pick(&self, _key: &str) -> PickedPeer {
        PickedPeer::Local
    }
}

#[test]
fn concurrent_misses_for_the_same_key_invoke_the_loader_once() {
    let invocations = Arc::new(AtomicUsize::new(0));
    let loader_invocations = Arc::clone(&invocations);
    let group = Arc::new(
        Group::new(GroupConfig::new("hot-key", 0), move |key: &str| {
            loader_invocations.fetch_add(1, Ordering::SeqCst);
            thread::sleep(std::time::Duration::from_millis(20));
            Ok(ByteView::from(key.to_string()))
        })
        .unwrap(),
    );

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let group = Arc::clone(&group);
            thread::spawn(move || group.get("shared").unwrap().as_string())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "shared");
    }
    assert_eq!(invocations.load(Ordering::SeqCst), 1);
}

#[test]
fn remote_peer_failure_falls_back_to_the_local_loader() {
    let group = Group::new(GroupConfig::new("fallback", 0), |key: &str| {
        Ok(ByteView::from(format!("local:{key}")))
    })
    .unwrap();
    group.register_peers(RemotePicker(Arc::new(FailingPeer))).unwrap();

    let value = group.get("k").unwrap();
    assert_eq!(value.as_string(), "local:k");
    assert_eq!(group.metrics().peer_failures(), 1);
    assert_eq!(group.metrics().loader_calls(), 1);
}

#[test]
fn local_picker_never_reaches_a_peer_client() {
    let group = Group::new(GroupConfig::new("local-only", 0), |key: &str| {
        Ok(ByteView::from(format!("local:{key}")))
    })
    .unwrap();
    group.register_peers(LocalPicker).unwrap();

    let value = group.get("k").unwrap();
    assert_eq!(value.as_string(), "local:k");
    assert_eq!(group.metrics().peer_calls(), 0);
}

#[test]
fn byte_budget_eviction_causes_old_keys_to_reload() {
    let invocations = Arc::new(AtomicUsize::new(0));
    let loader_invocations = Arc::clone(&invocations);
    let group = Group::new(GroupConfig::new("bounded", 64), move |key: &str| {
        loader_invocations.fetch_add(1, Ordering::SeqCst);
        Ok(ByteView::from(key.to_string()))
    })
    .unwrap();

    for i in 0..50 {
        let key = format!("key-{i}");
        let _ = group.get(&key).unwrap();
    }
    let after_first_pass = invocations.load(Ordering::SeqCst);
    assert_eq!(after_first_pass, 50);

    // The earliest keys should have been evicted under the small byte
    // budget, so asking for them again must re-invoke the loader.
    let _ = group.get("key-0").unwrap();
    assert!(invocations.load(Ordering::SeqCst) > after_first_pass);
}
