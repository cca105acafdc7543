//! A [`PeerPicker`] backed by a [`HashRing`] plus a static address book,
//! resolving the ring's "owner" answer to [`PickedPeer::Local`] when it
//! names this process.

use crate::transport::TcpPeerClient;
use meshcache::peer::{PeerClient, PeerPicker, PickedPeer};
use meshcache::HashRing;
use std::collections::HashMap;
use std::sync::Arc;

/// Maps ring peer ids to dialable TCP addresses and knows which id is
/// "this process".
pub struct RingPicker {
    ring: HashRing,
    self_id: String,
    clients: HashMap<String, Arc<dyn PeerClient>>,
}

impl RingPicker {
    /// Builds a ring over every entry in `addresses` (including this
    /// process's own `self_id` -> address), then routes through it.
    pub fn new(self_id: impl Into<String>, addresses: impl IntoIterator<Item = (String, String)>) -> Self {
        let self_id = self_id.into();
        let mut ring = HashRing::new();
        let mut clients: HashMap<String, Arc<dyn PeerClient>> = HashMap::new();
        let mut ids = Vec::new();

        for (id, addr) in addresses {
            ids.push(id.clone());
            clients.insert(id, Arc::new(TcpPeerClient::new(addr)));
        }
        ring.add(ids);

        RingPicker {
            ring,
            self_id,
            clients,
        }
    }
}

impl PeerPicker for RingPicker {
    fn pick(&self, key: &str) -> PickedPeer {
        match self.ring.get(key) {
            None => PickedPeer::None,
            Some(owner) if owner == self.self_id => PickedPeer::Local,
            Some(owner) => match self.clients.get(owner) {
                Some(client) => PickedPeer::Remote(Arc::clone(client)),
                None => PickedPeer::None,
            },
        }
    }
}
