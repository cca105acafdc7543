//! JSON-over-TCP wire envelope for peer-to-peer fetches.
//!
//! A direct transliteration of `geecache/http.go`'s `/<group>/<key>` path
//! convention onto a line-oriented TCP protocol: one JSON-encoded
//! [`PeerRequest`] per line in, one JSON-encoded [`PeerResponse`] (or
//! [`PeerError`]) per line out. This intentionally skips a full HTTP stack —
//! the core has no use for one, and the demo only needs enough wire format
//! to prove the `PeerClient`/`PeerPicker` seam works end to end.

use serde::{Deserialize, Serialize};

/// A request to fetch `key` from `group` on a specific peer.
#[derive(Debug, Serialize, Deserialize)]
pub struct PeerRequest {
    pub group: String,
    pub key: String,
}

/// The wire reply to a [`PeerRequest`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum PeerResponse {
    /// The peer holds `key` and returns its bytes.
    #[serde(rename = "ok")]
    Ok { value: Vec<u8> },
    /// The peer failed to produce a value (no such group, loader error, ...).
    #[serde(rename = "error")]
    Error { message: String },
}
