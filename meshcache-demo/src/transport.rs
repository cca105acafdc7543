//! Minimal `std::net` TCP transport carrying the wire envelope from
//! [`crate::wire`].
//!
//! One blocking thread per connection (`std::net::TcpListener::incoming`),
//! matching the weight of the rest of this demo: it exists to prove the
//! `PeerClient`/`PeerPicker` seam works over a real socket, not to be a
//! production server.

use crate::wire::{PeerRequest, PeerResponse};
use meshcache::byte_view::ByteView;
use meshcache::error::CacheError;
use meshcache::group::Group;
use meshcache::peer::PeerClient;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

/// Serves peer requests for `group` by running its loader locally and never
/// itself consulting any `PeerPicker` — this process is always treated as
/// the authoritative owner for the keys it is asked about here.
pub fn serve(bind_addr: &str, group: Arc<Group>) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_addr)?;
    log::info!("meshcache-demo: serving group {} on {bind_addr}", group.name());

    for stream in listener.incoming() {
        let stream = stream?;
        let group = Arc::clone(&group);
        thread::spawn(move || {
            if let Err(err) = handle_connection(stream, &group) {
                log::warn!("meshcache-demo: connection error: {err}");
            }
        });
    }
    Ok(())
}

fn handle_connection(mut stream: TcpStream, group: &Group) -> std::io::Result<()> {
    let peer_addr = stream.peer_addr()?;
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut line = String::new();
    reader.read_line(&mut line)?;

    let response = match serde_json::from_str::<PeerRequest>(line.trim_end()) {
        Ok(request) if request.group == group.name() => match group.get(&request.key) {
            Ok(value) => PeerResponse::Ok {
                value: value.copy_out(),
            },
            Err(err) => PeerResponse::Error {
                message: err.to_string(),
            },
        },
        Ok(request) => PeerResponse::Error {
            message: format!("peer does not serve group {}", request.group),
        },
        Err(err) => PeerResponse::Error {
            message: format!("malformed request: {err}"),
        },
    };

    let mut body = serde_json::to_string(&response)?;
    body.push('\n');
    stream.write_all(body.as_bytes())?;
    log::debug!("meshcache-demo: served request from {peer_addr}");
    Ok(())
}

/// A [`PeerClient`] that fetches over a TCP connection opened fresh per
/// call, matching the simplicity of [`serve`]'s one-thread-per-connection
/// server.
pub struct TcpPeerClient {
    addr: String,
}

impl TcpPeerClient {
    /// Creates a client that dials `addr` (e.g. `"127.0.0.1:7070"`) per call.
    pub fn new(addr: impl Into<String>) -> Self {
        TcpPeerClient { addr: addr.into() }
    }
}

impl PeerClient for TcpPeerClient {
    fn fetch(&self, group: &str, key: &str) -> Result<ByteView, CacheError> {
        let mut stream = TcpStream::connect(&self.addr)
            .map_err(|err| CacheError::PeerUnavailable(format!("{}: {err}", self.addr)))?;

        let request = PeerRequest {
            group: group.to_string(),
            key: key.to_string(),
        };
        let mut body = serde_json::to_string(&request)
            .map_err(|err| CacheError::PeerUnavailable(err.to_string()))?;
        body.push('\n');
        stream
            .write_all(body.as_bytes())
            .map_err(|err| CacheError::PeerUnavailable(err.to_string()))?;

        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        reader
            .read_line(&mut line)
            .map_err(|err| CacheError::PeerUnavailable(err.to_string()))?;

        let response: PeerResponse = serde_json::from_str(line.trim_end())
            .map_err(|err| CacheError::PeerUnavailable(err.to_string()))?;

        match response {
            PeerResponse::Ok { value } => Ok(ByteView::from(value)),
            PeerResponse::Error { message } => Err(CacheError::PeerUnavailable(message)),
        }
    }
}
