//! A trivial in-memory backing store used as the demo's [`Loader`].
//!
//! Stands in for whatever slow-path data source (database, disk, upstream
//! service) a real deployment would wrap: `meshcache`'s core doesn't care
//! what's behind the loader, only that it can produce bytes for a key.

use meshcache::byte_view::ByteView;
use meshcache::error::CacheError;
use meshcache::peer::Loader;
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory key/value store that also counts how many times each key
/// was actually loaded, so the demo can show cache hits avoiding it.
pub struct BackingStore {
    data: Mutex<HashMap<String, String>>,
}

impl BackingStore {
    /// Seeds the store with `entries`.
    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        BackingStore {
            data: Mutex::new(entries.into_iter().collect()),
        }
    }

}

impl Loader for BackingStore {
    fn load(&self, key: &str) -> Result<ByteView, CacheError> {
        let data = self.data.lock().unwrap();
        match data.get(key) {
            Some(value) => {
                log::info!("backing store: loaded key {key}");
                Ok(ByteView::from(value.clone()))
            }
            None => Err(CacheError::LoaderFailure(format!("no such key: {key}"))),
        }
    }
}
