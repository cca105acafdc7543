//! Immutable, copy-out-only byte payload.
//!
//! `ByteView` is the value type that flows out of every cache hit and every
//! successful load. It owns its bytes once and never hands out a mutable
//! alias into them — callers that need to mutate take an owned copy via
//! [`ByteView::copy_out`].

use std::fmt;
use std::sync::Arc;

/// An immutable view of a byte payload.
///
/// Internally backed by `Arc<[u8]>` so that cloning a `ByteView` out from
/// behind [`crate::concurrent::ConcurrentCache`]'s lock is cheap — it bumps a
/// refcount rather than duplicating the backing allocation. This is purely an
/// internal-sharing optimization: no operation on `ByteView` ever exposes a
/// mutable reference into the shared bytes, so the sharing is never
/// observable as aliasing.
#[derive(Clone, PartialEq, Eq)]
pub struct ByteView {
    bytes: Arc<[u8]>,
}

impl ByteView {
    /// Takes ownership of `bytes` and wraps them in an immutable view.
    pub fn new(bytes: Vec<u8>) -> Self {
        ByteView {
            bytes: Arc::from(bytes),
        }
    }

    /// Returns the number of bytes in the view.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the view holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns a fresh, owned copy of the bytes.
    ///
    /// This always allocates — it never returns a view into the shared
    /// storage, so the caller's copy can be mutated freely without affecting
    /// any other holder of this `ByteView`.
    pub fn copy_out(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    /// Reinterprets the bytes as the runtime's native string type.
    ///
    /// This is a lossy, best-effort conversion (`String::from_utf8_lossy`):
    /// the source this crate is derived from treats cached payloads as raw
    /// bytes reinterpreted as text, with no guarantee the payload is valid
    /// UTF-8. Callers that need strict validation should use
    /// [`ByteView::copy_out`] and `String::from_utf8` themselves.
    pub fn as_string(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    /// Returns the raw bytes as a borrowed slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const PREVIEW_LEN: usize = 16;
        let preview = &self.bytes[..self.bytes.len().min(PREVIEW_LEN)];
        f.debug_struct("ByteView")
            .field("len", &self.bytes.len())
            .field(
                "preview",
                &format_args!("{:02x?}{}", preview, if self.bytes.len() > PREVIEW_LEN { "..." } else { "" }),
            )
            .finish()
    }
}

impl From<Vec<u8>> for ByteView {
    fn from(bytes: Vec<u8>) -> Self {
        ByteView::new(bytes)
    }
}

impl From<&str> for ByteView {
    fn from(s: &str) -> Self {
        ByteView::new(s.as_bytes().to_vec())
    }
}

impl From<String> for ByteView {
    fn from(s: String) -> Self {
        ByteView::new(s.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_out_round_trips_and_does_not_alias() {
        let original = vec![1u8, 2, 3, 4];
        let view = ByteView::new(original.clone());
        let copy = view.copy_out();
        assert_eq!(copy, original);

        // Mutating the copy must never affect the view.
        let mut mutated = copy;
        mutated[0] = 99;
        assert_eq!(view.copy_out(), original);
    }

    #[test]
    fn clone_shares_storage_but_copy_out_still_allocates_fresh() {
        let view = ByteView::new(vec![5, 6, 7]);
        let clone = view.clone();
        assert!(Arc::ptr_eq(&view.bytes, &clone.bytes));

        let a = view.copy_out();
        let b = clone.copy_out();
        assert_eq!(a, b);
        assert_ne!(a.as_ptr(), b.as_ptr());
    }

    #[test]
    fn as_string_reinterprets_bytes() {
        let view = ByteView::from("hello");
        assert_eq!(view.as_string(), "hello");
        assert_eq!(view.len(), 5);
    }
}
