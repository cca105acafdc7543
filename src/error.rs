//! Error types surfaced by the core.
//!
//! Four of the five variants correspond exactly to the error kinds named in
//! the design: two are recoverable runtime conditions
//! (`LoaderFailure`, `PeerUnavailable`), two are programmer errors
//! (`InvalidConfig`, `DuplicateRegistration`) that a well-behaved caller
//! should never trigger in production but that this crate reports via
//! `Result` rather than `panic!`, since a library should not decide to abort
//! its caller's process. `InvalidKey` resolves the empty-key open question
//! (see DESIGN.md) in favor of an explicit error over the source's silent
//! empty `ByteView`.

use thiserror::Error;

/// Errors produced by `meshcache`'s core operations.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    /// The group's [`crate::peer::Loader`] failed to produce a value for a key.
    #[error("loader failed for key: {0}")]
    LoaderFailure(String),

    /// A [`crate::peer::PeerClient`] call failed or returned a non-success result.
    ///
    /// This is recovered internally by [`crate::group::Group::get`] falling
    /// back to the local loader; it is only observed by callers when the
    /// fallback load itself also fails (in which case it is reported as the
    /// nested source of a `LoaderFailure`, not surfaced directly).
    #[error("peer unavailable: {0}")]
    PeerUnavailable(String),

    /// A group was constructed with an invalid configuration (e.g. no loader).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// `register_peers` was called a second time on the same group.
    #[error("peers already registered for this group")]
    DuplicateRegistration,

    /// The requested key was empty.
    #[error("invalid key: keys must be non-empty")]
    InvalidKey,
}
