//! Configuration structures.
//!
//! Each construction-time configuration for `meshcache` gets its own struct,
//! following `cache-rs`'s config-module convention: a single entry point
//! struct per component instead of a long constructor argument list.

/// Configuration for a [`crate::group::Group`].
///
/// # Examples
///
/// ```
/// use meshcache::config::GroupConfig;
///
/// let config = GroupConfig::new("scores", 2 << 10);
/// assert_eq!(config.name(), "scores");
/// assert_eq!(config.max_bytes(), 2 << 10);
/// ```
#[derive(Debug, Clone)]
pub struct GroupConfig {
    name: String,
    max_bytes: u64,
}

impl GroupConfig {
    /// Creates a configuration for a group named `name` with the given byte
    /// budget (`0` means unbounded).
    pub fn new(name: impl Into<String>, max_bytes: u64) -> Self {
        GroupConfig {
            name: name.into(),
            max_bytes,
        }
    }

    /// The group's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The group's local cache byte budget.
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }
}

/// Configuration for a [`crate::ring::HashRing`].
///
/// # Examples
///
/// ```
/// use meshcache::config::HashRingConfig;
///
/// let config = HashRingConfig::new(50);
/// assert_eq!(config.replicas(), 50);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HashRingConfig {
    replicas: usize,
}

impl HashRingConfig {
    /// Creates a configuration with `replicas` virtual nodes per peer.
    pub fn new(replicas: usize) -> Self {
        HashRingConfig { replicas }
    }

    /// Virtual nodes generated per real peer.
    pub fn replicas(&self) -> usize {
        self.replicas
    }
}

impl Default for HashRingConfig {
    fn default() -> Self {
        HashRingConfig::new(crate::ring::HashRing::DEFAULT_REPLICAS)
    }
}
