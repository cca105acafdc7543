//! Process-wide `name -> Group` lookup (C7).
//!
//! Registration (`new_group`) takes an exclusive lock; lookup (`group`)
//! takes a shared lock, so concurrent readers never block each other.
//! Entries persist for the registry's lifetime — there is no
//! deregistration operation, matching the source, which never removes a
//! group once created.
//!
//! [`GroupRegistry`] is an ordinary, instantiable struct so tests can create
//! a scoped registry instead of sharing process-wide state; [`global()`]
//! exposes a single process-wide instance for callers that want exactly
//! what the source provides.

use crate::config::GroupConfig;
use crate::error::CacheError;
use crate::group::Group;
use crate::peer::Loader;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// A `name -> Group` table.
#[derive(Default)]
pub struct GroupRegistry {
    groups: RwLock<HashMap<String, Arc<Group>>>,
}

impl std::fmt::Debug for GroupRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupRegistry")
            .field("groups", &self.groups.read().len())
            .finish()
    }
}

impl GroupRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        GroupRegistry::default()
    }

    /// Creates a group under `config.name()` and registers it.
    ///
    /// If a group with the same name already exists, it is **replaced** —
    /// the prior `Arc<Group>` remains valid for any caller still holding it,
    /// but subsequent [`GroupRegistry::group`] lookups see the new one.
    ///
    /// # Errors
    ///
    /// Propagates [`CacheError::InvalidConfig`] from [`Group::new`].
    pub fn new_group(
        &self,
        config: GroupConfig,
        loader: impl Loader + 'static,
    ) -> Result<Arc<Group>, CacheError> {
        let name = config.name().to_string();
        let group = Arc::new(Group::new(config, loader)?);
        log::debug!("registry: registering group {name}");
        self.groups.write().insert(name, Arc::clone(&group));
        Ok(group)
    }

    /// Looks up a previously registered group by name.
    pub fn group(&self, name: &str) -> Option<Arc<Group>> {
        self.groups.read().get(name).cloned()
    }

    /// Number of registered groups.
    pub fn len(&self) -> usize {
        self.groups.read().len()
    }

    /// `true` if no groups have been registered.
    pub fn is_empty(&self) -> bool {
        self.groups.read().is_empty()
    }
}

/// The process-wide registry, initialized lazily on first use.
pub fn global() -> &'static GroupRegistry {
    static REGISTRY: OnceLock<GroupRegistry> = OnceLock::new();
    REGISTRY.get_or_init(GroupRegistry::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_view::ByteView;

    fn echo_loader() -> impl Loader {
        |key: &str| Ok(ByteView::from(key.to_string()))
    }

    #[test]
    fn lookup_of_unknown_name_returns_none() {
        let registry = GroupRegistry::new();
        assert!(registry.group("nope").is_none());
    }

    #[test]
    fn registered_group_is_reachable_by_name() {
        let registry = GroupRegistry::new();
        registry
            .new_group(GroupConfig::new("scores", 0), echo_loader())
            .unwrap();

        let group = registry.group("scores").unwrap();
        assert_eq!(group.name(), "scores");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn re_registering_a_name_replaces_the_existing_group() {
        let registry = GroupRegistry::new();
        let first = registry
            .new_group(GroupConfig::new("scores", 0), echo_loader())
            .unwrap();
        let second = registry
            .new_group(GroupConfig::new("scores", 1024), echo_loader())
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(registry.group("scores").unwrap().name(), "scores");
    }

    #[test]
    fn the_process_wide_registry_is_a_single_shared_instance() {
        global()
            .new_group(
                GroupConfig::new("registry_tests_global_probe", 0),
                echo_loader(),
            )
            .unwrap();
        assert!(global().group("registry_tests_global_probe").is_some());
    }
}
