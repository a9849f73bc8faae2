//! Key-prefixed view of another store.

use crate::backend::ExpiringStore;
use crate::error::StoreResult;
use std::sync::Arc;
use std::time::Duration;

/// An [`ExpiringStore`] that prefixes every key with a namespace.
///
/// Lets one physical backend hold several disjoint key spaces. The namespace
/// and the key are joined with `:`, so two views with different namespaces
/// never address the same underlying key. [`ExpiringStore::clear`] only
/// drops this namespace.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use ygg_store::{ExpiringStore, MemoryStore, NamespacedStore};
///
/// let backend: Arc<dyn ExpiringStore> = Arc::new(MemoryStore::new());
/// let tokens = NamespacedStore::new(Arc::clone(&backend), "token");
/// let sessions = NamespacedStore::new(backend, "session");
///
/// tokens.set("abc", "alice", None).unwrap();
/// assert_eq!(sessions.get("abc").unwrap(), None);
/// ```
#[derive(Clone)]
pub struct NamespacedStore {
    inner: Arc<dyn ExpiringStore>,
    prefix: String,
}

impl NamespacedStore {
    /// Wraps `inner`, scoping every key under `namespace`.
    pub fn new(inner: Arc<dyn ExpiringStore>, namespace: &str) -> Self {
        Self {
            inner,
            prefix: format!("{namespace}:"),
        }
    }

    /// Returns the key prefix, including the separator.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn scoped(&self, key: &str) -> String {
        format!("{}{key}", self.prefix)
    }
}

impl std::fmt::Debug for NamespacedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamespacedStore")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl ExpiringStore for NamespacedStore {
    fn has(&self, key: &str) -> StoreResult<bool> {
        self.inner.has(&self.scoped(key))
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get(&self.scoped(key))
    }

    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> StoreResult<()> {
        self.inner.set(&self.scoped(key), value, ttl)
    }

    fn del(&self, key: &str) -> StoreResult<()> {
        self.inner.del(&self.scoped(key))
    }

    fn clear(&self) -> StoreResult<()> {
        self.inner.clear_prefix(&self.prefix)
    }

    fn clear_prefix(&self, prefix: &str) -> StoreResult<()> {
        self.inner.clear_prefix(&self.scoped(prefix))
    }
}
