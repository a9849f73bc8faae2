//! Expiring key-value store trait definition.

use crate::error::StoreResult;
use std::time::Duration;

/// A key-value store whose entries may expire.
///
/// Keys and values are opaque strings. The protocol engine uses one store
/// per namespace (access tokens, join sessions) so identifiers from different
/// ledgers can never collide. A single backend can serve both namespaces
/// through [`super::NamespacedStore`].
///
/// # Invariants
///
/// - `get` returns the value of the most recent `set`, until it is deleted,
///   cleared, or its TTL elapses
/// - An expired entry is indistinguishable from one that was never set
/// - `set` on an existing key replaces both the value and the TTL
/// - `del` of an absent key succeeds
/// - Each operation is atomic on its own; nothing spans keys
///
/// # Implementors
///
/// - [`super::MemoryStore`] - in-process reference implementation
/// - [`super::NamespacedStore`] - a key-prefixed view of another store
pub trait ExpiringStore: Send + Sync {
    /// Returns true if `key` holds a live entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn has(&self, key: &str) -> StoreResult<bool>;

    /// Returns the value stored at `key`, if live.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` at `key`.
    ///
    /// A `ttl` of `None` keeps the entry until it is deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> StoreResult<()>;

    /// Removes `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn del(&self, key: &str) -> StoreResult<()>;

    /// Removes every entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be cleared.
    fn clear(&self) -> StoreResult<()>;

    /// Removes every entry whose key starts with `prefix`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be cleared.
    fn clear_prefix(&self, prefix: &str) -> StoreResult<()>;
}
