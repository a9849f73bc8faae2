//! Access token and join session ledgers.
//!
//! Both ledgers are thin views over an injected [`ExpiringStore`]; neither
//! keeps any in-process state. Each ledger owns its own store so token and
//! session identifiers live in disjoint key spaces even when one string is
//! used as both.

use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use ygg_store::{ExpiringStore, StoreResult};

/// Generates an opaque token with UUIDv4 entropy.
pub fn generate_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Maps access tokens to the username they were issued for.
#[derive(Clone)]
pub struct TokenLedger {
    store: Arc<dyn ExpiringStore>,
    ttl: Duration,
}

impl TokenLedger {
    /// Creates a ledger over `store` issuing tokens that live for `ttl`.
    pub fn new(store: Arc<dyn ExpiringStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Issues a fresh token for `username`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn issue(&self, username: &str) -> StoreResult<String> {
        let token = generate_token();
        self.store.set(&token, username, Some(self.ttl))?;
        tracing::debug!(%username, ttl_ms = self.ttl.as_millis() as u64, "issued access token");
        Ok(token)
    }

    /// Returns the username bound to `token`, if it is still live.
    ///
    /// Never-issued, revoked and expired tokens all resolve to `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn resolve(&self, token: &str) -> StoreResult<Option<String>> {
        self.store.get(token)
    }

    /// Revokes `token`. Revoking an unknown token is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store delete fails.
    pub fn revoke(&self, token: &str) -> StoreResult<()> {
        self.store.del(token)
    }

    /// Revokes every token.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be cleared.
    pub fn clear(&self) -> StoreResult<()> {
        self.store.clear()
    }
}

/// Maps server IDs to the access token that joined them.
#[derive(Clone)]
pub struct JoinSessionLedger {
    store: Arc<dyn ExpiringStore>,
    ttl: Duration,
}

impl JoinSessionLedger {
    /// Creates a ledger over `store` recording sessions that live for `ttl`.
    pub fn new(store: Arc<dyn ExpiringStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Records that `access_token` joined `server_id`, replacing any earlier join.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn record(&self, server_id: &str, access_token: &str) -> StoreResult<()> {
        self.store.set(server_id, access_token, Some(self.ttl))
    }

    /// Returns the access token that last joined `server_id`.
    ///
    /// Resolution does not consume the session; it stays matchable until
    /// it expires or is overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn resolve(&self, server_id: &str) -> StoreResult<Option<String>> {
        self.store.get(server_id)
    }

    /// Drops every session.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be cleared.
    pub fn clear(&self) -> StoreResult<()> {
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use ygg_store::MemoryStore;

    fn token_ledger(ttl: Duration) -> TokenLedger {
        TokenLedger::new(Arc::new(MemoryStore::new()), ttl)
    }

    #[test]
    fn issue_and_resolve() {
        let ledger = token_ledger(Duration::from_secs(60));
        let token = ledger.issue("alice").unwrap();

        assert_eq!(token.len(), 32);
        assert_eq!(ledger.resolve(&token).unwrap().as_deref(), Some("alice"));
    }

    #[test]
    fn tokens_are_unique() {
        let ledger = token_ledger(Duration::from_secs(60));
        let a = ledger.issue("alice").unwrap();
        let b = ledger.issue("alice").unwrap();
        assert_ne!(a, b);
        assert_eq!(ledger.resolve(&a).unwrap().as_deref(), Some("alice"));
        assert_eq!(ledger.resolve(&b).unwrap().as_deref(), Some("alice"));
    }

    #[test]
    fn unknown_token_is_absent() {
        let ledger = token_ledger(Duration::from_secs(60));
        assert_eq!(ledger.resolve("nope").unwrap(), None);
        assert_eq!(ledger.resolve("").unwrap(), None);
    }

    #[test]
    fn revoke_is_idempotent() {
        let ledger = token_ledger(Duration::from_secs(60));
        let token = ledger.issue("alice").unwrap();

        ledger.revoke(&token).unwrap();
        ledger.revoke(&token).unwrap();
        ledger.revoke("never-issued").unwrap();

        assert_eq!(ledger.resolve(&token).unwrap(), None);
    }

    #[test]
    fn reject_expired_token() {
        let ledger = token_ledger(Duration::from_millis(10));
        let token = ledger.issue("alice").unwrap();

        thread::sleep(Duration::from_millis(40));

        assert_eq!(ledger.resolve(&token).unwrap(), None);
    }

    #[test]
    fn clear_revokes_everything() {
        let ledger = token_ledger(Duration::from_secs(60));
        let a = ledger.issue("alice").unwrap();
        let b = ledger.issue("bob").unwrap();

        ledger.clear().unwrap();

        assert_eq!(ledger.resolve(&a).unwrap(), None);
        assert_eq!(ledger.resolve(&b).unwrap(), None);
    }

    #[test]
    fn session_last_join_wins() {
        let sessions = JoinSessionLedger::new(Arc::new(MemoryStore::new()), Duration::from_secs(30));
        sessions.record("server", "first").unwrap();
        sessions.record("server", "second").unwrap();
        sessions.record("other", "third").unwrap();

        assert_eq!(sessions.resolve("server").unwrap().as_deref(), Some("second"));
        assert_eq!(sessions.resolve("other").unwrap().as_deref(), Some("third"));
    }

    #[test]
    fn session_resolve_does_not_consume() {
        let sessions = JoinSessionLedger::new(Arc::new(MemoryStore::new()), Duration::from_secs(30));
        sessions.record("server", "token").unwrap();

        assert!(sessions.resolve("server").unwrap().is_some());
        assert!(sessions.resolve("server").unwrap().is_some());
    }

    #[test]
    fn session_expires() {
        let sessions =
            JoinSessionLedger::new(Arc::new(MemoryStore::new()), Duration::from_millis(10));
        sessions.record("server", "token").unwrap();

        thread::sleep(Duration::from_millis(40));

        assert_eq!(sessions.resolve("server").unwrap(), None);
    }

    #[test]
    fn namespaces_are_disjoint() {
        let tokens = token_ledger(Duration::from_secs(60));
        let sessions = JoinSessionLedger::new(Arc::new(MemoryStore::new()), Duration::from_secs(30));

        let token = tokens.issue("alice").unwrap();
        // A server ID equal to the token string must not shadow the token.
        sessions.record(&token, "something-else").unwrap();

        assert_eq!(tokens.resolve(&token).unwrap().as_deref(), Some("alice"));
        assert_eq!(
            sessions.resolve(&token).unwrap().as_deref(),
            Some("something-else")
        );
    }
}
