//! Account fixtures and failing stores.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use ygg_protocol::{
    unsigned_uuid_from_bytes, Profile, ProfileProperty, Texture, Textures, UnsignedUuid, User,
};
use ygg_store::{DataStore, ExpiringStore, MemoryStore, StoreError, StoreResult};

/// Skin host used by fixture textures.
pub const SKIN_HOST: &str = "http://textures.example.com";

/// An account in a [`MemoryDataStore`].
#[derive(Debug, Clone)]
pub struct Account {
    /// Login name.
    pub username: String,
    /// Plain-text password.
    pub password: String,
    /// User record.
    pub user: User,
    /// Owned profiles.
    pub profiles: Vec<Profile>,
    /// Selected profile ID.
    pub selected: Option<UnsignedUuid>,
}

impl Account {
    /// Creates an account owning one offline profile named after the user.
    ///
    /// The profile carries a structured `textures` property with a skin and
    /// is selected.
    pub fn offline(username: &str, password: &str) -> Self {
        let profile = Profile::offline(username);
        let textures = Textures::for_profile(&profile)
            .with_skin(Texture::new(format!("{SKIN_HOST}/skin/{}", profile.id)));
        let property = ProfileProperty::textures(&textures).expect("textures serialize");
        let profile = profile.with_property(property);

        Self {
            username: username.to_string(),
            password: password.to_string(),
            user: User::new(unsigned_uuid_from_bytes(format!("user:{username}")))
                .with_property("preferredLanguage", "en"),
            selected: Some(profile.id.clone()),
            profiles: vec![profile],
        }
    }

    /// Adds another offline profile without properties.
    pub fn with_profile(mut self, name: &str) -> Self {
        self.profiles.push(Profile::offline(name));
        self
    }

    /// Clears the profile selection.
    pub fn without_selection(mut self) -> Self {
        self.selected = None;
        self
    }
}

/// An in-memory [`DataStore`].
///
/// Selections made through [`DataStore::set_current_profile`] are kept.
#[derive(Debug, Default)]
pub struct MemoryDataStore {
    accounts: RwLock<Vec<Account>>,
}

impl MemoryDataStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an account.
    pub fn with_account(self, account: Account) -> Self {
        self.accounts.write().push(account);
        self
    }

    /// Returns the selected profile ID of `username`.
    pub fn selected(&self, username: &str) -> Option<UnsignedUuid> {
        self.accounts
            .read()
            .iter()
            .find(|a| a.username == username)
            .and_then(|a| a.selected.clone())
    }

    fn with_user<T>(&self, username: &str, f: impl FnOnce(&Account) -> T) -> Option<T> {
        self.accounts
            .read()
            .iter()
            .find(|a| a.username == username)
            .map(f)
    }

    fn find_profile(&self, predicate: impl Fn(&Profile) -> bool) -> Option<Profile> {
        self.accounts
            .read()
            .iter()
            .flat_map(|a| a.profiles.iter())
            .find(|p| predicate(p))
            .cloned()
    }
}

impl DataStore for MemoryDataStore {
    fn find_user(&self, username: &str, password: &str) -> StoreResult<Option<User>> {
        Ok(self
            .with_user(username, |a| (a.password == password).then(|| a.user.clone()))
            .flatten())
    }

    fn get_user(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self.with_user(username, |a| a.user.clone()))
    }

    fn get_current_profile(&self, username: &str) -> StoreResult<Option<Profile>> {
        Ok(self
            .with_user(username, |a| {
                let selected = a.selected.as_ref()?;
                a.profiles.iter().find(|p| &p.id == selected).cloned()
            })
            .flatten())
    }

    fn set_current_profile(&self, username: &str, profile: &Profile) -> StoreResult<bool> {
        let mut accounts = self.accounts.write();
        let Some(account) = accounts.iter_mut().find(|a| a.username == username) else {
            return Ok(false);
        };
        if !account.profiles.iter().any(|p| p.id == profile.id) {
            return Ok(false);
        }
        account.selected = Some(profile.id.clone());
        Ok(true)
    }

    fn get_profiles(&self, username: &str) -> StoreResult<Vec<Profile>> {
        Ok(self
            .with_user(username, |a| a.profiles.clone())
            .unwrap_or_default())
    }

    fn get_profile_by_uuid(&self, uuid: &str) -> StoreResult<Option<Profile>> {
        Ok(self.find_profile(|p| p.id == uuid))
    }

    fn get_profile_by_name(&self, name: &str) -> StoreResult<Option<Profile>> {
        Ok(self.find_profile(|p| p.name == name))
    }
}

fn unavailable() -> StoreError {
    StoreError::Unavailable("connection refused".into())
}

/// An [`ExpiringStore`] whose every operation fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingStore;

impl ExpiringStore for FailingStore {
    fn has(&self, _key: &str) -> StoreResult<bool> {
        Err(unavailable())
    }

    fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(unavailable())
    }

    fn set(&self, _key: &str, _value: &str, _ttl: Option<Duration>) -> StoreResult<()> {
        Err(unavailable())
    }

    fn del(&self, _key: &str) -> StoreResult<()> {
        Err(unavailable())
    }

    fn clear(&self) -> StoreResult<()> {
        Err(unavailable())
    }

    fn clear_prefix(&self, _prefix: &str) -> StoreResult<()> {
        Err(unavailable())
    }
}

/// A [`MemoryStore`] whose writes can be made to fail.
///
/// Reads and deletes always succeed; only `set` is affected.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    /// Creates a store that accepts writes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent `set` calls fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl ExpiringStore for FlakyStore {
    fn has(&self, key: &str) -> StoreResult<bool> {
        self.inner.has(key)
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("write rejected".into()));
        }
        self.inner.set(key, value, ttl)
    }

    fn del(&self, key: &str) -> StoreResult<()> {
        self.inner.del(key)
    }

    fn clear(&self) -> StoreResult<()> {
        self.inner.clear()
    }

    fn clear_prefix(&self, prefix: &str) -> StoreResult<()> {
        self.inner.clear_prefix(prefix)
    }
}

/// A [`DataStore`] whose every operation fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingDataStore;

impl DataStore for FailingDataStore {
    fn find_user(&self, _username: &str, _password: &str) -> StoreResult<Option<User>> {
        Err(unavailable())
    }

    fn get_user(&self, _username: &str) -> StoreResult<Option<User>> {
        Err(unavailable())
    }

    fn get_current_profile(&self, _username: &str) -> StoreResult<Option<Profile>> {
        Err(unavailable())
    }

    fn set_current_profile(&self, _username: &str, _profile: &Profile) -> StoreResult<bool> {
        Err(unavailable())
    }

    fn get_profiles(&self, _username: &str) -> StoreResult<Vec<Profile>> {
        Err(unavailable())
    }

    fn get_profile_by_uuid(&self, _uuid: &str) -> StoreResult<Option<Profile>> {
        Err(unavailable())
    }

    fn get_profile_by_name(&self, _name: &str) -> StoreResult<Option<Profile>> {
        Err(unavailable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryDataStore {
        MemoryDataStore::new()
            .with_account(Account::offline("alice", "secret").with_profile("alice_alt"))
    }

    #[test]
    fn credentials() {
        let store = store();
        assert!(store.find_user("alice", "secret").unwrap().is_some());
        assert!(store.find_user("alice", "wrong").unwrap().is_none());
        assert!(store.find_user("nobody", "secret").unwrap().is_none());
    }

    #[test]
    fn selection() {
        let store = store();
        assert_eq!(
            store.get_current_profile("alice").unwrap().unwrap().name,
            "alice"
        );

        let alt = Profile::offline("alice_alt");
        assert!(store.set_current_profile("alice", &alt).unwrap());
        assert_eq!(store.selected("alice"), Some(alt.id));

        assert!(!store
            .set_current_profile("alice", &Profile::offline("bob"))
            .unwrap());
    }

    #[test]
    fn lookups() {
        let store = store();
        let id = Profile::offline("alice_alt").id;
        assert_eq!(
            store.get_profile_by_uuid(&id).unwrap().unwrap().name,
            "alice_alt"
        );
        assert!(store.get_profile_by_name("alice").unwrap().is_some());
        assert!(store.get_profile_by_name("ghost").unwrap().is_none());
        assert_eq!(store.get_profiles("alice").unwrap().len(), 2);
        assert!(store.get_profiles("ghost").unwrap().is_empty());
    }

    #[test]
    fn failing_stores_fail() {
        assert!(FailingStore.get("k").is_err());
        assert!(FailingDataStore.get_profiles("alice").is_err());
    }

    #[test]
    fn flaky_store_toggles_writes() {
        let store = FlakyStore::new();
        store.set("k", "v", None).unwrap();

        store.fail_writes(true);
        assert!(store.set("k", "w", None).is_err());
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));

        store.fail_writes(false);
        store.set("k", "w", None).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("w"));
    }
}
