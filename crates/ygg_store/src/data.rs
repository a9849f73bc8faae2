//! Account data contract.

use crate::error::StoreResult;
use ygg_protocol::{Profile, User};

/// Read access to users and profiles.
///
/// The engine never mutates users or profiles beyond
/// [`DataStore::set_current_profile`]. Implementations decide how credentials
/// are checked and how profiles are persisted.
///
/// Every lookup reports absence as `Ok(None)` or an empty list. `Err` is
/// reserved for failures of the store itself, which the engine surfaces as an
/// internal error.
pub trait DataStore: Send + Sync {
    /// Returns the user if `username` and `password` match.
    fn find_user(&self, username: &str, password: &str) -> StoreResult<Option<User>>;

    /// Returns the user registered under `username`.
    fn get_user(&self, username: &str) -> StoreResult<Option<User>>;

    /// Returns the profile currently selected by `username`.
    fn get_current_profile(&self, username: &str) -> StoreResult<Option<Profile>>;

    /// Selects `profile` for `username`. Returns false if the selection was refused.
    fn set_current_profile(&self, username: &str, profile: &Profile) -> StoreResult<bool>;

    /// Returns every profile owned by `username`.
    fn get_profiles(&self, username: &str) -> StoreResult<Vec<Profile>>;

    /// Looks a profile up by unsigned UUID.
    fn get_profile_by_uuid(&self, uuid: &str) -> StoreResult<Option<Profile>>;

    /// Looks a profile up by name.
    fn get_profile_by_name(&self, name: &str) -> StoreResult<Option<Profile>>;
}
