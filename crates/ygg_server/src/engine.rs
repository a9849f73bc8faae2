//! The protocol engine.
//!
//! Every operation reads its preconditions from the ledgers and the data
//! store, fails fast with a typed error if one is unmet, and only then
//! mutates state. No operation formats HTTP bodies; see [`crate::server`].

use crate::codec::{self, Signing};
use crate::config::ServerConfig;
use crate::error::{YggResult, YggdrasilError};
use crate::keys::SigningKeys;
use crate::ledger::{generate_token, JoinSessionLedger, TokenLedger};
use std::sync::Arc;
use tracing::{debug, info, warn};
use ygg_protocol::{
    AuthenticateRequest, AuthenticateResponse, HasJoinedQuery, InvalidateRequest, JoinRequest,
    MetadataResponse, Profile, ProfileQuery, RefreshRequest, RefreshResponse, SignoutRequest,
    ValidateRequest, MAX_PROFILE_BATCH,
};
use ygg_store::{DataStore, ExpiringStore, MemoryStore, NamespacedStore, StoreResult};

/// Key namespace of access tokens in a shared store.
pub const TOKEN_NAMESPACE: &str = "token";
/// Key namespace of join sessions in a shared store.
pub const SESSION_NAMESPACE: &str = "session";

/// The Yggdrasil protocol engine.
///
/// Stateless between calls: tokens and sessions live in the injected
/// expiring stores, accounts in the [`DataStore`]. Safe to share across
/// threads; concurrent requests interleave at the granularity of single
/// store operations.
pub struct ProtocolEngine {
    config: ServerConfig,
    keys: SigningKeys,
    data: Arc<dyn DataStore>,
    tokens: TokenLedger,
    sessions: JoinSessionLedger,
}

impl ProtocolEngine {
    /// Creates an engine over the given stores.
    ///
    /// `token_store` and `session_store` must be distinct namespaces.
    pub fn new(
        config: ServerConfig,
        keys: SigningKeys,
        data: Arc<dyn DataStore>,
        token_store: Arc<dyn ExpiringStore>,
        session_store: Arc<dyn ExpiringStore>,
    ) -> Self {
        let tokens = TokenLedger::new(token_store, config.token_ttl);
        let sessions = JoinSessionLedger::new(session_store, config.session_ttl);
        Self {
            config,
            keys,
            data,
            tokens,
            sessions,
        }
    }

    /// Creates an engine keeping tokens and sessions in one shared store.
    ///
    /// Keys are split into the `token:` and `session:` namespaces, so a
    /// server ID never collides with an access token and
    /// [`ProtocolEngine::revoke_all`] leaves other users of the store alone.
    pub fn with_shared_store(
        config: ServerConfig,
        keys: SigningKeys,
        data: Arc<dyn DataStore>,
        store: Arc<dyn ExpiringStore>,
    ) -> Self {
        let token_store = NamespacedStore::new(Arc::clone(&store), TOKEN_NAMESPACE);
        let session_store = NamespacedStore::new(store, SESSION_NAMESPACE);
        Self::new(
            config,
            keys,
            data,
            Arc::new(token_store),
            Arc::new(session_store),
        )
    }

    /// Creates an engine keeping tokens and sessions in memory.
    pub fn in_memory(config: ServerConfig, keys: SigningKeys, data: Arc<dyn DataStore>) -> Self {
        Self::new(
            config,
            keys,
            data,
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
        )
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the signing keys.
    pub fn keys(&self) -> &SigningKeys {
        &self.keys
    }

    /// `GET /`: server metadata, texture domains and the signing public key.
    pub fn metadata(&self) -> MetadataResponse {
        MetadataResponse {
            meta: self.config.metadata.clone(),
            skin_domains: self.config.skin_domains.clone(),
            signature_publickey: self.keys.public_key_pem().to_string(),
        }
    }

    /// Logs in with a username and password and issues an access token.
    ///
    /// # Errors
    ///
    /// [`YggdrasilError::Authentication`] if the credentials do not match.
    pub fn authenticate(&self, request: AuthenticateRequest) -> YggResult<AuthenticateResponse> {
        let username = request.username.as_str();
        let Some(user) = self.data.find_user(username, &request.password)? else {
            info!(%username, "authentication rejected");
            return Err(YggdrasilError::authentication());
        };

        let available_profiles = self
            .data
            .get_profiles(username)?
            .iter()
            .map(Profile::summary)
            .collect();
        let selected_profile = self
            .data
            .get_current_profile(username)?
            .map(|profile| profile.summary());

        let access_token = self.tokens.issue(username)?;
        let client_token = request.client_token.unwrap_or_else(generate_token);
        info!(%username, "authenticated");

        Ok(AuthenticateResponse {
            access_token,
            client_token,
            available_profiles,
            selected_profile,
            user: request.request_user.then_some(user),
        })
    }

    /// Replaces an access token with a new one, optionally selecting a profile.
    ///
    /// # Errors
    ///
    /// - [`YggdrasilError::InvalidToken`] if the token does not resolve
    /// - [`YggdrasilError::WrongProfile`] if the requested profile is not
    ///   owned by the user, or no profile is selected afterwards
    pub fn refresh(&self, request: RefreshRequest) -> YggResult<RefreshResponse> {
        let username = self.resolve_token(&request.access_token)?;

        if let Some(requested) = &request.selected_profile {
            let profiles = self.data.get_profiles(&username)?;
            let Some(owned) = profiles.iter().find(|p| p.id == requested.id) else {
                warn!(%username, profile = %requested.id, "refresh selected unowned profile");
                return Err(YggdrasilError::wrong_profile());
            };
            if !self.data.set_current_profile(&username, owned)? {
                warn!(%username, profile = %owned.id, "data store refused profile selection");
                return Err(YggdrasilError::wrong_profile());
            }
        }

        let Some(current) = self.data.get_current_profile(&username)? else {
            debug!(%username, "refresh without a selected profile");
            return Err(YggdrasilError::wrong_profile());
        };

        let user = if request.request_user {
            self.data.get_user(&username)?
        } else {
            None
        };

        // Issue before revoking: if the write fails the caller keeps a
        // working token.
        let access_token = self.tokens.issue(&username)?;
        self.tokens.revoke(&request.access_token)?;
        info!(%username, profile = %current.id, "refreshed access token");

        Ok(RefreshResponse {
            access_token,
            client_token: request.client_token.unwrap_or_else(generate_token),
            selected_profile: Some(current.summary()),
            user,
        })
    }

    /// Checks that an access token is live.
    ///
    /// # Errors
    ///
    /// [`YggdrasilError::InvalidToken`] if the token does not resolve.
    pub fn validate(&self, request: ValidateRequest) -> YggResult<()> {
        self.resolve_token(&request.access_token).map(|_| ())
    }

    /// Revokes an access token. Unknown tokens are accepted silently.
    ///
    /// # Errors
    ///
    /// Only store failures.
    pub fn invalidate(&self, request: InvalidateRequest) -> YggResult<()> {
        self.tokens.revoke(&request.access_token)?;
        Ok(())
    }

    /// Checks credentials for a sign-out.
    ///
    /// Tokens already issued to the user stay valid.
    ///
    /// # Errors
    ///
    /// [`YggdrasilError::Authentication`] if the credentials do not match.
    pub fn signout(&self, request: SignoutRequest) -> YggResult<()> {
        match self.data.find_user(&request.username, &request.password)? {
            Some(_) => {
                info!(username = %request.username, "signed out");
                Ok(())
            }
            None => Err(YggdrasilError::authentication()),
        }
    }

    /// Records that the token's owner is joining `server_id`.
    ///
    /// # Errors
    ///
    /// [`YggdrasilError::InvalidToken`] if the token does not resolve.
    pub fn join(&self, request: JoinRequest) -> YggResult<()> {
        let username = self.resolve_token(&request.access_token)?;
        self.sessions
            .record(&request.server_id, &request.access_token)?;
        debug!(
            %username,
            server_id = %request.server_id,
            profile = %request.selected_profile,
            "recorded join"
        );
        Ok(())
    }

    /// Verifies a join on behalf of a game server.
    ///
    /// Returns the joined profile with every property signed, or `None` if any
    /// step fails. Failures are deliberately indistinguishable: an unknown
    /// server ID, an expired session and a name mismatch all look the same.
    pub fn has_joined(&self, query: HasJoinedQuery) -> Option<Profile> {
        match self.try_has_joined(&query) {
            Ok(Some(mut profile)) => {
                if let Err(err) = codec::prepare_profile(&mut profile, Signing::Signed(&self.keys))
                {
                    warn!(error = %err, "hasJoined signing failed");
                    return None;
                }
                debug!(username = %query.username, ip = ?query.ip, "hasJoined matched");
                Some(profile)
            }
            Ok(None) => {
                debug!(username = %query.username, server_id = %query.server_id, "hasJoined unmatched");
                None
            }
            Err(err) => {
                warn!(error = %err, "hasJoined lookup failed");
                None
            }
        }
    }

    fn try_has_joined(&self, query: &HasJoinedQuery) -> StoreResult<Option<Profile>> {
        let Some(access_token) = self.sessions.resolve(&query.server_id)? else {
            return Ok(None);
        };
        let Some(owner) = self.tokens.resolve(&access_token)? else {
            return Ok(None);
        };
        let profiles = self.data.get_profiles(&owner)?;
        Ok(profiles.into_iter().find(|p| p.name == query.username))
    }

    /// Looks a profile up by UUID.
    ///
    /// Properties are always normalized; signatures are attached only when
    /// `query.unsigned` is false.
    ///
    /// # Errors
    ///
    /// [`YggdrasilError::NotFound`] if no profile has that UUID.
    pub fn profile_by_uuid(&self, query: ProfileQuery) -> YggResult<Profile> {
        let Some(mut profile) = self.data.get_profile_by_uuid(&query.uuid)? else {
            return Err(YggdrasilError::NotFound(format!(
                "No profile with UUID {}",
                query.uuid
            )));
        };

        let signing = if query.unsigned {
            Signing::Unsigned
        } else {
            Signing::Signed(&self.keys)
        };
        codec::prepare_profile(&mut profile, signing)?;
        Ok(profile)
    }

    /// Resolves up to [`MAX_PROFILE_BATCH`] profile names.
    ///
    /// Names past the limit are ignored and names that do not resolve are
    /// dropped. Properties are normalized and never signed.
    ///
    /// # Errors
    ///
    /// Only store failures.
    pub fn profiles_by_name(&self, names: &[String]) -> YggResult<Vec<Profile>> {
        if names.len() > MAX_PROFILE_BATCH {
            debug!(requested = names.len(), "truncating profile batch");
        }

        let mut profiles = Vec::new();
        for name in names.iter().take(MAX_PROFILE_BATCH) {
            if let Some(mut profile) = self.data.get_profile_by_name(name)? {
                codec::prepare_profile(&mut profile, Signing::Unsigned)?;
                profiles.push(profile);
            }
        }
        Ok(profiles)
    }

    /// Revokes every access token and drops every join session.
    ///
    /// # Errors
    ///
    /// Only store failures.
    pub fn revoke_all(&self) -> YggResult<()> {
        self.tokens.clear()?;
        self.sessions.clear()?;
        warn!("all tokens and join sessions revoked");
        Ok(())
    }

    fn resolve_token(&self, access_token: &str) -> YggResult<String> {
        self.tokens
            .resolve(access_token)?
            .ok_or_else(YggdrasilError::invalid_token)
    }
}
