//! Request and response bodies.

use crate::id::UnsignedUuid;
use crate::profile::{Profile, User};
use serde::{Deserialize, Serialize};

/// Game agent named in an authenticate request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Always `Minecraft`.
    pub name: String,
    /// Agent version, `1`.
    pub version: u32,
}

impl Default for Agent {
    fn default() -> Self {
        Self {
            name: "Minecraft".to_string(),
            version: 1,
        }
    }
}

/// `POST /authserver/authenticate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateRequest {
    /// Login name (email or other credential).
    pub username: String,
    /// Password.
    pub password: String,
    /// Client token chosen by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,
    /// Whether to include the user in the response.
    #[serde(default)]
    pub request_user: bool,
    /// Agent information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<Agent>,
}

impl AuthenticateRequest {
    /// Creates a request for the given credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            client_token: None,
            request_user: false,
            agent: Some(Agent::default()),
        }
    }

    /// Sets the client token.
    pub fn with_client_token(mut self, client_token: impl Into<String>) -> Self {
        self.client_token = Some(client_token.into());
        self
    }

    /// Requests user information in the response.
    pub fn with_request_user(mut self) -> Self {
        self.request_user = true;
        self
    }
}

/// Response to [`AuthenticateRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateResponse {
    /// Newly issued access token.
    pub access_token: String,
    /// Echoed or generated client token.
    pub client_token: String,
    /// Profiles the user may select.
    pub available_profiles: Vec<Profile>,
    /// Currently selected profile, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_profile: Option<Profile>,
    /// User information when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// `POST /authserver/refresh`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    /// Token to refresh.
    pub access_token: String,
    /// Client token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,
    /// Whether to include the user in the response.
    #[serde(default)]
    pub request_user: bool,
    /// Profile to select.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_profile: Option<Profile>,
}

impl RefreshRequest {
    /// Creates a refresh request for `access_token`.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            client_token: None,
            request_user: false,
            selected_profile: None,
        }
    }

    /// Selects a profile as part of the refresh.
    pub fn with_selected_profile(mut self, profile: Profile) -> Self {
        self.selected_profile = Some(profile);
        self
    }
}

/// Response to [`RefreshRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    /// Replacement access token.
    pub access_token: String,
    /// Client token.
    pub client_token: String,
    /// Profile bound to the new token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_profile: Option<Profile>,
    /// User information when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// `POST /authserver/validate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    /// Token to check.
    pub access_token: String,
    /// Client token, ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,
}

/// `POST /authserver/invalidate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidateRequest {
    /// Token to revoke.
    pub access_token: String,
    /// Client token, ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,
}

/// `POST /authserver/signout`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignoutRequest {
    /// Login name.
    pub username: String,
    /// Password.
    pub password: String,
}

/// `POST /sessionserver/session/minecraft/join`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    /// Access token of the joining client.
    pub access_token: String,
    /// UUID of the profile bound to the token.
    pub selected_profile: UnsignedUuid,
    /// Server ID handed out by the game server.
    pub server_id: String,
}

/// `GET /sessionserver/session/minecraft/hasJoined`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HasJoinedQuery {
    /// Profile name.
    pub username: String,
    /// Server ID handed out by the game server.
    pub server_id: String,
    /// Client IP as seen by the game server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

/// `GET /sessionserver/session/minecraft/profile/{uuid}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileQuery {
    /// Profile UUID.
    pub uuid: UnsignedUuid,
    /// Omit signatures. Defaults to `true`.
    #[serde(default = "default_unsigned")]
    pub unsigned: bool,
}

impl ProfileQuery {
    /// Creates an unsigned lookup.
    pub fn new(uuid: impl Into<UnsignedUuid>) -> Self {
        Self {
            uuid: uuid.into(),
            unsigned: true,
        }
    }

    /// Requests signed properties.
    pub fn signed(mut self) -> Self {
        self.unsigned = false;
        self
    }
}

fn default_unsigned() -> bool {
    true
}
