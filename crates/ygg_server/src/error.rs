//! Error types for the protocol engine.

use thiserror::Error;
use ygg_store::StoreError;

/// Result type for engine operations.
pub type YggResult<T> = Result<T, YggdrasilError>;

const INVALID_CREDENTIALS: &str = "Invalid credentials. Invalid username or password.";
const INVALID_TOKEN: &str = "Invalid token.";
const TOKEN_ALREADY_ASSIGNED: &str = "Access token already has a profile assigned.";
const INTERNAL: &str = "An internal error occurred.";

/// Errors produced by engine operations.
///
/// Each variant carries its message; the status code and wire kind are fixed
/// per variant. Rendering into an HTTP body happens in the dispatcher only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum YggdrasilError {
    /// Credentials did not match.
    #[error("{0}")]
    Authentication(String),

    /// Access token does not resolve.
    #[error("{0}")]
    InvalidToken(String),

    /// Requested profile is not owned, or no profile is selected.
    #[error("{0}")]
    WrongProfile(String),

    /// Token already bound to a profile.
    #[error("{0}")]
    TokenAlreadyAssigned(String),

    /// Profile belongs to someone else.
    #[error("{0}")]
    UnownedProfile(String),

    /// Requested resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A collaborator failed.
    #[error("{0}")]
    Internal(String),
}

impl YggdrasilError {
    /// Credential mismatch with the standard message.
    pub fn authentication() -> Self {
        YggdrasilError::Authentication(INVALID_CREDENTIALS.into())
    }

    /// Unresolved token with the standard message.
    pub fn invalid_token() -> Self {
        YggdrasilError::InvalidToken(INVALID_TOKEN.into())
    }

    /// Profile selection failure with the standard message.
    pub fn wrong_profile() -> Self {
        YggdrasilError::WrongProfile(INVALID_TOKEN.into())
    }

    /// Token already bound with the standard message.
    pub fn token_already_assigned() -> Self {
        YggdrasilError::TokenAlreadyAssigned(TOKEN_ALREADY_ASSIGNED.into())
    }

    /// Generic internal failure.
    pub fn internal() -> Self {
        YggdrasilError::Internal(INTERNAL.into())
    }

    /// HTTP status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            YggdrasilError::TokenAlreadyAssigned(_) => 400,
            YggdrasilError::Authentication(_)
            | YggdrasilError::InvalidToken(_)
            | YggdrasilError::WrongProfile(_)
            | YggdrasilError::UnownedProfile(_) => 403,
            YggdrasilError::NotFound(_) => 404,
            YggdrasilError::Internal(_) => 500,
        }
    }

    /// Error kind as named on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            YggdrasilError::Authentication(_)
            | YggdrasilError::InvalidToken(_)
            | YggdrasilError::WrongProfile(_)
            | YggdrasilError::UnownedProfile(_) => "ForbiddenOperationException",
            YggdrasilError::TokenAlreadyAssigned(_) => "IllegalArgumentException",
            YggdrasilError::NotFound(_) => "Not Found",
            YggdrasilError::Internal(_) => "Internal Server Error",
        }
    }

    /// Returns the message.
    pub fn message(&self) -> &str {
        match self {
            YggdrasilError::Authentication(m)
            | YggdrasilError::InvalidToken(m)
            | YggdrasilError::WrongProfile(m)
            | YggdrasilError::TokenAlreadyAssigned(m)
            | YggdrasilError::UnownedProfile(m)
            | YggdrasilError::NotFound(m)
            | YggdrasilError::Internal(m) => m,
        }
    }

    /// Returns true if this is a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status())
    }

    /// Returns true if this is a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        self.status() >= 500
    }
}

impl From<StoreError> for YggdrasilError {
    fn from(err: StoreError) -> Self {
        // The detail stays in the log; clients only see the generic message.
        tracing::error!(error = %err, "store operation failed");
        YggdrasilError::internal()
    }
}
