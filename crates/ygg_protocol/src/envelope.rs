//! Error response body.

use serde::{Deserialize, Serialize};

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// Error kind, e.g. `ForbiddenOperationException`.
    pub error: String,
    /// Human readable message.
    pub error_message: String,
    /// Underlying cause.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl ErrorEnvelope {
    /// Creates an envelope without a cause.
    pub fn new(error: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            error_message: error_message.into(),
            cause: None,
        }
    }

    /// Attaches a cause.
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }
}
