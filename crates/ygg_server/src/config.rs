//! Server configuration.

use std::time::Duration;
use ygg_protocol::ApiMetadata;

/// Default access token lifetime: 15 days.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_millis(15 * 24 * 60 * 60 * 1000);

/// Default join session lifetime: 30 seconds.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_millis(30 * 1000);

/// Configuration for the protocol engine.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Metadata served at `GET /`.
    pub metadata: ApiMetadata,
    /// Texture domain allowlist, advertised but not enforced here.
    pub skin_domains: Vec<String>,
    /// Access token lifetime.
    pub token_ttl: Duration,
    /// Join session lifetime.
    pub session_ttl: Duration,
}

impl ServerConfig {
    /// Creates a configuration with default lifetimes.
    pub fn new(metadata: ApiMetadata) -> Self {
        Self {
            metadata,
            skin_domains: Vec::new(),
            token_ttl: DEFAULT_TOKEN_TTL,
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }

    /// Adds a texture domain.
    pub fn with_skin_domain(mut self, domain: impl Into<String>) -> Self {
        self.skin_domains.push(domain.into());
        self
    }

    /// Replaces the texture domain list.
    pub fn with_skin_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skin_domains = domains.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the access token lifetime.
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Sets the access token lifetime in milliseconds.
    pub fn with_token_ttl_millis(self, millis: u64) -> Self {
        self.with_token_ttl(Duration::from_millis(millis))
    }

    /// Sets the join session lifetime.
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Sets the join session lifetime in milliseconds.
    pub fn with_session_ttl_millis(self, millis: u64) -> Self {
        self.with_session_ttl(Duration::from_millis(millis))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(ApiMetadata::for_implementation(
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.token_ttl.as_millis(), 1_296_000_000);
        assert_eq!(config.session_ttl.as_millis(), 30_000);
        assert!(config.skin_domains.is_empty());
        assert_eq!(
            config.metadata.implementation_name.as_deref(),
            Some("ygg_server")
        );
    }

    #[test]
    fn config_builder() {
        let config = ServerConfig::new(ApiMetadata::default().with_server_name("Test"))
            .with_token_ttl_millis(1000)
            .with_session_ttl_millis(50)
            .with_skin_domain("skin.example.com")
            .with_skin_domain(".example.org");

        assert_eq!(config.token_ttl, Duration::from_secs(1));
        assert_eq!(config.session_ttl, Duration::from_millis(50));
        assert_eq!(config.skin_domains, vec!["skin.example.com", ".example.org"]);

        let config = config.with_skin_domains(["a.example"]);
        assert_eq!(config.skin_domains, vec!["a.example"]);
    }
}
