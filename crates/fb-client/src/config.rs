//! Client configuration.

use std::time::Duration;

use crate::payload::DecodeMode;
use crate::{DEFAULT_API_VERSION, DEFAULT_LOGIN_URL};

/// Configuration for a [`crate::Client`].
///
/// The consumer secret is redacted in Debug output to prevent accidental
/// exposure in logs.
#[derive(Clone)]
pub struct ClientConfig {
    /// Login endpoint origin.
    pub login_url: String,
    /// API version used to derive the REST and batch URLs.
    pub api_version: String,
    /// Connected-app consumer key (client_id).
    pub consumer_key: String,
    /// Connected-app consumer secret (client_secret).
    consumer_secret: String,
    /// Shape returned to callers for decoded payloads.
    pub decode_mode: DecodeMode,
    /// Overall request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
    /// Whether to enable request/response tracing.
    pub enable_tracing: bool,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("login_url", &self.login_url)
            .field("api_version", &self.api_version)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .field("decode_mode", &self.decode_mode)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("user_agent", &self.user_agent)
            .field("enable_tracing", &self.enable_tracing)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            login_url: DEFAULT_LOGIN_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            consumer_key: String::new(),
            consumer_secret: String::new(),
            decode_mode: DecodeMode::default(),
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(2),
            user_agent: crate::USER_AGENT.to_string(),
            enable_tracing: true,
        }
    }
}

impl ClientConfig {
    /// Create a config with the connected-app credentials set.
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            ..Self::default()
        }
    }

    /// Create a new client config builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Get the consumer secret (for the login exchange).
    pub(crate) fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }
}

/// Builder for ClientConfig.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the connected-app consumer key.
    pub fn with_consumer_key(mut self, key: impl Into<String>) -> Self {
        self.config.consumer_key = key.into();
        self
    }

    /// Set the connected-app consumer secret.
    pub fn with_consumer_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.consumer_secret = secret.into();
        self
    }

    /// Set the login endpoint origin.
    pub fn with_login_url(mut self, url: impl Into<String>) -> Self {
        self.config.login_url = url.into();
        self
    }

    /// Set the API version (e.g., "62.0").
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.config.api_version = version.into();
        self
    }

    /// Set the payload decode mode.
    pub fn with_decode_mode(mut self, mode: DecodeMode) -> Self {
        self.config.decode_mode = mode;
        self
    }

    /// Set the overall request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set custom User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Enable or disable request/response tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.config.enable_tracing = enabled;
        self
    }

    /// Build the client configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
