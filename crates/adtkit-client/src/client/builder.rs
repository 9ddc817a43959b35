//! Client builder pattern for ADT client construction
//!
//! Provides a fluent interface for configuring a session before creation.

use std::time::Duration;

use adtkit_transport::{BasicCredentials, HttpTransport, TlsConfig, Transport};

use super::config::{AdtClientConfig, LockFailurePolicy};
use super::core::AdtClient;
use crate::error::Result;

/// Builder for configuring and creating ADT clients
///
/// # Examples
///
/// ```rust,no_run
/// use adtkit_client::{AdtClientBuilder, LockFailurePolicy};
/// use std::time::Duration;
///
/// # async fn example() -> adtkit_client::Result<()> {
/// let mut client = AdtClientBuilder::new("https://sap.example.com:44300")
///     .credentials("DEVELOPER", "secret")
///     .sap_client("001")
///     .language("EN")
///     .timeout(Duration::from_secs(60))
///     .lock_failure_policy(LockFailurePolicy::RevertToStateless)
///     .build()?;
///
/// client.login().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AdtClientBuilder {
    config: AdtClientConfig,
}

impl AdtClientBuilder {
    /// Create a new builder for `host`
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            config: AdtClientConfig::new(host),
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: AdtClientConfig) -> Self {
        Self { config }
    }

    /// HTTP Basic credentials; the user name is also recorded as the
    /// responsible user of created objects
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        let username = username.into();
        self.config.username.clone_from(&username);
        self.config.transport.credentials = Some(BasicCredentials::new(username, password));
        self
    }

    /// `sap-client` appended to every request
    pub fn sap_client(mut self, client: impl Into<String>) -> Self {
        self.config.transport.sap_client = Some(client.into());
        self
    }

    /// `sap-language` appended to every request
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.config.transport.sap_language = Some(language.into());
        self
    }

    /// Per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.transport.timeout = timeout;
        self
    }

    /// TLS settings
    pub fn tls(mut self, tls: TlsConfig) -> Self {
        self.config.transport.tls = tls;
        self
    }

    /// Behaviour after a refused lock
    pub fn lock_failure_policy(mut self, policy: LockFailurePolicy) -> Self {
        self.config.lock_failure_policy = policy;
        self
    }

    /// The configuration built so far
    pub fn config(&self) -> &AdtClientConfig {
        &self.config
    }

    /// Build a client over a fresh [`HttpTransport`]
    ///
    /// # Errors
    ///
    /// Returns [`AdtError::Transport`](crate::AdtError::Transport) when the
    /// HTTP client cannot be configured.
    pub fn build(self) -> Result<AdtClient<HttpTransport>> {
        let transport = HttpTransport::new(self.config.transport.clone())?;
        Ok(AdtClient::with_config(transport, self.config))
    }

    /// Build a client over a caller-supplied transport. Transport settings
    /// in the configuration are ignored.
    pub fn build_with_transport<T: Transport>(self, transport: T) -> AdtClient<T> {
        AdtClient::with_config(transport, self.config)
    }
}
