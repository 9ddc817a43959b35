//! Core `AdtClient<T>` implementation
//!
//! The client owns the session state and the dispatcher. Every operation
//! takes `&mut self`: one session is driven by one caller, strictly in
//! sequence, and the borrow checker enforces it.

use adtkit_transport::{HttpTransport, RawResponse, Transport};

use super::config::{AdtClientConfig, LockFailurePolicy};
use crate::dispatcher::{Dispatcher, RequestSpec};
use crate::error::Result;
use crate::session::{SessionMode, SessionState};

/// An ADT session.
///
/// # Examples
///
/// ```rust,no_run
/// use adtkit_client::{AdtClientBuilder, SourceVersion};
///
/// # async fn example() -> adtkit_client::Result<()> {
/// let mut client = AdtClientBuilder::new("http://localhost:50000")
///     .credentials("DEVELOPER", "secret")
///     .build()?;
/// client.login().await?;
///
/// let uri = "/sap/bc/adt/programs/programs/z_demo";
/// let handle = client.lock(uri).await?;
/// client.set_object_source(&format!("{uri}/source/main"), "REPORT z_demo.", &handle).await?;
/// client.unlock(uri, &handle).await?;
/// client.activate("Z_DEMO", uri).await?;
///
/// let source = client.get_object_source(&format!("{uri}/source/main"), SourceVersion::Active).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AdtClient<T: Transport = HttpTransport> {
    pub(crate) session: SessionState,
    pub(crate) dispatcher: Dispatcher<T>,
    pub(crate) config: AdtClientConfig,
}

impl<T: Transport> AdtClient<T> {
    /// Create a client for `host` over `transport` with default settings.
    pub fn new(host: impl Into<String>, transport: T) -> Self {
        Self::with_config(transport, AdtClientConfig::new(host))
    }

    /// Create a client from a full configuration.
    pub fn with_config(transport: T, config: AdtClientConfig) -> Self {
        Self {
            session: SessionState::new(config.host.clone()),
            dispatcher: Dispatcher::new(transport),
            config,
        }
    }

    /// Current session state.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Current session mode.
    pub fn mode(&self) -> SessionMode {
        self.session.mode()
    }

    /// The transport this session runs on.
    pub fn transport(&self) -> &T {
        self.dispatcher.transport()
    }

    /// The configuration the client was built with.
    pub fn config(&self) -> &AdtClientConfig {
        &self.config
    }

    /// Policy applied when a lock request fails.
    pub fn lock_failure_policy(&self) -> LockFailurePolicy {
        self.config.lock_failure_policy
    }

    /// Drops back to stateless without an unlock call. Used to recover after
    /// a refused lock under [`LockFailurePolicy::KeepStateful`].
    pub fn revert_to_stateless(&mut self) {
        tracing::info!("Session reverted to stateless");
        self.session.revert_to_stateless();
    }

    /// Sends one request with the current session headers. No status
    /// interpretation is done.
    ///
    /// # Errors
    ///
    /// [`AdtError::UnsupportedMethod`](crate::AdtError::UnsupportedMethod) or
    /// [`AdtError::Transport`](crate::AdtError::Transport).
    pub async fn send(&mut self, spec: RequestSpec) -> Result<RawResponse> {
        self.dispatcher.send(&mut self.session, spec).await
    }
}
