//! Client configuration types
//!
//! This module contains the configuration of one ADT session and the policy
//! applied when a lock request fails.

use adtkit_transport::HttpTransportConfig;
use serde::{Deserialize, Serialize};

/// What happens to the session mode when a lock request fails.
///
/// The mode is switched to stateful before the lock request is sent, so the
/// request itself carries the stateful header. A failed lock therefore
/// leaves the session stateful unless this policy says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockFailurePolicy {
    /// Leave the session stateful; the caller recovers with
    /// [`AdtClient::revert_to_stateless`](crate::AdtClient::revert_to_stateless).
    #[default]
    KeepStateful,
    /// Drop back to stateless as part of the failed call.
    RevertToStateless,
}

/// Configuration of one ADT session.
#[derive(Debug, Clone)]
pub struct AdtClientConfig {
    /// Base URL, e.g. `https://sap.example.com:44300`
    pub host: String,

    /// Sent as `adtcore:responsible` when creating objects
    pub username: String,

    /// Behaviour after a refused lock
    pub lock_failure_policy: LockFailurePolicy,

    /// Settings of the HTTP transport built by
    /// [`AdtClientBuilder::build`](crate::AdtClientBuilder::build)
    pub transport: HttpTransportConfig,
}

impl AdtClientConfig {
    /// Config for `host` with default transport settings and no credentials.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            username: String::new(),
            lock_failure_policy: LockFailurePolicy::default(),
            transport: HttpTransportConfig::default(),
        }
    }
}
