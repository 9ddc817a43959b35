//! Per-session protocol state: CSRF token, session mode, request counter.
//!
//! A [`SessionState`] is owned by exactly one [`AdtClient`](crate::AdtClient)
//! and mutated only through it. It is never shared across sessions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Token value sent before login. The server answers a request carrying it
/// with a fresh token in the `x-csrf-token` response header.
pub const CSRF_FETCH: &str = "fetch";

/// Value of the `X-sap-adt-sessiontype` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    /// No edit context is kept between calls.
    #[default]
    Stateless,
    /// The server keeps the edit context (object locks) alive.
    Stateful,
}

impl SessionMode {
    /// Header value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stateless => "stateless",
            Self::Stateful => "stateful",
        }
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable protocol state of one session.
///
/// Invariant: `mode` is [`SessionMode::Stateful`] exactly while a lock is held
/// (at most one at a time). The facade enforces this by rejecting a second
/// lock and an unlock without a lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    host: String,
    csrf_token: String,
    mode: SessionMode,
    request_sequence: u64,
}

impl SessionState {
    /// Fresh state for `host`: token not yet fetched, stateless, counter at 0.
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();
        Self {
            host: host.trim_end_matches('/').to_string(),
            csrf_token: CSRF_FETCH.to_string(),
            mode: SessionMode::Stateless,
            request_sequence: 0,
        }
    }

    /// Base URL every host-relative URI is resolved against.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Current token, or [`CSRF_FETCH`] before login.
    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    /// Whether a token has been obtained.
    pub fn has_token(&self) -> bool {
        self.csrf_token != CSRF_FETCH
    }

    /// Current session mode.
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Number of requests dispatched so far.
    pub fn request_sequence(&self) -> u64 {
        self.request_sequence
    }

    /// Returns the current counter, then increments it.
    pub fn next_sequence(&mut self) -> u64 {
        let current = self.request_sequence;
        self.request_sequence += 1;
        current
    }

    /// Stores the token from a successful login. Last write wins.
    pub fn on_login_succeeded(&mut self, token: impl Into<String>) {
        self.csrf_token = token.into();
    }

    /// Switches to stateful. Called before the lock request is built, so
    /// that request already carries the stateful header.
    pub fn on_lock_acquired(&mut self) {
        self.mode = SessionMode::Stateful;
    }

    /// Switches back to stateless after the server confirmed an unlock.
    pub fn on_unlock_completed(&mut self) {
        self.mode = SessionMode::Stateless;
    }

    /// Drops back to stateless without an unlock, e.g. after a lock request
    /// the server refused.
    pub fn revert_to_stateless(&mut self) {
        self.mode = SessionMode::Stateless;
    }
}
