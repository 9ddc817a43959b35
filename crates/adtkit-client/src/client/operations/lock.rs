//! Lock and unlock.
//!
//! These are the only verbs that move the session mode. The mode is switched
//! to stateful before the lock request is built, so the lock request itself
//! carries `X-sap-adt-sessiontype: stateful`; it goes back to stateless only
//! after the server confirmed an unlock.

use adtkit_transport::{RawResponse, Transport};
use tracing::{info, warn};

use super::decode;
use crate::client::config::LockFailurePolicy;
use crate::client::core::AdtClient;
use crate::dispatcher::{RequestSpec, TEXT_PLAIN_UTF8};
use crate::error::{AdtError, Result};
use crate::session::SessionMode;
use crate::types::LockHandle;

/// Element holding the handle in a lock response.
pub const LOCK_HANDLE_PATH: &str = ".//LOCK_HANDLE";

pub(crate) fn lock_request(uri: &str) -> RequestSpec {
    RequestSpec::post(uri)
        .param("_action", "LOCK")
        .param("accessMode", "MODIFY")
}

pub(crate) fn unlock_request(uri: &str, handle: &LockHandle) -> RequestSpec {
    RequestSpec::post(uri)
        .param("_action", "UNLOCK")
        .param("lockHandle", handle.as_str())
        .content_type(TEXT_PLAIN_UTF8)
}

pub(crate) fn parse_lock_response(response: &RawResponse) -> Result<LockHandle> {
    let handle = decode(&response.body)?
        .find(LOCK_HANDLE_PATH)?
        .map(|element| element.text())
        .unwrap_or_default();
    Ok(LockHandle::new(handle))
}

impl<T: Transport> AdtClient<T> {
    /// Locks an object for editing and switches the session to stateful.
    ///
    /// A refused lock leaves the session stateful under
    /// [`LockFailurePolicy::KeepStateful`] (call
    /// [`revert_to_stateless`](Self::revert_to_stateless) to recover) and
    /// stateless under [`LockFailurePolicy::RevertToStateless`]. Transport
    /// failures are treated the same way.
    ///
    /// # Errors
    ///
    /// - [`AdtError::InvalidSessionState`] when a lock is already held; no
    ///   request is sent
    /// - [`AdtError::LockFailed`] for any status other than 200
    /// - [`AdtError::MalformedResponse`] when a 200 body is not XML; the
    ///   server granted the lock, so the session stays stateful under either
    ///   policy
    pub async fn lock(&mut self, uri: &str) -> Result<LockHandle> {
        if self.session.mode() == SessionMode::Stateful {
            return Err(AdtError::InvalidSessionState {
                operation: "lock",
                mode: SessionMode::Stateful,
            });
        }

        self.session.on_lock_acquired();

        let response = match self.send(lock_request(uri)).await {
            Ok(response) => response,
            Err(err) => {
                self.apply_lock_failure_policy(uri);
                return Err(err);
            }
        };

        if response.status != 200 {
            self.apply_lock_failure_policy(uri);
            return Err(AdtError::LockFailed {
                status: response.status,
                body: response.body,
            });
        }

        let handle = parse_lock_response(&response)?;
        info!(uri, "Object locked, session is stateful");
        Ok(handle)
    }

    /// Releases a lock and switches the session back to stateless.
    ///
    /// # Errors
    ///
    /// - [`AdtError::InvalidSessionState`] when no lock is held; no request
    ///   is sent
    /// - [`AdtError::UnlockFailed`] for any status other than 200; the
    ///   session stays stateful
    pub async fn unlock(&mut self, uri: &str, handle: &LockHandle) -> Result<()> {
        if self.session.mode() == SessionMode::Stateless {
            return Err(AdtError::InvalidSessionState {
                operation: "unlock",
                mode: SessionMode::Stateless,
            });
        }

        let RawResponse { status, body, .. } = self.send(unlock_request(uri, handle)).await?;
        if status != 200 {
            warn!(uri, status, "Unlock refused, session stays stateful");
            return Err(AdtError::UnlockFailed { status, body });
        }

        self.session.on_unlock_completed();
        info!(uri, "Object unlocked, session is stateless");
        Ok(())
    }

    fn apply_lock_failure_policy(&mut self, uri: &str) {
        match self.config.lock_failure_policy {
            LockFailurePolicy::KeepStateful => {
                warn!(uri, "Lock failed, session left stateful");
            }
            LockFailurePolicy::RevertToStateless => {
                warn!(uri, "Lock failed, session reverted to stateless");
                self.session.revert_to_stateless();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_request_parameters() {
        let spec = lock_request("/sap/bc/adt/programs/programs/z_x");
        assert_eq!(spec.method, http::Method::POST);
        assert_eq!(
            spec.query,
            vec![
                ("_action".to_string(), "LOCK".to_string()),
                ("accessMode".to_string(), "MODIFY".to_string()),
            ]
        );
        assert!(spec.body.is_empty());
    }

    #[test]
    fn test_unlock_request_parameters() {
        let spec = unlock_request("/p", &LockHandle::new("H+1/="));
        assert_eq!(spec.content_type, TEXT_PLAIN_UTF8);
        assert_eq!(
            spec.query,
            vec![
                ("_action".to_string(), "UNLOCK".to_string()),
                ("lockHandle".to_string(), "H+1/=".to_string()),
            ]
        );
    }

    #[test]
    fn test_handle_extracted_from_asx_payload() {
        let body = r#"<?xml version="1.0" encoding="utf-8"?>
<asx:abap xmlns:asx="http://www.sap.com/abapxml" version="1.0">
  <asx:values><DATA><LOCK_HANDLE>3E2F1A9C00D1</LOCK_HANDLE><CORRNR/></DATA></asx:values>
</asx:abap>"#;
        let handle = parse_lock_response(&RawResponse::new(200, body)).unwrap();
        assert_eq!(handle.as_str(), "3E2F1A9C00D1");
    }

    #[test]
    fn test_missing_handle_is_empty() {
        let handle = parse_lock_response(&RawResponse::new(200, "<DATA/>")).unwrap();
        assert_eq!(handle.as_str(), "");
    }
}
