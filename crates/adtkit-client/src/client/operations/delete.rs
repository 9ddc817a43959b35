//! Object deletion.

use adtkit_transport::{RawResponse, Transport};
use tracing::info;

use crate::client::core::AdtClient;
use crate::dispatcher::RequestSpec;
use crate::error::{AdtError, Result};
use crate::types::LockHandle;

pub(crate) fn delete_request(uri: &str, handle: &LockHandle) -> RequestSpec {
    RequestSpec::delete(uri).param("lockHandle", handle.as_str())
}

impl<T: Transport> AdtClient<T> {
    /// Deletes an object under a lock. The lock still has to be released
    /// with [`unlock`](Self::unlock) afterwards.
    ///
    /// # Errors
    ///
    /// [`AdtError::DeleteFailed`] for any status other than 200.
    pub async fn delete(&mut self, uri: &str, handle: &LockHandle) -> Result<()> {
        let RawResponse { status, body, .. } = self.send(delete_request(uri, handle)).await?;
        if status != 200 {
            return Err(AdtError::DeleteFailed { status, body });
        }
        info!(uri, "Object deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_request() {
        let spec = delete_request("/sap/bc/adt/programs/programs/z_x", &LockHandle::new("H"));
        assert_eq!(spec.method, http::Method::DELETE);
        assert_eq!(spec.query, vec![("lockHandle".to_string(), "H".to_string())]);
    }
}
