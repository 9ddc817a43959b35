//! Reading and writing object source.

use adtkit_transport::{RawResponse, Transport};
use tracing::debug;

use crate::client::core::AdtClient;
use crate::dispatcher::{RequestSpec, TEXT_PLAIN_UTF8};
use crate::error::{AdtError, Result};
use crate::types::{LockHandle, SourceVersion};

pub(crate) fn get_source_request(uri: &str, version: SourceVersion) -> RequestSpec {
    RequestSpec::get(uri).param("version", version.as_str())
}

pub(crate) fn set_source_request(uri: &str, source: &str, handle: &LockHandle) -> RequestSpec {
    RequestSpec::put(uri)
        .param("lockHandle", handle.as_str())
        .body(source.to_owned())
        .content_type(TEXT_PLAIN_UTF8)
}

impl<T: Transport> AdtClient<T> {
    /// Reads source text, e.g. from `.../programs/z_demo/source/main`.
    ///
    /// # Errors
    ///
    /// [`AdtError::GetSourceFailed`] for any status other than 200.
    pub async fn get_object_source(&mut self, uri: &str, version: SourceVersion) -> Result<String> {
        let RawResponse { status, body, .. } =
            self.send(get_source_request(uri, version)).await?;
        if status != 200 {
            return Err(AdtError::GetSourceFailed { status, body });
        }
        Ok(body)
    }

    /// Writes source text under a lock obtained with
    /// [`lock`](Self::lock).
    ///
    /// # Errors
    ///
    /// [`AdtError::SetSourceFailed`] for any status other than 200.
    pub async fn set_object_source(
        &mut self,
        uri: &str,
        source: &str,
        handle: &LockHandle,
    ) -> Result<()> {
        let RawResponse { status, body, .. } =
            self.send(set_source_request(uri, source, handle)).await?;
        if status != 200 {
            return Err(AdtError::SetSourceFailed { status, body });
        }
        debug!(uri, bytes = source.len(), "Source written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_source_request() {
        let spec = get_source_request("/sap/bc/adt/programs/programs/z_x/source/main", SourceVersion::Inactive);
        assert_eq!(spec.method, http::Method::GET);
        assert_eq!(spec.query, vec![("version".to_string(), "inactive".to_string())]);
    }

    #[test]
    fn test_set_source_request() {
        let handle = LockHandle::new("H1");
        let spec = set_source_request("/p/source/main", "REPORT X.", &handle);
        assert_eq!(spec.method, http::Method::PUT);
        assert_eq!(spec.content_type, TEXT_PLAIN_UTF8);
        assert_eq!(spec.query, vec![("lockHandle".to_string(), "H1".to_string())]);
        assert_eq!(&spec.body[..], b"REPORT X.");
    }
}
