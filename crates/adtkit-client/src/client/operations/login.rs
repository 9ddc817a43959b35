//! Login: fetches the CSRF token every later request must carry.

use adtkit_transport::{RawResponse, Transport};
use tracing::info;

use crate::client::core::AdtClient;
use crate::dispatcher::RequestSpec;
use crate::error::{AdtError, Result};

/// Endpoint used to obtain the token.
pub const LOGIN_URI: &str = "/sap/bc/adt/compatibility/graph";

/// Response header carrying the token.
pub const CSRF_HEADER: &str = "x-csrf-token";

pub(crate) fn login_request() -> RequestSpec {
    RequestSpec::get(LOGIN_URI)
}

pub(crate) fn parse_login_response(response: RawResponse) -> Result<String> {
    if response.status != 200 {
        return Err(AdtError::LoginFailed {
            status: response.status,
            body: response.body,
        });
    }
    response
        .header(CSRF_HEADER)
        .map(str::to_string)
        .ok_or(AdtError::TokenMissing)
}

impl<T: Transport> AdtClient<T> {
    /// Logs in and stores the CSRF token in the session.
    ///
    /// The request carries the `fetch` sentinel; the server answers with a
    /// token in the `x-csrf-token` header. Calling login again replaces the
    /// token.
    ///
    /// # Errors
    ///
    /// - [`AdtError::LoginFailed`] for any status other than 200
    /// - [`AdtError::TokenMissing`] when the header is absent
    pub async fn login(&mut self) -> Result<String> {
        let response = self.send(login_request()).await?;
        let token = parse_login_response(response)?;
        self.session.on_login_succeeded(token.clone());
        info!(host = %self.session.host(), "Logged in");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_taken_from_header() {
        let response = RawResponse::new(200, "").with_header("X-CSRF-Token", "abc==");
        assert_eq!(parse_login_response(response).unwrap(), "abc==");
    }

    #[test]
    fn test_missing_token() {
        let err = parse_login_response(RawResponse::new(200, "")).unwrap_err();
        assert!(matches!(err, AdtError::TokenMissing));
    }

    #[test]
    fn test_non_200_is_login_failure() {
        let err = parse_login_response(
            RawResponse::new(401, "Logon failed").with_header(CSRF_HEADER, "ignored"),
        )
        .unwrap_err();
        assert!(matches!(err, AdtError::LoginFailed { status: 401, ref body } if body == "Logon failed"));
    }
}
