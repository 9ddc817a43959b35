//! Transport configuration types.

use std::fmt;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Environment variable that must be set before certificate validation can
/// actually be turned off.
pub const INSECURE_TLS_ENV_VAR: &str = "ADTKIT_ALLOW_INSECURE_TLS";

/// HTTP Basic credentials. Attached once, when the transport is built.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    /// User name
    pub username: String,
    /// Password
    pub password: String,
}

impl BasicCredentials {
    /// Creates credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// `Authorization` header value.
    pub fn authorization_value(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password);
        format!("Basic {}", STANDARD.encode(raw))
    }
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// TLS settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    /// Whether to validate server certificates.
    pub validate_certificates: bool,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            validate_certificates: true,
        }
    }
}

impl TlsConfig {
    /// Skips certificate validation. Only honoured when
    /// [`INSECURE_TLS_ENV_VAR`] is set; many development systems run with
    /// self-signed certificates.
    #[must_use]
    pub const fn insecure() -> Self {
        Self {
            validate_certificates: false,
        }
    }

    /// Whether certificate validation is disabled.
    #[must_use]
    pub const fn is_insecure(&self) -> bool {
        !self.validate_certificates
    }
}

/// Configuration for [`HttpTransport`](crate::HttpTransport).
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Per-request timeout
    pub timeout: Duration,

    /// User agent string (set to None to disable the header)
    pub user_agent: Option<String>,

    /// Basic credentials sent with every request
    pub credentials: Option<BasicCredentials>,

    /// TLS settings
    pub tls: TlsConfig,

    /// `sap-client` query parameter appended to every request, if set
    pub sap_client: Option<String>,

    /// `sap-language` query parameter appended to every request, if set
    pub sap_language: Option<String>,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: Some(format!("adtkit/{}", env!("CARGO_PKG_VERSION"))),
            credentials: None,
            tls: TlsConfig::default(),
            sap_client: None,
            sap_language: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_authorization_value() {
        let creds = BasicCredentials::new("DEVELOPER", "secret");
        // base64("DEVELOPER:secret")
        assert_eq!(creds.authorization_value(), "Basic REVWRUxPUEVSOnNlY3JldA==");
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = BasicCredentials::new("DEVELOPER", "secret");
        let printed = format!("{creds:?}");
        assert!(printed.contains("DEVELOPER"));
        assert!(!printed.contains("secret"));
    }

    #[test]
    fn test_default_config() {
        let config = HttpTransportConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.tls.validate_certificates);
        assert!(config.sap_client.is_none());
        assert!(config.user_agent.as_deref().unwrap_or("").starts_with("adtkit/"));
    }
}
