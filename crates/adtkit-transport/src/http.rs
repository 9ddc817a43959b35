//! `reqwest` backed transport.
//!
//! One [`reqwest::Client`] is built per transport and kept for its whole
//! lifetime, so the cookie jar and keep-alive connections survive across
//! calls. The server ties the CSRF token and the stateful edit context to
//! those cookies.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use reqwest::Client as HttpClient;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, error, warn};

use crate::config::{HttpTransportConfig, INSECURE_TLS_ENV_VAR};
use crate::error::{TransportError, TransportResult};
use crate::traits::Transport;
use crate::types::{HttpRequest, RawResponse};

/// HTTP transport with a persistent cookie store and Basic credentials.
pub struct HttpTransport {
    config: HttpTransportConfig,
    http_client: HttpClient,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("timeout", &self.config.timeout)
            .field("credentials", &self.config.credentials)
            .field("sap_client", &self.config.sap_client)
            .finish()
    }
}

impl HttpTransport {
    /// Builds the underlying HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ConfigurationError`] when the client cannot
    /// be built (for example an unusable user agent or credentials that are
    /// not valid header text).
    pub fn new(config: HttpTransportConfig) -> TransportResult<Self> {
        let mut default_headers = HeaderMap::new();

        if let Some(credentials) = &config.credentials {
            let mut value = HeaderValue::from_str(&credentials.authorization_value())
                .map_err(|_| TransportError::InvalidHeader {
                    name: header::AUTHORIZATION.to_string(),
                })?;
            value.set_sensitive(true);
            default_headers.insert(header::AUTHORIZATION, value);
        }

        let mut client_builder = HttpClient::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .default_headers(default_headers);

        if let Some(ref user_agent) = config.user_agent {
            client_builder = client_builder.user_agent(user_agent);
        }

        if config.tls.is_insecure() {
            // SECURITY: require explicit env var opt-in for insecure TLS
            if std::env::var(INSECURE_TLS_ENV_VAR).is_err() {
                error!(
                    "SECURITY: Certificate validation disabled but {} not set. \
                     Overriding to validate_certificates=true.",
                    INSECURE_TLS_ENV_VAR
                );
            } else {
                warn!("TLS certificate validation is DISABLED for this transport");
                client_builder = client_builder.danger_accept_invalid_certs(true);
            }
        }

        let http_client = client_builder
            .build()
            .map_err(|e| TransportError::ConfigurationError(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// The configuration this transport was built with.
    pub fn config(&self) -> &HttpTransportConfig {
        &self.config
    }

    fn build_headers(request: &HttpRequest) -> TransportResult<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(request.headers.len());
        for (name, value) in &request.headers {
            let invalid = || TransportError::InvalidHeader { name: name.clone() };
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }

    fn build_query(&self, request: &HttpRequest) -> Vec<(String, String)> {
        let mut query = request.query.clone();
        let mut append = |key: &str, value: &Option<String>| {
            if let Some(value) = value
                && !query.iter().any(|(k, _)| k == key)
            {
                query.push((key.to_string(), value.clone()));
            }
        };
        append("sap-client", &self.config.sap_client);
        append("sap-language", &self.config.sap_language);
        query
    }

    /// Flattens response headers. Repeated headers are joined with `, `;
    /// values that are not valid UTF-8 are skipped.
    fn collect_headers(headers: &HeaderMap) -> HashMap<String, String> {
        let mut collected: HashMap<String, String> = HashMap::with_capacity(headers.len());
        for (name, value) in headers {
            let Ok(value) = value.to_str() else {
                debug!(header = %name, "skipping response header that is not valid UTF-8");
                continue;
            };
            collected
                .entry(name.as_str().to_string())
                .and_modify(|joined| {
                    joined.push_str(", ");
                    joined.push_str(value);
                })
                .or_insert_with(|| value.to_string());
        }
        collected
    }

    async fn perform(&self, request: HttpRequest) -> TransportResult<RawResponse> {
        let operation = format!("{} {}", request.method, request.url);
        let headers = Self::build_headers(&request)?;
        let query = self.build_query(&request);

        let mut builder = self
            .http_client
            .request(request.method.into(), &request.url)
            .headers(headers);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&e, operation.clone(), self.config.timeout))?;

        let status = response.status().as_u16();
        let headers = Self::collect_headers(response.headers());

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(&e, operation.clone(), self.config.timeout))?;

        debug!(%operation, status, bytes = body.len(), "response received");

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

impl Transport for HttpTransport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = TransportResult<RawResponse>> + Send + '_>> {
        Box::pin(self.perform(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BasicCredentials;
    use crate::types::HttpMethod;
    use bytes::Bytes;

    fn request_with_headers(headers: Vec<(&str, &str)>) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: "http://localhost/x".to_string(),
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            query: Vec::new(),
            body: Bytes::new(),
        }
    }

    #[test]
    fn test_transport_creation() {
        let config = HttpTransportConfig {
            credentials: Some(BasicCredentials::new("DEVELOPER", "pw")),
            ..Default::default()
        };
        let transport = HttpTransport::new(config).unwrap();
        let printed = format!("{transport:?}");
        assert!(printed.contains("DEVELOPER"));
        assert!(!printed.contains("pw\""));
    }

    #[test]
    fn test_invalid_header_value_is_rejected() {
        let request = request_with_headers(vec![("x-csrf-token", "bad\nvalue")]);
        let err = HttpTransport::build_headers(&request).unwrap_err();
        assert!(matches!(err, TransportError::InvalidHeader { ref name } if name == "x-csrf-token"));
    }

    #[test]
    fn test_repeated_response_headers_are_joined() {
        let mut headers = HeaderMap::new();
        headers.append("x-sap-message", HeaderValue::from_static("first"));
        headers.append("x-sap-message", HeaderValue::from_static("second"));
        headers.insert("x-csrf-token", HeaderValue::from_static("TOKEN"));
        headers.insert("x-binary", HeaderValue::from_bytes(b"\xff\xfe").unwrap());

        let collected = HttpTransport::collect_headers(&headers);

        assert_eq!(collected["x-sap-message"], "first, second");
        assert_eq!(collected["x-csrf-token"], "TOKEN");
        assert!(!collected.contains_key("x-binary"));
    }

    #[test]
    fn test_sap_client_appended_once() {
        let transport = HttpTransport::new(HttpTransportConfig {
            sap_client: Some("001".to_string()),
            sap_language: Some("EN".to_string()),
            ..Default::default()
        })
        .unwrap();

        let mut request = request_with_headers(vec![]);
        request.query.push(("sap-client".to_string(), "100".to_string()));
        let query = transport.build_query(&request);

        assert_eq!(
            query,
            vec![
                ("sap-client".to_string(), "100".to_string()),
                ("sap-language".to_string(), "EN".to_string()),
            ]
        );
    }
}
