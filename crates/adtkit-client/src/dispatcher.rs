//! Request dispatch: turns a [`RequestSpec`] plus the current session state
//! into exactly one transport call.
//!
//! The dispatcher attaches the protocol headers, resolves host-relative URIs
//! and counts requests. It never inspects the status and never retries.

use std::fmt;

use adtkit_transport::{HttpMethod, HttpRequest, RawResponse, Transport};
use bytes::Bytes;
use http::Method;
use tracing::debug;

use crate::error::Result;
use crate::session::SessionState;

/// Content type used when a request does not name one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/xml";

/// Content type of plain source bodies.
pub const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";

/// Wildcard content type some collection endpoints require.
pub const APPLICATION_ANY: &str = "application/*";

/// Parameters of one protocol call, built fresh per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    /// Absolute URL or host-relative path
    pub uri: String,
    /// Any HTTP method; only GET, POST, PUT and DELETE are dispatched
    pub method: Method,
    /// Query parameters in insertion order
    pub query: Vec<(String, String)>,
    /// Raw body, possibly empty
    pub body: Bytes,
    /// Value of the `content-type` header
    pub content_type: String,
}

impl RequestSpec {
    /// A request with no query, no body and the default content type.
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            method,
            query: Vec::new(),
            body: Bytes::new(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }

    /// GET request.
    pub fn get(uri: impl Into<String>) -> Self {
        Self::new(Method::GET, uri)
    }

    /// POST request.
    pub fn post(uri: impl Into<String>) -> Self {
        Self::new(Method::POST, uri)
    }

    /// PUT request.
    pub fn put(uri: impl Into<String>) -> Self {
        Self::new(Method::PUT, uri)
    }

    /// DELETE request.
    pub fn delete(uri: impl Into<String>) -> Self {
        Self::new(Method::DELETE, uri)
    }

    /// Appends a query parameter. Numbers and booleans are rendered with
    /// their `Display` form (`true`/`false`).
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the content type.
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

/// Resolves `uri` against `host`. Absolute `http(s)` URLs pass through.
pub fn resolve_url(host: &str, uri: &str) -> String {
    if is_absolute(uri) {
        uri.to_string()
    } else if uri.starts_with('/') {
        format!("{host}{uri}")
    } else {
        format!("{host}/{uri}")
    }
}

fn is_absolute(uri: &str) -> bool {
    let lower = uri.get(..8).unwrap_or(uri).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Builds the transport request for `spec` from the current state.
///
/// # Errors
///
/// [`AdtError::UnsupportedMethod`](crate::AdtError::UnsupportedMethod)
/// for any method other than GET, POST, PUT and DELETE.
pub fn build_request(session: &SessionState, spec: RequestSpec) -> Result<HttpRequest> {
    let method = HttpMethod::try_from(&spec.method)?;

    let headers = vec![
        ("Accept".to_string(), "*/*".to_string()),
        ("Cache-Control".to_string(), "no-cache".to_string()),
        ("x-csrf-token".to_string(), session.csrf_token().to_string()),
        (
            "X-sap-adt-sessiontype".to_string(),
            session.mode().as_str().to_string(),
        ),
        ("content-type".to_string(), spec.content_type),
    ];

    Ok(HttpRequest {
        method,
        url: resolve_url(session.host(), &spec.uri),
        headers,
        query: spec.query,
        body: spec.body,
    })
}

/// Sends requests over a [`Transport`] on behalf of one session.
#[derive(Debug)]
pub struct Dispatcher<T> {
    transport: T,
}

impl<T: Transport> Dispatcher<T> {
    /// Wraps a transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The wrapped transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends one request.
    ///
    /// The request counter is advanced exactly once, before validation, so
    /// rejected and failed calls are counted too.
    ///
    /// # Errors
    ///
    /// - [`AdtError::UnsupportedMethod`](crate::AdtError::UnsupportedMethod)
    ///   before any network I/O
    /// - [`AdtError::Transport`](crate::AdtError::Transport) unmodified from
    ///   the transport
    pub async fn send(&self, session: &mut SessionState, spec: RequestSpec) -> Result<RawResponse> {
        let sequence = session.next_sequence();
        let request = build_request(session, spec)?;

        debug!(
            sequence,
            method = %request.method,
            url = %request.url,
            mode = %session.mode(),
            "Dispatching ADT request"
        );

        let response = self.transport.execute(request).await?;

        debug!(sequence, status = response.status, "ADT response received");
        Ok(response)
    }
}
