//! # adtkit Transport
//!
//! The transport boundary of the ADT client: one trait for a single HTTP
//! exchange and one production implementation over `reqwest`.
//!
//! ## Overview
//!
//! - **Trait**: [`Transport`] - GET/POST/PUT/DELETE with headers, query
//!   parameters and a raw body
//! - **Types**: [`HttpMethod`], [`HttpRequest`], [`RawResponse`]
//! - **Implementation**: [`HttpTransport`] - persistent cookie store, HTTP Basic
//!   credentials attached once at construction
//! - **Errors**: [`TransportError`], [`UnsupportedMethod`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use adtkit_transport::{BasicCredentials, HttpTransport, HttpTransportConfig};
//! use std::time::Duration;
//!
//! let transport = HttpTransport::new(HttpTransportConfig {
//!     timeout: Duration::from_secs(60),
//!     credentials: Some(BasicCredentials::new("DEVELOPER", "secret")),
//!     sap_client: Some("001".to_string()),
//!     ..Default::default()
//! })?;
//! # Ok::<(), adtkit_transport::TransportError>(())
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all
)]
#![deny(unsafe_code)]

mod config;
mod error;
mod http;
mod traits;
mod types;

pub use config::{BasicCredentials, HttpTransportConfig, INSECURE_TLS_ENV_VAR, TlsConfig};
pub use error::{TransportError, TransportResult, UnsupportedMethod};
pub use http::HttpTransport;
pub use traits::Transport;
pub use types::{HttpMethod, HttpRequest, RawResponse};
