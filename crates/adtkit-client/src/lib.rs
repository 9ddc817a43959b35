//! # adtkit Client
//!
//! Client for the SAP ABAP Development Tools (ADT) REST protocol: search,
//! source read/write, locking, activation, deletion, creation, syntax checks,
//! ABAP Unit runs and pretty printing.
//!
//! ## Architecture
//!
//! ```text
//! AdtClient (session facade, owns SessionState)
//!        ↓
//! Dispatcher (protocol headers, URL resolution, request counter)
//!        ↓
//! Transport (adtkit-transport)
//! ```
//!
//! Responses are decoded with `adtkit-xml`; each verb applies its own
//! success contract and returns a typed failure otherwise.
//!
//! ## Session rules
//!
//! - Until [`AdtClient::login`] succeeds every request carries the CSRF
//!   sentinel `fetch`.
//! - [`AdtClient::lock`] switches the session to stateful before the lock
//!   request is sent; [`AdtClient::unlock`] switches it back after the
//!   server confirmed.
//! - A second lock while stateful, or an unlock while stateless, is rejected
//!   with [`AdtError::InvalidSessionState`] before any request is sent.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use adtkit_client::{AdtClientBuilder, ObjectType, SourceVersion};
//!
//! # async fn example() -> adtkit_client::Result<()> {
//! let mut client = AdtClientBuilder::new("http://localhost:50000")
//!     .credentials("DEVELOPER", "secret")
//!     .sap_client("001")
//!     .build()?;
//!
//! client.login().await?;
//! client.create(ObjectType::Program, "Z_DEMO", "$TMP", "Demo report").await?;
//!
//! let uri = "/sap/bc/adt/programs/programs/z_demo";
//! let handle = client.lock(uri).await?;
//! client.set_object_source(&format!("{uri}/source/main"), "REPORT z_demo.", &handle).await?;
//! client.unlock(uri, &handle).await?;
//! client.activate("Z_DEMO", uri).await?;
//!
//! let source = client.get_object_source(&format!("{uri}/source/main"), SourceVersion::Active).await?;
//! println!("{source}");
//! # Ok(())
//! # }
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all
)]
#![deny(unsafe_code)]

pub mod client;
pub mod dispatcher;
pub mod error;
pub mod registry;
pub mod session;
pub mod types;

pub use adtkit_transport::{
    BasicCredentials, HttpTransport, HttpTransportConfig, RawResponse, TlsConfig, Transport,
    TransportError,
};

pub use client::{AdtClient, AdtClientBuilder, AdtClientConfig, LockFailurePolicy, NewObject};
pub use dispatcher::{Dispatcher, RequestSpec};
pub use error::{AdtError, Result};
pub use registry::{CreatableType, ObjectType};
pub use session::{CSRF_FETCH, SessionMode, SessionState};
pub use types::{
    ActivationMessage, AutoStyle, Link, LockHandle, ObjectReference, ObjectStructure,
    PrettyPrintSettings, PrettyPrintStyle, SourceVersion, StructureComponent, SyntaxMessage,
    UnitTestAlert, UnitTestFlags,
};
