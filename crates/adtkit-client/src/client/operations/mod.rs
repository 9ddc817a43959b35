//! ADT protocol operations
//!
//! One module per protocol verb. Each module builds its request, interprets
//! the response against the verb's success contract and exposes the verb as
//! a method on [`AdtClient`](crate::AdtClient):
//!
//! - `login`: CSRF token bootstrap
//! - `search`: repository quick search
//! - `source`: read and write source
//! - `lock`: lock and unlock, which drive the session mode
//! - `activate`: activation with per-message diagnostics
//! - `delete`: object deletion
//! - `create`: object creation from the type registry, test class includes
//! - `syntax`: check runs
//! - `unittest`: ABAP Unit runs
//! - `prettyprint`: pretty printer and its settings
//! - `structure`: class/interface structure

pub mod activate;
pub mod create;
pub mod delete;
pub mod lock;
pub mod login;
pub mod prettyprint;
pub mod search;
pub mod source;
pub mod structure;
pub mod syntax;
pub mod unittest;

use adtkit_xml::XmlDocument;

use crate::error::Result;
use crate::registry::creatable_namespaces;

/// Parses a response body. Lookup prefixes resolve through the protocol table
/// plus one prefix per creatable object type.
pub(crate) fn decode(body: &str) -> Result<XmlDocument<'_>> {
    Ok(XmlDocument::parse_with(body, creatable_namespaces())?)
}

/// `true`/`false` as written in request documents.
pub(crate) const fn xml_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
