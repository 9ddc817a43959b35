//! # adtkit XML
//!
//! Namespace-aware extraction of attributes and text from ADT response bodies.
//!
//! Callers name elements with the short protocol prefixes (`adtcore:`,
//! `chkrun:`, `chkl:`, `aunit:`), but matching is done on the resolved
//! namespace URI, so a server that picks other prefixes still matches.
//!
//! ## Usage
//!
//! ```rust
//! use adtkit_xml::{find_all_attributes, find_text};
//!
//! let body = r#"<adtcore:objectReferences xmlns:adtcore="http://www.sap.com/adt/core">
//!   <adtcore:objectReference adtcore:name="Z_DEMO" adtcore:type="PROG/P"/>
//! </adtcore:objectReferences>"#;
//!
//! let refs = find_all_attributes(body, "adtcore:objectReference")?;
//! assert_eq!(refs[0]["name"], "Z_DEMO");
//!
//! // absence is not an error
//! assert_eq!(find_text(body, ".//LOCK_HANDLE")?, "");
//! # Ok::<(), adtkit_xml::XmlError>(())
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all
)]
#![deny(unsafe_code)]

mod document;
mod error;
mod escape;
mod extract;
mod path;

pub mod namespaces;

pub use document::{XmlDocument, XmlElement};
pub use error::{XmlError, XmlResult};
pub use escape::escape;
pub use extract::{Attributes, find_all_attributes, find_one_attributes, find_text, strip_namespace};
pub use namespaces::Namespaces;
pub use path::XmlPath;
