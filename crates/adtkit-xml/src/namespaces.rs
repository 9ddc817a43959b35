//! Prefix to namespace URI table used when compiling paths.

use std::collections::HashMap;
use std::sync::LazyLock;

/// `adtcore` namespace URI.
pub const ADTCORE: &str = "http://www.sap.com/adt/core";
/// `chkrun` namespace URI (check runs / syntax check).
pub const CHKRUN: &str = "http://www.sap.com/adt/checkrun";
/// `chkl` namespace URI (activation check lists).
pub const CHKL: &str = "http://www.sap.com/abapxml/checklist";
/// `aunit` namespace URI (ABAP Unit).
pub const AUNIT: &str = "http://www.sap.com/adt/aunit";
/// `atom` namespace URI.
pub const ATOM: &str = "http://www.w3.org/2005/Atom";
/// `abapsource` namespace URI (object structure).
pub const ABAPSOURCE: &str = "http://www.sap.com/adt/abapsource";
/// The reserved `xml` namespace URI.
pub const XML: &str = "http://www.w3.org/XML/1998/namespace";

static ADT_NAMESPACES: LazyLock<Namespaces> = LazyLock::new(|| {
    Namespaces::empty()
        .with("adtcore", ADTCORE)
        .with("chkrun", CHKRUN)
        .with("chkl", CHKL)
        .with("aunit", AUNIT)
        .with("atom", ATOM)
        .with("abapsource", ABAPSOURCE)
        .with("xml", XML)
});

/// Maps short prefixes (`adtcore`, `chkrun`, ...) to full namespace URIs.
///
/// Prefixes only exist on the caller's side: matching always happens on the
/// resolved URI, so responses that pick different prefixes still match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespaces {
    prefixes: HashMap<String, String>,
}

impl Namespaces {
    /// An empty table.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The protocol's fixed namespace table.
    pub fn adt() -> &'static Namespaces {
        &ADT_NAMESPACES
    }

    /// Adds or replaces a prefix binding.
    #[must_use]
    pub fn with(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.prefixes.insert(prefix.into(), uri.into());
        self
    }

    /// Resolves a prefix.
    pub fn resolve(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// Number of bound prefixes.
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Whether the table has no bindings.
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}
