//! Structured results and request options of the protocol operations.

use std::fmt;

use adtkit_xml::Attributes;
use serde::{Deserialize, Serialize};

/// Opaque edit-lock credential returned by [`lock`](crate::AdtClient::lock).
///
/// Only byte equality is assumed; it must be passed back exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LockHandle(String);

impl LockHandle {
    /// Wraps a handle string.
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// The handle as sent by the server.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwraps the handle string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for LockHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for LockHandle {
    fn from(handle: String) -> Self {
        Self(handle)
    }
}

/// Which version of a source to read or check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceVersion {
    /// The active (published) version.
    #[default]
    Active,
    /// The inactive (saved but not activated) version.
    Inactive,
}

impl SourceVersion {
    /// Wire value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// One search hit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectReference {
    /// Object name
    pub name: String,
    /// Object type tag, e.g. `PROG/P`
    #[serde(rename = "type")]
    pub object_type: String,
    /// Object URI
    pub uri: String,
    /// Every attribute the server sent, keyed by local name
    pub attributes: Attributes,
}

impl ObjectReference {
    /// Builds a reference from namespace-stripped attributes.
    pub fn from_attributes(attributes: Attributes) -> Self {
        let get = |key: &str| attributes.get(key).cloned().unwrap_or_default();
        Self {
            name: get("name"),
            object_type: get("type"),
            uri: get("uri"),
            attributes,
        }
    }

    /// Package name, when the server sent one.
    pub fn package_name(&self) -> Option<&str> {
        self.attributes.get("packageName").map(String::as_str)
    }

    /// Description, when the server sent one.
    pub fn description(&self) -> Option<&str> {
        self.attributes.get("description").map(String::as_str)
    }
}

/// One message of a syntax check run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxMessage {
    /// Object URI without the position fragment and `/source/main` suffix
    pub uri: String,
    /// Line, present only when the server sent a `#start=` fragment
    pub line: Option<u32>,
    /// Column offset, present only when the server sent a `#start=` fragment
    pub offset: Option<u32>,
    /// Severity (`E`, `W`, `I`, ...)
    pub kind: String,
    /// Message text
    pub short_text: String,
}

/// One alert of a unit test run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitTestAlert {
    /// Alert title
    pub title: String,
    /// Alert kind, e.g. `failedAssertion`
    pub kind: String,
    /// Severity, e.g. `critical`
    pub severity: String,
    /// One entry per detail block, lines joined with `\n`
    pub details: Vec<String>,
}

/// Risk level and duration filters of a unit test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitTestFlags {
    /// Run harmless tests
    pub harmless: bool,
    /// Run dangerous tests
    pub dangerous: bool,
    /// Run critical tests
    pub critical: bool,
    /// Run short tests
    pub short: bool,
    /// Run medium tests
    pub medium: bool,
    /// Run long tests
    pub long: bool,
}

impl Default for UnitTestFlags {
    fn default() -> Self {
        Self {
            harmless: true,
            dangerous: false,
            critical: false,
            short: true,
            medium: false,
            long: false,
        }
    }
}

/// One diagnostic of a failed activation, kept as sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationMessage {
    /// Object description (`objDescr`)
    pub object_description: Option<String>,
    /// Severity (`type`)
    pub kind: Option<String>,
    /// Line number, when present
    pub line: Option<u32>,
    /// Navigation link into the source
    pub href: Option<String>,
    /// Message text
    pub short_text: String,
    /// All attributes of the message element, keyed by local name
    pub attributes: Attributes,
}

/// An `atom:link`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Relation
    pub rel: String,
    /// Target
    pub href: String,
}

/// A node below the object in its structure tree (method, attribute, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureComponent {
    /// Component name
    pub name: String,
    /// Component type tag, e.g. `CLAS/OM`
    #[serde(rename = "type")]
    pub object_type: String,
    /// All attributes keyed by local name
    pub attributes: Attributes,
    /// Links of the component
    pub links: Vec<Link>,
}

/// Structure of a class or interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectStructure {
    /// Object name
    pub name: String,
    /// `xml:base` of the document
    pub xml_base: String,
    /// Visibility
    pub visibility: String,
    /// Whether the object is final
    pub is_final: bool,
    /// Object type tag
    #[serde(rename = "type")]
    pub object_type: String,
    /// Links of the object itself
    pub links: Vec<Link>,
    /// Components in document order
    pub components: Vec<StructureComponent>,
}

/// Keyword/identifier case style of the pretty printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrettyPrintStyle {
    /// Everything lower case
    ToLower,
    /// Everything upper case
    ToUpper,
    /// Keywords lower case
    KeywordLower,
    /// Keywords upper case
    KeywordUpper,
    /// Leave case alone
    None,
    /// Keyword case chosen by the server
    KeywordAuto,
}

impl PrettyPrintStyle {
    /// Wire value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToLower => "toLower",
            Self::ToUpper => "toUpper",
            Self::KeywordLower => "keywordLower",
            Self::KeywordUpper => "keywordUpper",
            Self::None => "none",
            Self::KeywordAuto => "keywordAuto",
        }
    }
}

/// Fallback style for [`PrettyPrintStyle::KeywordAuto`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AutoStyle {
    /// Keywords lower case
    KeywordLower,
    /// Keywords upper case
    KeywordUpper,
}

impl AutoStyle {
    /// Wire value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::KeywordLower => "keywordLower",
            Self::KeywordUpper => "keywordUpper",
        }
    }
}

/// Pretty printer settings stored per user on the server.
///
/// Unset optional fields are left out of the request and keep their server
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrettyPrintSettings {
    /// Indent source
    pub indentation: bool,
    /// Case style
    pub style: PrettyPrintStyle,
    /// Condense method calls
    pub condense_method_calls: Option<bool>,
    /// Fallback for [`PrettyPrintStyle::KeywordAuto`]
    pub default_auto_style: Option<AutoStyle>,
    /// Format method calls
    pub format_method_calls: Option<bool>,
    /// Keep identifier case
    pub keep_identifier: Option<bool>,
}

impl PrettyPrintSettings {
    /// Settings with only the required fields.
    pub fn new(indentation: bool, style: PrettyPrintStyle) -> Self {
        Self {
            indentation,
            style,
            condense_method_calls: None,
            default_auto_style: None,
            format_method_calls: None,
            keep_identifier: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_reference_from_attributes() {
        let mut attrs = Attributes::new();
        attrs.insert("name".into(), "Z_DEMO".into());
        attrs.insert("type".into(), "PROG/P".into());
        attrs.insert("uri".into(), "/sap/bc/adt/programs/programs/z_demo".into());
        attrs.insert("packageName".into(), "$TMP".into());

        let reference = ObjectReference::from_attributes(attrs);
        assert_eq!(reference.name, "Z_DEMO");
        assert_eq!(reference.object_type, "PROG/P");
        assert_eq!(reference.package_name(), Some("$TMP"));
        assert_eq!(reference.description(), None);
    }

    #[test]
    fn test_lock_handle_round_trips_exactly() {
        let raw = "  3E2F1A9C00D1+/=";
        assert_eq!(LockHandle::new(raw).as_str(), raw);
        assert_eq!(LockHandle::new(raw).into_inner(), raw);
    }

    #[test]
    fn test_unit_test_flag_defaults() {
        let flags = UnitTestFlags::default();
        assert!(flags.harmless && flags.short);
        assert!(!flags.dangerous && !flags.critical && !flags.medium && !flags.long);
    }

    #[test]
    fn test_style_serde_matches_wire() {
        let json = serde_json::to_string(&PrettyPrintStyle::KeywordUpper).unwrap();
        assert_eq!(json, format!("\"{}\"", PrettyPrintStyle::KeywordUpper.as_str()));
    }
}
