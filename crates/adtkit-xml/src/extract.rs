//! One-shot extraction helpers over raw response bodies.

use std::collections::HashMap;

use crate::document::XmlDocument;
use crate::error::XmlResult;

/// Attribute mapping keyed by bare local name.
pub type Attributes = HashMap<String, String>;

/// Strips a namespace qualifier from an attribute or tag name.
///
/// Handles both the Clark form (`{uri}local`) and the prefixed form
/// (`prefix:local`). Names without a qualifier are returned unchanged, so the
/// function is idempotent.
pub fn strip_namespace(name: &str) -> &str {
    if let Some(rest) = name.strip_prefix('{') {
        return rest.split_once('}').map_or(name, |(_, local)| local);
    }
    name.split_once(':').map_or(name, |(_, local)| local)
}

/// Attributes of every element matching `path`, in document order.
///
/// # Errors
///
/// [`XmlError::Malformed`](crate::XmlError::Malformed) when `xml` does not
/// parse, [`XmlError::UnknownPrefix`](crate::XmlError::UnknownPrefix) or
/// [`XmlError::InvalidPath`](crate::XmlError::InvalidPath) when `path` does
/// not compile.
pub fn find_all_attributes(xml: &str, path: &str) -> XmlResult<Vec<Attributes>> {
    let doc = XmlDocument::parse(xml)?;
    Ok(doc
        .find_all(path)?
        .iter()
        .map(|element| element.attributes())
        .collect())
}

/// Attributes of the first element matching `path`; empty when nothing matches.
///
/// # Errors
///
/// [`XmlError::Malformed`](crate::XmlError::Malformed) when `xml` does not
/// parse, [`XmlError::UnknownPrefix`](crate::XmlError::UnknownPrefix) or
/// [`XmlError::InvalidPath`](crate::XmlError::InvalidPath) when `path` does
/// not compile.
pub fn find_one_attributes(xml: &str, path: &str) -> XmlResult<Attributes> {
    let doc = XmlDocument::parse(xml)?;
    Ok(doc
        .find(path)?
        .map(|element| element.attributes())
        .unwrap_or_default())
}

/// Trimmed descendant text of the first element matching `path`; empty when
/// nothing matches.
///
/// # Errors
///
/// [`XmlError::Malformed`](crate::XmlError::Malformed) when `xml` does not
/// parse, [`XmlError::UnknownPrefix`](crate::XmlError::UnknownPrefix) or
/// [`XmlError::InvalidPath`](crate::XmlError::InvalidPath) when `path` does
/// not compile.
pub fn find_text(xml: &str, path: &str) -> XmlResult<String> {
    let doc = XmlDocument::parse(xml)?;
    Ok(doc
        .find(path)?
        .map(|element| element.text())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::XmlError;
    use pretty_assertions::assert_eq;

    const SEARCH: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<adtcore:objectReferences xmlns:adtcore="http://www.sap.com/adt/core">
  <adtcore:objectReference adtcore:uri="/sap/bc/adt/programs/programs/z_one" adtcore:type="PROG/P" adtcore:name="Z_ONE" adtcore:packageName="$TMP"/>
  <adtcore:objectReference adtcore:uri="/sap/bc/adt/oo/classes/zcl_two" adtcore:type="CLAS/OC" adtcore:name="ZCL_TWO" adtcore:description="Second"/>
</adtcore:objectReferences>"#;

    const LOCK: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<asx:abap xmlns:asx="http://www.sap.com/abapxml" version="1.0">
  <asx:values>
    <DATA>
      <LOCK_HANDLE> 3E2F1A9C00D1 </LOCK_HANDLE>
      <CORRNR/>
    </DATA>
  </asx:values>
</asx:abap>"#;

    #[test]
    fn test_strip_namespace_forms() {
        assert_eq!(strip_namespace("{http://www.sap.com/adt/core}name"), "name");
        assert_eq!(strip_namespace("adtcore:name"), "name");
        assert_eq!(strip_namespace("name"), "name");
    }

    #[test]
    fn test_strip_namespace_is_idempotent() {
        for raw in ["{urn:x}uri", "adtcore:uri", "uri"] {
            let once = strip_namespace(raw);
            assert_eq!(strip_namespace(once), once);
        }
    }

    #[test]
    fn test_find_all_attributes_in_document_order() {
        let found = find_all_attributes(SEARCH, "adtcore:objectReference").unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0]["name"], "Z_ONE");
        assert_eq!(found[0]["packageName"], "$TMP");
        assert_eq!(found[1]["name"], "ZCL_TWO");
        assert_eq!(found[1]["uri"], "/sap/bc/adt/oo/classes/zcl_two");
    }

    #[test]
    fn test_find_all_attributes_on_local_names_unchanged() {
        let xml = r#"<root><item uri="/a" name="A"/></root>"#;
        let found = find_all_attributes(xml, "item").unwrap();
        let mut expected = Attributes::new();
        expected.insert("uri".to_string(), "/a".to_string());
        expected.insert("name".to_string(), "A".to_string());
        assert_eq!(found, vec![expected]);
    }

    #[test]
    fn test_find_one_attributes_missing_is_empty() {
        let found = find_one_attributes(SEARCH, "chkl:properties").unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_find_text_descendant() {
        assert_eq!(find_text(LOCK, ".//LOCK_HANDLE").unwrap(), "3E2F1A9C00D1");
    }

    #[test]
    fn test_find_text_absent_is_empty() {
        assert_eq!(find_text(SEARCH, ".//LOCK_HANDLE").unwrap(), "");
    }

    #[test]
    fn test_malformed_body_is_reported() {
        let err = find_text("<html><body>Logon failed", ".//x").unwrap_err();
        match err {
            XmlError::Malformed { body, .. } => assert!(body.starts_with("<html>")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
