//! Activation.
//!
//! Success is decided by the `chkl:properties` element of the answer, not by
//! the HTTP status: either `activationExecuted` or `generationExecuted` must
//! be `true`. Everything else is a failure carrying the server's messages.

use adtkit_transport::{RawResponse, Transport};
use adtkit_xml::escape;
use tracing::{info, warn};

use super::decode;
use crate::client::core::AdtClient;
use crate::dispatcher::RequestSpec;
use crate::error::{AdtError, Result};
use crate::types::ActivationMessage;

/// Activation endpoint.
pub const ACTIVATION_URI: &str = "/sap/bc/adt/activation";

pub(crate) fn activation_body(name: &str, uri: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<adtcore:objectReferences xmlns:adtcore="http://www.sap.com/adt/core">
  <adtcore:objectReference adtcore:uri="{uri}" adtcore:name="{name}"/>
</adtcore:objectReferences>"#,
        uri = escape(uri),
        name = escape(name),
    )
}

pub(crate) fn activation_request(name: &str, uri: &str) -> RequestSpec {
    RequestSpec::post(ACTIVATION_URI)
        .param("method", "activate")
        .param("preauditRequested", true)
        .body(activation_body(name, uri))
}

pub(crate) fn parse_activation_response(response: &RawResponse) -> Result<()> {
    let doc = match decode(&response.body) {
        Ok(doc) => doc,
        Err(_) if !response.is_success() => {
            return Err(AdtError::UnexpectedStatus {
                operation: "activate",
                status: response.status,
                body: response.body.clone(),
            });
        }
        Err(err) => return Err(err),
    };

    let properties = doc
        .find(".//chkl:properties")?
        .map(|el| el.attributes())
        .unwrap_or_default();
    let executed = |key: &str| properties.get(key).is_some_and(|v| v == "true");
    if executed("activationExecuted") || executed("generationExecuted") {
        return Ok(());
    }

    let messages = doc
        .find_all(".//msg")?
        .into_iter()
        .map(|msg| {
            let attributes = msg.attributes();
            ActivationMessage {
                object_description: attributes.get("objDescr").cloned(),
                kind: attributes.get("type").cloned(),
                line: attributes.get("line").and_then(|l| l.parse().ok()),
                href: attributes.get("href").cloned(),
                short_text: msg
                    .find("shortText")
                    .ok()
                    .flatten()
                    .map(|el| el.text())
                    .unwrap_or_default(),
                attributes,
            }
        })
        .collect();

    Err(AdtError::ActivationFailed {
        status: response.status,
        messages,
    })
}

impl<T: Transport> AdtClient<T> {
    /// Activates one object.
    ///
    /// # Errors
    ///
    /// - [`AdtError::ActivationFailed`] when neither activation nor
    ///   generation was executed, with the server's messages
    /// - [`AdtError::UnexpectedStatus`] when a non-2xx answer is not XML,
    ///   such as an HTML error page
    /// - [`AdtError::MalformedResponse`] when a 2xx answer is not XML
    pub async fn activate(&mut self, name: &str, uri: &str) -> Result<()> {
        let response = self.send(activation_request(name, uri)).await?;
        match parse_activation_response(&response) {
            Ok(()) => {
                info!(name, "Object activated");
                Ok(())
            }
            Err(err) => {
                warn!(name, status = response.status, "Activation failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn properties(activation: &str, generation: &str) -> String {
        format!(
            r#"<chkl:messages xmlns:chkl="http://www.sap.com/abapxml/checklist">
  <chkl:properties checkExecuted="true" activationExecuted="{activation}" generationExecuted="{generation}"/>
</chkl:messages>"#
        )
    }

    #[test]
    fn test_generation_alone_is_success() {
        let response = RawResponse::new(200, properties("false", "true"));
        assert!(parse_activation_response(&response).is_ok());
    }

    #[test]
    fn test_activation_alone_is_success() {
        let response = RawResponse::new(200, properties("true", "false"));
        assert!(parse_activation_response(&response).is_ok());
    }

    #[test]
    fn test_failure_collects_messages() {
        let body = r#"<chkl:messages xmlns:chkl="http://www.sap.com/abapxml/checklist">
  <msg objDescr="Program Z_DEMO" type="E" line="3" href="/sap/bc/adt/programs/programs/z_demo/source/main#start=3,0" forceSupported="true">
    <shortText><txt>Field "FOO" is unknown.</txt></shortText>
  </msg>
  <chkl:properties checkExecuted="true" activationExecuted="false" generationExecuted="false"/>
</chkl:messages>"#;
        let err = parse_activation_response(&RawResponse::new(200, body)).unwrap_err();
        let AdtError::ActivationFailed { status, messages } = err else {
            panic!("unexpected error: {err:?}");
        };
        assert_eq!(status, 200);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].object_description.as_deref(), Some("Program Z_DEMO"));
        assert_eq!(messages[0].kind.as_deref(), Some("E"));
        assert_eq!(messages[0].line, Some(3));
        assert_eq!(messages[0].short_text, "Field \"FOO\" is unknown.");
        assert_eq!(
            messages[0].attributes.get("forceSupported").map(String::as_str),
            Some("true")
        );
    }

    #[test]
    fn test_missing_properties_is_failure() {
        let body = r#"<chkl:messages xmlns:chkl="http://www.sap.com/abapxml/checklist"/>"#;
        let err = parse_activation_response(&RawResponse::new(200, body)).unwrap_err();
        assert!(matches!(err, AdtError::ActivationFailed { ref messages, .. } if messages.is_empty()));
    }

    #[test]
    fn test_empty_body_is_malformed() {
        let err = parse_activation_response(&RawResponse::new(200, "")).unwrap_err();
        assert!(matches!(err, AdtError::MalformedResponse { .. }));
    }

    #[test]
    fn test_error_page_keeps_status() {
        let response = RawResponse::new(500, "<html><body>Internal Server Error");
        let err = parse_activation_response(&response).unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(matches!(
            err,
            AdtError::UnexpectedStatus { operation: "activate", ref body, .. } if body.starts_with("<html>")
        ));
    }

    #[test]
    fn test_body_escapes_values() {
        let body = activation_body("Z<&>", "/x?a=1&b=2");
        assert!(body.contains(r#"adtcore:name="Z&lt;&amp;&gt;""#));
        assert!(body.contains(r#"adtcore:uri="/x?a=1&amp;b=2""#));
    }
}
