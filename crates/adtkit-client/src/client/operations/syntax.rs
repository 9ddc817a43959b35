//! Syntax check runs.

use adtkit_transport::{RawResponse, Transport};
use adtkit_xml::escape;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::decode;
use crate::client::core::AdtClient;
use crate::dispatcher::{APPLICATION_ANY, RequestSpec};
use crate::error::{AdtError, Result};
use crate::types::{SourceVersion, SyntaxMessage};

/// Check run endpoint.
pub const CHECKRUNS_URI: &str = "/sap/bc/adt/checkruns";

const START_FRAGMENT: &str = "#start=";
const MAIN_SOURCE_SUFFIX: &str = "/source/main";

pub(crate) fn syntax_check_body(
    object_uri: &str,
    include_uri: &str,
    source: &str,
    version: SourceVersion,
) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<chkrun:checkObjectList xmlns:chkrun="http://www.sap.com/adt/checkrun" xmlns:adtcore="http://www.sap.com/adt/core">
  <chkrun:checkObject adtcore:uri="{object_uri}" chkrun:version="{version}">
    <chkrun:artifacts>
      <chkrun:artifact chkrun:contentType="text/plain; charset=utf-8" chkrun:uri="{include_uri}">
        <chkrun:content>{content}</chkrun:content>
      </chkrun:artifact>
    </chkrun:artifacts>
  </chkrun:checkObject>
</chkrun:checkObjectList>"#,
        object_uri = escape(object_uri),
        include_uri = escape(include_uri),
        version = version.as_str(),
        content = STANDARD.encode(source),
    )
}

pub(crate) fn syntax_check_request(
    object_uri: &str,
    include_uri: &str,
    source: &str,
    version: SourceVersion,
) -> RequestSpec {
    RequestSpec::post(CHECKRUNS_URI)
        .param("reporters", "abapCheckRun")
        .body(syntax_check_body(object_uri, include_uri, source, version))
        .content_type(APPLICATION_ANY)
}

/// Splits a message URI into the object URI and its `#start=line,offset`
/// position. Positions that are missing or not numeric come back as `None`.
pub(crate) fn split_locator(raw: &str) -> (String, Option<u32>, Option<u32>) {
    let (base, position) = match raw.find(START_FRAGMENT) {
        Some(idx) => (&raw[..idx], Some(&raw[idx + START_FRAGMENT.len()..])),
        None => (raw.split('#').next().unwrap_or(raw), None),
    };

    let (line, offset) = match position {
        Some(position) => {
            let mut parts = position.splitn(2, ',');
            let line = parts.next().and_then(|l| l.trim().parse().ok());
            let offset = parts.next().and_then(|o| o.trim().parse().ok());
            (line, offset)
        }
        None => (None, None),
    };

    let uri = base.strip_suffix(MAIN_SOURCE_SUFFIX).unwrap_or(base);
    (uri.to_string(), line, offset)
}

pub(crate) fn parse_syntax_check_response(response: &RawResponse) -> Result<Vec<SyntaxMessage>> {
    let doc = decode(&response.body)?;
    let messages = doc
        .find_all(".//chkrun:checkMessage")?
        .into_iter()
        .map(|msg| {
            let (uri, line, offset) = split_locator(msg.attribute("chkrun:uri").unwrap_or_default());
            SyntaxMessage {
                uri,
                line,
                offset,
                kind: msg.attribute("chkrun:type").unwrap_or_default().to_string(),
                short_text: msg
                    .attribute("chkrun:shortText")
                    .unwrap_or_default()
                    .to_string(),
            }
        })
        .collect();
    Ok(messages)
}

impl<T: Transport> AdtClient<T> {
    /// Checks `source` as the content of `include_uri` within `object_uri`
    /// without saving it. Messages come back in server order.
    ///
    /// # Errors
    ///
    /// [`AdtError::SyntaxCheckFailed`] for a status outside `200..300`.
    pub async fn syntax_check(
        &mut self,
        object_uri: &str,
        include_uri: &str,
        source: &str,
        version: SourceVersion,
    ) -> Result<Vec<SyntaxMessage>> {
        let response = self
            .send(syntax_check_request(object_uri, include_uri, source, version))
            .await?;
        if !response.is_success() {
            return Err(AdtError::SyntaxCheckFailed {
                status: response.status,
                body: response.body,
            });
        }
        parse_syntax_check_response(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const REPORT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<chkrun:checkRunReports xmlns:chkrun="http://www.sap.com/adt/checkrun">
  <chkrun:checkReport chkrun:reporter="abapCheckRun" chkrun:triggeringUri="/sap/bc/adt/programs/programs/z_demo">
    <chkrun:checkMessageList>
      <chkrun:checkMessage chkrun:uri="/sap/bc/adt/programs/programs/z_demo/source/main#start=3,4" chkrun:type="E" chkrun:shortText="Statement is not accessible."/>
      <chkrun:checkMessage chkrun:uri="/sap/bc/adt/programs/programs/z_demo" chkrun:type="W" chkrun:shortText="Program has no statements."/>
    </chkrun:checkMessageList>
  </chkrun:checkReport>
</chkrun:checkRunReports>"#;

    #[test]
    fn test_messages_with_and_without_position() {
        let messages = parse_syntax_check_response(&RawResponse::new(200, REPORT)).unwrap();
        assert_eq!(
            messages,
            vec![
                SyntaxMessage {
                    uri: "/sap/bc/adt/programs/programs/z_demo".to_string(),
                    line: Some(3),
                    offset: Some(4),
                    kind: "E".to_string(),
                    short_text: "Statement is not accessible.".to_string(),
                },
                SyntaxMessage {
                    uri: "/sap/bc/adt/programs/programs/z_demo".to_string(),
                    line: None,
                    offset: None,
                    kind: "W".to_string(),
                    short_text: "Program has no statements.".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_locator_edge_cases() {
        assert_eq!(
            split_locator("/p/source/main#start=x,2"),
            ("/p".to_string(), None, Some(2))
        );
        assert_eq!(split_locator("/p#type=foo"), ("/p".to_string(), None, None));
        assert_eq!(split_locator("/p#start=7"), ("/p".to_string(), Some(7), None));
        assert_eq!(split_locator(""), (String::new(), None, None));
    }

    #[test]
    fn test_body_carries_base64_source() {
        let body = syntax_check_body(
            "/sap/bc/adt/programs/programs/z_demo",
            "/sap/bc/adt/programs/programs/z_demo/source/main",
            "REPORT z_demo.",
            SourceVersion::Active,
        );
        let doc = decode(&body).unwrap();
        let content = doc.find(".//chkrun:content").unwrap().unwrap();
        assert_eq!(content.text(), STANDARD.encode("REPORT z_demo."));
        let object = doc.find("chkrun:checkObject").unwrap().unwrap();
        assert_eq!(object.attribute("chkrun:version"), Some("active"));
    }

    #[test]
    fn test_request_targets_abap_check_run() {
        let spec = syntax_check_request("/o", "/o/source/main", "", SourceVersion::Inactive);
        assert_eq!(spec.uri, CHECKRUNS_URI);
        assert_eq!(spec.content_type, APPLICATION_ANY);
        assert_eq!(
            spec.query,
            vec![("reporters".to_string(), "abapCheckRun".to_string())]
        );
    }
}
