//! ABAP Unit runs.

use adtkit_transport::{RawResponse, Transport};
use adtkit_xml::{XmlElement, escape};

use super::{decode, xml_bool};
use crate::client::core::AdtClient;
use crate::dispatcher::RequestSpec;
use crate::error::{AdtError, Result};
use crate::types::{UnitTestAlert, UnitTestFlags};

/// Test run endpoint.
pub const TESTRUNS_URI: &str = "/sap/bc/adt/abapunit/testruns";

pub(crate) fn run_configuration(object_uri: &str, flags: &UnitTestFlags) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<aunit:runConfiguration xmlns:aunit="http://www.sap.com/adt/aunit">
  <external>
    <coverage active="false"/>
  </external>
  <options>
    <uriType value="semantic"/>
    <testDeterminationStrategy sameProgram="true" assignedTests="false"/>
    <testRiskLevels harmless="{harmless}" dangerous="{dangerous}" critical="{critical}"/>
    <testDurations short="{short}" medium="{medium}" long="{long}"/>
    <withNavigationUri enabled="true"/>
  </options>
  <adtcore:objectSets xmlns:adtcore="http://www.sap.com/adt/core">
    <objectSet kind="inclusive">
      <adtcore:objectReferences>
        <adtcore:objectReference adtcore:uri="{uri}"/>
      </adtcore:objectReferences>
    </objectSet>
  </adtcore:objectSets>
</aunit:runConfiguration>"#,
        harmless = xml_bool(flags.harmless),
        dangerous = xml_bool(flags.dangerous),
        critical = xml_bool(flags.critical),
        short = xml_bool(flags.short),
        medium = xml_bool(flags.medium),
        long = xml_bool(flags.long),
        uri = escape(object_uri),
    )
}

pub(crate) fn unit_test_request(object_uri: &str, flags: &UnitTestFlags) -> RequestSpec {
    RequestSpec::post(TESTRUNS_URI).body(run_configuration(object_uri, flags))
}

/// One detail line per element in the subtree carrying a `text` attribute.
fn detail_text(detail: XmlElement<'_, '_>) -> String {
    detail
        .descendants()
        .filter_map(|el| el.attribute("text"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn parse_unit_test_response(response: &RawResponse) -> Result<Vec<UnitTestAlert>> {
    let doc = decode(&response.body)?;
    let mut alerts = Vec::new();

    for alert in doc.find_all(".//alert")? {
        let title = alert.find(".//title")?.map(|t| t.text()).unwrap_or_default();
        let details = alert
            .find_all("details/detail")?
            .into_iter()
            .map(detail_text)
            .collect();

        alerts.push(UnitTestAlert {
            title,
            kind: alert.attribute("kind").unwrap_or_default().to_string(),
            severity: alert.attribute("severity").unwrap_or_default().to_string(),
            details,
        });
    }

    Ok(alerts)
}

impl<T: Transport> AdtClient<T> {
    /// Runs the unit tests of an object. An empty result means no alerts.
    ///
    /// # Errors
    ///
    /// [`AdtError::UnitTestRunFailed`] for any status other than 200.
    pub async fn run_unit_test(
        &mut self,
        object_uri: &str,
        flags: UnitTestFlags,
    ) -> Result<Vec<UnitTestAlert>> {
        let response = self.send(unit_test_request(object_uri, &flags)).await?;
        if response.status != 200 {
            return Err(AdtError::UnitTestRunFailed {
                status: response.status,
                body: response.body,
            });
        }
        parse_unit_test_response(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RUN_RESULT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<aunit:runResult xmlns:aunit="http://www.sap.com/adt/aunit" xmlns:adtcore="http://www.sap.com/adt/core">
  <program adtcore:uri="/sap/bc/adt/oo/classes/zcl_demo" adtcore:name="ZCL_DEMO">
    <testClasses>
      <testClass adtcore:name="LTCL_DEMO">
        <testMethods>
          <testMethod adtcore:name="ADDS_UP">
            <alerts>
              <alert kind="failedAssertion" severity="critical">
                <title>Critical Assertion Error: 'ADDS_UP'</title>
                <details>
                  <detail text="Different Values:">
                    <details>
                      <detail text="Expected [3] Actual [4]"/>
                    </details>
                  </detail>
                  <detail text="Test 'LTCL_DEMO-&gt;ADDS_UP' in main program 'ZCL_DEMO'."/>
                </details>
                <stack>
                  <stackEntry adtcore:uri="/sap/bc/adt/oo/classes/zcl_demo/includes/testclasses#start=12,0"/>
                </stack>
              </alert>
            </alerts>
          </testMethod>
        </testMethods>
      </testClass>
    </testClasses>
  </program>
</aunit:runResult>"#;

    #[test]
    fn test_alert_with_nested_details() {
        let alerts = parse_unit_test_response(&RawResponse::new(200, RUN_RESULT)).unwrap();
        assert_eq!(
            alerts,
            vec![UnitTestAlert {
                title: "Critical Assertion Error: 'ADDS_UP'".to_string(),
                kind: "failedAssertion".to_string(),
                severity: "critical".to_string(),
                details: vec![
                    "Different Values:\nExpected [3] Actual [4]".to_string(),
                    "Test 'LTCL_DEMO->ADDS_UP' in main program 'ZCL_DEMO'.".to_string(),
                ],
            }]
        );
    }

    #[test]
    fn test_no_alerts() {
        let body = r#"<aunit:runResult xmlns:aunit="http://www.sap.com/adt/aunit"><program/></aunit:runResult>"#;
        assert!(parse_unit_test_response(&RawResponse::new(200, body)).unwrap().is_empty());
    }

    #[test]
    fn test_run_configuration_flags() {
        let flags = UnitTestFlags {
            dangerous: true,
            long: true,
            ..UnitTestFlags::default()
        };
        let body = run_configuration("/sap/bc/adt/oo/classes/zcl_demo", &flags);
        let doc = decode(&body).unwrap();

        let risk = doc.find("options/testRiskLevels").unwrap().unwrap();
        assert_eq!(risk.attribute("harmless"), Some("true"));
        assert_eq!(risk.attribute("dangerous"), Some("true"));
        assert_eq!(risk.attribute("critical"), Some("false"));

        let durations = doc.find("options/testDurations").unwrap().unwrap();
        assert_eq!(durations.attribute("short"), Some("true"));
        assert_eq!(durations.attribute("medium"), Some("false"));
        assert_eq!(durations.attribute("long"), Some("true"));

        let reference = doc.find(".//adtcore:objectReference").unwrap().unwrap();
        assert_eq!(
            reference.attribute("adtcore:uri"),
            Some("/sap/bc/adt/oo/classes/zcl_demo")
        );
    }
}
