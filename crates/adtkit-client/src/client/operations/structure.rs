//! Object structure of classes and interfaces.

use adtkit_transport::{RawResponse, Transport};
use adtkit_xml::XmlElement;

use super::decode;
use crate::client::core::AdtClient;
use crate::dispatcher::{APPLICATION_ANY, RequestSpec};
use crate::error::{AdtError, Result};
use crate::types::{Link, ObjectStructure, StructureComponent};

pub(crate) fn structure_request(object_uri: &str) -> RequestSpec {
    RequestSpec::get(format!("{}/objectstructure", object_uri.trim_end_matches('/')))
        .param("version", "active")
        .param("withShortDescriptions", true)
        .content_type(APPLICATION_ANY)
}

fn links(element: XmlElement<'_, '_>) -> Result<Vec<Link>> {
    Ok(element
        .find_all("atom:link")?
        .into_iter()
        .map(|link| Link {
            rel: link.attribute("rel").unwrap_or_default().to_string(),
            href: link.attribute("href").unwrap_or_default().to_string(),
        })
        .collect())
}

pub(crate) fn parse_structure_response(response: &RawResponse) -> Result<ObjectStructure> {
    let doc = decode(&response.body)?;
    let root = doc.root();
    let attr = |name: &str| root.attribute(name).unwrap_or_default().to_string();

    let mut components = Vec::new();
    for element in root.find_all(".//abapsource:objectStructureElement")? {
        components.push(StructureComponent {
            name: element.attribute("adtcore:name").unwrap_or_default().to_string(),
            object_type: element.attribute("adtcore:type").unwrap_or_default().to_string(),
            attributes: element.attributes(),
            links: links(element)?,
        });
    }

    Ok(ObjectStructure {
        name: attr("adtcore:name"),
        xml_base: attr("xml:base"),
        visibility: attr("visibility"),
        is_final: root.attribute("final") == Some("true"),
        object_type: attr("adtcore:type"),
        links: links(root)?,
        components,
    })
}

impl<T: Transport> AdtClient<T> {
    /// Reads the structure (methods, attributes, types, ...) of a class or
    /// interface. Components come back in document order.
    ///
    /// # Errors
    ///
    /// [`AdtError::ObjectStructureFailed`] for a status outside `200..300`.
    pub async fn object_structure(&mut self, object_uri: &str) -> Result<ObjectStructure> {
        let response = self.send(structure_request(object_uri)).await?;
        if !response.is_success() {
            return Err(AdtError::ObjectStructureFailed {
                status: response.status,
                body: response.body,
            });
        }
        parse_structure_response(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const STRUCTURE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<abapsource:objectStructureElement xmlns:abapsource="http://www.sap.com/adt/abapsource"
    xmlns:adtcore="http://www.sap.com/adt/core" xmlns:atom="http://www.w3.org/2005/Atom"
    xml:base="/sap/bc/adt/oo/classes/zcl_demo" adtcore:name="ZCL_DEMO" adtcore:type="CLAS/OC"
    visibility="public" final="true">
  <atom:link rel="http://www.sap.com/adt/relations/source/definitionIdentifier" href="source/main#type=CLAS%2FOC;name=ZCL_DEMO"/>
  <abapsource:objectStructureElement adtcore:name="RUN" adtcore:type="CLAS/OM" visibility="public" level="instance" clifName="ZCL_DEMO">
    <atom:link rel="http://www.sap.com/adt/relations/source/definitionBlock" href="source/main#start=5,4"/>
    <atom:link rel="http://www.sap.com/adt/relations/source/implementationBlock" href="source/main#start=12,2"/>
  </abapsource:objectStructureElement>
  <abapsource:objectStructureElement adtcore:name="COUNTER" adtcore:type="CLAS/OA" visibility="private" readOnly="false"/>
</abapsource:objectStructureElement>"#;

    #[test]
    fn test_class_structure() {
        let structure = parse_structure_response(&RawResponse::new(200, STRUCTURE)).unwrap();

        assert_eq!(structure.name, "ZCL_DEMO");
        assert_eq!(structure.xml_base, "/sap/bc/adt/oo/classes/zcl_demo");
        assert_eq!(structure.visibility, "public");
        assert!(structure.is_final);
        assert_eq!(structure.object_type, "CLAS/OC");
        assert_eq!(structure.links.len(), 1);

        let names: Vec<_> = structure.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["RUN", "COUNTER"]);

        let run = &structure.components[0];
        assert_eq!(run.object_type, "CLAS/OM");
        assert_eq!(run.links.len(), 2);
        assert_eq!(run.links[1].href, "source/main#start=12,2");
        assert_eq!(run.attributes["level"], "instance");
        assert_eq!(run.attributes["clifName"], "ZCL_DEMO");

        assert_eq!(structure.components[1].attributes["readOnly"], "false");
        assert!(structure.components[1].links.is_empty());
    }

    #[test]
    fn test_request() {
        let spec = structure_request("/sap/bc/adt/oo/classes/zcl_demo");
        assert_eq!(spec.uri, "/sap/bc/adt/oo/classes/zcl_demo/objectstructure");
        assert_eq!(spec.content_type, APPLICATION_ANY);
        assert_eq!(
            spec.query,
            vec![
                ("version".to_string(), "active".to_string()),
                ("withShortDescriptions".to_string(), "true".to_string()),
            ]
        );
    }
}
