//! Object creation driven by the type registry, and test class includes.

use adtkit_transport::{RawResponse, Transport};
use adtkit_xml::escape;
use tracing::info;

use crate::client::core::AdtClient;
use crate::dispatcher::{APPLICATION_ANY, RequestSpec};
use crate::error::{AdtError, Result};
use crate::registry::ObjectType;
use crate::types::LockHandle;

/// Fields of a creation document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewObject<'a> {
    /// Type to create
    pub object_type: ObjectType,
    /// Object name
    pub name: &'a str,
    /// Package, or the containing object for nested types
    pub parent: &'a str,
    /// Short description
    pub description: &'a str,
    /// Responsible user
    pub responsible: &'a str,
}

pub(crate) fn create_body(object: &NewObject<'_>) -> String {
    let entry = object.object_type.creatable();
    let root = entry.qualified_name();
    let parent = escape(object.parent);

    let parent_ref = if entry.has_container() {
        let container = ObjectType::FunctionGroup;
        format!(
            r#"<adtcore:containerRef adtcore:name="{parent}" adtcore:type="{tag}" adtcore:uri="{uri}/{parent}"/>"#,
            tag = container.tag(),
            uri = container.creatable().path,
        )
    } else {
        format!(r#"<adtcore:packageRef adtcore:name="{parent}"/>"#)
    };

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<{root} xmlns:{prefix}="{namespace}" xmlns:adtcore="http://www.sap.com/adt/core" adtcore:description="{description}" adtcore:name="{name}" adtcore:type="{tag}" adtcore:responsible="{responsible}">
  {parent_ref}
</{root}>"#,
        prefix = entry.prefix,
        namespace = entry.namespace,
        description = escape(object.description),
        name = escape(object.name),
        tag = entry.tag,
        responsible = escape(object.responsible),
    )
}

pub(crate) fn create_request(object: &NewObject<'_>) -> RequestSpec {
    RequestSpec::post(object.object_type.collection_uri(object.parent))
        .body(create_body(object))
        .content_type(APPLICATION_ANY)
}

pub(crate) fn test_class_include_request(class_name: &str, handle: &LockHandle) -> RequestSpec {
    let body = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<class:abapClassInclude xmlns:class="http://www.sap.com/adt/oo/classes" xmlns:adtcore="http://www.sap.com/adt/core" adtcore:name="{name}" class:includeType="testclasses"/>"#,
        name = escape(class_name),
    );
    RequestSpec::post(format!(
        "{}/{class_name}/includes",
        ObjectType::Class.creatable().path
    ))
    .param("lockHandle", handle.as_str())
    .body(body)
}

fn check_created(response: RawResponse) -> Result<()> {
    if (200..300).contains(&response.status) {
        Ok(())
    } else {
        Err(AdtError::CreateFailed {
            status: response.status,
            body: response.body,
        })
    }
}

impl<T: Transport> AdtClient<T> {
    /// Creates an object of a registered type.
    ///
    /// `parent` is the package, except for function modules where it names
    /// the function group. The configured user name is recorded as the
    /// responsible user.
    ///
    /// # Errors
    ///
    /// [`AdtError::CreateFailed`] for a status outside `200..300`.
    pub async fn create(
        &mut self,
        object_type: ObjectType,
        name: &str,
        parent: &str,
        description: &str,
    ) -> Result<()> {
        let responsible = self.config.username.clone();
        let object = NewObject {
            object_type,
            name,
            parent,
            description,
            responsible: &responsible,
        };
        let response = self.send(create_request(&object)).await?;
        check_created(response)?;
        info!(%object_type, name, parent, "Object created");
        Ok(())
    }

    /// Adds the local test class include to a locked class.
    ///
    /// # Errors
    ///
    /// [`AdtError::CreateFailed`] for a status outside `200..300`.
    pub async fn create_test_class_include(
        &mut self,
        class_name: &str,
        handle: &LockHandle,
    ) -> Result<()> {
        let response = self
            .send(test_class_include_request(class_name, handle))
            .await?;
        check_created(response)?;
        info!(class_name, "Test class include created");
        Ok(())
    }
}
