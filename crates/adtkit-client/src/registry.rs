//! Creatable object types.
//!
//! Each type maps to a collection endpoint and the root element of its
//! creation document. Adding a creatable type means adding one variant and
//! one table row.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use adtkit_xml::Namespaces;
use serde::{Deserialize, Serialize};

use crate::error::AdtError;

/// Placeholder in a collection path that is replaced by the parent name.
pub const PARENT_PLACEHOLDER: &str = "{parent}";

/// Object type tags that can be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    /// Executable program (report)
    #[serde(rename = "PROG/P")]
    Program,
    /// Global class
    #[serde(rename = "CLAS/OC")]
    Class,
    /// Database table
    #[serde(rename = "TABL/DT")]
    Table,
    /// Global interface
    #[serde(rename = "INTF/OI")]
    Interface,
    /// Program include
    #[serde(rename = "PROG/I")]
    Include,
    /// Function group
    #[serde(rename = "FUGR/F")]
    FunctionGroup,
    /// Function module, created inside a function group
    #[serde(rename = "FUGR/FF")]
    FunctionModule,
    /// Message class
    #[serde(rename = "MSAG/N")]
    MessageClass,
    /// CDS access control
    #[serde(rename = "DCLS/DL")]
    AccessControl,
    /// CDS data definition
    #[serde(rename = "DDLS/DF")]
    DataDefinition,
    /// CDS metadata extension
    #[serde(rename = "DDLX/EX")]
    MetadataExtension,
    /// Data element
    #[serde(rename = "DTEL/DE")]
    DataElement,
}

/// Endpoint and document shape of one creatable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatableType {
    /// Type tag sent as `adtcore:type`
    pub tag: &'static str,
    /// Collection path, possibly containing [`PARENT_PLACEHOLDER`]
    pub path: &'static str,
    /// Root element local name
    pub element: &'static str,
    /// Root element namespace prefix
    pub prefix: &'static str,
    /// Root element namespace URI
    pub namespace: &'static str,
}

impl CreatableType {
    /// `prefix:element`
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.prefix, self.element)
    }

    /// Whether objects of this type live inside a parent object rather than
    /// directly in a package.
    pub fn has_container(&self) -> bool {
        self.path.contains(PARENT_PLACEHOLDER)
    }
}

const PROGRAM: CreatableType = CreatableType {
    tag: "PROG/P",
    path: "/sap/bc/adt/programs/programs",
    element: "abapProgram",
    prefix: "program",
    namespace: "http://www.sap.com/adt/programs/programs",
};

const CLASS: CreatableType = CreatableType {
    tag: "CLAS/OC",
    path: "/sap/bc/adt/oo/classes",
    element: "abapClass",
    prefix: "class",
    namespace: "http://www.sap.com/adt/oo/classes",
};

const TABLE: CreatableType = CreatableType {
    tag: "TABL/DT",
    path: "/sap/bc/adt/ddic/tables",
    element: "blueSource",
    prefix: "blue",
    namespace: "http://www.sap.com/wbobj/blue",
};

const INTERFACE: CreatableType = CreatableType {
    tag: "INTF/OI",
    path: "/sap/bc/adt/oo/interfaces",
    element: "abapInterface",
    prefix: "intf",
    namespace: "http://www.sap.com/adt/oo/interfaces",
};

const INCLUDE: CreatableType = CreatableType {
    tag: "PROG/I",
    path: "/sap/bc/adt/programs/includes",
    element: "abapInclude",
    prefix: "include",
    namespace: "http://www.sap.com/adt/programs/includes",
};

const FUNCTION_GROUP: CreatableType = CreatableType {
    tag: "FUGR/F",
    path: "/sap/bc/adt/functions/groups",
    element: "abapFunctionGroup",
    prefix: "group",
    namespace: "http://www.sap.com/adt/functions/groups",
};

const FUNCTION_MODULE: CreatableType = CreatableType {
    tag: "FUGR/FF",
    path: "/sap/bc/adt/functions/groups/{parent}/fmodules",
    element: "abapFunctionModule",
    prefix: "fmodule",
    namespace: "http://www.sap.com/adt/functions/fmodules",
};

const MESSAGE_CLASS: CreatableType = CreatableType {
    tag: "MSAG/N",
    path: "/sap/bc/adt/messageclass",
    element: "messageClass",
    prefix: "mc",
    namespace: "http://www.sap.com/adt/MessageClass",
};

const ACCESS_CONTROL: CreatableType = CreatableType {
    tag: "DCLS/DL",
    path: "/sap/bc/adt/acm/dcl/sources",
    element: "dclSource",
    prefix: "dcl",
    namespace: "http://www.sap.com/adt/acm/dclsources",
};

const DATA_DEFINITION: CreatableType = CreatableType {
    tag: "DDLS/DF",
    path: "/sap/bc/adt/ddic/ddl/sources",
    element: "ddlSource",
    prefix: "ddl",
    namespace: "http://www.sap.com/adt/ddic/ddlsources",
};

const METADATA_EXTENSION: CreatableType = CreatableType {
    tag: "DDLX/EX",
    path: "/sap/bc/adt/ddic/ddlx/sources",
    element: "ddlxSource",
    prefix: "ddlx",
    namespace: "http://www.sap.com/adt/ddic/ddlxsources",
};

const DATA_ELEMENT: CreatableType = CreatableType {
    tag: "DTEL/DE",
    path: "/sap/bc/adt/ddic/dataelements",
    element: "wbobj",
    prefix: "blue",
    namespace: "http://www.sap.com/wbobj/dictionary/dtel",
};

impl ObjectType {
    /// Every registered type, in table order.
    pub const ALL: [ObjectType; 12] = [
        Self::Program,
        Self::Class,
        Self::Table,
        Self::Interface,
        Self::Include,
        Self::FunctionGroup,
        Self::FunctionModule,
        Self::MessageClass,
        Self::AccessControl,
        Self::DataDefinition,
        Self::MetadataExtension,
        Self::DataElement,
    ];

    /// Registry entry.
    pub const fn creatable(self) -> &'static CreatableType {
        match self {
            Self::Program => &PROGRAM,
            Self::Class => &CLASS,
            Self::Table => &TABLE,
            Self::Interface => &INTERFACE,
            Self::Include => &INCLUDE,
            Self::FunctionGroup => &FUNCTION_GROUP,
            Self::FunctionModule => &FUNCTION_MODULE,
            Self::MessageClass => &MESSAGE_CLASS,
            Self::AccessControl => &ACCESS_CONTROL,
            Self::DataDefinition => &DATA_DEFINITION,
            Self::MetadataExtension => &METADATA_EXTENSION,
            Self::DataElement => &DATA_ELEMENT,
        }
    }

    /// Type tag, e.g. `PROG/P`.
    pub const fn tag(self) -> &'static str {
        self.creatable().tag
    }

    /// Collection URI with the parent substituted for the placeholder.
    ///
    /// Only the first placeholder is replaced; paths without one are
    /// returned unchanged.
    pub fn collection_uri(self, parent: &str) -> String {
        self.creatable().path.replacen(PARENT_PLACEHOLDER, parent, 1)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ObjectType {
    type Err = AdtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.tag() == s)
            .ok_or_else(|| AdtError::UnknownObjectType(s.to_string()))
    }
}

static CREATABLE_NAMESPACES: LazyLock<Namespaces> = LazyLock::new(|| {
    ObjectType::ALL
        .into_iter()
        .map(ObjectType::creatable)
        .fold(Namespaces::adt().clone(), |table, entry| {
            // first binding of a shared prefix wins (`blue`)
            if table.resolve(entry.prefix).is_some() {
                table
            } else {
                table.with(entry.prefix, entry.namespace)
            }
        })
});

/// The protocol namespace table extended with one prefix per creatable type.
pub fn creatable_namespaces() -> &'static Namespaces {
    &CREATABLE_NAMESPACES
}
