//! Parsed response documents and element handles.

use std::collections::HashSet;

use crate::error::{XmlError, XmlResult};
use crate::extract::{Attributes, strip_namespace};
use crate::namespaces::Namespaces;
use crate::path::{Axis, XmlPath};

/// A parsed XML response body.
///
/// The document borrows the body it was parsed from and the namespace table
/// its lookups resolve prefixes through; element handles borrow the document.
#[derive(Debug)]
pub struct XmlDocument<'input> {
    doc: roxmltree::Document<'input>,
    namespaces: &'input Namespaces,
}

impl<'input> XmlDocument<'input> {
    /// Parses `text`, resolving lookup prefixes through
    /// [`Namespaces::adt`].
    ///
    /// # Errors
    ///
    /// [`XmlError::Malformed`] with the raw body attached when `text` is not
    /// well-formed XML.
    pub fn parse(text: &'input str) -> XmlResult<Self> {
        Self::parse_with(text, Namespaces::adt())
    }

    /// Parses `text`, resolving lookup prefixes through `namespaces`.
    ///
    /// # Errors
    ///
    /// [`XmlError::Malformed`] with the raw body attached when `text` is not
    /// well-formed XML.
    pub fn parse_with(text: &'input str, namespaces: &'input Namespaces) -> XmlResult<Self> {
        roxmltree::Document::parse(text)
            .map(|doc| Self { doc, namespaces })
            .map_err(|e| XmlError::Malformed {
                message: e.to_string(),
                body: text.to_string(),
            })
    }

    /// Prefix table used by lookups on this document.
    pub fn namespaces(&self) -> &'input Namespaces {
        self.namespaces
    }

    /// The document element.
    pub fn root(&self) -> XmlElement<'_, 'input> {
        XmlElement {
            node: self.doc.root_element(),
            namespaces: self.namespaces,
        }
    }

    /// All elements matching `path`, relative to the document element.
    ///
    /// # Errors
    ///
    /// [`XmlError::UnknownPrefix`] or [`XmlError::InvalidPath`] when `path`
    /// does not compile.
    pub fn find_all(&self, path: &str) -> XmlResult<Vec<XmlElement<'_, 'input>>> {
        self.root().find_all(path)
    }

    /// The first element matching `path`, relative to the document element.
    ///
    /// # Errors
    ///
    /// [`XmlError::UnknownPrefix`] or [`XmlError::InvalidPath`] when `path`
    /// does not compile.
    pub fn find(&self, path: &str) -> XmlResult<Option<XmlElement<'_, 'input>>> {
        self.root().find(path)
    }
}

/// A borrowed element inside an [`XmlDocument`].
#[derive(Debug, Clone, Copy)]
pub struct XmlElement<'a, 'input> {
    node: roxmltree::Node<'a, 'input>,
    namespaces: &'input Namespaces,
}

impl<'a, 'input> XmlElement<'a, 'input> {
    fn wrap(&self, node: roxmltree::Node<'a, 'input>) -> Self {
        Self {
            node,
            namespaces: self.namespaces,
        }
    }

    /// Element local name.
    pub fn local_name(&self) -> &'a str {
        self.node.tag_name().name()
    }

    /// Resolved namespace URI, if the element is qualified.
    pub fn namespace(&self) -> Option<&'a str> {
        self.node.tag_name().namespace()
    }

    /// All elements matching `path`, relative to this element. Prefixes
    /// resolve through the table the document was parsed with.
    ///
    /// # Errors
    ///
    /// [`XmlError::UnknownPrefix`] or [`XmlError::InvalidPath`] when `path`
    /// does not compile.
    pub fn find_all(&self, path: &str) -> XmlResult<Vec<XmlElement<'a, 'input>>> {
        let compiled = XmlPath::parse_with(path, self.namespaces)?;
        Ok(self.select(&compiled))
    }

    /// The first element matching `path`, relative to this element.
    ///
    /// # Errors
    ///
    /// [`XmlError::UnknownPrefix`] or [`XmlError::InvalidPath`] when `path`
    /// does not compile.
    pub fn find(&self, path: &str) -> XmlResult<Option<XmlElement<'a, 'input>>> {
        Ok(self.find_all(path)?.into_iter().next())
    }

    /// Evaluates a precompiled path.
    pub fn select(&self, path: &XmlPath) -> Vec<XmlElement<'a, 'input>> {
        let mut current = vec![self.node];

        for step in path.steps() {
            let mut next = Vec::new();
            let mut seen = HashSet::new();
            let mut keep = |node: roxmltree::Node<'a, 'input>| {
                if seen.insert(node.id()) {
                    next.push(node);
                }
            };

            for node in &current {
                match step.axis {
                    Axis::SelfNode => keep(*node),
                    Axis::Child => node
                        .children()
                        .filter(|child| step.test.matches(*child))
                        .for_each(&mut keep),
                    Axis::Descendant => node
                        .descendants()
                        .skip(1)
                        .filter(|desc| step.test.matches(*desc))
                        .for_each(&mut keep),
                }
            }
            current = next;
        }

        current.into_iter().map(|node| self.wrap(node)).collect()
    }

    /// Attributes keyed by bare local name.
    ///
    /// When two attributes share a local name under different namespaces
    /// the later one in document order wins.
    pub fn attributes(&self) -> Attributes {
        self.node
            .attributes()
            .map(|attr| (strip_namespace(attr.name()).to_string(), attr.value().to_string()))
            .collect()
    }

    /// Looks up one attribute.
    ///
    /// `prefix:local` resolves the prefix through the document's namespace
    /// table; a bare `local` matches only an unqualified attribute.
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        match name.split_once(':') {
            Some((prefix, local)) => {
                let uri = self.namespaces.resolve(prefix)?;
                self.node.attribute((uri, local))
            }
            None => self.node.attribute(name),
        }
    }

    /// Concatenated text of every descendant text node, trimmed.
    pub fn text(&self) -> String {
        self.node
            .descendants()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// Text directly inside the element, before its first child element.
    pub fn own_text(&self) -> Option<&'a str> {
        self.node.text()
    }

    /// Element children in document order.
    pub fn children(&self) -> impl Iterator<Item = XmlElement<'a, 'input>> + use<'a, 'input> {
        let namespaces = self.namespaces;
        self.node
            .children()
            .filter(|n| n.is_element())
            .map(move |node| XmlElement { node, namespaces })
    }

    /// This element followed by every descendant element, in document order.
    pub fn descendants(&self) -> impl Iterator<Item = XmlElement<'a, 'input>> + use<'a, 'input> {
        let namespaces = self.namespaces;
        self.node
            .descendants()
            .filter(|n| n.is_element())
            .map(move |node| XmlElement { node, namespaces })
    }
}
