//! A small ElementTree-style path language.
//!
//! Supported forms:
//!
//! - `name` / `prefix:name` - element children of the context element
//! - `a/b` - step by step through children
//! - `.//name` - any descendant of the context element
//! - `./name` - same as `name`
//! - `*` - any element
//!
//! A bare `name` only matches elements without a namespace, the same way
//! ElementTree treats unqualified tags.

use crate::error::{XmlError, XmlResult};
use crate::namespaces::Namespaces;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    Child,
    Descendant,
    SelfNode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NameTest {
    Any,
    Name {
        namespace: Option<String>,
        local: String,
    },
}

impl NameTest {
    pub(crate) fn matches(&self, node: roxmltree::Node<'_, '_>) -> bool {
        if !node.is_element() {
            return false;
        }
        match self {
            Self::Any => true,
            Self::Name { namespace, local } => {
                let tag = node.tag_name();
                tag.name() == local && tag.namespace() == namespace.as_deref()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Step {
    pub(crate) axis: Axis,
    pub(crate) test: NameTest,
}

/// A compiled path with prefixes already resolved to namespace URIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlPath {
    source: String,
    steps: Vec<Step>,
}

impl XmlPath {
    /// Compiles `path` against the protocol namespace table.
    ///
    /// # Errors
    ///
    /// [`XmlError::InvalidPath`] for empty, absolute or malformed steps and
    /// [`XmlError::UnknownPrefix`] for a prefix the table does not bind.
    pub fn parse(path: &str) -> XmlResult<Self> {
        Self::parse_with(path, Namespaces::adt())
    }

    /// Compiles `path` against a caller-supplied namespace table.
    ///
    /// # Errors
    ///
    /// [`XmlError::InvalidPath`] for empty, absolute or malformed steps and
    /// [`XmlError::UnknownPrefix`] for a prefix the table does not bind.
    pub fn parse_with(path: &str, namespaces: &Namespaces) -> XmlResult<Self> {
        let invalid = |reason| XmlError::InvalidPath {
            path: path.to_string(),
            reason,
        };

        if path.is_empty() {
            return Err(invalid("path is empty"));
        }
        if path.starts_with('/') {
            return Err(invalid("absolute paths are not supported"));
        }

        let mut steps = Vec::new();
        let mut descend = false;
        let segments: Vec<&str> = path.split('/').collect();
        let last = segments.len() - 1;

        for (idx, segment) in segments.into_iter().enumerate() {
            match segment {
                "" => {
                    if idx == last {
                        return Err(invalid("path ends with a separator"));
                    }
                    if descend {
                        return Err(invalid("repeated separator"));
                    }
                    descend = true;
                }
                "." => {
                    if descend {
                        return Err(invalid("`.` cannot follow `//`"));
                    }
                    steps.push(Step {
                        axis: Axis::SelfNode,
                        test: NameTest::Any,
                    });
                }
                name => {
                    let axis = if descend {
                        Axis::Descendant
                    } else {
                        Axis::Child
                    };
                    descend = false;
                    steps.push(Step {
                        axis,
                        test: resolve_name(name, path, namespaces)?,
                    });
                }
            }
        }

        Ok(Self {
            source: path.to_string(),
            steps,
        })
    }

    /// The path as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub(crate) fn steps(&self) -> &[Step] {
        &self.steps
    }
}

fn resolve_name(name: &str, path: &str, namespaces: &Namespaces) -> XmlResult<NameTest> {
    if name == "*" {
        return Ok(NameTest::Any);
    }
    match name.split_once(':') {
        Some((prefix, local)) => {
            let uri = namespaces
                .resolve(prefix)
                .ok_or_else(|| XmlError::UnknownPrefix {
                    prefix: prefix.to_string(),
                    path: path.to_string(),
                })?;
            Ok(NameTest::Name {
                namespace: Some(uri.to_string()),
                local: local.to_string(),
            })
        }
        None => Ok(NameTest::Name {
            namespace: None,
            local: name.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::{ADTCORE, CHKL};

    #[test]
    fn test_prefixed_child_step() {
        let path = XmlPath::parse("chkl:properties").unwrap();
        assert_eq!(
            path.steps(),
            &[Step {
                axis: Axis::Child,
                test: NameTest::Name {
                    namespace: Some(CHKL.to_string()),
                    local: "properties".to_string(),
                },
            }]
        );
    }

    #[test]
    fn test_descendant_step() {
        let path = XmlPath::parse(".//LOCK_HANDLE").unwrap();
        assert_eq!(path.steps().len(), 2);
        assert_eq!(path.steps()[0].axis, Axis::SelfNode);
        assert_eq!(path.steps()[1].axis, Axis::Descendant);
    }

    #[test]
    fn test_nested_steps() {
        let path = XmlPath::parse("./details/detail").unwrap();
        let axes: Vec<Axis> = path.steps().iter().map(|s| s.axis).collect();
        assert_eq!(axes, vec![Axis::SelfNode, Axis::Child, Axis::Child]);
    }

    #[test]
    fn test_descendant_prefixed() {
        let path = XmlPath::parse(".//adtcore:objectReference").unwrap();
        match &path.steps()[1].test {
            NameTest::Name { namespace, local } => {
                assert_eq!(namespace.as_deref(), Some(ADTCORE));
                assert_eq!(local, "objectReference");
            }
            NameTest::Any => panic!("expected a name test"),
        }
    }

    #[test]
    fn test_unknown_prefix_is_rejected() {
        let err = XmlPath::parse("zzz:thing").unwrap_err();
        assert!(matches!(err, XmlError::UnknownPrefix { ref prefix, .. } if prefix == "zzz"));
    }

    #[test]
    fn test_malformed_paths_are_rejected() {
        for bad in ["", "/root", "a/", "a///b", ".//."] {
            assert!(
                matches!(XmlPath::parse(bad), Err(XmlError::InvalidPath { .. })),
                "path {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_custom_namespace_table() {
        let ns = Namespaces::empty().with("p", "urn:p");
        assert!(XmlPath::parse_with("p:x", &ns).is_ok());
        assert!(XmlPath::parse_with("adtcore:x", &ns).is_err());
    }
}
