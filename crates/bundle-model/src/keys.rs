//! Identity keys and partial-match filters

use std::fmt;

use serde::{Deserialize, Serialize};

use bundle_tree::{Tree, path};

use crate::component::Component;
use crate::error::{Error, Result};

/// Partial-match filter over an object's `apiVersion`, `kind` and
/// `metadata.name`.
///
/// An empty field means "don't care", so `ObjectRef::default()` matches
/// every object. A genuinely empty authored name therefore cannot be
/// targeted; names are required to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRef {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl ObjectRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Read whichever identifying fields `tree` has; missing ones stay empty.
    pub fn of(tree: &Tree) -> Self {
        let field = |p: &str| path::get_str(tree, p).unwrap_or_default().to_string();
        Self {
            api_version: field("apiVersion"),
            kind: field("kind"),
            name: field("metadata.name"),
        }
    }

    /// Derive a complete reference, failing when any identifying field is
    /// missing or empty.
    pub fn try_from_tree(tree: &Tree) -> Result<Self> {
        let reference = Self::of(tree);
        let missing: Vec<&str> = [
            ("apiVersion", &reference.api_version),
            ("kind", &reference.kind),
            ("metadata.name", &reference.name),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(reference)
        } else {
            Err(Error::structural(format!(
                "object {} is missing {}",
                reference,
                missing.join(", ")
            )))
        }
    }

    /// Whether every field is empty.
    pub fn is_empty(&self) -> bool {
        self.api_version.is_empty() && self.kind.is_empty() && self.name.is_empty()
    }

    /// AND of all non-empty fields of `self` against `candidate`.
    pub fn matches(&self, candidate: &ObjectRef) -> bool {
        let field = |filter: &str, value: &str| filter.is_empty() || filter == value;
        field(&self.api_version, &candidate.api_version)
            && field(&self.kind, &candidate.kind)
            && field(&self.name, &candidate.name)
    }

    /// [`ObjectRef::matches`] against the fields read from `tree`.
    pub fn matches_tree(&self, tree: &Tree) -> bool {
        self.is_empty() || self.matches(&Self::of(tree))
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let or_any = |s: &str| if s.is_empty() { "*".to_string() } else { s.to_string() };
        write!(
            f,
            "{}/{}/{}",
            or_any(&self.api_version),
            or_any(&self.kind),
            or_any(&self.name)
        )
    }
}

/// Identity of a component: canonical name plus optional version.
///
/// Used as a filter, an empty name or absent version matches anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentKey {
    pub canonical_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ComponentKey {
    pub fn new(canonical_name: impl Into<String>) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// The key of a component, without checking the name is present.
    pub fn of(component: &Component) -> Self {
        Self {
            canonical_name: component.canonical_name().to_string(),
            version: component.spec.version.clone(),
        }
    }

    /// Wildcard-aware match against a concrete key.
    pub fn matches(&self, candidate: &ComponentKey) -> bool {
        (self.canonical_name.is_empty() || self.canonical_name == candidate.canonical_name)
            && self
                .version
                .as_ref()
                .is_none_or(|v| candidate.version.as_ref() == Some(v))
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}@{}", self.canonical_name, version),
            None => f.write_str(&self.canonical_name),
        }
    }
}

/// Addresses exactly one object inside one component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClusterObjectKey {
    pub component: ComponentKey,
    pub object: ObjectRef,
}

impl ClusterObjectKey {
    /// Key of `object` inside `component`; every identifying field is required.
    pub fn new(component: &Component, object: &Tree) -> Result<Self> {
        Ok(Self {
            component: component.key()?,
            object: ObjectRef::try_from_tree(object)?,
        })
    }
}

impl fmt::Display for ClusterObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.component, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(api_version: &str, kind: &str, name: &str) -> Tree {
        Tree::map()
            .with("apiVersion", api_version)
            .with("kind", kind)
            .with("metadata", Tree::map().with("name", name))
    }

    #[test]
    fn test_of_reads_conventional_fields() {
        let reference = ObjectRef::of(&object("v1", "Pod", "pody"));
        assert_eq!(reference, ObjectRef::new().api_version("v1").kind("Pod").name("pody"));
    }

    #[test]
    fn test_try_from_tree_reports_missing_fields() {
        let tree = Tree::map().with("kind", "Pod");
        let err = ObjectRef::try_from_tree(&tree).unwrap_err().to_string();
        assert!(err.contains("apiVersion"), "{err}");
        assert!(err.contains("metadata.name"), "{err}");
        assert!(!err.contains(", kind"), "{err}");
    }

    #[test]
    fn test_partial_match() {
        let pod = ObjectRef::of(&object("v1", "Pod", "pody"));
        assert!(ObjectRef::new().matches(&pod));
        assert!(ObjectRef::new().kind("Pod").matches(&pod));
        assert!(!ObjectRef::new().kind("Pod").name("dodo").matches(&pod));
        assert!(!ObjectRef::new().name("pody").api_version("zed").matches(&pod));
    }

    #[test]
    fn test_component_key_wildcards() {
        let concrete = ComponentKey::new("etcd").with_version("3.5.0");
        assert!(ComponentKey::default().matches(&concrete));
        assert!(ComponentKey::new("etcd").matches(&concrete));
        assert!(!ComponentKey::new("etcd").with_version("3.4.0").matches(&concrete));
        assert!(!ComponentKey::new("etcd").with_version("3.5.0").matches(&ComponentKey::new("etcd")));
    }

    #[test]
    fn test_display() {
        let key = ClusterObjectKey {
            component: ComponentKey::new("etcd").with_version("1"),
            object: ObjectRef::new().kind("Pod").name("p"),
        };
        assert_eq!(key.to_string(), "etcd@1:*/Pod/p");
    }
}
