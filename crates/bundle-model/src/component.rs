//! Bundle and component types
//!
//! # Example YAML
//!
//! ```yaml
//! apiVersion: bundle.dev/v1alpha1
//! kind: Bundle
//! metadata:
//!   name: cluster-base
//! components:
//! - spec:
//!     componentName: etcd
//!     version: 3.5.0
//!     objectFiles:
//!     - url: etcd/etcd-server.yaml
//! componentFiles:
//! - url: kube-proxy/kube-proxy-component.yaml
//! ```

use serde::{Deserialize, Serialize};

use bundle_tree::Tree;

use crate::error::{Error, Result};
use crate::file_ref::FileRef;
use crate::keys::ComponentKey;

/// API version written on bundles and components.
pub const API_VERSION: &str = "bundle.dev/v1alpha1";

/// Kind of a bundle document.
pub const BUNDLE_KIND: &str = "Bundle";

/// Kind of a component document.
pub const COMPONENT_KIND: &str = "Component";

fn default_api_version() -> String {
    API_VERSION.to_string()
}

fn bundle_kind() -> String {
    BUNDLE_KIND.to_string()
}

fn component_kind() -> String {
    COMPONENT_KIND.to_string()
}

/// Object metadata shared by bundles and components.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl ObjectMeta {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

/// A named, versioned group of configuration objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "component_kind")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "ObjectMeta::is_empty")]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: ComponentSpec,
}

/// Content of a component.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpec {
    /// Canonical name, unique within a bundle.
    #[serde(default)]
    pub component_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Inline objects, including everything inlined by resolution.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objects: Vec<Tree>,
    /// Files holding one or more objects each.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub object_files: Vec<FileRef>,
    /// Files whose raw text is wrapped into generated data objects.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub raw_text_files: Vec<FileRef>,
}

impl Default for Component {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            kind: component_kind(),
            metadata: ObjectMeta::default(),
            spec: ComponentSpec::default(),
        }
    }
}

impl Component {
    /// Create an empty component with the given canonical name.
    pub fn new(name: impl Into<String>) -> Self {
        let mut component = Self::default();
        component.spec.component_name = name.into();
        component
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.spec.version = Some(version.into());
        self
    }

    pub fn with_object(mut self, object: Tree) -> Self {
        self.spec.objects.push(object);
        self
    }

    pub fn with_object_file(mut self, file: impl Into<FileRef>) -> Self {
        self.spec.object_files.push(file.into());
        self
    }

    pub fn with_raw_text_file(mut self, file: impl Into<FileRef>) -> Self {
        self.spec.raw_text_files.push(file.into());
        self
    }

    pub fn canonical_name(&self) -> &str {
        &self.spec.component_name
    }

    pub fn version(&self) -> Option<&str> {
        self.spec.version.as_deref()
    }

    pub fn objects(&self) -> &[Tree] {
        &self.spec.objects
    }

    /// Identity key of this component.
    ///
    /// Fails with a structural error when the canonical name is empty.
    pub fn key(&self) -> Result<ComponentKey> {
        if self.spec.component_name.is_empty() {
            return Err(Error::structural(format!(
                "component {:?} has no spec.componentName",
                self.metadata.name
            )));
        }
        Ok(ComponentKey::of(self))
    }

    /// Whether every file reference has been inlined.
    pub fn is_resolved(&self) -> bool {
        self.spec.object_files.is_empty() && self.spec.raw_text_files.is_empty()
    }
}

/// Top-level collection of components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "bundle_kind")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "ObjectMeta::is_empty")]
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Component>,
    /// Files each holding one component.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub component_files: Vec<FileRef>,
}

impl Default for Bundle {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            kind: bundle_kind(),
            metadata: ObjectMeta::default(),
            version: None,
            components: Vec::new(),
            component_files: Vec::new(),
        }
    }
}

impl Bundle {
    pub fn new(name: impl Into<String>) -> Self {
        let mut bundle = Self::default();
        bundle.metadata.name = name.into();
        bundle
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    pub fn with_component_file(mut self, file: impl Into<FileRef>) -> Self {
        self.component_files.push(file.into());
        self
    }

    /// Whether the bundle and all of its components are fully inlined.
    pub fn is_resolved(&self) -> bool {
        self.component_files.is_empty() && self.components.iter().all(Component::is_resolved)
    }
}
