//! Declared component requirements
//!
//! A component may carry one object of kind `Requirements` listing the
//! components it needs alongside it:
//!
//! ```yaml
//! apiVersion: bundle.dev/v1alpha1
//! kind: Requirements
//! metadata:
//!   name: requirements
//! require:
//! - componentName: etcd
//!   version: 3.5.0
//! - componentName: kube-dns
//! ```
//!
//! Only the data model lives here; nothing resolves requirements.

use serde::{Deserialize, Serialize};
use tracing::debug;

use bundle_tree::{Tree, path};

use crate::component::Component;
use crate::error::{Error, Result};
use crate::keys::ComponentKey;

/// Kind of the object carrying requirements.
pub const REQUIREMENTS_KIND: &str = "Requirements";

/// One required component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRequire {
    pub component_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ComponentRequire {
    /// Filter key selecting the required component.
    pub fn key(&self) -> ComponentKey {
        ComponentKey {
            canonical_name: self.component_name.clone(),
            version: self.version.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Requirements {
    #[serde(default)]
    pub require: Vec<ComponentRequire>,
}

impl Requirements {
    /// Parse a `Requirements` object.
    pub fn from_tree(tree: &Tree) -> std::result::Result<Self, String> {
        let value = serde_json::Value::from(tree.clone());
        let requirements: Self = serde_json::from_value(value).map_err(|e| e.to_string())?;
        if let Some(entry) = requirements
            .require
            .iter()
            .find(|r| r.component_name.is_empty())
        {
            return Err(format!("entry {entry:?} has an empty componentName"));
        }
        Ok(requirements)
    }
}

impl Component {
    /// The component's declared requirements, if it has a `Requirements`
    /// object.
    ///
    /// More than one such object is an error.
    pub fn requirements(&self) -> Result<Option<Requirements>> {
        let invalid = |message: String| Error::InvalidRequirements {
            component: self.canonical_name().to_string(),
            message,
        };

        let mut found = self
            .objects()
            .iter()
            .filter(|object| path::get_str(object, "kind") == Some(REQUIREMENTS_KIND));

        let Some(object) = found.next() else {
            return Ok(None);
        };
        if found.next().is_some() {
            return Err(invalid("more than one Requirements object".to_string()));
        }

        let requirements = Requirements::from_tree(object).map_err(invalid)?;
        debug!(
            component = self.canonical_name(),
            count = requirements.require.len(),
            "Parsed component requirements"
        );
        Ok(Some(requirements))
    }
}
