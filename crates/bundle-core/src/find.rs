//! Lookup indexes over a set of components
//!
//! A [`Finder`] takes a private snapshot of the components it indexes, so
//! later changes to the caller's data never affect existing lookups. Lookups
//! are read-only; a built finder can be shared between threads.
//!
//! Several components may carry the same [`ComponentKey`]. All of them are
//! kept, and lookups that need a single answer report
//! [`Error::AmbiguousMatch`].

use std::collections::HashMap;
use std::fmt::Display;

use tracing::debug;

use bundle_model::{Bundle, ClusterObjectKey, Component, ComponentKey, ObjectRef};
use bundle_tree::Tree;

use crate::error::{Error, Result};

/// Pick the only candidate, or explain why there isn't exactly one.
fn unique<'a, T>(what: impl Display, candidates: Vec<&'a T>) -> Result<&'a T> {
    match candidates.as_slice() {
        [single] => Ok(*single),
        [] => Err(Error::NotFound {
            what: what.to_string(),
        }),
        _ => Err(Error::AmbiguousMatch {
            what: what.to_string(),
            count: candidates.len(),
        }),
    }
}

/// Indexes components by key and name, and their objects by [`ObjectRef`].
#[derive(Debug, Clone, Default)]
pub struct Finder {
    components: Vec<Component>,
    by_key: HashMap<ComponentKey, Vec<usize>>,
    by_name: HashMap<String, Vec<usize>>,
}

impl Finder {
    /// Index a snapshot of `components`.
    pub fn new(components: &[Component]) -> Self {
        let components = components.to_vec();
        let mut by_key: HashMap<ComponentKey, Vec<usize>> = HashMap::new();
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();

        for (idx, component) in components.iter().enumerate() {
            by_key.entry(ComponentKey::of(component)).or_default().push(idx);
            by_name
                .entry(component.canonical_name().to_string())
                .or_default()
                .push(idx);
        }

        let duplicates = by_key.values().filter(|v| v.len() > 1).count();
        debug!(
            components = components.len(),
            keys = by_key.len(),
            duplicates,
            "Built component index"
        );

        Self {
            components,
            by_key,
            by_name,
        }
    }

    /// Index a snapshot of the bundle's inline components.
    pub fn from_bundle(bundle: &Bundle) -> Self {
        Self::new(&bundle.components)
    }

    /// All indexed components, in input order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    fn at(&self, indices: Option<&Vec<usize>>) -> Vec<&Component> {
        indices
            .map(|indices| indices.iter().map(|&i| &self.components[i]).collect())
            .unwrap_or_default()
    }

    /// The single component with exactly this key.
    pub fn component(&self, key: &ComponentKey) -> Result<&Component> {
        unique(format!("component {key}"), self.at(self.by_key.get(key)))
    }

    /// Every component with this canonical name, across versions.
    pub fn components_by_name(&self, name: &str) -> Vec<&Component> {
        self.at(self.by_name.get(name))
    }

    /// The single component with this canonical name.
    pub fn unique_component_by_name(&self, name: &str) -> Result<&Component> {
        unique(format!("component {name}"), self.components_by_name(name))
    }

    /// Components matching a key filter whose empty name or absent version
    /// match anything.
    pub fn matching_components(&self, filter: &ComponentKey) -> Vec<&Component> {
        self.components
            .iter()
            .filter(|c| filter.matches(&ComponentKey::of(c)))
            .collect()
    }

    /// Objects matching `object` in components matching `component`.
    ///
    /// Results come in component order, then object order.
    pub fn objects(&self, component: &ComponentKey, object: &ObjectRef) -> Vec<&Tree> {
        self.matching_components(component)
            .into_iter()
            .flat_map(|c| matching_objects(c, object))
            .collect()
    }

    /// The single object matching the filters.
    pub fn unique_object(&self, component: &ComponentKey, object: &ObjectRef) -> Result<&Tree> {
        unique(
            format!("object {object} in {}", display_filter(component)),
            self.objects(component, object),
        )
    }

    /// The object at an exact address.
    pub fn object(&self, key: &ClusterObjectKey) -> Result<&Tree> {
        let component = self.component(&key.component)?;
        unique(
            format!("object {key}"),
            matching_objects(component, &key.object),
        )
    }

    /// The key of every indexed object.
    ///
    /// Fails when any component or object lacks an identifying field.
    pub fn cluster_object_keys(&self) -> Result<Vec<ClusterObjectKey>> {
        let mut keys = Vec::new();
        for component in &self.components {
            for object in component.objects() {
                keys.push(ClusterObjectKey::new(component, object)?);
            }
        }
        Ok(keys)
    }
}

fn matching_objects<'a>(component: &'a Component, object: &ObjectRef) -> Vec<&'a Tree> {
    component
        .objects()
        .iter()
        .filter(|o| object.matches_tree(o))
        .collect()
}

fn display_filter(filter: &ComponentKey) -> String {
    if filter.canonical_name.is_empty() && filter.version.is_none() {
        "any component".to_string()
    } else {
        format!("component {filter}")
    }
}

/// Object lookups within a snapshot of a single component.
#[derive(Debug, Clone)]
pub struct ComponentFinder {
    component: Component,
}

impl ComponentFinder {
    pub fn new(component: &Component) -> Self {
        Self {
            component: component.clone(),
        }
    }

    pub fn component(&self) -> &Component {
        &self.component
    }

    /// Objects matching `object`, in order.
    pub fn objects(&self, object: &ObjectRef) -> Vec<&Tree> {
        matching_objects(&self.component, object)
    }

    /// The single object matching `object`.
    pub fn unique_object(&self, object: &ObjectRef) -> Result<&Tree> {
        unique(
            format!("object {object} in component {}", self.component.canonical_name()),
            self.objects(object),
        )
    }
}
