//! Image reference discovery and rewriting
//!
//! No schema registry exists for the objects in a bundle, so images are
//! recognised by field names alone:
//!
//! - a string under `image` inside a field whose name contains `container`
//!   (case-insensitive) is a container image, as in `spec.containers[].image`
//!   or `spec.initContainers[].image`;
//! - a string under `url` directly inside `osImage` is an OS image.
//!
//! The heuristic has false positives on coincidental names and misses
//! images held in unconventionally named fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use bundle_model::{Bundle, Component, ComponentKey};
use bundle_tree::{Tree, visit_strings, walk};

/// What an image reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Container,
    Os,
}

/// Classify a string leaf by its field and parent field names.
pub fn image_kind(field: &str, parent: &str) -> Option<ImageKind> {
    if field == "image" && parent.to_lowercase().contains("container") {
        Some(ImageKind::Container)
    } else if field == "url" && parent == "osImage" {
        Some(ImageKind::Os)
    } else {
        None
    }
}

/// A string leaf recognised as an image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMatch {
    pub kind: ImageKind,
    pub field: String,
    pub value: String,
}

/// Every image reference in `tree`, in traversal order.
pub fn locate(tree: &Tree) -> Vec<ImageMatch> {
    let mut found = Vec::new();
    visit_strings(tree, &mut |field, parent, value| {
        if let Some(kind) = image_kind(field, parent) {
            found.push(ImageMatch {
                kind,
                field: field.to_string(),
                value: value.to_string(),
            });
        }
    });
    found
}

/// Images found in one component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentImages {
    pub matches: Vec<ImageMatch>,
}

impl ComponentImages {
    fn of_kind(&self, kind: ImageKind) -> Vec<&str> {
        self.matches
            .iter()
            .filter(|m| m.kind == kind)
            .map(|m| m.value.as_str())
            .collect()
    }

    pub fn container_images(&self) -> Vec<&str> {
        self.of_kind(ImageKind::Container)
    }

    pub fn os_images(&self) -> Vec<&str> {
        self.of_kind(ImageKind::Os)
    }
}

/// Images per component, in component order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AllImages {
    pub components: Vec<(ComponentKey, ComponentImages)>,
}

impl AllImages {
    pub fn get(&self, key: &ComponentKey) -> Option<&ComponentImages> {
        self.components
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, images)| images)
    }

    /// Every image value, de-duplicated in first-seen order.
    pub fn flattened(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.components
            .iter()
            .flat_map(|(_, images)| &images.matches)
            .filter(|m| seen.insert(m.value.as_str()))
            .map(|m| m.value.clone())
            .collect()
    }
}

/// Collects images across a set of components.
#[derive(Debug, Clone, Copy)]
pub struct ImageFinder<'a> {
    components: &'a [Component],
}

impl<'a> ImageFinder<'a> {
    pub fn new(components: &'a [Component]) -> Self {
        Self { components }
    }

    pub fn all_images(&self) -> AllImages {
        let mut all = AllImages::default();
        for component in self.components {
            let key = ComponentKey::of(component);
            let matches: Vec<ImageMatch> = component.objects().iter().flat_map(locate).collect();

            // Components sharing a key pool their images.
            match all.components.iter_mut().find(|(k, _)| *k == key) {
                Some((_, images)) => images.matches.extend(matches),
                None => all.components.push((key, ComponentImages { matches })),
            }
        }
        all
    }
}

/// A substring substitution applied to image references.
///
/// Parsed from `find=replace`; the replacement may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSubRule {
    pub find: String,
    pub replace: String,
}

impl ImageSubRule {
    pub fn new(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            find: find.into(),
            replace: replace.into(),
        }
    }

    /// Apply the rule to `value`, or `None` if it does not occur.
    pub fn apply(&self, value: &str) -> Option<String> {
        (!self.find.is_empty() && value.contains(&self.find))
            .then(|| value.replace(&self.find, &self.replace))
    }
}

impl FromStr for ImageSubRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((find, _)) if find.is_empty() => Err(format!("rule {s:?} has an empty find")),
            Some((find, replace)) => Ok(Self::new(find, replace)),
            None => Err(format!("rule {s:?} is not of the form find=replace")),
        }
    }
}

impl fmt::Display for ImageSubRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.find, self.replace)
    }
}

/// Rewrites image references across a set of components.
#[derive(Debug, Clone, Copy)]
pub struct ImageTransformer<'a> {
    components: &'a [Component],
}

impl<'a> ImageTransformer<'a> {
    pub fn new(components: &'a [Component]) -> Self {
        Self { components }
    }

    /// Return a copy of the components with every rule applied, in order,
    /// to every image reference. The input is left untouched.
    pub fn transform(&self, rules: &[ImageSubRule]) -> Vec<Component> {
        let mut transformed = self.components.to_vec();
        let mut rewritten = 0usize;

        for component in &mut transformed {
            for object in &mut component.spec.objects {
                walk(object, &mut |field, parent, value| {
                    image_kind(field, parent)?;
                    let mut current = value.to_string();
                    for rule in rules {
                        if let Some(next) = rule.apply(&current) {
                            current = next;
                        }
                    }
                    (current != value).then(|| {
                        rewritten += 1;
                        current
                    })
                });
            }
        }

        debug!(rules = rules.len(), rewritten, "Transformed images");
        transformed
    }
}

/// [`ImageTransformer::transform`] over a bundle's inline components.
pub fn transform_bundle(bundle: &Bundle, rules: &[ImageSubRule]) -> Bundle {
    let mut transformed = bundle.clone();
    transformed.components = ImageTransformer::new(&bundle.components).transform(rules);
    transformed
}
