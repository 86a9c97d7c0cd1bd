//! Find command implementation

use std::path::Path;

use bundle_core::{Finder, ResolveOptions};
use bundle_model::{ComponentKey, ObjectRef};
use bundle_tree::{Format, codec};
use colored::Colorize;

use super::load_resolved;
use crate::error::Result;

/// Optional filters of the find command
#[derive(Debug, Clone, Default)]
pub struct FindFilter {
    pub component: Option<String>,
    pub version: Option<String>,
    pub api_version: Option<String>,
    pub kind: Option<String>,
    pub name: Option<String>,
}

impl FindFilter {
    pub fn component_key(&self) -> ComponentKey {
        ComponentKey {
            canonical_name: self.component.clone().unwrap_or_default(),
            version: self.version.clone(),
        }
    }

    pub fn object_ref(&self) -> ObjectRef {
        ObjectRef {
            api_version: self.api_version.clone().unwrap_or_default(),
            kind: self.kind.clone().unwrap_or_default(),
            name: self.name.clone().unwrap_or_default(),
        }
    }
}

/// Run the find command
///
/// Matching objects are printed as a multi-document YAML stream.
pub fn run_find(input: &Path, filter: &FindFilter) -> Result<()> {
    let resolved = load_resolved(input, ResolveOptions::default())?;
    let finder = Finder::from_bundle(&resolved);
    let objects = finder.objects(&filter.component_key(), &filter.object_ref());

    if objects.is_empty() {
        eprintln!("{}", "No matching objects".yellow());
        return Ok(());
    }

    let documents = objects
        .into_iter()
        .map(|object| codec::encode(object, Format::Yaml))
        .collect::<bundle_tree::Result<Vec<_>>>()?;
    print!("{}", documents.join("---\n"));
    Ok(())
}
