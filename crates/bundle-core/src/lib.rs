//! Resolution and indexing for component bundles
//!
//! This crate sits above the data crates and below the CLI:
//!
//! - **Inlining**: [`Inliner`] replaces file references with their content
//! - **Lookups**: [`Finder`] indexes a snapshot of components and objects
//! - **Images**: [`ImageFinder`] and [`ImageTransformer`] locate and rewrite
//!   image references
//!
//! ```text
//!                 bundlectl
//!                     |
//!                bundle-core
//!                     |
//!      +--------------+--------------+
//!      |              |              |
//!  bundle-fs     bundle-tree    bundle-model
//! ```
//!
//! # Example
//!
//! ```
//! use bundle_core::{Finder, Inliner, ResolveContext, ResolveOptions};
//! use bundle_fs::MemoryFileReader;
//! use bundle_model::{Bundle, Component, ComponentKey, ObjectRef};
//!
//! let reader = MemoryFileReader::new().with_file(
//!     "pod.yaml",
//!     "apiVersion: v1\nkind: Pod\nmetadata:\n  name: pody\n",
//! );
//! let bundle = Bundle::new("demo").with_component(Component::new("zork").with_object_file("pod.yaml"));
//!
//! let resolved = Inliner::new(reader)
//!     .resolve_bundle(&ResolveContext::new(), &bundle, ResolveOptions::default())
//!     .unwrap();
//! let finder = Finder::from_bundle(&resolved);
//! let pod = finder
//!     .unique_object(&ComponentKey::new("zork"), &ObjectRef::new().name("pody"))
//!     .unwrap();
//! assert_eq!(bundle_tree::path::get_str(pod, "kind"), Some("Pod"));
//! ```

pub mod context;
pub mod error;
pub mod find;
pub mod images;
pub mod inline;
pub mod sanitize;

pub use context::{CancelToken, ResolveContext};
pub use error::{Error, Result};
pub use find::{ComponentFinder, Finder};
pub use images::{
    AllImages, ComponentImages, ImageFinder, ImageKind, ImageMatch, ImageSubRule,
    ImageTransformer, image_kind, locate, transform_bundle,
};
pub use inline::{Inliner, ResolveOptions};
pub use sanitize::sanitize_name;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_component_and_url() {
        let error = Error::HashMismatch {
            component: "etcd".to_string(),
            url: "etcd/pod.yaml".to_string(),
            expected: "sha256:00".to_string(),
            actual: "sha256:ff".to_string(),
        };

        let display = format!("{}", error);
        assert!(
            display.contains("etcd/pod.yaml") && display.contains("\"etcd\""),
            "Error display should name the component and URL, got: {}",
            display
        );
    }
}
