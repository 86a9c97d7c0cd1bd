//! File reference inlining
//!
//! The [`Inliner`] replaces every file reference in a bundle with the
//! content it points at:
//!
//! 1. each raw text file becomes a generated `ConfigMap` holding its text,
//! 2. each object file is decoded (splitting multi-document YAML) and its
//!    objects appended,
//! 3. each component file is decoded into a component, its own relative
//!    references rebased onto the component file's directory.
//!
//! Resolution never touches the caller's value. Any failure aborts the whole
//! call; no partially resolved bundle is returned.

use tracing::{debug, info};

use bundle_fs::FileReader;
use bundle_fs::checksum::{compute_checksum, verify_checksum};
use bundle_model::{Bundle, Component, FileRef};
use bundle_tree::{Format, Tree, codec};

use crate::context::ResolveContext;
use crate::error::{Error, Result};
use crate::sanitize::sanitize_name;

/// API version of generated raw text containers.
pub const RAW_TEXT_API_VERSION: &str = "v1";

/// Kind of generated raw text containers.
pub const RAW_TEXT_KIND: &str = "ConfigMap";

/// Options for [`Inliner::resolve_bundle`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Only pull in component files; leave the references inside them
    /// unresolved for a later pass.
    pub top_layer_only: bool,
}

impl ResolveOptions {
    pub fn top_layer_only() -> Self {
        Self {
            top_layer_only: true,
        }
    }
}

/// Resolves file references through a [`FileReader`].
#[derive(Debug, Clone)]
pub struct Inliner<R> {
    reader: R,
}

impl<R: FileReader> Inliner<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Return a copy of `component` with raw text and object files inlined.
    pub fn resolve_component(&self, ctx: &ResolveContext, component: &Component) -> Result<Component> {
        let mut resolved = component.clone();
        self.inline_component(ctx, &mut resolved)?;
        Ok(resolved)
    }

    /// Return a copy of `bundle` with component files pulled in and, unless
    /// `options.top_layer_only` is set, every component resolved.
    pub fn resolve_bundle(
        &self,
        ctx: &ResolveContext,
        bundle: &Bundle,
        options: ResolveOptions,
    ) -> Result<Bundle> {
        info!(
            bundle = %bundle.metadata.name,
            components = bundle.components.len(),
            component_files = bundle.component_files.len(),
            top_layer_only = options.top_layer_only,
            "Resolving bundle"
        );

        let mut resolved = bundle.clone();
        let label = format!("bundle {}", bundle.metadata.name);
        for file in std::mem::take(&mut resolved.component_files) {
            let component = self.load_component(ctx, &label, &file)?;
            resolved.components.push(component);
        }

        if !options.top_layer_only {
            for component in &mut resolved.components {
                self.inline_component(ctx, component)?;
            }
        }

        info!(
            bundle = %resolved.metadata.name,
            components = resolved.components.len(),
            resolved = resolved.is_resolved(),
            "Resolved bundle"
        );
        Ok(resolved)
    }

    fn inline_component(&self, ctx: &ResolveContext, component: &mut Component) -> Result<()> {
        let name = component.canonical_name().to_string();
        let before = component.spec.objects.len();

        for file in std::mem::take(&mut component.spec.raw_text_files) {
            let bytes = self.fetch(ctx, &name, &file)?;
            let object = raw_text_object(&name, &file, bytes)?;
            component.spec.objects.push(object);
        }

        for file in std::mem::take(&mut component.spec.object_files) {
            let bytes = self.fetch(ctx, &name, &file)?;
            let format = Format::require_from_path(&file.url).map_err(|source| Error::Decode {
                component: name.clone(),
                url: file.url.clone(),
                source,
            })?;
            let objects = codec::decode_documents(&bytes, format).map_err(|source| Error::Decode {
                component: name.clone(),
                url: file.url.clone(),
                source,
            })?;
            debug!(component = %name, url = %file.url, count = objects.len(), "Inlined object file");
            component.spec.objects.extend(objects);
        }

        debug!(
            component = %name,
            added = component.spec.objects.len() - before,
            "Resolved component"
        );
        Ok(())
    }

    fn load_component(&self, ctx: &ResolveContext, label: &str, file: &FileRef) -> Result<Component> {
        let bytes = self.fetch(ctx, label, file)?;
        let decode_error = |source| Error::Decode {
            component: label.to_string(),
            url: file.url.clone(),
            source,
        };
        let format = Format::require_from_path(&file.url).map_err(decode_error)?;
        let mut component: Component = codec::decode_as(&bytes, format).map_err(decode_error)?;

        if let Some(dir) = file.dir() {
            let spec = &mut component.spec;
            for nested in spec.object_files.iter_mut().chain(spec.raw_text_files.iter_mut()) {
                *nested = nested.relative_to(&dir);
            }
        }

        debug!(url = %file.url, component = %component.canonical_name(), "Pulled in component file");
        Ok(component)
    }

    fn fetch(&self, ctx: &ResolveContext, component: &str, file: &FileRef) -> Result<Vec<u8>> {
        ctx.check(&file.url)?;
        let located = ctx.locate(file);
        debug!(component, url = %file.url, located = %located.url, "Fetching file reference");

        let bytes = self
            .reader
            .read(&located.url)
            .map_err(|source| Error::UnresolvedReference {
                component: component.to_string(),
                url: file.url.clone(),
                source,
            })?;

        if let Some(expected) = &file.hash
            && !verify_checksum(expected, &bytes)
        {
            return Err(Error::HashMismatch {
                component: component.to_string(),
                url: file.url.clone(),
                expected: expected.clone(),
                actual: compute_checksum(&bytes),
            });
        }
        Ok(bytes)
    }
}

/// Wrap raw text into a `ConfigMap` keyed by the file's base name.
fn raw_text_object(component: &str, file: &FileRef, bytes: Vec<u8>) -> Result<Tree> {
    let text = String::from_utf8(bytes).map_err(|e| Error::Decode {
        component: component.to_string(),
        url: file.url.clone(),
        source: bundle_tree::Error::decode("text", e.to_string()),
    })?;
    let key = file.base_name();

    Ok(Tree::map()
        .with("apiVersion", RAW_TEXT_API_VERSION)
        .with("kind", RAW_TEXT_KIND)
        .with("metadata", Tree::map().with("name", sanitize_name(key)))
        .with("data", Tree::map().with(key, text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bundle_fs::MemoryFileReader;
    use bundle_tree::path;
    use pretty_assertions::assert_eq;

    fn inliner(files: &[(&str, &str)]) -> Inliner<MemoryFileReader> {
        let mut reader = MemoryFileReader::new();
        for (path, content) in files {
            reader.insert(path, *content);
        }
        Inliner::new(reader)
    }

    #[test]
    fn test_raw_text_becomes_config_map() {
        let inliner = inliner(&[("foo.txt", "hello")]);
        let component = Component::new("c").with_raw_text_file("foo.txt");
        let resolved = inliner.resolve_component(&ResolveContext::new(), &component).unwrap();

        assert!(resolved.is_resolved());
        let object = &resolved.objects()[0];
        assert_eq!(path::get_str(object, "kind"), Some("ConfigMap"));
        assert_eq!(path::get_str(object, "metadata.name"), Some("foo.txt"));
        let data = object.get("data").unwrap();
        assert_eq!(data.get("foo.txt").and_then(Tree::as_str), Some("hello"));
    }

    #[test]
    fn test_raw_text_must_be_utf8() {
        let mut reader = MemoryFileReader::new();
        reader.insert("bin.dat", vec![0xffu8, 0xfe]);
        let component = Component::new("c").with_raw_text_file("bin.dat");
        let err = Inliner::new(reader)
            .resolve_component(&ResolveContext::new(), &component)
            .unwrap_err();
        assert!(matches!(err, Error::Decode { .. }), "{err:?}");
    }

    #[test]
    fn test_unknown_extension_is_decode_error() {
        let inliner = inliner(&[("pod.txt", "kind: Pod")]);
        let component = Component::new("c").with_object_file("pod.txt");
        let err = inliner
            .resolve_component(&ResolveContext::new(), &component)
            .unwrap_err();
        assert!(matches!(&err, Error::Decode { url, .. } if url == "pod.txt"), "{err:?}");
    }

    #[test]
    fn test_hash_is_verified() {
        let inliner = inliner(&[("pod.yaml", "kind: Pod\n")]);
        let good = compute_checksum(b"kind: Pod\n");
        let ok = Component::new("c").with_object_file(FileRef::new("pod.yaml").with_hash(good));
        assert!(inliner.resolve_component(&ResolveContext::new(), &ok).is_ok());

        let bad = Component::new("c").with_object_file(FileRef::new("pod.yaml").with_hash("sha256:00"));
        let err = inliner
            .resolve_component(&ResolveContext::new(), &bad)
            .unwrap_err();
        assert!(matches!(err, Error::HashMismatch { .. }), "{err:?}");
    }

    #[test]
    fn test_missing_file_names_component_and_url() {
        let inliner = inliner(&[]);
        let component = Component::new("etcd").with_object_file("missing.yaml");
        let err = inliner
            .resolve_component(&ResolveContext::new(), &component)
            .unwrap_err();
        assert!(err.is_unresolved_reference());
        let message = err.to_string();
        assert!(message.contains("etcd") && message.contains("missing.yaml"), "{message}");
    }

    #[test]
    fn test_input_is_not_modified() {
        let inliner = inliner(&[("pod.yaml", "kind: Pod\n")]);
        let component = Component::new("c").with_object_file("pod.yaml");
        let before = component.clone();
        inliner.resolve_component(&ResolveContext::new(), &component).unwrap();
        assert_eq!(component, before);
    }
}
