//! End-to-end tests for the bundle pipeline
//!
//! These tests exercise the complete flow: decode from disk -> resolve ->
//! index -> patch images -> encode and write back.

use bundle_core::{
    Finder, ImageFinder, ImageSubRule, Inliner, ResolveContext, ResolveOptions, transform_bundle,
};
use bundle_fs::{LocalFileReader, NormalizedPath, io};
use bundle_model::{Bundle, ComponentKey, ObjectRef};
use bundle_test_utils::bundle::TestBundle;
use bundle_tree::{Format, codec, path};
use pretty_assertions::assert_eq;

fn load(path: &NormalizedPath) -> Bundle {
    let format = Format::require_from_path(path.as_str()).unwrap();
    codec::decode_as(&io::read_bytes(path).unwrap(), format).unwrap()
}

fn resolve(entry: &NormalizedPath, options: ResolveOptions) -> Bundle {
    Inliner::new(LocalFileReader::new())
        .resolve_bundle(&ResolveContext::for_file(entry), &load(entry), options)
        .unwrap()
}

#[test]
fn test_resolve_index_patch_and_write() {
    let fixture = TestBundle::standard();
    let entry = NormalizedPath::new(fixture.entry());

    let resolved = resolve(&entry, ResolveOptions::default());
    assert!(resolved.is_resolved());

    // Index
    let finder = Finder::from_bundle(&resolved);
    let daemon_set = finder
        .unique_object(
            &ComponentKey::new("kube-proxy"),
            &ObjectRef::new().kind("DaemonSet"),
        )
        .unwrap();
    assert_eq!(path::get_str(daemon_set, "apiVersion"), Some("apps/v1"));
    assert_eq!(finder.cluster_object_keys().unwrap().len(), 5);

    // Patch
    let rules = [ImageSubRule::new("k8s.gcr.io", "mirror.example.com")];
    let patched = transform_bundle(&resolved, &rules);
    let images = ImageFinder::new(&patched.components).all_images().flattened();
    assert_eq!(images.len(), 4);
    assert!(images.iter().all(|i| i.starts_with("mirror.example.com/")), "{images:?}");

    // The original resolution is untouched
    let original = ImageFinder::new(&resolved.components).all_images().flattened();
    assert!(original.iter().all(|i| i.starts_with("k8s.gcr.io/")));

    // Write and reload
    let out = NormalizedPath::new(fixture.path("out/patched.yaml"));
    let encoded = codec::encode_for_path(&patched, out.as_str()).unwrap();
    io::write_atomic(&out, encoded.as_bytes()).unwrap();
    assert_eq!(load(&out), patched);
}

#[test]
fn test_resolved_output_is_byte_stable() {
    let fixture = TestBundle::standard();
    let entry = NormalizedPath::new(fixture.entry());
    let resolved = resolve(&entry, ResolveOptions::default());

    let first = codec::encode_value(&resolved, Format::Yaml).unwrap();
    let reloaded: Bundle = codec::decode_as(first.as_bytes(), Format::Yaml).unwrap();
    let second = codec::encode_value(&reloaded, Format::Yaml).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_staged_resolution_through_disk() {
    let fixture = TestBundle::standard();
    let entry = NormalizedPath::new(fixture.entry());

    // First pass pulls in component files only; its output sits next to the
    // original bundle so rebased references still resolve.
    let staged = resolve(&entry, ResolveOptions::top_layer_only());
    assert!(!staged.is_resolved());
    let kube_proxy = &staged.components[1];
    assert!(kube_proxy.objects().is_empty());

    let staged_path = NormalizedPath::new(fixture.path("staged.yaml"));
    let encoded = codec::encode_value(&staged, Format::Yaml).unwrap();
    io::write_atomic(&staged_path, encoded.as_bytes()).unwrap();

    let resolved = resolve(&staged_path, ResolveOptions::default());
    assert!(resolved.is_resolved());
    assert_eq!(resolved, resolve(&entry, ResolveOptions::default()));
}

#[test]
fn test_absolute_file_urls_resolve_from_anywhere() {
    let fixture = TestBundle::standard();
    let bundle_text = format!(
        "components:\n- spec:\n    componentName: zork\n    objectFiles:\n    - url: file://{}/zork/pody.yaml\n",
        fixture.root_str()
    );
    let elsewhere = TestBundle::new();
    elsewhere.write("bundle.yaml", bundle_text);

    let resolved = resolve(
        &NormalizedPath::new(elsewhere.entry()),
        ResolveOptions::default(),
    );
    let finder = Finder::from_bundle(&resolved);
    assert!(finder.unique_component_by_name("zork").is_ok());
    assert_eq!(
        finder
            .objects(&ComponentKey::default(), &ObjectRef::new().name("pody"))
            .len(),
        1
    );
}

#[test]
fn test_failed_resolution_returns_no_partial_bundle() {
    let fixture = TestBundle::standard();
    fixture.write("kube-proxy/kube-proxy-objects.yaml", "kind: [broken");
    let entry = NormalizedPath::new(fixture.entry());

    let err = Inliner::new(LocalFileReader::new())
        .resolve_bundle(
            &ResolveContext::for_file(&entry),
            &load(&entry),
            ResolveOptions::default(),
        )
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("kube-proxy"), "{message}");
    assert!(message.contains("kube-proxy-objects.yaml"), "{message}");
}
