//! Image discovery and rewriting across components

use bundle_core::{ImageFinder, ImageKind, ImageSubRule, ImageTransformer, locate, transform_bundle};
use bundle_model::{Bundle, Component, ComponentKey};
use bundle_test_utils::manifests;
use bundle_tree::{Format, Tree, codec};
use pretty_assertions::assert_eq;

fn decode(source: &str) -> Tree {
    codec::decode(source.as_bytes(), Format::Yaml).unwrap()
}

fn components() -> Vec<Component> {
    let zork = Component::new("zork")
        .with_object(decode(manifests::POD_PODY))
        .with_object(decode(manifests::POD_DODO));
    let mut kube_proxy = Component::new("kube-proxy");
    kube_proxy.spec.objects =
        codec::decode_documents(manifests::KUBE_PROXY_OBJECTS.as_bytes(), Format::Yaml).unwrap();
    let node = Component::new("node").with_object(
        Tree::map().with(
            "spec",
            Tree::map().with("osImage", Tree::map().with("url", "https://images.example.com/os.img")),
        ),
    );
    vec![zork, kube_proxy, node]
}

#[test]
fn container_images_are_discovered_and_deduplicated() {
    let images = ImageFinder::new(&components()).all_images();
    assert_eq!(
        images.flattened(),
        vec![
            "k8s.gcr.io/pause:3.9",
            "k8s.gcr.io/nginx:1.25",
            "k8s.gcr.io/busybox:1.36",
            "k8s.gcr.io/kube-proxy:v1.28.0",
            "https://images.example.com/os.img",
        ]
    );
}

#[test]
fn images_are_grouped_by_component_and_kind() {
    let images = ImageFinder::new(&components()).all_images();
    let zork = images.get(&ComponentKey::new("zork")).unwrap();
    assert_eq!(zork.container_images().len(), 4);
    assert!(zork.os_images().is_empty());

    let node = images.get(&ComponentKey::new("node")).unwrap();
    assert_eq!(node.os_images(), vec!["https://images.example.com/os.img"]);
    assert_eq!(node.matches[0].kind, ImageKind::Os);
}

#[test]
fn image_field_outside_containers_is_missed() {
    let dodo = decode(manifests::POD_DODO);
    let values: Vec<String> = locate(&dodo).into_iter().map(|m| m.value).collect();
    assert!(!values.contains(&"not-a-container-image".to_string()));
    assert_eq!(values.len(), 2);
}

#[test]
fn transform_leaves_input_untouched() {
    let original = components();
    let snapshot = original.clone();
    let rules = ["k8s.gcr.io=registry.example.com".parse::<ImageSubRule>().unwrap()];

    let transformed = ImageTransformer::new(&original).transform(&rules);

    assert_eq!(original, snapshot);
    assert_ne!(transformed, original);
    let flattened = ImageFinder::new(&transformed).all_images().flattened();
    assert!(flattened.iter().all(|image| !image.contains("k8s.gcr.io")), "{flattened:?}");
    assert!(flattened.contains(&"registry.example.com/pause:3.9".to_string()));
}

#[test]
fn transform_only_changes_matched_leaves() {
    let original = components();
    let rules = [ImageSubRule::new("not-a-container", "rewritten")];
    let transformed = ImageTransformer::new(&original).transform(&rules);
    assert_eq!(transformed, original);
}

#[test]
fn transform_bundle_keeps_bundle_fields() {
    let mut bundle = Bundle::new("b").with_component_file("pending.yaml");
    bundle.components = components();
    let rules = [ImageSubRule::new(":3.9", ":3.10")];

    let transformed = transform_bundle(&bundle, &rules);
    assert_eq!(transformed.metadata, bundle.metadata);
    assert_eq!(transformed.component_files, bundle.component_files);
    assert_eq!(
        ImageFinder::new(&transformed.components).all_images().flattened()[0],
        "k8s.gcr.io/pause:3.10"
    );
}
