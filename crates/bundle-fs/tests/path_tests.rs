use bundle_fs::NormalizedPath;
use rstest::rstest;

#[test]
fn test_normalize_backslashes_to_forward() {
    let path = NormalizedPath::new("foo\\bar\\baz");
    assert_eq!(path.as_str(), "foo/bar/baz");
}

#[rstest]
#[case("foo/bar", "baz", "foo/bar/baz")]
#[case("foo/bar/", "baz.yaml", "foo/bar/baz.yaml")]
#[case("components/etcd", "../shared/pod.yaml", "components/shared/pod.yaml")]
#[case("components", "./pod.yaml", "components/pod.yaml")]
#[case(".", "../up.yaml", "../up.yaml")]
#[case("components/etcd", "/abs/pod.yaml", "/abs/pod.yaml")]
fn test_join(#[case] base: &str, #[case] segment: &str, #[case] expected: &str) {
    assert_eq!(NormalizedPath::new(base).join(segment).as_str(), expected);
}

#[rstest]
#[case("a/../b", "b")]
#[case("/a/b/../../c", "/c")]
#[case("a/./b//c", "a/b/c")]
#[case("../a", "../a")]
fn test_clean_on_construction(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(NormalizedPath::new(input).as_str(), expected);
}

#[test]
fn test_parent() {
    let path = NormalizedPath::new("foo/bar/baz");
    assert_eq!(path.parent().unwrap().as_str(), "foo/bar");
    assert_eq!(NormalizedPath::new("/foo").parent().unwrap().as_str(), "/");
    assert!(NormalizedPath::new("baz.yaml").parent().is_none());
}

#[test]
fn test_file_name_and_extension() {
    let path = NormalizedPath::new("foo/bar/baz.txt");
    assert_eq!(path.file_name(), Some("baz.txt"));
    assert_eq!(path.extension(), Some("txt"));
    assert_eq!(NormalizedPath::new("foo/.hidden").extension(), None);
}

#[test]
fn test_is_absolute() {
    assert!(NormalizedPath::new("/etc/hosts").is_absolute());
    assert!(!NormalizedPath::new("etc/hosts").is_absolute());
}

#[test]
fn test_exists_false_for_nonexistent() {
    let path = NormalizedPath::new("/nonexistent/path/that/does/not/exist");
    assert!(!path.exists());
}
