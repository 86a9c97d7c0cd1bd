//! Depth-first traversal over string leaves
//!
//! The walker carries two pieces of context to every string leaf: the name of
//! the field holding it and the name of the field holding *that* map. Lists
//! are transparent: every element inherits the context of the list itself,
//! so in
//!
//! ```yaml
//! spec:
//!   containers:
//!   - image: nginx
//! ```
//!
//! the leaf `nginx` is visited with field `image` and parent `containers`.
//!
//! [`walk`] rewrites leaves in place. Callers that must not disturb their
//! input clone it first.

use crate::Tree;

/// Visit every string leaf of `tree`, replacing it when `visit` returns a
/// new value.
///
/// `visit` receives `(field_name, parent_field_name, value)`. The root has
/// empty field and parent names.
///
/// ```
/// use bundle_tree::{Tree, walk};
///
/// let mut tree = Tree::map().with("image", "nginx").with("name", "web");
/// walk(&mut tree, &mut |field, _parent, value| {
///     (field == "image").then(|| format!("{value}:latest"))
/// });
/// assert_eq!(tree.get("image").and_then(Tree::as_str), Some("nginx:latest"));
/// assert_eq!(tree.get("name").and_then(Tree::as_str), Some("web"));
/// ```
pub fn walk<F>(tree: &mut Tree, visit: &mut F)
where
    F: FnMut(&str, &str, &str) -> Option<String>,
{
    walk_node(tree, "", "", visit);
}

fn walk_node<F>(node: &mut Tree, field: &str, parent: &str, visit: &mut F)
where
    F: FnMut(&str, &str, &str) -> Option<String>,
{
    match node {
        Tree::String(value) => {
            if let Some(new_value) = visit(field, parent, value)
                && new_value != *value
            {
                *value = new_value;
            }
        }
        Tree::List(items) => {
            for item in items {
                walk_node(item, field, parent, visit);
            }
        }
        Tree::Map(map) => {
            for (key, child) in map.iter_mut() {
                walk_node(child, key, field, visit);
            }
        }
        Tree::Null | Tree::Bool(_) | Tree::Number(_) => {}
    }
}

/// Read-only companion of [`walk`]: call `visit` for every string leaf.
pub fn visit_strings<F>(tree: &Tree, visit: &mut F)
where
    F: FnMut(&str, &str, &str),
{
    visit_node(tree, "", "", visit);
}

fn visit_node<F>(node: &Tree, field: &str, parent: &str, visit: &mut F)
where
    F: FnMut(&str, &str, &str),
{
    match node {
        Tree::String(value) => visit(field, parent, value),
        Tree::List(items) => {
            for item in items {
                visit_node(item, field, parent, visit);
            }
        }
        Tree::Map(map) => {
            for (key, child) in map {
                visit_node(child, key, field, visit);
            }
        }
        Tree::Null | Tree::Bool(_) | Tree::Number(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collect(tree: &Tree) -> Vec<(String, String, String)> {
        let mut seen = Vec::new();
        visit_strings(tree, &mut |field, parent, value| {
            seen.push((field.to_string(), parent.to_string(), value.to_string()));
        });
        seen
    }

    fn leaf(field: &str, parent: &str, value: &str) -> (String, String, String) {
        (field.to_string(), parent.to_string(), value.to_string())
    }

    #[test]
    fn test_lists_keep_enclosing_context() {
        let tree = Tree::map().with(
            "spec",
            Tree::map().with(
                "containers",
                Tree::List(vec![Tree::map().with("image", "nginx")]),
            ),
        );
        assert_eq!(
            collect(&tree),
            vec![leaf("image", "containers", "nginx")]
        );
    }

    #[test]
    fn test_string_list_elements_use_list_field() {
        let tree = Tree::map().with(
            "command",
            Tree::List(vec![Tree::from("sh"), Tree::from("-c")]),
        );
        assert_eq!(
            collect(&tree),
            vec![
                leaf("command", "", "sh"),
                leaf("command", "", "-c"),
            ]
        );
    }

    #[test]
    fn test_root_string_has_empty_context() {
        assert_eq!(
            collect(&Tree::from("bare")),
            vec![leaf("", "", "bare")]
        );
    }

    #[test]
    fn test_only_string_leaves_are_visited() {
        let tree = Tree::map()
            .with("replicas", 3i64)
            .with("enabled", true)
            .with("empty", Tree::Null)
            .with("name", "x");
        assert_eq!(collect(&tree).len(), 1);
    }

    #[test]
    fn test_walk_rewrites_in_place() {
        let mut tree = Tree::map().with(
            "items",
            Tree::List(vec![Tree::from("a"), Tree::from("b")]),
        );
        walk(&mut tree, &mut |_, _, value| (value == "b").then(|| "B".to_string()));
        assert_eq!(
            tree.get("items"),
            Some(&Tree::List(vec![Tree::from("a"), Tree::from("B")]))
        );
    }
}
