//! Path parsing and traversal utilities
//!
//! Navigate trees using dot-separated paths with array indexing.
//!
//! # Path Syntax
//!
//! - Dot-separated keys: `metadata.name`
//! - Array indexing: `spec.containers[0].image`
//!
//! # Examples
//!
//! ```
//! use bundle_tree::Tree;
//! use bundle_tree::path::{get_str, parse_path, PathSegment};
//!
//! let path = parse_path("spec.containers[0].image");
//! assert_eq!(path, vec![
//!     PathSegment::Key("spec".to_string()),
//!     PathSegment::Key("containers".to_string()),
//!     PathSegment::Index(0),
//!     PathSegment::Key("image".to_string()),
//! ]);
//!
//! let pod = Tree::map().with("metadata", Tree::map().with("name", "pody"));
//! assert_eq!(get_str(&pod, "metadata.name"), Some("pody"));
//! ```

use crate::Tree;

/// A segment of a path - either a key or an array index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A key in a map (e.g., "metadata" in "metadata.name")
    Key(String),
    /// An index in a list (e.g., 0 in `containers[0]`)
    Index(usize),
}

/// Parse a path string into segments.
pub fn parse_path(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut current_key = String::new();
    let mut chars = path.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => {
                if !current_key.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut current_key)));
                }
            }
            '[' => {
                if !current_key.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut current_key)));
                }
                let mut index_str = String::new();
                for ch in chars.by_ref() {
                    if ch == ']' {
                        break;
                    }
                    index_str.push(ch);
                }
                if let Ok(index) = index_str.parse::<usize>() {
                    segments.push(PathSegment::Index(index));
                }
            }
            _ => current_key.push(ch),
        }
    }

    if !current_key.is_empty() {
        segments.push(PathSegment::Key(current_key));
    }

    segments
}

/// Get the tree at the given path segments.
pub fn get_at_path<'a>(tree: &'a Tree, segments: &[PathSegment]) -> Option<&'a Tree> {
    segments.iter().try_fold(tree, |node, segment| match segment {
        PathSegment::Key(key) => node.get(key),
        PathSegment::Index(idx) => node.as_list()?.get(*idx),
    })
}

/// Get the tree at a dotted path.
pub fn get<'a>(tree: &'a Tree, path: &str) -> Option<&'a Tree> {
    get_at_path(tree, &parse_path(path))
}

/// Get the string leaf at a dotted path.
pub fn get_str<'a>(tree: &'a Tree, path: &str) -> Option<&'a str> {
    get(tree, path)?.as_str()
}
