//! Structured value trees for component bundles
//!
//! Provides the [`Tree`] value that holds one decoded configuration object,
//! the YAML/JSON codec, dotted-path access and the depth-first
//! [`walk`](walk::walk) used to find and rewrite string leaves.

pub mod codec;
pub mod error;
pub mod format;
pub mod path;
pub mod tree;
pub mod walk;

pub use error::{Error, Result};
pub use format::Format;
pub use tree::Tree;
pub use walk::{visit_strings, walk};
