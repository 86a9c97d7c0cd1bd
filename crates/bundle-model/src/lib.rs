//! Data model for component bundles.
//!
//! A [`Bundle`] groups [`Component`]s; a component groups configuration
//! objects ([`Tree`](bundle_tree::Tree)s). Content may live inline or behind
//! [`FileRef`]s until it is resolved. [`ComponentKey`], [`ObjectRef`] and
//! [`ClusterObjectKey`] identify components and objects for lookups.

pub mod component;
pub mod error;
pub mod file_ref;
pub mod keys;
pub mod requirements;

pub use component::{API_VERSION, Bundle, Component, ComponentSpec, ObjectMeta};
pub use error::{Error, Result};
pub use file_ref::FileRef;
pub use keys::{ClusterObjectKey, ComponentKey, ObjectRef};
pub use requirements::{ComponentRequire, REQUIREMENTS_KIND, Requirements};
