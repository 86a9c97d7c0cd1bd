//! Shared test utilities for the bundle workspace.
//!
//! This crate provides standardised fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`bundle`]: [`TestBundle`](bundle::TestBundle) builder writing bundle
//!   files into a temporary directory
//! - [`manifests`]: canned object, component and bundle documents

pub mod bundle;
pub mod manifests;
