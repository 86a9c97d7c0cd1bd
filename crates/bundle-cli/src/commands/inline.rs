//! Inline command implementation

use std::path::Path;

use bundle_core::ResolveOptions;
use bundle_tree::Format;

use super::{emit, load_resolved};
use crate::error::Result;

/// Run the inline command
pub fn run_inline(
    input: &Path,
    output: Option<&Path>,
    top_layer_only: bool,
    format: Option<Format>,
) -> Result<()> {
    let resolved = load_resolved(input, ResolveOptions { top_layer_only })?;
    emit(&resolved, output, format)
}
