//! Image command implementations

use std::path::Path;

use bundle_core::{ImageFinder, ImageSubRule, ResolveOptions, transform_bundle};
use bundle_tree::Format;
use colored::Colorize;

use super::{emit, load_resolved};
use crate::error::{CliError, Result};

/// Run the images command
pub fn run_images(input: &Path, by_component: bool) -> Result<()> {
    let resolved = load_resolved(input, ResolveOptions::default())?;
    let images = ImageFinder::new(&resolved.components).all_images();

    if !by_component {
        for image in images.flattened() {
            println!("{image}");
        }
        return Ok(());
    }

    for (key, component) in &images.components {
        println!("{}:", key.to_string().bold());
        if component.matches.is_empty() {
            println!("  {}", "None".dimmed());
        }
        for image in component.container_images() {
            println!("  {} {}", "container".cyan(), image);
        }
        for image in component.os_images() {
            println!("  {} {}", "os".cyan(), image);
        }
    }
    Ok(())
}

/// Run the patch-images command
pub fn run_patch_images(
    input: &Path,
    rules: &[ImageSubRule],
    output: Option<&Path>,
    format: Option<Format>,
) -> Result<()> {
    if rules.is_empty() {
        return Err(CliError::user("At least one --rule is required"));
    }
    let resolved = load_resolved(input, ResolveOptions::default())?;
    let patched = transform_bundle(&resolved, rules);
    emit(&patched, output, format)
}
