//! Command implementations for bundle-cli

pub mod find;
pub mod images;
pub mod inline;

use std::path::Path;

use bundle_core::{Inliner, ResolveContext, ResolveOptions};
use bundle_fs::{LocalFileReader, NormalizedPath, io};
use bundle_model::Bundle;
use bundle_tree::{Format, codec};

use crate::error::Result;

pub use find::{FindFilter, run_find};
pub use images::{run_images, run_patch_images};
pub use inline::run_inline;

/// Read and resolve the bundle at `input`.
///
/// Relative references resolve against the bundle file's directory.
pub fn load_resolved(input: &Path, options: ResolveOptions) -> Result<Bundle> {
    let path = NormalizedPath::new(input);
    let format = Format::require_from_path(path.as_str())?;
    let bundle: Bundle = codec::decode_as(&io::read_bytes(&path)?, format)?;

    let ctx = ResolveContext::for_file(&path);
    let resolved = Inliner::new(LocalFileReader::new()).resolve_bundle(&ctx, &bundle, options)?;
    Ok(resolved)
}

/// Encode `bundle` to `output` atomically, or print it when no output is
/// given.
///
/// Without `--format`, the output file's extension picks the format and an
/// unknown extension is an error. Printing defaults to YAML.
pub fn emit(bundle: &Bundle, output: Option<&Path>, format: Option<Format>) -> Result<()> {
    match output {
        Some(output) => {
            let path = NormalizedPath::new(output);
            let encoded = match format {
                Some(format) => codec::encode_value(bundle, format)?,
                None => codec::encode_for_path(bundle, path.as_str())?,
            };
            io::write_atomic(&path, encoded.as_bytes())?;
            tracing::info!(path = %path, "Wrote bundle");
        }
        None => print!("{}", codec::encode_value(bundle, format.unwrap_or(Format::Yaml))?),
    }
    Ok(())
}
