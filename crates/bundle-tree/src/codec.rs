//! YAML and JSON codec
//!
//! Stateless conversions between bytes and [`Tree`]s (or any serde type).
//! YAML output is key-ordered, so `encode(decode(bytes))` of a canonical
//! document reproduces it byte for byte.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::format::Format;
use crate::tree::Tree;

/// A YAML document separator line: `---` optionally followed by content.
static DOCUMENT_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^---.*$").expect("separator pattern is valid"));

fn utf8(bytes: &[u8], format: Format) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| Error::decode(format.name(), e.to_string()))
}

/// Decode a single document.
pub fn decode(bytes: &[u8], format: Format) -> Result<Tree> {
    match format {
        Format::Yaml => {
            let value: serde_yaml::Value = serde_yaml::from_str(utf8(bytes, format)?)
                .map_err(|e| Error::decode(format.name(), e.to_string()))?;
            Tree::try_from(value).map_err(|e| Error::decode(format.name(), e))
        }
        Format::Json => {
            let value: serde_json::Value = serde_json::from_slice(bytes)
                .map_err(|e| Error::decode(format.name(), e.to_string()))?;
            Ok(Tree::from(value))
        }
    }
}

/// Decode a single document into a typed value.
pub fn decode_as<T: DeserializeOwned>(bytes: &[u8], format: Format) -> Result<T> {
    match format {
        Format::Yaml => serde_yaml::from_str(utf8(bytes, format)?)
            .map_err(|e| Error::decode(format.name(), e.to_string())),
        Format::Json => {
            serde_json::from_slice(bytes).map_err(|e| Error::decode(format.name(), e.to_string()))
        }
    }
}

/// Whether YAML text contains a `---` separator.
///
/// The check is deliberately loose (any occurrence); splitting only happens
/// at separators that start a line.
pub fn has_document_separator(text: &str) -> bool {
    text.contains("---")
}

/// Split multi-document YAML text into its non-blank documents.
///
/// A segment holding only `%` directives and comments is the preamble of the
/// document after it, not a document of its own, and is dropped.
pub fn split_documents(text: &str) -> Vec<&str> {
    DOCUMENT_SEPARATOR
        .split(text)
        .filter(|segment| !segment.trim().is_empty() && !is_directive_preamble(segment))
        .collect()
}

fn is_directive_preamble(segment: &str) -> bool {
    let mut lines = segment.lines().map(str::trim).filter(|l| !l.is_empty());
    let mut directives = false;
    let preamble = lines.all(|line| {
        directives |= line.starts_with('%');
        line.starts_with('%') || line.starts_with('#')
    });
    preamble && directives
}

/// Decode every document in `bytes`.
///
/// YAML content containing separators is split and each document decoded
/// independently; otherwise the content is decoded once. Documents that
/// decode to null (empty or comment-only) are skipped.
pub fn decode_documents(bytes: &[u8], format: Format) -> Result<Vec<Tree>> {
    let trees = match format {
        Format::Yaml => {
            let text = utf8(bytes, format)?;
            if has_document_separator(text) {
                split_documents(text)
                    .into_iter()
                    .map(|doc| decode(doc.as_bytes(), format))
                    .collect::<Result<Vec<_>>>()?
            } else {
                vec![decode(bytes, format)?]
            }
        }
        Format::Json => vec![decode(bytes, format)?],
    };

    let before = trees.len();
    let trees: Vec<Tree> = trees.into_iter().filter(|t| !t.is_null()).collect();
    if trees.len() != before {
        tracing::warn!(skipped = before - trees.len(), "skipped empty documents");
    }
    Ok(trees)
}

/// Encode a tree.
pub fn encode(tree: &Tree, format: Format) -> Result<String> {
    encode_value(tree, format)
}

/// Encode any serializable value.
///
/// JSON output is pretty-printed and newline-terminated.
pub fn encode_value<T: Serialize + ?Sized>(value: &T, format: Format) -> Result<String> {
    match format {
        Format::Yaml => {
            serde_yaml::to_string(value).map_err(|e| Error::encode(format.name(), e.to_string()))
        }
        Format::Json => serde_json::to_string_pretty(value)
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| Error::encode(format.name(), e.to_string())),
    }
}

/// Encode a value for the file at `path`, choosing the format by extension.
pub fn encode_for_path<T: Serialize + ?Sized>(value: &T, path: &str) -> Result<String> {
    encode_value(value, Format::require_from_path(path)?)
}
