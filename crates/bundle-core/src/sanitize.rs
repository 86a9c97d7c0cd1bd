//! Object name sanitizing

use std::sync::LazyLock;

use regex::Regex;

/// Longest name an object may carry.
pub const MAX_NAME_LEN: usize = 253;

/// Character substituted for an invalid first or last character.
const FILLER: char = 'x';

static INVALID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_.-]").expect("invalid-char pattern is valid"));

/// Turn an arbitrary string (usually a file base name) into a valid object
/// name.
///
/// The result is lowercase, uses only `[a-z0-9_.-]`, is at most
/// [`MAX_NAME_LEN`] characters and starts and ends with an alphanumeric.
///
/// ```
/// use bundle_core::sanitize_name;
///
/// assert_eq!(sanitize_name("Kube Config.TXT"), "kube_config.txt");
/// assert_eq!(sanitize_name(".env"), "xenv");
/// assert_eq!(sanitize_name(""), "x");
/// ```
pub fn sanitize_name(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let replaced = INVALID_CHARS.replace_all(&lower, "_");
    let mut chars: Vec<char> = replaced.chars().take(MAX_NAME_LEN).collect();

    if chars.is_empty() {
        return FILLER.to_string();
    }
    if let Some(first) = chars.first_mut()
        && !first.is_ascii_alphanumeric()
    {
        *first = FILLER;
    }
    if let Some(last) = chars.last_mut()
        && !last.is_ascii_alphanumeric()
    {
        *last = FILLER;
    }
    chars.into_iter().collect()
}
