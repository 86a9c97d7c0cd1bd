//! SHA-256 checksum utilities
//!
//! File references may pin their content with a hash in the canonical
//! `sha256:<hex>` format produced here.

use sha2::{Digest, Sha256};

/// Prefix for all checksums produced by this module
pub const PREFIX: &str = "sha256:";

/// Compute the SHA-256 checksum of raw bytes.
///
/// Returns a string in the canonical format `"sha256:<hex>"`.
pub fn compute_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Check `content` against an expected checksum.
///
/// A bare hex digest without the `sha256:` prefix is accepted. Hex
/// comparison is case-insensitive.
pub fn verify_checksum(expected: &str, content: &[u8]) -> bool {
    let expected = expected.trim();
    let expected_hex = expected.strip_prefix(PREFIX).unwrap_or(expected);
    let actual = compute_checksum(content);
    actual[PREFIX.len()..].eq_ignore_ascii_case(expected_hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_has_prefix() {
        let checksum = compute_checksum(b"hello world");
        assert!(checksum.starts_with("sha256:"));
    }

    #[test]
    fn checksum_is_deterministic() {
        assert_eq!(compute_checksum(b"test"), compute_checksum(b"test"));
    }

    #[test]
    fn different_content_different_checksum() {
        assert_ne!(compute_checksum(b"aaa"), compute_checksum(b"bbb"));
    }

    #[test]
    fn checksum_known_value() {
        assert_eq!(
            compute_checksum(b"hello world"),
            "sha256:b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn verify_accepts_prefixed_and_bare_digests() {
        let bare = "B94D27B9934D3E08A52E52D7DA7DABFAC484EFE37A5380EE9088F7ACE2EFCDE9";
        assert!(verify_checksum(&compute_checksum(b"hello world"), b"hello world"));
        assert!(verify_checksum(bare, b"hello world"));
        assert!(!verify_checksum(bare, b"goodbye"));
    }
}
