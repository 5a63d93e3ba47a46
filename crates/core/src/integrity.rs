//! ISO integrity check: SHA-256 of a file compared with an expected digest.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::Result;

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// SHA-256 of `data` as lowercase hex
pub fn hash_bytes(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// SHA-256 of the file at `path` as lowercase hex, streamed in fixed chunks
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];

    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Outcome of comparing two digests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Match,
    Mismatch,
}

/// A computed digest and the digest the user expects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashCheck {
    pub computed: String,
    pub expected: String,
}

impl HashCheck {
    pub fn new(computed: impl Into<String>, expected: impl Into<String>) -> Self {
        Self { computed: computed.into(), expected: expected.into() }
    }

    /// Hash `path` and pair it with `expected`
    pub fn for_file(path: &Path, expected: impl Into<String>) -> Result<Self> {
        let computed = sha256_file(path)?;
        let check = Self::new(computed, expected);

        match check.verdict() {
            Some(Verdict::Match) => tracing::info!(path = %crate::logging::sanitize_path(path), "hash matches"),
            Some(Verdict::Mismatch) => tracing::warn!(
                path = %crate::logging::sanitize_path(path),
                computed = %check.computed,
                "hash mismatch"
            ),
            None => tracing::info!(path = %crate::logging::sanitize_path(path), computed = %check.computed, "hash computed"),
        }

        Ok(check)
    }

    /// `None` when no expected digest was given.
    ///
    /// The expected digest is trimmed and compared case-insensitively, so a
    /// whitespace-only value is a mismatch rather than absent.
    pub fn verdict(&self) -> Option<Verdict> {
        if self.expected.is_empty() || self.computed.is_empty() {
            return None;
        }

        let expected = self.expected.trim();
        if expected.to_lowercase() == self.computed.to_lowercase() { Some(Verdict::Match) } else { Some(Verdict::Mismatch) }
    }

    pub fn matches(&self) -> bool {
        self.verdict() == Some(Verdict::Match)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// SHA-256 of the empty byte slice (well-known constant).
    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    /// SHA-256("hello")
    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    #[test]
    fn test_hash_empty_input() {
        assert_eq!(hash_bytes(b""), EMPTY_SHA256);
    }

    #[test]
    fn test_hash_known_value() {
        assert_eq!(hash_bytes(b"hello"), HELLO_SHA256);
    }

    #[test]
    fn test_hash_file_matches_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello").unwrap();
        assert_eq!(sha256_file(file.path()).unwrap(), HELLO_SHA256);
    }

    #[test]
    fn test_hash_file_larger_than_buffer() {
        let data = vec![0x5au8; READ_BUFFER_SIZE * 2 + 17];
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&data).unwrap();
        assert_eq!(sha256_file(file.path()).unwrap(), hash_bytes(&data));
    }

    #[test]
    fn test_hash_missing_file_is_io_error() {
        let result = sha256_file(Path::new("/nonexistent/greemls.iso"));
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }

    #[test]
    fn test_verdict_normalises_expected() {
        let check = HashCheck::new(HELLO_SHA256, format!("  {}\n", HELLO_SHA256.to_uppercase()));
        assert_eq!(check.verdict(), Some(Verdict::Match));
        assert!(check.matches());
    }

    #[test]
    fn test_verdict_mismatch() {
        let check = HashCheck::new(HELLO_SHA256, EMPTY_SHA256);
        assert_eq!(check.verdict(), Some(Verdict::Mismatch));
        assert!(!check.matches());
    }

    #[test]
    fn test_verdict_absent_without_expected() {
        assert_eq!(HashCheck::new(HELLO_SHA256, "").verdict(), None);
        assert_eq!(HashCheck::new("", HELLO_SHA256).verdict(), None);
    }

    #[test]
    fn test_verdict_blank_expected_is_mismatch() {
        assert_eq!(HashCheck::new(HELLO_SHA256, "   ").verdict(), Some(Verdict::Mismatch));
        assert_eq!(HashCheck::new(HELLO_SHA256, "\n").verdict(), Some(Verdict::Mismatch));
    }

    #[test]
    fn test_for_file_pairs_digest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"").unwrap();
        let check = HashCheck::for_file(file.path(), EMPTY_SHA256).unwrap();
        assert_eq!(check.computed, EMPTY_SHA256);
        assert!(check.matches());
    }
}
