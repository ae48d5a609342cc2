//! Full commit hashes.

use crate::error::{GitError, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static COMMIT_HASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-f]{40}$").expect("commit hash regex is valid"));

/// A full 40-character SHA-1 commit hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitHash(String);

impl CommitHash {
    /// Parse rev-parse output, ignoring surrounding whitespace
    pub fn parse(raw: &str) -> Result<Self> {
        let hash = raw.trim();
        if !COMMIT_HASH_RE.is_match(hash) {
            return Err(GitError::InvalidCommitHash {
                hash: hash.to_string(),
            }
            .into());
        }
        Ok(Self(hash.to_string()))
    }

    /// Hash as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
