//! The `version.txt` provenance file.

use crate::error::{ErrorExt, PackageError, Result};
use crate::git::CommitHash;
use std::path::{Path, PathBuf};

/// File name written at the root of every release folder
pub const PROVENANCE_FILE: &str = "version.txt";

/// Normalized version and the commit it was built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    /// Normalized version
    pub version: String,
    /// Commit checked out for the release
    pub commit: CommitHash,
}

impl Provenance {
    /// Two lines: normalized version, then commit hash
    pub fn render(&self) -> String {
        format!("{}\n{}\n", self.version, self.commit)
    }

    /// Parse the contents of a provenance file
    pub fn parse(contents: &str) -> Result<Self> {
        let mut lines = contents.lines();
        let (Some(version), Some(commit), None) = (lines.next(), lines.next(), lines.next())
        else {
            return Err(PackageError::InvalidProvenance {
                reason: "expected exactly two lines".to_string(),
            }
            .into());
        };
        Ok(Self {
            version: version.to_string(),
            commit: CommitHash::parse(commit)?,
        })
    }

    /// Write the provenance file into `folder`
    pub async fn write_to(&self, folder: &Path) -> Result<PathBuf> {
        let path = folder.join(PROVENANCE_FILE);
        tokio::fs::write(&path, self.render())
            .await
            .fs_context("writing provenance file", &path)?;
        Ok(path)
    }
}
