//! Release version identifiers.
//!
//! A version is kept in two forms: the dotted form given by the operator,
//! which names the git tag, and the normalized form with every `.` replaced
//! by `_`, which names the release folder and the tarball.

use crate::error::{CliError, Result};
use std::fmt;

/// Replace every `.` in `version` with `_`.
///
/// Idempotent: `normalize(&normalize(v)) == normalize(v)`.
pub fn normalize(version: &str) -> String {
    version.replace('.', "_")
}

/// A validated release version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
    tag: String,
    normalized: String,
}

impl ReleaseVersion {
    /// Validate a version string so it is safe as a git ref argument and as
    /// a single path component.
    pub fn parse(input: &str) -> Result<Self> {
        let reject = |reason: &str| -> Result<Self> {
            Err(CliError::InvalidVersion {
                version: input.to_string(),
                reason: reason.to_string(),
            }
            .into())
        };

        if input.is_empty() {
            return reject("version must not be empty");
        }
        if input.starts_with('-') {
            return reject("version must not start with '-'");
        }
        if input.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return reject("version must not contain whitespace or control characters");
        }
        if input.contains(['/', '\\']) {
            return reject("version must not contain path separators");
        }

        let normalized = normalize(input);
        if normalized.chars().all(|c| c == '_') {
            return reject("version must contain more than dots");
        }

        Ok(Self {
            tag: input.to_string(),
            normalized,
        })
    }

    /// Tag name as given (dotted form)
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Normalized form used for the release folder and artifact names
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Name of the release folder
    pub fn folder_name(&self) -> &str {
        &self.normalized
    }

    /// File name of the tarball
    pub fn tarball_name(&self) -> String {
        format!("{}.tar.gz", self.normalized)
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_replaces_every_dot() {
        assert_eq!(normalize("1.2.3"), "1_2_3");
        assert_eq!(normalize("1.2.3-rc.1"), "1_2_3-rc_1");
        assert_eq!(normalize("nodots"), "nodots");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for v in ["1.2.3", "0.0.1", "1_0_0", "v2.0", "a.b.c.d.e", ""] {
            let once = normalize(v);
            assert_eq!(normalize(&once), once);
            assert!(!once.contains('.'));
        }
    }

    #[test]
    fn test_names_for_version() {
        let version = ReleaseVersion::parse("2.0.1").unwrap();
        assert_eq!(version.tag(), "2.0.1");
        assert_eq!(version.folder_name(), "2_0_1");
        assert_eq!(version.tarball_name(), "2_0_1.tar.gz");
        assert_eq!(version.to_string(), "2.0.1");
    }

    #[test]
    fn test_pre_normalized_version_is_accepted() {
        let version = ReleaseVersion::parse("1_0_0").unwrap();
        assert_eq!(version.normalized(), "1_0_0");
    }

    #[test]
    fn test_rejects_unsafe_versions() {
        for bad in ["", "--upload-pack=evil", "1.0/../../x", "1.0 0", "..", ".", "a\\b", "1.0\n"] {
            assert!(ReleaseVersion::parse(bad).is_err(), "accepted {bad:?}");
        }
    }
}
