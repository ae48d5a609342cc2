//! Artifact path rendering.

use super::Destination;
use crate::error::{PublishError, Result};
use std::path::Path;

/// Render the object-store path for `tarball` from `template`.
///
/// `{dest}`, `{repo}`, `{version}` and `{tarball}` are substituted; the
/// version is normalized and only the tarball's file name is used.
pub fn artifact_path(
    template: &str,
    dest: Destination,
    repo: &str,
    version: &str,
    tarball: &Path,
) -> Result<String> {
    let file_name = tarball
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| PublishError::TarballNotFound {
            path: tarball.to_path_buf(),
        })?;

    Ok(template
        .replace("{dest}", dest.as_str())
        .replace("{repo}", repo)
        .replace("{version}", &crate::version::normalize(version))
        .replace("{tarball}", file_name))
}
