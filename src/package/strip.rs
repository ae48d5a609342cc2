//! Removal of version-control metadata and deployment-only paths.

use crate::error::{ReleaseError, Result};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Prefix shared by all version-control metadata names
const VCS_PREFIX: &str = ".git";

/// True if `name` follows version-control naming conventions
/// (`.git`, `.gitignore`, `.gitmodules`, `.gitattributes`, ...)
pub fn is_vcs_name(name: &str) -> bool {
    name.starts_with(VCS_PREFIX)
}

/// Remove every entry below `root` whose name starts with `.git`.
///
/// Returns the removed paths relative to `root`.
pub async fn strip_vcs_metadata(root: &Path) -> Result<Vec<PathBuf>> {
    let root = root.to_path_buf();
    tokio::task::spawn_blocking(move || -> Result<Vec<PathBuf>> {
        let mut matches = Vec::new();
        let mut walker = WalkDir::new(&root).min_depth(1).into_iter();
        while let Some(entry) = walker.next() {
            let entry = entry?;
            if entry.file_name().to_str().is_some_and(is_vcs_name) {
                // Matched directories are removed whole.
                if entry.file_type().is_dir() {
                    walker.skip_current_dir();
                }
                matches.push(entry.path().to_path_buf());
            }
        }

        let mut removed = Vec::with_capacity(matches.len());
        for path in matches {
            remove_any(&path)?;
            log::debug!("Removed {}", path.display());
            let rel = path
                .strip_prefix(&root)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| path.clone());
            removed.push(rel);
        }
        Ok(removed)
    })
    .await
    .map_err(|e| ReleaseError::Io(io::Error::other(format!("Join error: {e}"))))?
}

/// Remove each of `paths` (relative to `root`) if present.
///
/// Returns the paths that existed and were removed.
pub async fn strip_paths(root: &Path, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for rel in paths {
        let path = root.join(rel);
        match tokio::fs::symlink_metadata(&path).await {
            Ok(_) => {
                remove_any(&path)?;
                log::debug!("Removed {}", path.display());
                removed.push(rel.clone());
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("Nothing to strip at {}", path.display());
            }
            Err(e) => {
                return Err(ReleaseError::Fs {
                    context: "inspecting strip path",
                    path,
                    error: e,
                });
            }
        }
    }
    Ok(removed)
}

fn remove_any(path: &Path) -> Result<()> {
    let metadata = std::fs::symlink_metadata(path).map_err(|error| ReleaseError::Fs {
        context: "inspecting",
        path: path.to_path_buf(),
        error,
    })?;
    let result = if metadata.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    result.map_err(|error| ReleaseError::Fs {
        context: "removing",
        path: path.to_path_buf(),
        error,
    })
}
