//! Scoped release folder.

use crate::error::{ErrorExt, PackageError, Result};
use std::path::{Path, PathBuf};

/// Release folder that is removed when dropped.
///
/// Creation fails if the folder already exists, so a guard never removes a
/// directory it did not create.
#[derive(Debug)]
pub struct WorkDir {
    path: PathBuf,
    armed: bool,
}

impl WorkDir {
    /// Create `path` as a new, empty directory
    pub async fn create(path: PathBuf) -> Result<Self> {
        match tokio::fs::create_dir(&path).await {
            Ok(()) => {
                log::debug!("Created release folder {}", path.display());
                Ok(Self { path, armed: true })
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(PackageError::FolderExists { path }.into())
            }
            Err(e) => Err(e).fs_context("creating release folder", path),
        }
    }

    /// Folder path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the folder now, reporting failures
    pub async fn remove(mut self) -> Result<()> {
        self.armed = false;
        tokio::fs::remove_dir_all(&self.path)
            .await
            .fs_context("removing release folder", &self.path)?;
        log::debug!("Removed release folder {}", self.path.display());
        Ok(())
    }
}

impl Drop for WorkDir {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        // Drop must never panic; a failure here only leaves the folder behind.
        if let Err(e) = std::fs::remove_dir_all(&self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            log::warn!(
                "Failed to remove release folder {}: {}",
                self.path.display(),
                e
            );
        }
    }
}
