//! Gzip-compressed tar archives of a release folder.

use crate::error::{ErrorExt, PackageError, ReleaseError, Result};
use flate2::{Compression, write::GzEncoder};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tar::HeaderMode;
use walkdir::WalkDir;

/// Archive `folder` into `dest` as a single top-level directory named after
/// the folder.
///
/// Entries are sorted by name and written with deterministic metadata so
/// the same tree always yields the same archive. A partially written
/// archive is removed on failure.
pub async fn tar_and_gzip_dir(folder: &Path, dest: &Path) -> Result<PathBuf> {
    let top = folder
        .file_name()
        .map(PathBuf::from)
        .ok_or_else(|| PackageError::ArchiveFailed {
            path: dest.to_path_buf(),
            reason: format!("{} has no folder name", folder.display()),
        })?;

    let tar_gz = tokio::fs::File::create(dest)
        .await
        .fs_context("creating tar.gz file", dest)?;
    let std_file = tar_gz.into_std().await;

    let src_dir = folder.to_path_buf();
    let dest_path = dest.to_path_buf();
    let result = tokio::task::spawn_blocking(move || -> Result<()> {
        let enc = GzEncoder::new(std_file, Compression::default());
        let mut tar = tar::Builder::new(enc);
        tar.follow_symlinks(false);

        for entry in WalkDir::new(&src_dir).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            let rel_path = match path.strip_prefix(&src_dir) {
                Ok(rel) if rel.as_os_str().is_empty() => top.clone(),
                Ok(rel) => top.join(rel),
                Err(e) => return Err(ReleaseError::Io(io::Error::other(e))),
            };
            let metadata = std::fs::symlink_metadata(path)?;

            let mut header = tar::Header::new_gnu();
            header.set_metadata_in_mode(&metadata, HeaderMode::Deterministic);

            if entry.file_type().is_symlink() {
                let target = std::fs::read_link(path)?;
                tar.append_link(&mut header, &rel_path, &target)?;
            } else if entry.file_type().is_dir() {
                tar.append_data(&mut header, &rel_path, &mut io::empty())?;
            } else {
                let mut file = std::fs::File::open(path)?;
                tar.append_data(&mut header, &rel_path, &mut file)?;
            }
        }

        let enc = tar.into_inner()?;
        let mut finished = enc.finish()?;
        finished.flush()?;
        Ok(())
    })
    .await
    .map_err(|e| ReleaseError::Io(io::Error::other(format!("Join error: {e}"))))
    .and_then(|inner| inner);

    match result {
        Ok(()) => {
            log::info!("Created {}", dest_path.display());
            Ok(dest_path)
        }
        Err(e) => {
            if let Err(rm) = std::fs::remove_file(&dest_path) {
                log::warn!(
                    "Failed to remove partial archive {}: {}",
                    dest_path.display(),
                    rm
                );
            }
            Err(PackageError::ArchiveFailed {
                path: dest_path,
                reason: e.to_string(),
            }
            .into())
        }
    }
}
