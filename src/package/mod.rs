//! Release packaging: checkout a tag, strip it and archive it.
//!
//! The release folder lives only for the duration of [`package`]; it is
//! removed whether packaging succeeds or fails. The tarball is left in the
//! working directory for [`crate::publish`] to consume.

mod archive;
mod provenance;
mod strip;
mod workdir;

pub use archive::tar_and_gzip_dir;
pub use provenance::{PROVENANCE_FILE, Provenance};
pub use strip::{is_vcs_name, strip_paths, strip_vcs_metadata};
pub use workdir::WorkDir;

use crate::config::PackagerConfig;
use crate::error::Result;
use crate::git::GitClient;
use crate::process::CommandRunner;
use crate::version::ReleaseVersion;
use std::path::PathBuf;

/// Build `<work_dir>/<normalized>.tar.gz` from the tag matching `version`.
///
/// # Process
///
/// 1. Creates the release folder `<work_dir>/<normalized>` (must not exist)
/// 2. Clones the configured repository recursively into it
/// 3. Fetches the configured remote and checks out the dotted version tag
/// 4. Writes `version.txt` with the normalized version and commit hash
/// 5. Removes `.git*` entries and the configured strip paths
/// 6. Archives the folder and removes it
///
/// # Returns
///
/// Path of the produced tarball.
pub async fn package<R: CommandRunner>(
    config: &PackagerConfig,
    runner: &R,
    version: &ReleaseVersion,
) -> Result<PathBuf> {
    log::info!("Packaging {} version {}", config.repo_name, version);

    let folder = WorkDir::create(config.work_dir.join(version.folder_name())).await?;
    let git = GitClient::new(runner, config.use_ssh_config);

    git.clone_recursive(&config.clone_url(), folder.path()).await?;
    git.fetch(folder.path(), &config.remote).await?;
    git.checkout(folder.path(), version.tag()).await?;

    let provenance = Provenance {
        version: version.normalized().to_string(),
        commit: git.head_commit(folder.path()).await?,
    };
    provenance.write_to(folder.path()).await?;
    log::info!("Version {} is commit {}", version, provenance.commit);

    let vcs = strip_vcs_metadata(folder.path()).await?;
    log::debug!("Stripped {} version-control entries", vcs.len());
    let stripped = strip_paths(folder.path(), &config.strip_paths).await?;
    log::debug!("Stripped {:?}", stripped);

    let tarball = config.work_dir.join(version.tarball_name());
    tar_and_gzip_dir(folder.path(), &tarball).await?;
    folder.remove().await?;

    Ok(tarball)
}
