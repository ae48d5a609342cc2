//! Publishing release tarballs to the object store.
//!
//! **Irrevocable.** Uploading overwrites whatever already lives at the
//! artifact path. Only publish with authorization from the release owner.

mod artifact;
mod destination;

pub use artifact::artifact_path;
pub use destination::Destination;

use crate::config::PackagerConfig;
use crate::error::{CommandError, ErrorExt, PublishError, ReleaseError, Result};
use crate::process::{CommandRunner, Invocation};
use std::path::Path;

/// Copy `tarball` to its artifact path with `aws s3 cp`, then delete it.
///
/// The local tarball is kept if the copy fails.
///
/// # Returns
///
/// The artifact path the tarball was copied to.
pub async fn push_package_to_s3<R: CommandRunner>(
    config: &PackagerConfig,
    runner: &R,
    tarball: &Path,
    version: &str,
    dest: Destination,
) -> Result<String> {
    let destination = artifact_path(
        &config.bucket_template,
        dest,
        &config.repo_name,
        version,
        tarball,
    )?;

    if !tokio::fs::metadata(tarball)
        .await
        .is_ok_and(|m| m.is_file())
    {
        return Err(PublishError::TarballNotFound {
            path: tarball.to_path_buf(),
        }
        .into());
    }

    log::info!("Uploading {} to {}", tarball.display(), destination);

    let inv = Invocation::new("aws")
        .args(["s3", "cp", "--region", config.region.as_str()])
        .arg(tarball)
        .arg(&destination);
    runner.run(&inv).await.map_err(|e| match e {
        ReleaseError::Command(CommandError::NonZeroExit { stderr, .. }) => {
            PublishError::UploadFailed {
                tarball: tarball.to_path_buf(),
                destination: destination.clone(),
                reason: stderr,
            }
            .into()
        }
        other => other,
    })?;

    tokio::fs::remove_file(tarball)
        .await
        .fs_context("removing uploaded tarball", tarball)?;
    log::info!("Published {}", destination);

    Ok(destination)
}
