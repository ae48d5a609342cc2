//! `push` command.

use super::helpers::confirm_irrevocable;
use crate::ReleasePackager;
use crate::cli::OutputManager;
use crate::config::PackagerConfig;
use crate::error::Result;
use crate::publish::{Destination, artifact_path};
use std::path::Path;

/// Upload an existing tarball after confirmation
pub(super) async fn execute_push(
    config: PackagerConfig,
    tarball: &Path,
    version: &str,
    dest: &str,
    yes: bool,
    output: &OutputManager,
) -> Result<()> {
    let parsed: Destination = dest.parse()?;
    let target = artifact_path(
        &config.bucket_template,
        parsed,
        &config.repo_name,
        version,
        tarball,
    )?;
    confirm_irrevocable("push", &target, yes, output)?;

    let _ = output.progress(&format!("Uploading {}", tarball.display()));
    let packager = ReleasePackager::new(config);
    let published = packager.push_package_to_s3(tarball, version, dest).await?;
    let _ = output.success(&format!("Published {published}"));
    Ok(())
}
