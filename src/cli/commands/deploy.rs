//! `deploy` command.

use super::helpers::confirm_irrevocable;
use crate::ReleasePackager;
use crate::cli::OutputManager;
use crate::config::PackagerConfig;
use crate::error::Result;
use crate::publish::{Destination, artifact_path};
use crate::version::ReleaseVersion;
use std::path::Path;

/// Package `version` and upload it after confirmation
pub(super) async fn execute_deploy(
    config: PackagerConfig,
    version: &str,
    dest: &str,
    yes: bool,
    output: &OutputManager,
) -> Result<()> {
    let parsed: Destination = dest.parse()?;
    let release = ReleaseVersion::parse(version)?;
    let target = artifact_path(
        &config.bucket_template,
        parsed,
        &config.repo_name,
        release.tag(),
        Path::new(&release.tarball_name()),
    )?;
    confirm_irrevocable("deploy", &target, yes, output)?;

    let _ = output.progress(&format!("Deploying {} {} to {}", config.repo_name, version, parsed));
    let packager = ReleasePackager::new(config);
    let published = packager.package_and_s3_deploy(version, Some(dest)).await?;
    let _ = output.success(&format!("Published {published}"));
    Ok(())
}
