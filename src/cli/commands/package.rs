//! `package` command.

use crate::ReleasePackager;
use crate::cli::OutputManager;
use crate::config::PackagerConfig;
use crate::error::Result;

/// Package `version` and print the tarball path
pub(super) async fn execute_package(
    config: PackagerConfig,
    version: &str,
    output: &OutputManager,
) -> Result<()> {
    let _ = output.progress(&format!("Packaging {} {}", config.repo_name, version));
    let packager = ReleasePackager::new(config);
    let tarball = packager.package(version).await?;
    let _ = output.success(&format!("Created {}", tarball.display()));
    if output.is_quiet() {
        println!("{}", tarball.display());
    }
    Ok(())
}
