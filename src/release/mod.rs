//! The three release entry points behind one façade.
//!
//! [`ReleasePackager`] owns the configuration and the command runner, and
//! exposes `package`, `push_package_to_s3` and `package_and_s3_deploy`.

use crate::config::PackagerConfig;
use crate::error::Result;
use crate::package;
use crate::process::{CommandRunner, SystemRunner};
use crate::publish::{self, Destination};
use crate::version::ReleaseVersion;
use std::path::{Path, PathBuf};

/// Packages and publishes releases of one repository
#[derive(Debug, Clone)]
pub struct ReleasePackager<R = SystemRunner> {
    config: PackagerConfig,
    runner: R,
}

impl ReleasePackager<SystemRunner> {
    /// Create a packager that runs real `git` and `aws` processes
    pub fn new(config: PackagerConfig) -> Self {
        Self::with_runner(config, SystemRunner)
    }
}

impl<R: CommandRunner> ReleasePackager<R> {
    /// Create a packager that runs commands through `runner`
    pub fn with_runner(config: PackagerConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// Configuration in use
    pub fn config(&self) -> &PackagerConfig {
        &self.config
    }

    /// Command runner in use
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Package the tag named `version` into `<work_dir>/<normalized>.tar.gz`.
    pub async fn package(&self, version: &str) -> Result<PathBuf> {
        let version = ReleaseVersion::parse(version)?;
        package::package(&self.config, &self.runner, &version).await
    }

    /// Upload `tarball` under `dest` and remove the local copy.
    ///
    /// **Irrevocable.** Only run with authorization from the release owner.
    ///
    /// `version` may be dotted or already normalized. `dest` must be
    /// `dev_releases` or `releases`; it is checked before the upload.
    pub async fn push_package_to_s3(
        &self,
        tarball: &Path,
        version: &str,
        dest: &str,
    ) -> Result<String> {
        let dest: Destination = dest.parse()?;
        let version = ReleaseVersion::parse(version)?;
        publish::push_package_to_s3(&self.config, &self.runner, tarball, version.tag(), dest)
            .await
    }

    /// Package `version` and upload it under `dest` (default `dev_releases`).
    ///
    /// **Irrevocable.** Only run with authorization from the release owner.
    ///
    /// An invalid destination fails before anything touches disk or network.
    pub async fn package_and_s3_deploy(&self, version: &str, dest: Option<&str>) -> Result<String> {
        let dest = match dest {
            Some(dest) => dest.parse()?,
            None => Destination::default(),
        };
        let version = ReleaseVersion::parse(version)?;

        let tarball = package::package(&self.config, &self.runner, &version).await?;
        publish::push_package_to_s3(&self.config, &self.runner, &tarball, version.tag(), dest)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CliError, CommandError, GitError, PublishError, ReleaseError};
    use crate::process::{CommandOutput, Invocation};
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    const HASH: &str = "abcdef0123456789abcdef0123456789abcdef01";

    /// Simulates `git` and `aws` against the local filesystem.
    #[derive(Default)]
    struct FakeRunner {
        calls: RefCell<Vec<Invocation>>,
        fail_program: Option<(&'static str, &'static str)>,
    }

    impl FakeRunner {
        fn failing(program: &'static str, subcommand: &'static str) -> Self {
            Self {
                fail_program: Some((program, subcommand)),
                ..Default::default()
            }
        }

        fn commands(&self) -> Vec<String> {
            self.calls.borrow().iter().map(Invocation::display).collect()
        }
    }

    impl CommandRunner for FakeRunner {
        async fn run(&self, invocation: &Invocation) -> crate::error::Result<CommandOutput> {
            self.calls.borrow_mut().push(invocation.clone());
            let args: Vec<String> = invocation
                .get_args()
                .iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect();

            if let Some((program, sub)) = self.fail_program
                && invocation.program() == program
                && args.first().map(String::as_str) == Some(sub)
            {
                return Err(CommandError::NonZeroExit {
                    command: invocation.display(),
                    code: Some(1),
                    stderr: format!("{sub} failed"),
                }
                .into());
            }

            let stdout = match (invocation.program(), args[0].as_str()) {
                ("git", "clone") => {
                    let dest = std::path::PathBuf::from(&args[4]);
                    fs::create_dir_all(dest.join(".git/refs")).unwrap();
                    fs::write(dest.join(".gitignore"), "*.o\n").unwrap();
                    fs::create_dir_all(dest.join("prod_conf")).unwrap();
                    fs::write(dest.join("prod_conf/fabfile.py"), "").unwrap();
                    fs::write(dest.join("README.md"), "# traildb-d").unwrap();
                    fs::create_dir_all(dest.join("src")).unwrap();
                    fs::write(dest.join("src/traildb.d"), "module traildb;").unwrap();
                    String::new()
                }
                ("git", "rev-parse") => format!("{HASH}\n"),
                _ => String::new(),
            };
            Ok(CommandOutput {
                stdout,
                stderr: String::new(),
            })
        }
    }

    fn packager(work: &TempDir, runner: FakeRunner) -> ReleasePackager<FakeRunner> {
        let config = PackagerConfig {
            work_dir: work.path().to_path_buf(),
            ..PackagerConfig::default()
        };
        ReleasePackager::with_runner(config, runner)
    }

    #[tokio::test]
    async fn test_package_runs_git_steps_in_order() {
        let work = TempDir::new().unwrap();
        let packager = packager(&work, FakeRunner::default());

        let tarball = packager.package("2.0.1").await.unwrap();
        assert_eq!(tarball, work.path().join("2_0_1.tar.gz"));
        assert!(tarball.is_file());
        assert!(!work.path().join("2_0_1").exists());

        let commands = packager.runner().commands();
        assert_eq!(commands.len(), 4);
        assert!(commands[0].starts_with("git clone --recursive -- git@github.com:SemanticSugar/traildb-d.git"));
        assert_eq!(commands[1], "git fetch --tags origin");
        assert_eq!(commands[2], "git checkout --quiet 2.0.1 --");
        assert_eq!(commands[3], "git rev-parse --verify HEAD");
    }

    #[tokio::test]
    async fn test_failed_checkout_cleans_up_folder() {
        let work = TempDir::new().unwrap();
        let packager = packager(&work, FakeRunner::failing("git", "checkout"));

        let err = packager.package("9.9.9").await.unwrap_err();
        assert!(matches!(err, ReleaseError::Git(GitError::RefNotFound { .. })));
        assert!(!work.path().join("9_9_9").exists());
        assert!(!work.path().join("9_9_9.tar.gz").exists());
    }

    #[tokio::test]
    async fn test_invalid_dest_fails_before_any_action() {
        let work = TempDir::new().unwrap();
        let packager = packager(&work, FakeRunner::default());

        let err = packager
            .package_and_s3_deploy("1.0.0", Some("production"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReleaseError::Cli(CliError::InvalidDestination { .. })));
        assert!(packager.runner().commands().is_empty());
        assert_eq!(fs::read_dir(work.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_push_computes_path_and_removes_tarball() {
        let work = TempDir::new().unwrap();
        let tarball = work.path().join("x.tar.gz");
        fs::write(&tarball, b"archive").unwrap();
        let packager = packager(&work, FakeRunner::default());

        let path = packager
            .push_package_to_s3(&tarball, "1.0.0", "releases")
            .await
            .unwrap();
        assert_eq!(path, "s3://adroll-data-science/releases/traildb-d/1_0_0/x.tar.gz");
        assert!(!tarball.exists());

        let commands = packager.runner().commands();
        assert_eq!(
            commands,
            vec![format!(
                "aws s3 cp --region us-west-2 {} {path}",
                tarball.display()
            )]
        );
    }

    #[tokio::test]
    async fn test_push_failure_keeps_tarball() {
        let work = TempDir::new().unwrap();
        let tarball = work.path().join("x.tar.gz");
        fs::write(&tarball, b"archive").unwrap();
        let packager = packager(&work, FakeRunner::failing("aws", "s3"));

        let err = packager
            .push_package_to_s3(&tarball, "1.0.0", "releases")
            .await
            .unwrap_err();
        assert!(matches!(err, ReleaseError::Publish(PublishError::UploadFailed { .. })));
        assert!(tarball.exists());
    }

    #[tokio::test]
    async fn test_push_rejects_invalid_dest() {
        let work = TempDir::new().unwrap();
        let tarball = work.path().join("x.tar.gz");
        fs::write(&tarball, b"archive").unwrap();
        let packager = packager(&work, FakeRunner::default());

        assert!(packager
            .push_package_to_s3(&tarball, "1.0.0", "staging")
            .await
            .is_err());
        assert!(packager.runner().commands().is_empty());
        assert!(tarball.exists());
    }

    #[tokio::test]
    async fn test_deploy_defaults_to_dev_releases() {
        let work = TempDir::new().unwrap();
        let packager = packager(&work, FakeRunner::default());

        let path = packager.package_and_s3_deploy("1.0.0", None).await.unwrap();
        assert_eq!(
            path,
            "s3://adroll-data-science/dev_releases/traildb-d/1_0_0/1_0_0.tar.gz"
        );
        assert!(!work.path().join("1_0_0.tar.gz").exists());
        assert_eq!(packager.runner().commands().len(), 5);
    }
}
