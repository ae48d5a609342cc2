//! Git client driving the `git` binary.

use super::CommitHash;
use crate::error::{CommandError, GitError, ReleaseError, Result};
use crate::process::{CommandRunner, Invocation};
use std::path::Path;

/// Git commands needed to prepare a release checkout
#[derive(Debug)]
pub struct GitClient<'a, R> {
    runner: &'a R,
    use_ssh_config: bool,
}

impl<'a, R: CommandRunner> GitClient<'a, R> {
    /// Create a client running commands through `runner`
    pub fn new(runner: &'a R, use_ssh_config: bool) -> Self {
        Self {
            runner,
            use_ssh_config,
        }
    }

    fn git(&self) -> Invocation {
        let inv = Invocation::new("git");
        if self.use_ssh_config {
            inv
        } else {
            inv.env("GIT_SSH_COMMAND", "ssh -F /dev/null")
        }
    }

    /// Clone `url` with all submodules into `dest`, which must be empty
    pub async fn clone_recursive(&self, url: &str, dest: &Path) -> Result<()> {
        log::info!("Cloning {} into {}", url, dest.display());
        let inv = self
            .git()
            .args(["clone", "--recursive", "--"])
            .arg(url)
            .arg(dest);
        self.runner.run(&inv).await.map_err(|e| match e {
            ReleaseError::Command(CommandError::NonZeroExit { stderr, .. }) => {
                GitError::CloneFailed {
                    url: url.to_string(),
                    reason: stderr,
                }
                .into()
            }
            other => other,
        })?;
        Ok(())
    }

    /// Fetch all refs and tags from `remote`
    pub async fn fetch(&self, repo: &Path, remote: &str) -> Result<()> {
        log::info!("Fetching {}", remote);
        let inv = self
            .git()
            .args(["fetch", "--tags", remote])
            .current_dir(repo);
        self.runner.run(&inv).await.map_err(|e| match e {
            ReleaseError::Command(CommandError::NonZeroExit { stderr, .. }) => {
                GitError::FetchFailed {
                    remote: remote.to_string(),
                    reason: stderr,
                }
                .into()
            }
            other => other,
        })?;
        Ok(())
    }

    /// Check out `reference` (a tag, branch or commit) in detached mode
    pub async fn checkout(&self, repo: &Path, reference: &str) -> Result<()> {
        log::info!("Checking out {}", reference);
        let inv = self
            .git()
            .args(["checkout", "--quiet", reference, "--"])
            .current_dir(repo);
        self.runner.run(&inv).await.map_err(|e| match e {
            ReleaseError::Command(CommandError::NonZeroExit { stderr, .. }) => {
                GitError::RefNotFound {
                    reference: reference.to_string(),
                    reason: stderr,
                }
                .into()
            }
            other => other,
        })?;
        Ok(())
    }

    /// Resolve `HEAD` to a full commit hash
    pub async fn head_commit(&self, repo: &Path) -> Result<CommitHash> {
        let inv = self
            .git()
            .args(["rev-parse", "--verify", "HEAD"])
            .current_dir(repo);
        let output = self.runner.run(&inv).await?;
        CommitHash::parse(&output.stdout)
    }
}
