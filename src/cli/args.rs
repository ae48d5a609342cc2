//! Command line argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Package tagged releases into tarballs and publish them to S3
#[derive(Parser, Debug)]
#[command(
    name = "release_packager",
    version,
    about = "Package tagged releases into tarballs and publish them to S3",
    long_about = "Package a tagged checkout into <version>.tar.gz and publish it to S3.

Usage:
  release_packager package 1.2.3
  release_packager push 1_2_3.tar.gz 1.2.3 releases
  release_packager deploy 1.2.3 --dest dev_releases"
)]
pub struct Args {
    /// Command to execute
    #[command(subcommand)]
    pub command: Command,

    /// TOML config file
    #[arg(long, global = true, value_name = "FILE", env = "RELEASE_PACKAGER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory for the release folder and tarball (default: current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Ignore the user's ssh config when cloning
    #[arg(long, global = true)]
    pub no_ssh_config: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build <version>.tar.gz from the matching tag
    Package {
        /// Version tag to package (e.g. 1.2.3)
        version: String,
    },

    /// Upload a tarball to S3 and delete it locally
    Push {
        /// Tarball produced by `package`
        tarball: PathBuf,
        /// Version the tarball was built from
        version: String,
        /// Destination prefix: dev_releases or releases
        dest: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Package a version and upload it
    Deploy {
        /// Version tag to package (e.g. 1.2.3)
        version: String,
        /// Destination prefix: dev_releases or releases
        #[arg(long, default_value = "dev_releases")]
        dest: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl Command {
    /// Command name for messages
    pub fn name(&self) -> &'static str {
        match self {
            Command::Package { .. } => "package",
            Command::Push { .. } => "push",
            Command::Deploy { .. } => "deploy",
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deploy_defaults() {
        let args = Args::try_parse_from(["release_packager", "deploy", "1.2.3"]).unwrap();
        match args.command {
            Command::Deploy { version, dest, yes } => {
                assert_eq!(version, "1.2.3");
                assert_eq!(dest, "dev_releases");
                assert!(!yes);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "release_packager",
            "push",
            "1_2_3.tar.gz",
            "1.2.3",
            "releases",
            "--yes",
            "--work-dir",
            "/tmp/out",
            "--no-ssh-config",
        ])
        .unwrap();
        assert_eq!(args.command.name(), "push");
        assert_eq!(args.work_dir, Some(PathBuf::from("/tmp/out")));
        assert!(args.no_ssh_config);
    }
}
