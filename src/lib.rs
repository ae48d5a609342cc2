//! # Release Packager
//!
//! Packages a tagged source checkout into a versioned tarball and publishes
//! it to an S3 bucket under a `dev_releases` or `releases` prefix.
//!
//! ## Workflow
//!
//! - **package**: clone the repository into `<version_with_underscores>/`,
//!   check out the tag, record `version.txt`, strip `.git*`, deployment
//!   config and README, archive to `<version_with_underscores>.tar.gz`
//! - **push**: `aws s3 cp` the tarball to
//!   `s3://<bucket>/<dest>/<repo>/<version>/<tarball>` and delete it locally
//! - **deploy**: validate the destination, then package and push
//!
//! ## Usage
//!
//! ```bash
//! release_packager package 1.2.3
//! release_packager push 1_2_3.tar.gz 1.2.3 releases
//! release_packager deploy 1.2.3 --dest dev_releases
//! ```
//!
//! Pushing overwrites published artifacts and cannot be undone. Only publish
//! with authorization from the release owner.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod package;
pub mod process;
pub mod publish;
pub mod release;
pub mod version;

// Re-export main types for public API
pub use cli::Args;
pub use config::PackagerConfig;
pub use error::{ReleaseError, Result};
pub use process::{CommandRunner, Invocation, SystemRunner};
pub use publish::Destination;
pub use release::ReleasePackager;
pub use version::{ReleaseVersion, normalize};
