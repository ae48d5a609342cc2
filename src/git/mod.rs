//! Git operations for release packaging.
//!
//! All operations shell out to the `git` binary through a
//! [`CommandRunner`](crate::process::CommandRunner), passing refs and paths
//! as discrete arguments.

mod client;
mod commit;

pub use client::GitClient;
pub use commit::CommitHash;
