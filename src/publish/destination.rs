//! Publish destinations in the release bucket.

use crate::error::{CliError, ReleaseError};
use std::fmt;
use std::str::FromStr;

/// Path prefix an artifact is published under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Destination {
    /// `dev_releases`: development builds
    #[default]
    DevReleases,
    /// `releases`: production builds
    Releases,
}

impl Destination {
    /// All accepted destinations
    pub const ALL: [Destination; 2] = [Destination::DevReleases, Destination::Releases];

    /// Prefix used in the artifact path
    pub fn as_str(self) -> &'static str {
        match self {
            Destination::DevReleases => "dev_releases",
            Destination::Releases => "releases",
        }
    }
}

impl FromStr for Destination {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Destination::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| {
                CliError::InvalidDestination {
                    dest: s.to_string(),
                }
                .into()
            })
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
