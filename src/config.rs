//! Configuration for packaging and publishing.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `RELEASE_PACKAGER_*` environment variables, then command line flags.

use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "RELEASE_PACKAGER_";

/// Configuration for release packaging
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PackagerConfig {
    /// Repository name, used in the clone URL and the artifact path
    pub repo_name: String,
    /// Clone URL template; `{repo}` is replaced by `repo_name`
    pub repo_url: String,
    /// Artifact path template with `{dest}`, `{repo}`, `{version}` and `{tarball}`
    pub bucket_template: String,
    /// Region passed to the object-store client
    pub region: String,
    /// Let git's ssh transport read the user's ssh config
    pub use_ssh_config: bool,
    /// Paths removed from the release folder before archiving
    pub strip_paths: Vec<PathBuf>,
    /// Remote fetched before checkout
    pub remote: String,
    /// Directory holding the release folder and the tarball
    pub work_dir: PathBuf,
}

impl Default for PackagerConfig {
    fn default() -> Self {
        Self {
            repo_name: "traildb-d".to_string(),
            repo_url: "git@github.com:SemanticSugar/{repo}.git".to_string(),
            bucket_template: "s3://adroll-data-science/{dest}/{repo}/{version}/{tarball}"
                .to_string(),
            region: "us-west-2".to_string(),
            use_ssh_config: true,
            strip_paths: vec![PathBuf::from("prod_conf"), PathBuf::from("README.md")],
            remote: "origin".to_string(),
            work_dir: PathBuf::from("."),
        }
    }
}

impl PackagerConfig {
    /// Load configuration from a TOML file on top of the defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config = toml::from_str(&contents).map_err(|source| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    /// Load from an optional file, then apply environment overrides and validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(format!("{ENV_PREFIX}{key}")).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (keys without the prefix)
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("REPO_NAME") {
            self.repo_name = v;
        }
        if let Some(v) = lookup("REPO_URL") {
            self.repo_url = v;
        }
        if let Some(v) = lookup("BUCKET_TEMPLATE") {
            self.bucket_template = v;
        }
        if let Some(v) = lookup("REGION") {
            self.region = v;
        }
        if let Some(v) = lookup("USE_SSH_CONFIG") {
            self.use_ssh_config = parse_bool("USE_SSH_CONFIG", &v)?;
        }
        Ok(())
    }

    /// Check that the configuration can produce valid paths and commands
    pub fn validate(&self) -> Result<()> {
        if self.repo_name.trim().is_empty() {
            return Err(invalid("repo_name", "must not be empty"));
        }
        if self.repo_url.trim().is_empty() {
            return Err(invalid("repo_url", "must not be empty"));
        }
        if self.region.trim().is_empty() {
            return Err(invalid("region", "must not be empty"));
        }
        if self.remote.trim().is_empty() || self.remote.starts_with('-') {
            return Err(invalid("remote", "must be a remote name"));
        }
        for placeholder in ["{version}", "{tarball}"] {
            if !self.bucket_template.contains(placeholder) {
                return Err(invalid(
                    "bucket_template",
                    &format!("missing {placeholder} placeholder"),
                ));
            }
        }
        for path in &self.strip_paths {
            let escapes = path
                .components()
                .any(|c| !matches!(c, Component::Normal(_)));
            if path.as_os_str().is_empty() || escapes {
                return Err(invalid(
                    "strip_paths",
                    &format!("'{}' must be a relative path inside the checkout", path.display()),
                ));
            }
        }
        Ok(())
    }

    /// Clone URL with the repository name filled in
    pub fn clone_url(&self) -> String {
        self.repo_url.replace("{repo}", &self.repo_name)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(invalid(key, &format!("'{other}' is not a boolean"))),
    }
}

fn invalid(key: &str, reason: &str) -> crate::error::ReleaseError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
