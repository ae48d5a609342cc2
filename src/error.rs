//! Error types for release_packager operations.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for release_packager operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all release_packager operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// CLI argument and input validation errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// External command errors
    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    /// Git operation errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    /// Packaging errors
    #[error("Package error: {0}")]
    Package(#[from] PackageError),

    /// Publishing errors
    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    /// File system error with path context.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        /// Context describing the operation (e.g., "creating release folder")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: std::io::Error,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error walking the release folder
    #[error("Walk error: {0}")]
    Walkdir(#[from] walkdir::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Version identifier cannot be used as a tag and folder name
    #[error("Invalid version '{version}': {reason}")]
    InvalidVersion {
        /// Version string as given
        version: String,
        /// Reason for the error
        reason: String,
    },

    /// Destination outside the allowed set
    #[error("Invalid destination on s3 '{dest}'. Has to be either `dev_releases` or `releases`")]
    InvalidDestination {
        /// Destination as given
        dest: String,
    },

    /// Operator declined the confirmation prompt
    #[error("Operation '{operation}' was not confirmed")]
    NotConfirmed {
        /// Operation that required confirmation
        operation: String,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file {}: {reason}", .path.display())]
    ReadFailed {
        /// Path of the config file
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// Config file could not be parsed
    #[error("Failed to parse config file {}: {source}", .path.display())]
    ParseFailed {
        /// Path of the config file
        path: PathBuf,
        /// Parsing error
        #[source]
        source: toml::de::Error,
    },

    /// Config value is unusable
    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue {
        /// Config key
        key: String,
        /// Reason for the error
        reason: String,
    },
}

/// External command errors
#[derive(Error, Debug)]
pub enum CommandError {
    /// Program is not installed or not on PATH
    #[error("Required tool '{program}' not found on PATH")]
    ToolNotFound {
        /// Program name
        program: String,
    },

    /// Program could not be started
    #[error("Failed to run '{command}': {source}")]
    SpawnFailed {
        /// Command line
        command: String,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },

    /// Program exited unsuccessfully
    #[error("'{command}' exited with {}: {stderr}", exit_label(.code))]
    NonZeroExit {
        /// Command line
        command: String,
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
        /// Captured standard error
        stderr: String,
    },
}

/// Git operation errors
#[derive(Error, Debug)]
pub enum GitError {
    /// Clone failed
    #[error("Failed to clone '{url}': {reason}")]
    CloneFailed {
        /// Repository URL
        url: String,
        /// Reason for the error
        reason: String,
    },

    /// Fetch failed
    #[error("Failed to fetch from '{remote}': {reason}")]
    FetchFailed {
        /// Remote name
        remote: String,
        /// Reason for the error
        reason: String,
    },

    /// Tag or ref could not be checked out
    #[error("Git ref '{reference}' not found: {reason}")]
    RefNotFound {
        /// Ref name
        reference: String,
        /// Reason for the error
        reason: String,
    },

    /// rev-parse produced something that is not a full commit hash
    #[error("Invalid commit hash '{hash}'")]
    InvalidCommitHash {
        /// Output of rev-parse
        hash: String,
    },
}

/// Packaging errors
#[derive(Error, Debug)]
pub enum PackageError {
    /// Release folder already exists
    #[error("Release folder {} already exists", .path.display())]
    FolderExists {
        /// Folder path
        path: PathBuf,
    },

    /// Provenance file is malformed
    #[error("Invalid version.txt: {reason}")]
    InvalidProvenance {
        /// Reason for the error
        reason: String,
    },

    /// Archive creation failed
    #[error("Failed to create archive {}: {reason}", .path.display())]
    ArchiveFailed {
        /// Tarball path
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },
}

/// Publishing errors
#[derive(Error, Debug)]
pub enum PublishError {
    /// Tarball path does not point at a file
    #[error("Tarball {} not found", .path.display())]
    TarballNotFound {
        /// Tarball path
        path: PathBuf,
    },

    /// Upload failed
    #[error("Failed to upload {} to {destination}: {reason}", .tarball.display())]
    UploadFailed {
        /// Local tarball
        tarball: PathBuf,
        /// Artifact path in the object store
        destination: String,
        /// Reason for the error
        reason: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "signal".to_string(),
    }
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Cli(CliError::InvalidDestination { .. }) => vec![
                "Use --dest dev_releases for development builds".to_string(),
                "Use --dest releases for production builds".to_string(),
            ],
            ReleaseError::Package(PackageError::FolderExists { path }) => vec![
                format!("Remove the leftover release folder: rm -r {}", path.display()),
                "Check that no other packaging run is in progress for this version".to_string(),
            ],
            ReleaseError::Git(GitError::CloneFailed { .. }) => vec![
                "Check SSH key configuration: ssh -T git@github.com".to_string(),
                "Verify the repository URL in the config file".to_string(),
            ],
            ReleaseError::Git(GitError::RefNotFound { reference, .. }) => vec![
                format!("Verify the tag exists upstream: git ls-remote --tags origin {reference}"),
                "Push the tag before packaging: git push origin --tags".to_string(),
            ],
            ReleaseError::Command(CommandError::ToolNotFound { program }) => vec![
                format!("Install '{program}' and make sure it is on PATH"),
            ],
            ReleaseError::Publish(PublishError::UploadFailed { tarball, .. }) => vec![
                "Check AWS credentials: aws sts get-caller-identity".to_string(),
                format!(
                    "The tarball was kept at {}; retry with the push command",
                    tarball.display()
                ),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Check if this error was raised before anything touched disk or network
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ReleaseError::Cli(_)
                | ReleaseError::Config(_)
                | ReleaseError::Package(PackageError::FolderExists { .. })
        )
    }
}

/// Extension trait for filesystem operations with automatic path context.
///
/// Wraps I/O errors with the path that caused them for better diagnostics.
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase describing the operation,
    /// e.g., "reading file", "creating directory".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| ReleaseError::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}
