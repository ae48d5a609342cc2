//! External command execution.
//!
//! Commands are described as a program plus an argument array and run
//! without a shell. The [`CommandRunner`] trait is the seam between the
//! packaging workflow and the processes it drives.

use crate::error::{CommandError, Result};
use std::ffi::{OsStr, OsString};
use std::future::Future;
use std::path::{Path, PathBuf};

/// A single external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<OsString>,
    current_dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
}

impl Invocation {
    /// Create an invocation of `program` with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            envs: Vec::new(),
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Run in `dir` instead of the current directory
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Set an environment variable for the child
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Program name
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Working directory, if set
    pub fn get_current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Environment overrides
    pub fn get_envs(&self) -> &[(String, String)] {
        &self.envs
    }

    /// Human-readable command line for logs and error messages
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// Captured output of a successful command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

/// Runs invocations to completion
pub trait CommandRunner {
    /// Run `invocation`, failing unless it exits successfully
    fn run(&self, invocation: &Invocation) -> impl Future<Output = Result<CommandOutput>>;
}

/// Runs invocations as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let command_line = invocation.display();
        let program = which::which(invocation.program()).map_err(|_| CommandError::ToolNotFound {
            program: invocation.program().to_string(),
        })?;

        log::debug!("Running: {}", command_line);

        let mut cmd = tokio::process::Command::new(program);
        cmd.args(invocation.get_args())
            .stdin(std::process::Stdio::null())
            .kill_on_drop(true);
        if let Some(dir) = invocation.get_current_dir() {
            cmd.current_dir(dir);
        }
        for (key, value) in invocation.get_envs() {
            cmd.env(key, value);
        }

        let output = cmd.output().await.map_err(|source| CommandError::SpawnFailed {
            command: command_line.clone(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            return Err(CommandError::NonZeroExit {
                command: command_line,
                code: output.status.code(),
                stderr: stderr.trim().to_string(),
            }
            .into());
        }

        Ok(CommandOutput { stdout, stderr })
    }
}
