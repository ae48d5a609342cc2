//! Command execution.
//!
//! Each command builds a [`ReleasePackager`](crate::ReleasePackager) from the
//! layered configuration, runs one operation and reports the outcome.

mod deploy;
mod helpers;
mod package;
mod push;

use crate::cli::{Args, Command, OutputManager};
use crate::config::PackagerConfig;
use crate::error::Result;

use deploy::execute_deploy;
use package::execute_package;
use push::execute_push;

/// Build configuration from the config file, environment and flags
pub fn resolve_config(args: &Args) -> Result<PackagerConfig> {
    let mut config = PackagerConfig::load(args.config.as_deref())?;
    if let Some(dir) = &args.work_dir {
        config.work_dir = dir.clone();
    }
    if args.no_ssh_config {
        config.use_ssh_config = false;
    }
    Ok(config)
}

/// Execute the parsed command, returning the process exit code
pub async fn execute_command(args: Args) -> Result<i32> {
    let output = OutputManager::new(args.quiet);

    let result = match resolve_config(&args) {
        Ok(config) => match &args.command {
            Command::Package { version } => execute_package(config, version, &output).await,
            Command::Push {
                tarball,
                version,
                dest,
                yes,
            } => execute_push(config, tarball, version, dest, *yes, &output).await,
            Command::Deploy { version, dest, yes } => {
                execute_deploy(config, version, dest, *yes, &output).await
            }
        },
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => Ok(0),
        Err(e) => {
            output.error(&format!("Command '{}' failed: {}", args.command.name(), e));
            output.hint("Recovery suggestions:");
            for suggestion in e.recovery_suggestions() {
                output.hint(&format!("  • {suggestion}"));
            }
            Ok(1)
        }
    }
}
