//! Shared helper functions for command execution.

use crate::cli::OutputManager;
use crate::error::{CliError, Result};
use std::io::{BufRead, Write};

/// Warn that `operation` is irrevocable and ask the operator to confirm.
///
/// Returns `Ok(())` when confirmed or `skip` is set.
pub(super) fn confirm_irrevocable(
    operation: &str,
    target: &str,
    skip: bool,
    output: &OutputManager,
) -> Result<()> {
    // The warning is shown even in quiet mode.
    eprintln!("⚠ {operation} publishes to {target}.");
    eprintln!("  This cannot be undone. Only continue with authorization from the release owner.");
    if skip {
        let _ = output.warn("Confirmation skipped with --yes");
        return Ok(());
    }

    let stdin = std::io::stdin();
    let confirmed = prompt_confirmation(&mut stdin.lock(), &mut std::io::stderr(), "Continue?")?;
    if confirmed {
        Ok(())
    } else {
        Err(CliError::NotConfirmed {
            operation: operation.to_string(),
        }
        .into())
    }
}

/// Prompt for y/n input; anything other than `y`/`yes` declines
pub(super) fn prompt_confirmation<I: BufRead, O: Write>(
    input: &mut I,
    out: &mut O,
    prompt: &str,
) -> std::io::Result<bool> {
    write!(out, "{prompt} [y/N]: ")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let response = line.trim().to_lowercase();
    Ok(matches!(response.as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_accepts_yes() {
        for answer in ["y\n", "YES\n", "  yes  \n"] {
            let mut out = Vec::new();
            assert!(prompt_confirmation(&mut Cursor::new(answer), &mut out, "Go?").unwrap());
            assert_eq!(String::from_utf8(out).unwrap(), "Go? [y/N]: ");
        }
    }

    #[test]
    fn test_prompt_declines_by_default() {
        for answer in ["\n", "n\n", "sure\n", ""] {
            let mut out = Vec::new();
            assert!(!prompt_confirmation(&mut Cursor::new(answer), &mut out, "Go?").unwrap());
        }
    }
}
