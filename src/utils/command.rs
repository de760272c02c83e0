//! External command execution for the site-builder trigger.

use anyhow::{Context, Result, bail};
use std::{
    path::Path,
    process::{Command, Output},
};

/// Execute a command (given as `["hugo", "--quiet", ...]`) in `root` and
/// capture its output.
///
/// # Errors
/// Returns an error if the command cannot be spawned or exits non-zero; the
/// trimmed stderr is carried in the error message.
pub fn exec(root: Option<&Path>, cmd: &[String]) -> Result<Output> {
    let name = cmd.first().context("Empty command")?;

    let mut command = Command::new(name);
    command.args(&cmd[1..]);
    if let Some(dir) = root {
        command.current_dir(dir);
    }

    let output = command
        .output()
        .with_context(|| format!("Failed to execute `{name}`"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "Command `{name}` failed with {}: {}",
            output.status,
            stderr.trim()
        );
    }

    Ok(output)
}
