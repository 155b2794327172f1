use std::io;
use std::process::Command;

use thiserror::Error;
use which::which;

use crate::dispatch::Dispatch;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("php binary {0} not found or not executable")]
    BinaryUnavailable(String, #[source] which::Error),
    #[error("launching {0}")]
    Spawn(String, #[source] io::Error),
}

/// Hand the invocation over to the selected interpreter.
///
/// The child inherits stdin, stdout, stderr, and the full environment; the
/// parent blocks until it exits and returns the child's exit code as its
/// own. A child killed by a signal reports code 1.
pub fn run(dispatch: &Dispatch) -> Result<i32, ExecError> {
    let display = dispatch.bin.display().to_string();

    // Fail with a readable message before spawning a binary that isn't there.
    which(&dispatch.bin).map_err(|err| ExecError::BinaryUnavailable(display.clone(), err))?;

    let status = Command::new(&dispatch.bin)
        .args(&dispatch.args)
        .status()
        .map_err(|err| ExecError::Spawn(display, err))?;

    Ok(status.code().unwrap_or(1))
}
