use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::anyhow;

use crate::config::ConfigTable;
use crate::constraint::Constraint;
use crate::resolver::resolve;
use crate::target_detect::detect_target;

/// Everything the executor needs: which label won and what to run.
#[derive(Debug)]
pub struct Dispatch {
    pub label: String,
    pub bin: PathBuf,
    pub args: Vec<OsString>,
}

/// Run the full selection pipeline without touching the child process.
///
/// Detection falling back to the default label is the one non-fatal path;
/// every other gate (hard detection errors, no matching candidate, empty
/// binary path) aborts the invocation.
pub fn plan(
    table: &ConfigTable,
    env_override: Option<&str>,
    cwd: &Path,
    args: Vec<OsString>,
) -> anyhow::Result<Dispatch> {
    let raw = detect_target(env_override, cwd)?
        .unwrap_or_else(|| table.default_label().to_string());

    let constraint = Constraint::parse(&raw);
    let label = resolve(&constraint, &table.candidates())?;

    let bin = table
        .binary_for(&label)
        .filter(|path| !path.is_empty())
        .ok_or_else(|| anyhow!("version '{label}' has no binary path configured"))?;

    Ok(Dispatch {
        label,
        bin: PathBuf::from(bin),
        args,
    })
}
