pub mod config;
pub mod constraint;
pub mod dispatch;
pub mod executor;
pub mod resolver;
pub mod target_detect;
pub mod version;

use std::ffi::OsString;

use anyhow::Context;

/// Run the dispatcher and return an exit code.
///
/// Any failure before the child process starts prints a diagnostic to
/// stderr and yields 1; otherwise the child's exit code is returned.
pub fn run_cli() -> i32 {
    match dispatch_current_invocation() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("php-dispatch: {err:#}");
            1
        }
    }
}

fn dispatch_current_invocation() -> anyhow::Result<i32> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    let config_file = config::config_path(&home)?;
    let table = config::load_config(&config_file)?;

    let cwd = std::env::current_dir().context("resolving working directory")?;
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();
    let env_override = target_detect::env_override();

    let dispatch = dispatch::plan(&table, env_override.as_deref(), &cwd, args)?;
    let code = executor::run(&dispatch)?;
    Ok(code)
}
