//! Running the extracted binary

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use greenlight_core::{LauncherError, Result};
use tracing::debug;

/// Options for executing the extracted binary
#[derive(Debug, Clone)]
pub struct ExecOptions {
    pub binary: PathBuf,
    /// Name used in error messages
    pub binary_name: String,
    pub args: Vec<OsString>,
}

/// Returns the path of the expected binary inside `dir`
///
/// # Errors
///
/// `ExtractionIncomplete` when `<dir>/<binary_name>` is not a regular file
pub fn locate_binary(dir: &Path, binary_name: &str) -> Result<PathBuf> {
    let path = dir.join(binary_name);
    if path.is_file() {
        Ok(path)
    } else {
        Err(LauncherError::ExtractionIncomplete {
            binary_name: binary_name.to_string(),
            path,
        })
    }
}

/// Runs the binary with inherited stdio and waits for it to exit
///
/// Returns the child's exit code. On Unix a child killed by a signal
/// reports `128 + signal`, matching shell convention.
pub fn exec_binary(options: ExecOptions) -> Result<i32> {
    debug!(binary = %options.binary.display(), args = ?options.args, "spawning");

    let mut child = Command::new(&options.binary)
        .args(&options.args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| LauncherError::Spawn {
            binary_name: options.binary_name.clone(),
            source: e,
        })?;

    let status = child.wait().map_err(|e| LauncherError::ChildRuntime {
        binary_name: options.binary_name.clone(),
        source: e,
    })?;

    let code = exit_code(status);
    debug!(code, "child exited");
    Ok(code)
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
